pub mod file;
pub mod memory;
pub mod record;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use record::ContactRecord;

use crate::error::PhonebookResult;
use crate::model::{Contact, ContactField};

/// Persistent contact storage.
///
/// Backends are interchangeable: callers only ever see these four operations.
/// Records are identified by [`Contact::id`]; everything else about a contact
/// may change between `get` and `update`.
pub trait ContactStore {
    /// Stores a new contact. Fails with `Duplicate` if its identifier is taken.
    fn add(&mut self, contact: &Contact) -> PhonebookResult<()>;

    /// Returns contacts in insertion order, optionally filtered by
    /// [`matches_search`]. `None` and `Some("")` both return everything.
    fn get(&self, search: Option<&str>) -> PhonebookResult<Vec<Contact>>;

    /// Replaces the stored contact that has the same identifier.
    fn update(&mut self, contact: &Contact) -> PhonebookResult<()>;

    /// Deletes the stored contact that has the same identifier.
    fn remove(&mut self, contact: &Contact) -> PhonebookResult<()>;
}

/// Case-insensitive substring match against every field and the identifier,
/// joined by single spaces.
pub fn matches_search(contact: &Contact, needle: &str) -> bool {
    search_text(contact)
        .to_lowercase()
        .contains(&needle.to_lowercase())
}

fn search_text(contact: &Contact) -> String {
    let id = contact.id().to_string();
    let mut parts: Vec<&str> = ContactField::ALL.iter().map(|&f| contact.get(f)).collect();
    parts.push(&id);
    parts.join(" ")
}

/// Normalizes the optional search argument: empty means "no filter".
pub(crate) fn search_filter(search: Option<&str>) -> Option<&str> {
    search.filter(|s| !s.is_empty())
}
