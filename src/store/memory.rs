use super::{matches_search, search_filter, ContactStore};
use crate::error::{PhonebookError, PhonebookResult};
use crate::model::Contact;

/// In-memory backend with the same semantics as [`super::FileStore`],
/// including moving an updated contact to the end.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    contacts: Vec<Contact>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    fn take(&mut self, contact: &Contact) -> PhonebookResult<Contact> {
        let pos = self
            .contacts
            .iter()
            .position(|c| c.same_identity(contact))
            .ok_or_else(|| PhonebookError::NotFound {
                id: contact.id().to_string(),
            })?;
        Ok(self.contacts.remove(pos))
    }
}

impl ContactStore for MemoryStore {
    fn add(&mut self, contact: &Contact) -> PhonebookResult<()> {
        if self.contacts.iter().any(|c| c.same_identity(contact)) {
            return Err(PhonebookError::Duplicate {
                id: contact.id().to_string(),
            });
        }
        self.contacts.push(contact.clone());
        Ok(())
    }

    fn get(&self, search: Option<&str>) -> PhonebookResult<Vec<Contact>> {
        Ok(match search_filter(search) {
            Some(needle) => self
                .contacts
                .iter()
                .filter(|c| matches_search(c, needle))
                .cloned()
                .collect(),
            None => self.contacts.clone(),
        })
    }

    fn update(&mut self, contact: &Contact) -> PhonebookResult<()> {
        self.take(contact)?;
        self.contacts.push(contact.clone());
        Ok(())
    }

    fn remove(&mut self, contact: &Contact) -> PhonebookResult<()> {
        self.take(contact).map(|_| ())
    }
}
