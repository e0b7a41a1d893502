pub mod contact;
pub mod ids;

pub use contact::{Contact, ContactDraft, ContactField};
pub use ids::ContactId;
