use std::hash::{Hash, Hasher};

use super::ids::ContactId;
use crate::error::PhonebookResult;
use crate::validation;

/// The user-editable fields of a contact, in storage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    FirstName,
    LastName,
    ParentName,
    Organization,
    WorkPhone,
    MobilePhone,
}

impl ContactField {
    pub const ALL: [ContactField; 6] = [
        ContactField::FirstName,
        ContactField::LastName,
        ContactField::ParentName,
        ContactField::Organization,
        ContactField::WorkPhone,
        ContactField::MobilePhone,
    ];

    /// Lower-case name used in error messages.
    pub fn label(self) -> &'static str {
        match self {
            ContactField::FirstName => "first name",
            ContactField::LastName => "last name",
            ContactField::ParentName => "parent name",
            ContactField::Organization => "organization",
            ContactField::WorkPhone => "work phone",
            ContactField::MobilePhone => "mobile phone",
        }
    }

    /// Capitalized name used in prompts and table headers.
    pub fn title(self) -> &'static str {
        match self {
            ContactField::FirstName => "First name",
            ContactField::LastName => "Last name",
            ContactField::ParentName => "Parent name",
            ContactField::Organization => "Organization",
            ContactField::WorkPhone => "Work phone",
            ContactField::MobilePhone => "Mobile phone",
        }
    }

    pub fn max_chars(self) -> usize {
        match self {
            ContactField::Organization => 50,
            ContactField::WorkPhone | ContactField::MobilePhone => validation::MAX_PHONE_CHARS,
            _ => 20,
        }
    }

    pub fn is_required(self) -> bool {
        self == ContactField::FirstName
    }
}

/// Raw, unvalidated contact input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub first_name: String,
    pub last_name: String,
    pub parent_name: String,
    pub organization: String,
    pub work_phone: String,
    pub mobile_phone: String,
}

impl ContactDraft {
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::FirstName => &self.first_name,
            ContactField::LastName => &self.last_name,
            ContactField::ParentName => &self.parent_name,
            ContactField::Organization => &self.organization,
            ContactField::WorkPhone => &self.work_phone,
            ContactField::MobilePhone => &self.mobile_phone,
        }
    }

    pub fn set(&mut self, field: ContactField, value: String) {
        let slot = match field {
            ContactField::FirstName => &mut self.first_name,
            ContactField::LastName => &mut self.last_name,
            ContactField::ParentName => &mut self.parent_name,
            ContactField::Organization => &mut self.organization,
            ContactField::WorkPhone => &mut self.work_phone,
            ContactField::MobilePhone => &mut self.mobile_phone,
        };
        *slot = value;
    }

    /// Checks every field rule, then the phone requirement, and reports all failures.
    pub fn validate(&self) -> PhonebookResult<()> {
        let per_field = ContactField::ALL.iter().map(|&field| {
            let value = self.get(field);
            match field {
                ContactField::WorkPhone | ContactField::MobilePhone => {
                    validation::phone_number(value, field.label())
                }
                _ if field.is_required() => {
                    validation::required(value, field.label(), field.max_chars())
                }
                _ => validation::max_chars(value, field.label(), field.max_chars()),
            }
        });
        let cross_field = validation::at_least_one_phone(&self.work_phone, &self.mobile_phone);
        validation::collect(per_field.chain(std::iter::once(cross_field)))
    }
}

/// A validated phonebook entry.
///
/// Fields are private: a changed contact is a new value built with
/// [`Contact::with_id`] and handed to the store, never an edited one.
/// Equality and hashing look only at the identifier.
#[derive(Debug, Clone)]
pub struct Contact {
    id: ContactId,
    fields: ContactDraft,
}

impl Contact {
    /// Validates the draft and assigns a fresh identifier.
    pub fn new(draft: ContactDraft) -> PhonebookResult<Self> {
        Self::with_id(draft, ContactId::generate())
    }

    /// Validates the draft and keeps an existing identifier.
    pub fn with_id(draft: ContactDraft, id: ContactId) -> PhonebookResult<Self> {
        draft.validate()?;
        Ok(Self { id, fields: draft })
    }

    pub fn id(&self) -> ContactId {
        self.id
    }

    pub fn get(&self, field: ContactField) -> &str {
        self.fields.get(field)
    }

    pub fn first_name(&self) -> &str {
        &self.fields.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.fields.last_name
    }

    pub fn parent_name(&self) -> &str {
        &self.fields.parent_name
    }

    pub fn organization(&self) -> &str {
        &self.fields.organization
    }

    pub fn work_phone(&self) -> &str {
        &self.fields.work_phone
    }

    pub fn mobile_phone(&self) -> &str {
        &self.fields.mobile_phone
    }

    /// A copy of the field values, for building an edited contact.
    pub fn draft(&self) -> ContactDraft {
        self.fields.clone()
    }

    /// True when both values describe the same stored entry.
    ///
    /// Only identifiers are compared. Two entries with the same identifier but
    /// different fields are the old and new versions of one contact.
    pub fn same_identity(&self, other: &Contact) -> bool {
        self.id == other.id
    }
}

impl PartialEq for Contact {
    fn eq(&self, other: &Self) -> bool {
        self.same_identity(other)
    }
}

impl Eq for Contact {}

impl Hash for Contact {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
