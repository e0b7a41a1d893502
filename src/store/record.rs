use csv::StringRecord;
use serde::{Deserialize, Serialize};

use crate::error::{FieldViolation, PhonebookError, PhonebookResult};
use crate::model::{Contact, ContactDraft, ContactId};

/// Number of columns in a stored row.
pub const FIELD_COUNT: usize = 7;

/// One stored row. Column order is the declaration order below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub first_name: String,
    pub last_name: String,
    pub parent_name: String,
    pub organization: String,
    pub work_phone: String,
    pub mobile_phone: String,
    pub uid: String,
}

impl ContactRecord {
    /// Reads a raw CSV row, rejecting rows with the wrong number of columns.
    pub fn from_row(row: &StringRecord) -> PhonebookResult<Self> {
        if row.len() != FIELD_COUNT {
            return Err(PhonebookError::Validation(vec![FieldViolation::new(
                "record",
                format!("has {} fields, expected {}", row.len(), FIELD_COUNT),
            )]));
        }
        Ok(row.deserialize(None)?)
    }

    /// Rebuilds and validates the contact. Reports a bad identifier together
    /// with any field violations.
    pub fn into_contact(self) -> PhonebookResult<Contact> {
        let draft = ContactDraft {
            first_name: self.first_name,
            last_name: self.last_name,
            parent_name: self.parent_name,
            organization: self.organization,
            work_phone: self.work_phone,
            mobile_phone: self.mobile_phone,
        };

        let mut violations = match draft.validate() {
            Ok(()) => Vec::new(),
            Err(PhonebookError::Validation(v)) => v,
            Err(e) => return Err(e),
        };

        match ContactId::parse(&self.uid) {
            Ok(id) if violations.is_empty() => Contact::with_id(draft, id),
            Ok(_) => Err(PhonebookError::Validation(violations)),
            Err(e) => {
                violations.push(FieldViolation::new(
                    "identifier",
                    format!("is not a valid UUID ({})", e),
                ));
                Err(PhonebookError::Validation(violations))
            }
        }
    }
}

impl From<&Contact> for ContactRecord {
    fn from(contact: &Contact) -> Self {
        Self {
            first_name: contact.first_name().to_string(),
            last_name: contact.last_name().to_string(),
            parent_name: contact.parent_name().to_string(),
            organization: contact.organization().to_string(),
            work_phone: contact.work_phone().to_string(),
            mobile_phone: contact.mobile_phone().to_string(),
            uid: contact.id().to_string(),
        }
    }
}
