use std::fmt;

use thiserror::Error;

/// One broken rule on one field of a contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

#[derive(Debug, Error)]
pub enum PhonebookError {
    #[error("Invalid contact: {}", join_violations(.0))]
    Validation(Vec<FieldViolation>),

    #[error("Contact already exists: {id}")]
    Duplicate { id: String },

    #[error("Contact not found: {id}")]
    NotFound { id: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl PhonebookError {
    /// Whether the user can fix this by re-entering input or refreshing the view.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            PhonebookError::Validation(_)
                | PhonebookError::Duplicate { .. }
                | PhonebookError::NotFound { .. }
        )
    }

    /// The violations carried by a validation error, empty for every other kind.
    pub fn violations(&self) -> &[FieldViolation] {
        match self {
            PhonebookError::Validation(v) => v,
            _ => &[],
        }
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

pub type PhonebookResult<T> = Result<T, PhonebookError>;
