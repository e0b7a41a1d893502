use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{FieldViolation, PhonebookError, PhonebookResult};

pub const MAX_PHONE_CHARS: usize = 12;

static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?\d*$").expect("phone pattern is a valid regex"));

pub type Check = Result<(), FieldViolation>;

/// Validates that a value is non-empty and fits within `max` characters.
/// Whitespace counts as content; trimming is the caller's job.
pub fn required(value: &str, field: &'static str, max: usize) -> Check {
    if value.is_empty() {
        return Err(FieldViolation::new(field, "cannot be empty"));
    }
    max_chars(value, field, max)
}

/// Validates that a value has at most `max` characters (not bytes).
pub fn max_chars(value: &str, field: &'static str, max: usize) -> Check {
    if value.chars().count() > max {
        Err(FieldViolation::new(
            field,
            format!("must be at most {} characters", max),
        ))
    } else {
        Ok(())
    }
}

/// Validates an optional phone number: digits with an optional leading `+`.
pub fn phone_number(value: &str, field: &'static str) -> Check {
    max_chars(value, field, MAX_PHONE_CHARS)?;
    if PHONE_PATTERN.is_match(value) {
        Ok(())
    } else {
        Err(FieldViolation::new(
            field,
            "may contain only digits with an optional leading '+'",
        ))
    }
}

pub fn at_least_one_phone(work: &str, mobile: &str) -> Check {
    if work.is_empty() && mobile.is_empty() {
        Err(FieldViolation::new(
            "phone",
            "is required: enter a work or mobile number",
        ))
    } else {
        Ok(())
    }
}

/// Runs every check and reports all failures together.
pub fn collect(checks: impl IntoIterator<Item = Check>) -> PhonebookResult<()> {
    let violations: Vec<FieldViolation> = checks.into_iter().filter_map(Result::err).collect();
    if violations.is_empty() {
        Ok(())
    } else {
        Err(PhonebookError::Validation(violations))
    }
}

/// Trims a user-entered value.
pub fn trim_input(value: &str) -> String {
    value.trim().to_string()
}
