//! Field validation for submission input.
//!
//! Validation failures are data, not exceptions: callers get the full
//! list of field-scoped reasons in one pass so a form can show them all.

use crate::model::{NewSubmission, SECTIONS, TAGLINE_MAX, TITLE_MAX};

/// One validation failure, scoped to the field that caused it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Checks a new submission against the field rules.
///
/// - title: required, at most 120 characters after trimming
/// - tagline: required, at most 320 characters after trimming
/// - sections: names must come from the canonical set
///
/// # Returns
///
/// `Ok(())` when everything passes, otherwise every failure found.
pub fn validate(new: &NewSubmission) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    let title = new.title.trim();
    if title.is_empty() {
        errors.push(FieldError::new("title", "Title is required."));
    } else if title.chars().count() > TITLE_MAX {
        errors.push(FieldError::new(
            "title",
            format!("Title must be at most {} characters.", TITLE_MAX),
        ));
    }

    let tagline = new.tagline.trim();
    if tagline.is_empty() {
        errors.push(FieldError::new("tagline", "Tagline is required."));
    } else if tagline.chars().count() > TAGLINE_MAX {
        errors.push(FieldError::new(
            "tagline",
            format!("Tagline must be at most {} characters.", TAGLINE_MAX),
        ));
    }

    for (name, _) in &new.sections {
        if !SECTIONS.contains(&name.as_str()) {
            errors.push(FieldError::new(
                "sections",
                format!("Unknown section {:?}.", name),
            ));
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
