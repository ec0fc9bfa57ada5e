//! One-shot flash payloads.
//!
//! A flash is written by one request and read by the next page that asks for
//! it. Mutations leave a plain message; a rejected edit leaves the structured
//! validation errors so the edit form can show them after the redirect.

use serde::{Deserialize, Serialize};

use crate::validation::{FieldError, ValidationErrors};

/// A value carried to the next request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Flash {
    /// A status line for the contact list.
    Message(String),
    /// Field errors for the edit form.
    Errors(ValidationErrors),
}

impl Flash {
    /// Creates a message flash.
    pub fn message(text: impl Into<String>) -> Self {
        Flash::Message(text.into())
    }

    /// Returns the message text, if this is a message flash.
    pub fn as_message(&self) -> Option<&str> {
        match self {
            Flash::Message(text) => Some(text),
            Flash::Errors(_) => None,
        }
    }

    /// Field errors carried by this flash; empty for a message flash.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Flash::Message(_) => &[],
            Flash::Errors(errors) => errors.as_slice(),
        }
    }
}

impl From<ValidationErrors> for Flash {
    fn from(errors: ValidationErrors) -> Self {
        Flash::Errors(errors)
    }
}
