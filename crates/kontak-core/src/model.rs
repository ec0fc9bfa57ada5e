//! The contact document and the field sets that produce it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::{Error, Result};

// ============================================================================
// ContactId
// ============================================================================

/// Unique identifier for a stored contact.
///
/// Assigned by the store on insert and never changed afterwards. Internally
/// represented as a UUID v4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContactId(Uuid);

impl ContactId {
    /// Creates a new random contact ID.
    ///
    /// # Examples
    ///
    /// ```
    /// use kontak_core::ContactId;
    ///
    /// let a = ContactId::new();
    /// let b = ContactId::new();
    /// assert_ne!(a, b);
    /// ```
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Parses an id submitted through a form, trimming surrounding whitespace.
    pub fn parse(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        Uuid::parse_str(trimmed)
            .map(Self)
            .map_err(|e| Error::invalid_id(trimmed, e))
    }
}

impl Default for ContactId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for ContactId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl std::str::FromStr for ContactId {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ============================================================================
// ContactFields
// ============================================================================

/// The three user-editable fields of a contact, already sanitized.
///
/// This is what the store writes on insert and on update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFields {
    /// Display name, unique across the collection.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Mobile phone number.
    #[serde(rename = "nohp")]
    pub phone: String,
}

impl ContactFields {
    /// Creates a field set from raw values.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    /// Checks that every field is populated.
    ///
    /// Stores call this before writing so a document can never be persisted
    /// without all three values.
    pub fn ensure_present(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::MissingField("name"));
        }
        if self.email.is_empty() {
            return Err(Error::MissingField("email"));
        }
        if self.phone.is_empty() {
            return Err(Error::MissingField("nohp"));
        }
        Ok(())
    }
}

// ============================================================================
// Contact
// ============================================================================

/// A stored contact document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Store-assigned identifier.
    #[serde(rename = "_id")]
    pub id: ContactId,
    /// Display name, unique across the collection.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Mobile phone number.
    #[serde(rename = "nohp")]
    pub phone: String,
    /// Set by the store on every update; absent on freshly created contacts.
    #[serde(
        rename = "lastModified",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub last_modified: Option<DateTime<Utc>>,
}

impl Contact {
    /// Builds a new, never-updated contact with the given id.
    pub fn from_fields(id: ContactId, fields: ContactFields) -> Self {
        Self {
            id,
            name: fields.name,
            email: fields.email,
            phone: fields.phone,
            last_modified: None,
        }
    }

    /// Replaces all editable fields and stamps `last_modified`.
    pub fn apply_update(&mut self, fields: ContactFields, now: DateTime<Utc>) {
        self.name = fields.name;
        self.email = fields.email;
        self.phone = fields.phone;
        self.last_modified = Some(now);
    }

    /// Returns the editable fields of this contact.
    pub fn fields(&self) -> ContactFields {
        ContactFields::new(&self.name, &self.email, &self.phone)
    }
}

// ============================================================================
// ContactForm
// ============================================================================

/// Raw add/edit form input, exactly as submitted.
///
/// Missing fields deserialize as empty strings so that absence is reported
/// by the validation rules rather than by the extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    /// Submitted name.
    pub name: String,
    /// Submitted email.
    pub email: String,
    /// Submitted phone number.
    pub nohp: String,
}

impl ContactForm {
    /// Creates a form from raw values.
    pub fn new(name: impl Into<String>, email: impl Into<String>, nohp: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            nohp: nohp.into(),
        }
    }

    /// Returns the trimmed field set the rules are evaluated against.
    pub fn sanitized(&self) -> ContactFields {
        ContactFields::new(self.name.trim(), self.email.trim(), self.nohp.trim())
    }
}
