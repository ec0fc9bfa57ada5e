//! Field validation for the add and edit forms.
//!
//! A [`Validator`] maps each field name to an ordered chain of
//! predicate + message rules. Every rule of every field is evaluated and all
//! failures are collected; nothing short-circuits.
//!
//! Name uniqueness needs a store lookup, so it is not a rule here. The web
//! layer runs [`check_unique_name`] itself once the structural rules pass.
//!
//! # Usage
//!
//! ```rust
//! use kontak_core::{ContactForm, Validator};
//!
//! let errors = Validator::contact()
//!     .validate(&ContactForm::new("Budi", "not-an-email", "abc"))
//!     .unwrap_err();
//! assert_eq!(errors.for_field("email").count(), 1);
//! assert_eq!(errors.for_field("nohp").count(), 2);
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

use crate::messages;
use crate::model::{Contact, ContactFields, ContactForm};

// ============================================================================
// Errors
// ============================================================================

/// A single failed rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Form field the rule applies to.
    pub field: String,
    /// Human-readable message.
    #[serde(rename = "msg")]
    pub message: String,
}

impl FieldError {
    /// Creates a field error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every rule failure from one submission, in rule order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a failure.
    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    /// Returns `true` if no rule failed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failures.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// All failures as a slice.
    pub fn as_slice(&self) -> &[FieldError] {
        &self.0
    }

    /// Iterates over all failures.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.0.iter()
    }

    /// Messages reported for one field.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .iter()
            .filter(move |e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Returns `true` if any failure carries this message.
    pub fn contains_message(&self, message: &str) -> bool {
        self.0.iter().any(|e| e.message == message)
    }

    /// Consumes the collection.
    pub fn into_vec(self) -> Vec<FieldError> {
        self.0
    }
}

impl From<FieldError> for ValidationErrors {
    fn from(error: FieldError) -> Self {
        Self(vec![error])
    }
}

impl From<Vec<FieldError>> for ValidationErrors {
    fn from(errors: Vec<FieldError>) -> Self {
        Self(errors)
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

// ============================================================================
// Rules
// ============================================================================

/// A predicate over a sanitized field value.
pub type Predicate = fn(&str) -> bool;

#[derive(Debug, Clone, Copy)]
struct Rule {
    predicate: Predicate,
    message: &'static str,
}

#[derive(Debug, Clone)]
struct FieldRules {
    field: &'static str,
    rules: Vec<Rule>,
}

/// Ordered rule chains keyed by field name.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    fields: Vec<FieldRules>,
}

impl Validator {
    /// Creates a validator with no rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule to a field's chain, creating the chain if needed.
    pub fn rule(mut self, field: &'static str, predicate: Predicate, message: &'static str) -> Self {
        let rule = Rule { predicate, message };
        match self.fields.iter_mut().find(|f| f.field == field) {
            Some(chain) => chain.rules.push(rule),
            None => self.fields.push(FieldRules {
                field,
                rules: vec![rule],
            }),
        }
        self
    }

    /// The rules shared by the add and edit forms.
    pub fn contact() -> Self {
        Self::new()
            .rule("name", is_present, messages::NAME_REQUIRED)
            .rule("email", is_present, messages::EMAIL_REQUIRED)
            .rule("email", is_email, messages::EMAIL_INVALID)
            .rule("nohp", is_present, messages::PHONE_REQUIRED)
            .rule("nohp", is_numeric, messages::PHONE_NOT_NUMERIC)
            .rule("nohp", is_id_mobile_phone, messages::PHONE_INVALID)
    }

    /// Names of the fields that carry rules, in evaluation order.
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.field)
    }

    /// Trims the form and evaluates every rule.
    ///
    /// Returns the sanitized fields when all rules pass, otherwise every
    /// failure in field-then-rule order.
    pub fn validate(&self, form: &ContactForm) -> Result<ContactFields, ValidationErrors> {
        let fields = form.sanitized();
        let mut errors = ValidationErrors::new();

        for chain in &self.fields {
            let value = field_value(&fields, chain.field);
            for rule in &chain.rules {
                if !(rule.predicate)(value) {
                    errors.push(FieldError::new(chain.field, rule.message));
                }
            }
        }

        if errors.is_empty() {
            Ok(fields)
        } else {
            Err(errors)
        }
    }
}

fn field_value<'a>(fields: &'a ContactFields, field: &str) -> &'a str {
    match field {
        "name" => &fields.name,
        "email" => &fields.email,
        "nohp" => &fields.phone,
        _ => "",
    }
}

// ============================================================================
// Predicates
// ============================================================================

#[allow(clippy::expect_used)]
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*",
        r"@(?:[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+",
        r"(?:[A-Za-z]{2,63}|xn--[A-Za-z0-9-]{1,59})$",
    ))
    .expect("Invalid email regex")
});

// Operator prefixes for Telkomsel, Indosat, XL, Axis, Tri, and Smartfren.
#[allow(clippy::expect_used)]
static ID_MOBILE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\+?62|0)8(?:1[1-9]|2[1238]|3[1238]|5[1-35-9]|7[78]|9[5-9]|8[1-9])\d{5,11}$")
        .expect("Invalid mobile phone regex")
});

/// Non-empty after trimming.
pub fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Email address syntax: dotted local part, `@`, and a domain with a TLD.
pub fn is_email(value: &str) -> bool {
    let Some((local, _domain)) = value.rsplit_once('@') else {
        return false;
    };
    local.len() <= 64 && value.len() <= 254 && EMAIL_RE.is_match(value)
}

/// Non-empty and ASCII digits only.
pub fn is_numeric(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// Indonesian mobile number: `0`, `62`, or `+62`, then an `8xx` operator
/// prefix and 5–11 subscriber digits.
pub fn is_id_mobile_phone(value: &str) -> bool {
    ID_MOBILE_RE.is_match(value)
}

// ============================================================================
// Uniqueness
// ============================================================================

/// Applies the name uniqueness rule to the result of a by-name lookup.
///
/// `existing` is whatever the store returned for `name`. `own_name` is the
/// record's current name when editing: a match against it is the record
/// itself and is allowed. Returns the failure to report, if any.
pub fn check_unique_name(
    existing: Option<&Contact>,
    name: &str,
    own_name: Option<&str>,
) -> Option<FieldError> {
    existing?;
    if own_name.map(str::trim) == Some(name) {
        return None;
    }
    Some(FieldError::new("name", messages::NAME_TAKEN))
}
