//! Kontak Core: shared types, validation rules, and errors.
//!
//! This crate provides the foundational types used across all Kontak crates.
//! It performs no I/O and has no internal Kontak dependencies.
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`model`]: The [`Contact`] document, its id, and field sets
//! - [`validation`]: Field rule chains and the name uniqueness rule
//! - [`flash`]: One-shot flash payloads carried between requests
//! - [`messages`]: User-facing message catalogue

#![doc = include_str!("../README.md")]

pub mod error;
pub mod flash;
pub mod messages;
pub mod model;
pub mod validation;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use flash::Flash;
pub use model::{Contact, ContactFields, ContactForm, ContactId};
pub use validation::{FieldError, ValidationErrors, Validator, check_unique_name};
