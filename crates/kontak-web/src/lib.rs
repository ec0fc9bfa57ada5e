//! # kontak-web
//!
//! Server-rendered HTTP front end for the Kontak contact book.
//!
//! This crate provides:
//! - The route table and handlers for listing, adding, editing, and deleting
//!   contacts
//! - HTML views rendered from embedded templates
//! - Cookie sessions carrying one-shot flash messages
//! - Form method override so HTML forms can issue PUT and DELETE
//! - Layered configuration and the `kontak` binary

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;
pub mod views;

pub use config::WebConfig;
pub use error::{Error, Result};
pub use server::Server;
pub use state::AppState;
