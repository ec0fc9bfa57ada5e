//! # kontak-storage
//!
//! Contact document storage for Kontak.
//!
//! This crate provides:
//! - [`ContactStore`]: the async trait every backend implements
//! - [`MemoryStore`]: volatile in-process collection (demos and tests)
//! - [`RedbStore`]: embedded on-disk document collection
//! - [`open_store`]: backend selection from a database URL

#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod database;
pub mod error;
pub mod memory;
pub mod traits;

pub use database::RedbStore;
pub use error::{Error, Result};
pub use memory::MemoryStore;
pub use traits::{ContactStore, StoreUrl, open_store};
