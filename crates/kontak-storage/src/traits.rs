//! The contact store trait and backend selection.
//!
//! # Backends
//!
//! - `MemoryStore`: volatile collection held in process memory
//! - `RedbStore`: documents persisted in an embedded redb file

use async_trait::async_trait;
use kontak_core::{Contact, ContactFields, ContactId};
use std::path::PathBuf;
use std::sync::Arc;

use crate::{Error, MemoryStore, RedbStore, Result};

/// A single collection of contact documents.
///
/// Lookups for something that does not exist return `None` (or `false`),
/// never an error. Errors mean the backend itself failed.
///
/// There is no uniqueness constraint on `name`; callers check before writing.
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Every contact, in insertion order.
    async fn find_all(&self) -> Result<Vec<Contact>>;

    /// The first contact whose name matches exactly.
    async fn find_by_name(&self, name: &str) -> Result<Option<Contact>>;

    /// The contact with this id.
    async fn find_by_id(&self, id: ContactId) -> Result<Option<Contact>>;

    /// Stores a new contact under a freshly assigned id.
    ///
    /// Fails with a core `MissingField` error if any field is empty.
    async fn insert(&self, fields: ContactFields) -> Result<Contact>;

    /// Replaces name, email, and phone of the contact with this id and sets
    /// its `last_modified` to now.
    ///
    /// Returns the updated contact, or `None` if no contact has this id.
    async fn update_by_id(&self, id: ContactId, fields: ContactFields) -> Result<Option<Contact>>;

    /// Removes the first contact whose name matches exactly.
    ///
    /// Returns whether a document was removed.
    async fn delete_by_name(&self, name: &str) -> Result<bool>;

    /// Backend name for diagnostics.
    fn name(&self) -> &str;
}

// ============================================================================
// Backend selection
// ============================================================================

/// A parsed database URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreUrl {
    /// `memory://`
    Memory,
    /// `redb://<path>` or a bare filesystem path
    Redb(PathBuf),
}

impl StoreUrl {
    /// Parses a database URL.
    pub fn parse(url: &str) -> Result<Self> {
        let url = url.trim();
        if url.is_empty() {
            return Err(Error::invalid_url(url, "empty database URL"));
        }

        match url.split_once("://") {
            Some(("memory" | "mem", _)) => Ok(StoreUrl::Memory),
            Some(("redb" | "file", path)) if !path.is_empty() => {
                Ok(StoreUrl::Redb(PathBuf::from(path)))
            }
            Some(("redb" | "file", _)) => Err(Error::invalid_url(url, "missing database path")),
            Some((scheme, _)) => Err(Error::invalid_url(
                url,
                format!("unsupported scheme '{scheme}'"),
            )),
            None => Ok(StoreUrl::Redb(PathBuf::from(url))),
        }
    }
}

/// Open the contact store named by a database URL.
///
/// Selection logic:
/// 1. `memory://` → `MemoryStore`
/// 2. `redb://<path>`, `file://<path>`, or a bare path → `RedbStore`
pub async fn open_store(url: &str) -> Result<Arc<dyn ContactStore>> {
    match StoreUrl::parse(url)? {
        StoreUrl::Memory => {
            log::info!("Opening in-memory contact store");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreUrl::Redb(path) => {
            log::info!("Opening redb contact store at {}", path.display());
            Ok(Arc::new(RedbStore::open(path).await?))
        }
    }
}
