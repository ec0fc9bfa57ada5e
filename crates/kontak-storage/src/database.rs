//! Embedded on-disk contact store backed by redb.
//!
//! Each contact is one JSON document in a single `contacts` table, keyed by a
//! monotonically increasing sequence number so a table scan yields insertion
//! order. There are no secondary indexes: lookups by name or id scan the
//! table.
//!
//! redb is synchronous, so every operation runs on tokio's blocking pool.

use async_trait::async_trait;
use chrono::Utc;
use kontak_core::{Contact, ContactFields, ContactId};
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::{ContactStore, Error, Result};

const CONTACTS: TableDefinition<u64, &str> = TableDefinition::new("contacts");

/// Contact collection persisted in a redb file.
#[derive(Clone)]
pub struct RedbStore {
    db: Arc<Database>,
    path: PathBuf,
}

impl RedbStore {
    /// Open (or create) the database file at `path`.
    ///
    /// Missing parent directories are created and the `contacts` table is
    /// initialised so reads never see a missing table.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let db_path = path.clone();

        let db = tokio::task::spawn_blocking(move || -> Result<Database> {
            if let Some(parent) = db_path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }

            let db = Database::create(&db_path).map_err(Error::db)?;
            let txn = db.begin_write().map_err(Error::db)?;
            txn.open_table(CONTACTS).map_err(Error::db)?;
            txn.commit().map_err(Error::db)?;
            Ok(db)
        })
        .await??;

        log::debug!("redb contact store ready at {}", path.display());

        Ok(Self {
            db: Arc::new(db),
            path,
        })
    }

    /// Path of the backing database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn blocking<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&Database) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || op(&db)).await?
    }
}

impl std::fmt::Debug for RedbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbStore")
            .field("path", &self.path)
            .finish()
    }
}

// ============================================================================
// Table helpers
// ============================================================================

fn decode(json: &str) -> Result<Contact> {
    Ok(serde_json::from_str(json)?)
}

fn encode(contact: &Contact) -> Result<String> {
    Ok(serde_json::to_string(contact)?)
}

/// Scan a table, returning the first document matching `pred` with its key.
fn scan<T, P>(table: &T, mut pred: P) -> Result<Option<(u64, Contact)>>
where
    T: ReadableTable<u64, &'static str>,
    P: FnMut(&Contact) -> bool,
{
    for entry in table.iter().map_err(Error::db)? {
        let (key, value) = entry.map_err(Error::db)?;
        let contact = decode(value.value())?;
        if pred(&contact) {
            return Ok(Some((key.value(), contact)));
        }
    }
    Ok(None)
}

fn find_where<P>(db: &Database, pred: P) -> Result<Option<Contact>>
where
    P: FnMut(&Contact) -> bool,
{
    let txn = db.begin_read().map_err(Error::db)?;
    let table = txn.open_table(CONTACTS).map_err(Error::db)?;
    Ok(scan(&table, pred)?.map(|(_, contact)| contact))
}

// ============================================================================
// ContactStore
// ============================================================================

#[async_trait]
impl ContactStore for RedbStore {
    async fn find_all(&self) -> Result<Vec<Contact>> {
        self.blocking(|db| {
            let txn = db.begin_read().map_err(Error::db)?;
            let table = txn.open_table(CONTACTS).map_err(Error::db)?;

            let mut contacts = Vec::new();
            for entry in table.iter().map_err(Error::db)? {
                let (_key, value) = entry.map_err(Error::db)?;
                contacts.push(decode(value.value())?);
            }
            Ok(contacts)
        })
        .await
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Contact>> {
        let name = name.to_string();
        self.blocking(move |db| find_where(db, |c| c.name == name))
            .await
    }

    async fn find_by_id(&self, id: ContactId) -> Result<Option<Contact>> {
        self.blocking(move |db| find_where(db, |c| c.id == id)).await
    }

    async fn insert(&self, fields: ContactFields) -> Result<Contact> {
        fields.ensure_present()?;
        let contact = Contact::from_fields(ContactId::new(), fields);
        let json = encode(&contact)?;

        self.blocking(move |db| {
            let txn = db.begin_write().map_err(Error::db)?;
            {
                let mut table = txn.open_table(CONTACTS).map_err(Error::db)?;
                let next_key = table
                    .last()
                    .map_err(Error::db)?
                    .map(|(key, _)| key.value() + 1)
                    .unwrap_or(0);
                table.insert(next_key, json.as_str()).map_err(Error::db)?;
            }
            txn.commit().map_err(Error::db)?;
            Ok(())
        })
        .await?;

        log::debug!("Inserted contact {} ({})", contact.name, contact.id);
        Ok(contact)
    }

    async fn update_by_id(&self, id: ContactId, fields: ContactFields) -> Result<Option<Contact>> {
        fields.ensure_present()?;

        self.blocking(move |db| {
            let txn = db.begin_write().map_err(Error::db)?;
            let updated = {
                let mut table = txn.open_table(CONTACTS).map_err(Error::db)?;
                match scan(&table, |c| c.id == id)? {
                    Some((key, mut contact)) => {
                        contact.apply_update(fields, Utc::now());
                        let json = encode(&contact)?;
                        table.insert(key, json.as_str()).map_err(Error::db)?;
                        Some(contact)
                    }
                    None => None,
                }
            };
            txn.commit().map_err(Error::db)?;
            Ok(updated)
        })
        .await
    }

    async fn delete_by_name(&self, name: &str) -> Result<bool> {
        let name = name.to_string();

        self.blocking(move |db| {
            let txn = db.begin_write().map_err(Error::db)?;
            let removed = {
                let mut table = txn.open_table(CONTACTS).map_err(Error::db)?;
                match scan(&table, |c| c.name == name)? {
                    Some((key, _)) => table.remove(key).map_err(Error::db)?.is_some(),
                    None => false,
                }
            };
            txn.commit().map_err(Error::db)?;
            Ok(removed)
        })
        .await
    }

    fn name(&self) -> &str {
        "redb"
    }
}
