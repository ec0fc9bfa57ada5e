//! In-memory contact store.

use async_trait::async_trait;
use chrono::Utc;
use kontak_core::{Contact, ContactFields, ContactId};
use tokio::sync::RwLock;

use crate::{ContactStore, Result};

/// Volatile contact collection.
///
/// Documents live in a `Vec` behind an async `RwLock`, so insertion order is
/// the listing order. Everything is lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    contacts: RwLock<Vec<Contact>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with contacts.
    pub fn with_contacts(contacts: Vec<Contact>) -> Self {
        Self {
            contacts: RwLock::new(contacts),
        }
    }
}

#[async_trait]
impl ContactStore for MemoryStore {
    async fn find_all(&self) -> Result<Vec<Contact>> {
        Ok(self.contacts.read().await.clone())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Contact>> {
        let contacts = self.contacts.read().await;
        Ok(contacts.iter().find(|c| c.name == name).cloned())
    }

    async fn find_by_id(&self, id: ContactId) -> Result<Option<Contact>> {
        let contacts = self.contacts.read().await;
        Ok(contacts.iter().find(|c| c.id == id).cloned())
    }

    async fn insert(&self, fields: ContactFields) -> Result<Contact> {
        fields.ensure_present()?;
        let contact = Contact::from_fields(ContactId::new(), fields);
        self.contacts.write().await.push(contact.clone());
        Ok(contact)
    }

    async fn update_by_id(&self, id: ContactId, fields: ContactFields) -> Result<Option<Contact>> {
        fields.ensure_present()?;
        let mut contacts = self.contacts.write().await;
        let Some(contact) = contacts.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        contact.apply_update(fields, Utc::now());
        Ok(Some(contact.clone()))
    }

    async fn delete_by_name(&self, name: &str) -> Result<bool> {
        let mut contacts = self.contacts.write().await;
        match contacts.iter().position(|c| c.name == name) {
            Some(index) => {
                contacts.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn name(&self) -> &str {
        "memory"
    }
}
