//! Shared handler state.

use std::sync::Arc;

use kontak_storage::ContactStore;

use crate::views::Views;

/// State handed to every route handler.
#[derive(Clone)]
pub struct AppState {
    /// Backing contact store.
    pub store: Arc<dyn ContactStore>,
    /// Compiled templates.
    pub views: Arc<Views>,
}

impl AppState {
    /// Bundle a store with a compiled view set.
    pub fn new(store: Arc<dyn ContactStore>, views: Views) -> Self {
        Self {
            store,
            views: Arc::new(views),
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("store", &self.store.name())
            .finish_non_exhaustive()
    }
}
