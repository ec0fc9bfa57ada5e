//! HTTP server assembly and lifecycle.

use std::sync::Arc;

use axum::extract::Request;
use axum::{Router, ServiceExt};
use kontak_storage::{ContactStore, open_store};
use tokio::net::TcpListener;
use tower::Layer;
use tower_http::trace::TraceLayer;

use crate::Result;
use crate::config::WebConfig;
use crate::middleware::{MethodOverride, MethodOverrideLayer, SessionLayer, SessionStore};
use crate::routes;
use crate::state::AppState;
use crate::views::Views;

/// Kontak web server.
pub struct Server {
    config: WebConfig,
    state: AppState,
    sessions: SessionStore,
}

impl Server {
    /// Validate `config` and open the store its `database_url` names.
    pub async fn new(config: WebConfig) -> Result<Self> {
        config.validate()?;
        let store = open_store(&config.database_url).await?;
        Self::with_store(config, store)
    }

    /// Build a server around an already-open store.
    pub fn with_store(config: WebConfig, store: Arc<dyn ContactStore>) -> Result<Self> {
        config.validate()?;
        let sessions = match &config.session_secret {
            Some(secret) => SessionStore::new(secret.as_bytes(), config.session_max_age()),
            None => {
                tracing::warn!(
                    "No session secret configured; sessions will not survive a restart"
                );
                SessionStore::with_random_secret(config.session_max_age())
            }
        };
        let state = AppState::new(store, Views::new()?);
        Ok(Self {
            config,
            state,
            sessions,
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &WebConfig {
        &self.config
    }

    /// Session table shared by every request.
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// The complete request pipeline.
    ///
    /// Method override wraps the router from outside so that it runs before
    /// route matching.
    pub fn app(&self) -> MethodOverride<Router> {
        let router = routes::router(self.state.clone(), &self.config.public_dir)
            .layer(SessionLayer::new(self.sessions.clone()))
            .layer(TraceLayer::new_for_http());
        MethodOverrideLayer::new().layer(router)
    }

    /// Bind and serve until Ctrl-C.
    pub async fn run(self) -> Result<()> {
        let contacts = self.state.store.find_all().await?.len();
        tracing::info!(
            backend = self.state.store.name(),
            contacts,
            "Contact store ready"
        );

        let listener = TcpListener::bind(self.config.bind_address()).await?;
        tracing::info!(address = %listener.local_addr()?, "Kontak listening");

        let app = self.app();
        axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => {
            tracing::warn!(error = %e, "Cannot listen for Ctrl-C; running until killed");
            std::future::pending::<()>().await;
        }
    }
}
