//! Server configuration.
//!
//! Values are resolved in order: built-in defaults, an optional TOML file,
//! `KONTAK_*` environment variables, then command-line flags (applied by the
//! binary).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::{Error, Result};

/// Environment variable overriding [`WebConfig::host`].
pub const ENV_HOST: &str = "KONTAK_HOST";
/// Environment variable overriding [`WebConfig::port`].
pub const ENV_PORT: &str = "KONTAK_PORT";
/// Environment variable overriding [`WebConfig::database_url`].
pub const ENV_DATABASE_URL: &str = "KONTAK_DATABASE_URL";
/// Environment variable overriding [`WebConfig::session_secret`].
pub const ENV_SESSION_SECRET: &str = "KONTAK_SESSION_SECRET";
/// Environment variable overriding [`WebConfig::session_max_age_secs`].
pub const ENV_SESSION_MAX_AGE_SECS: &str = "KONTAK_SESSION_MAX_AGE_SECS";
/// Environment variable overriding [`WebConfig::public_dir`].
pub const ENV_PUBLIC_DIR: &str = "KONTAK_PUBLIC_DIR";

/// Static assets bundled with the crate.
pub const DEFAULT_PUBLIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/public");

/// Configuration for the Kontak web server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Where contacts are stored (`memory://`, `redb://<path>`, or a path).
    pub database_url: String,
    /// Secret used to sign session cookies. When unset a random secret is
    /// generated at startup, so sessions do not survive a restart.
    pub session_secret: Option<String>,
    /// Rolling lifetime of a session (and therefore of a pending flash).
    pub session_max_age_secs: u64,
    /// Directory served for static assets. Defaults to the `public/`
    /// directory shipped with this crate; deployments set
    /// `KONTAK_PUBLIC_DIR`.
    pub public_dir: PathBuf,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            database_url: "redb://data/kontak.redb".to_string(),
            session_secret: None,
            session_max_age_secs: 6,
            public_dir: PathBuf::from(DEFAULT_PUBLIC_DIR),
        }
    }
}

impl WebConfig {
    /// Parse a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(format!("Invalid config: {e}")))
    }

    /// Load configuration from an optional TOML file, then the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                let content = std::fs::read_to_string(path).map_err(|e| {
                    Error::config(format!("Failed to read {}: {e}", path.display()))
                })?;
                Self::from_toml_str(&content)?
            }
            None => Self::default(),
        };
        config.apply_env_from(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `KONTAK_*` overrides using `lookup` to read variables.
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(ENV_HOST) {
            self.host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.port = port
                .trim()
                .parse()
                .map_err(|e| Error::config(format!("{ENV_PORT}='{port}': {e}")))?;
        }
        if let Some(url) = lookup(ENV_DATABASE_URL) {
            self.database_url = url;
        }
        if let Some(secret) = lookup(ENV_SESSION_SECRET) {
            self.session_secret = Some(secret);
        }
        if let Some(secs) = lookup(ENV_SESSION_MAX_AGE_SECS) {
            self.session_max_age_secs = secs.trim().parse().map_err(|e| {
                Error::config(format!("{ENV_SESSION_MAX_AGE_SECS}='{secs}': {e}"))
            })?;
        }
        if let Some(dir) = lookup(ENV_PUBLIC_DIR) {
            self.public_dir = PathBuf::from(dir);
        }
        Ok(())
    }

    /// Reject values the server cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.database_url.trim().is_empty() {
            return Err(Error::config("database_url must not be empty"));
        }
        if self.session_max_age_secs == 0 {
            return Err(Error::config("session_max_age_secs must be at least 1"));
        }
        if matches!(&self.session_secret, Some(s) if s.len() < 16) {
            return Err(Error::config("session_secret must be at least 16 bytes"));
        }
        Ok(())
    }

    /// `host:port` to bind.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Session lifetime as a duration.
    pub fn session_max_age(&self) -> Duration {
        Duration::from_secs(self.session_max_age_secs)
    }
}
