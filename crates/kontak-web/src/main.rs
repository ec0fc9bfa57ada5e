//! `kontak` binary: runs the contact book web server.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use kontak_web::{Server, WebConfig};

/// Contact book web server.
#[derive(Debug, Parser)]
#[command(
    name = "kontak",
    version,
    about,
    after_help = "Static assets are served from the crate's public/ directory unless \
                  KONTAK_PUBLIC_DIR (or public_dir in the config file) points elsewhere."
)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Interface to bind.
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on.
    #[arg(short, long)]
    port: Option<u16>,

    /// Contact store URL (`memory://`, `redb://<path>`, or a path).
    #[arg(long, value_name = "URL")]
    database_url: Option<String>,
}

impl Cli {
    fn apply(self, config: &mut WebConfig) {
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(url) = self.database_url {
            config.database_url = url;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,kontak=debug".into()),
        )
        .init();

    let cli = Cli::parse();
    let mut config = WebConfig::load(cli.config.as_deref()).context("Loading configuration")?;
    cli.apply(&mut config);

    tracing::debug!(
        address = %config.bind_address(),
        database_url = %config.database_url,
        public_dir = %config.public_dir.display(),
        "Configuration resolved"
    );

    let server = Server::new(config)
        .await
        .context("Starting the Kontak server")?;
    server.run().await?;
    Ok(())
}
