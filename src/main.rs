//! URL shortener server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ axum (trace, timeout)
//!                        │
//!                        ▼
//!                  ┌──────────────┐ hit
//!                  │ YAML paths   │─────▶ 303 See Other
//!                  └──────┬───────┘
//!                         │ miss
//!                  ┌──────▼───────┐ hit
//!                  │ static paths │─────▶ 303 See Other
//!                  └──────┬───────┘
//!                         │ miss
//!                  ┌──────▼───────┐
//!                  │   default    │─────▶ 200 at "/", 404 otherwise
//!                  └──────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use urlshort::config::loader::load_config;
use urlshort::config::watcher::RedirectWatcher;
use urlshort::config::Settings;
use urlshort::http::HttpServer;
use urlshort::lifecycle::signals::forward_signals;
use urlshort::lifecycle::startup::{bootstrap, StartupError};
use urlshort::lifecycle::Shutdown;
use urlshort::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "urlshort")]
#[command(about = "Redirect short paths to long URLs", long_about = None)]
struct Args {
    /// YAML file of `- path: ... url: ...` records
    #[arg(long)]
    yaml_file: Option<PathBuf>,

    /// TOML settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on (overrides the settings file)
    #[arg(short, long)]
    bind: Option<String>,

    /// Reject YAML records with a missing path or url
    #[arg(long)]
    strict: bool,

    /// Reload the YAML file when it changes
    #[arg(long)]
    watch: bool,
}

impl Args {
    fn settings(&self) -> Result<Settings, StartupError> {
        let mut settings = match &self.config {
            Some(path) => load_config(path)?,
            None => Settings::default(),
        };

        if let Some(file) = &self.yaml_file {
            settings.redirects.file = Some(file.clone());
        }
        if let Some(bind) = &self.bind {
            settings.listener.bind_address = bind.clone();
        }
        settings.redirects.strict |= self.strict;
        settings.redirects.watch |= self.watch;

        Ok(settings)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let settings = args.settings()?;

    init_logging(&settings.observability.log_level);
    tracing::info!("urlshort v{} starting", env!("CARGO_PKG_VERSION"));

    let boot = bootstrap(settings)?;

    tracing::info!(
        bind_address = %boot.settings.listener.bind_address,
        redirect_file = ?boot.settings.redirects.file,
        request_timeout_secs = boot.settings.timeouts.request_secs,
        "Configuration loaded"
    );

    // Dropping the watcher stops it, so it lives until shutdown.
    let _watcher = match (&boot.settings.redirects.file, boot.settings.redirects.watch) {
        (Some(path), true) => Some(
            RedirectWatcher::new(path, boot.settings.clone(), boot.chain.clone()).run()?,
        ),
        _ => None,
    };

    let address = boot.settings.listener.bind_address.clone();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind { address, source })?;

    let shutdown = Shutdown::new();
    forward_signals(shutdown.clone());

    let server = HttpServer::new(&boot.settings, boot.chain);
    server.run(listener, shutdown.wait()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
