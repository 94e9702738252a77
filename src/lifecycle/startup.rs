//! Startup orchestration.
//!
//! # Responsibilities
//! - Validate settings
//! - Read the redirect file (or fall back to the built-in list)
//! - Build and publish the redirect chain
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal, but returned rather than panicked
//! - Nothing binds a socket here; callers decide where to listen

use std::sync::Arc;

use arc_swap::ArcSwap;
use thiserror::Error;

use crate::config::loader::{read_redirect_file, ConfigError};
use crate::config::schema::Settings;
use crate::config::validation::validate_config;
use crate::redirect::{build_chain, ConfigParseError, RedirectChain, DEFAULT_REDIRECTS_YAML};

/// Fatal startup failure.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("redirect file rejected: {0}")]
    Redirects(#[from] ConfigParseError),

    #[error("cannot listen on {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

/// Everything the server needs once startup succeeded.
#[derive(Debug)]
pub struct Bootstrap {
    pub settings: Settings,
    pub chain: Arc<ArcSwap<RedirectChain>>,
}

/// Validate settings, load redirects and build the chain.
pub fn bootstrap(settings: Settings) -> Result<Bootstrap, StartupError> {
    validate_config(&settings).map_err(ConfigError::Validation)?;

    let payload = match &settings.redirects.file {
        Some(path) => {
            tracing::info!(path = ?path, "Loading redirect file");
            read_redirect_file(path)?
        }
        None => {
            tracing::info!("No redirect file given, using built-in redirects");
            DEFAULT_REDIRECTS_YAML.as_bytes().to_vec()
        }
    };

    let chain = build_chain(&settings, &payload)?;

    Ok(Bootstrap {
        settings,
        chain: Arc::new(ArcSwap::from_pointee(chain)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_bootstrap_defaults() {
        let boot = bootstrap(Settings::default()).unwrap();
        assert_eq!(boot.settings.listener.bind_address, "0.0.0.0:8080");
    }

    #[test]
    fn test_missing_redirect_file_is_error() {
        let mut settings = Settings::default();
        settings.redirects.file = Some(PathBuf::from("/no/such/redirects.yaml"));

        let err = bootstrap(settings).unwrap_err();
        assert!(matches!(err, StartupError::Config(ConfigError::Io { .. })));
    }

    #[test]
    fn test_malformed_redirect_file_is_error() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "just a scalar").unwrap();
        let mut settings = Settings::default();
        settings.redirects.file = Some(file.path().to_path_buf());

        let err = bootstrap(settings).unwrap_err();
        assert!(matches!(err, StartupError::Redirects(ConfigParseError::Syntax(_))));
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let mut settings = Settings::default();
        settings.timeouts.request_secs = 0;

        let err = bootstrap(settings).unwrap_err();
        assert!(matches!(err, StartupError::Config(ConfigError::Validation(_))));
    }
}
