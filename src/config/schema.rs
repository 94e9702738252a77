//! Settings schema definitions.
//!
//! All types derive Serde traits for deserialization from a TOML file.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::redirect::handler::DEFAULT_GREETING;

/// Root settings for the redirect server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Redirect sources.
    pub redirects: RedirectsConfig,

    /// Response for requests no redirect matches.
    pub default_handler: DefaultHandlerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Where redirects come from.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RedirectsConfig {
    /// YAML redirect file. The built-in list is used when unset.
    pub file: Option<PathBuf>,

    /// Reject YAML records with a missing `path` or `url`.
    pub strict: bool,

    /// Rebuild the chain when `file` changes.
    pub watch: bool,

    /// Paths consulted after the YAML ones.
    pub static_paths: BTreeMap<String, String>,
}

impl Default for RedirectsConfig {
    fn default() -> Self {
        let static_paths = [
            ("/urlshort-godoc", "https://godoc.org/github.com/gophercises/urlshort"),
            ("/yaml-godoc", "https://godoc.org/gopkg.in/yaml.v2"),
        ]
        .into_iter()
        .map(|(path, url)| (path.to_string(), url.to_string()))
        .collect();

        Self {
            file: None,
            strict: false,
            watch: false,
            static_paths,
        }
    }
}

/// Default handler configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DefaultHandlerConfig {
    /// Body served at `/`.
    pub greeting: String,
}

impl Default for DefaultHandlerConfig {
    fn default() -> Self {
        Self {
            greeting: DEFAULT_GREETING.to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level or filter directive (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
