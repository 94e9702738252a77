//! YAML-backed resolver construction.
//!
//! Expected payload:
//! ```yaml
//! - path: /urlshort
//!   url: https://example.com/urlshort
//! - path: /urlshort-final
//!   url: https://example.com/urlshort/solution
//! ```
//!
//! Parsing is lenient by default: unknown keys are ignored and a missing
//! `path` or `url` becomes an empty string. [`ParseMode::Strict`] rejects
//! such records instead.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Deserializer};

use crate::redirect::error::ConfigParseError;
use crate::redirect::handler::Handler;
use crate::redirect::map::MapHandler;

/// A single `(path, url)` entry from a redirect file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RedirectRecord {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub path: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,
}

/// `~`, `null` and a bare key all read as an empty string.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// How to treat records with a missing or empty field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParseMode {
    /// Missing fields become empty strings.
    #[default]
    Lenient,
    /// Missing or empty fields are an error.
    Strict,
}

/// Parse a YAML payload into records, in document order.
///
/// An empty payload, `[]` and `~` all yield no records.
pub fn parse_records(payload: &[u8], mode: ParseMode) -> Result<Vec<RedirectRecord>, ConfigParseError> {
    if payload.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    let records: Option<Vec<RedirectRecord>> = serde_yaml::from_slice(payload)?;
    let records = records.unwrap_or_default();

    if mode == ParseMode::Strict {
        for (index, record) in records.iter().enumerate() {
            if record.path.is_empty() {
                return Err(ConfigParseError::MissingField { index, field: "path" });
            }
            if record.url.is_empty() {
                return Err(ConfigParseError::MissingField { index, field: "url" });
            }
        }
    }

    Ok(records)
}

/// Fold records into a path map. Last record wins on duplicate paths.
pub fn records_to_map<I>(records: I) -> HashMap<String, String>
where
    I: IntoIterator<Item = RedirectRecord>,
{
    let mut map = HashMap::new();
    for record in records {
        if let Some(previous) = map.insert(record.path.clone(), record.url) {
            tracing::debug!(path = %record.path, overridden = %previous, "Duplicate redirect path");
        }
    }
    map
}

/// Build a lenient resolver from a YAML payload.
pub fn build(payload: &[u8], fallback: Arc<dyn Handler>) -> Result<MapHandler, ConfigParseError> {
    build_with_mode(payload, ParseMode::Lenient, fallback)
}

/// Build a resolver from a YAML payload.
///
/// On error no resolver exists and `fallback` is dropped untouched.
pub fn build_with_mode(
    payload: &[u8],
    mode: ParseMode,
    fallback: Arc<dyn Handler>,
) -> Result<MapHandler, ConfigParseError> {
    let records = parse_records(payload, mode)?;
    Ok(MapHandler::new(records_to_map(records), fallback))
}
