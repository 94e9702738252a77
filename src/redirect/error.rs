//! Errors raised while building resolvers.

use thiserror::Error;

/// Failure to turn a redirect payload into a resolver.
#[derive(Debug, Error)]
pub enum ConfigParseError {
    /// The payload is not a YAML sequence of records.
    #[error("invalid redirect YAML: {0}")]
    Syntax(#[from] serde_yaml::Error),

    /// A record lacks a required field (strict mode only).
    #[error("redirect record #{index} has no `{field}`")]
    MissingField { index: usize, field: &'static str },
}
