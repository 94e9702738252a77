//! Settings validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, bind address parses)
//! - Check option combinations (watch needs a file)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: Settings → Result<(), Vec<ValidationError>>
//! - Redirect targets are opaque and never validated

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::Settings;

/// A single semantic problem in the settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid bind address `{0}`")]
    InvalidBindAddress(String),

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,

    #[error("static redirect with an empty path")]
    EmptyStaticPath,

    #[error("redirects.watch requires redirects.file")]
    WatchWithoutFile,
}

/// Check settings for problems serde cannot catch.
pub fn validate_config(config: &Settings) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if config.redirects.static_paths.keys().any(String::is_empty) {
        errors.push(ValidationError::EmptyStaticPath);
    }

    if config.redirects.watch && config.redirects.file.is_none() {
        errors.push(ValidationError::WatchWithoutFile);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
