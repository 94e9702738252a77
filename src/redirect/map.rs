//! Exact-match path resolver.
//!
//! # Responsibilities
//! - Look up the request path in a fixed path → URL map
//! - Answer hits with `303 See Other` and a `Location` header
//! - Hand misses to the fallback untouched
//!
//! # Design Decisions
//! - Map is frozen at construction (lock-free reads)
//! - Path match is exact and case-sensitive; query string ignored
//! - Paths are percent-decoded before lookup (`/hello%20world` matches `/hello world`)
//! - Target URLs are opaque; no validation beyond header encoding

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, HeaderValue, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use percent_encoding::percent_decode_str;

use crate::redirect::handler::Handler;

/// Redirects known paths, delegates the rest.
#[derive(Debug)]
pub struct MapHandler {
    paths: HashMap<String, String>,
    fallback: Arc<dyn Handler>,
}

impl MapHandler {
    /// Create a resolver from `(path, url)` pairs.
    ///
    /// Later pairs overwrite earlier ones with the same path.
    pub fn new<I>(paths: I, fallback: Arc<dyn Handler>) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            paths: paths.into_iter().collect(),
            fallback,
        }
    }

    /// Target for `path`, if this resolver knows it.
    pub fn lookup(&self, path: &str) -> Option<&str> {
        self.paths.get(path).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl Handler for MapHandler {
    fn handle(&self, req: Request<Body>) -> Response {
        let path = decoded_path(&req);
        if let Some(target) = self.paths.get(&path) {
            return see_other(&path, target);
        }
        self.fallback.handle(req)
    }
}

/// Request path with percent-escapes decoded. Invalid UTF-8 is replaced.
fn decoded_path(req: &Request<Body>) -> String {
    percent_decode_str(req.uri().path())
        .decode_utf8_lossy()
        .into_owned()
}

fn see_other(path: &str, target: &str) -> Response {
    match HeaderValue::from_str(target) {
        Ok(location) => {
            tracing::debug!(path = %path, target = %target, "Redirecting");
            (StatusCode::SEE_OTHER, [(header::LOCATION, location)]).into_response()
        }
        Err(e) => {
            tracing::error!(path = %path, error = %e, "Redirect target is not a valid header value");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
