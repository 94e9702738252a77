//! Fallback chain assembly.

use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;

use crate::config::Settings;
use crate::redirect::error::ConfigParseError;
use crate::redirect::handler::{DefaultHandler, Handler};
use crate::redirect::map::MapHandler;
use crate::redirect::yaml::{self, ParseMode};

/// Redirects served when no redirect file is given.
pub const DEFAULT_REDIRECTS_YAML: &str = "\
- path: /urlshort
  url: https://github.com/gophercises/urlshort
- path: /urlshort-final
  url: https://github.com/gophercises/urlshort/tree/solution
";

/// Head of a fully wired resolver chain.
///
/// Cheap to clone; the resolvers themselves are shared.
#[derive(Debug, Clone)]
pub struct RedirectChain {
    head: Arc<dyn Handler>,
}

impl RedirectChain {
    pub fn new(head: Arc<dyn Handler>) -> Self {
        Self { head }
    }
}

impl Handler for RedirectChain {
    fn handle(&self, req: Request<Body>) -> Response {
        self.head.handle(req)
    }
}

/// Wire YAML resolver → static resolver → default handler.
pub fn build_chain(settings: &Settings, payload: &[u8]) -> Result<RedirectChain, ConfigParseError> {
    let mode = if settings.redirects.strict {
        ParseMode::Strict
    } else {
        ParseMode::Lenient
    };

    let default_handler: Arc<dyn Handler> =
        Arc::new(DefaultHandler::new(settings.default_handler.greeting.clone()));
    let static_paths = MapHandler::new(settings.redirects.static_paths.clone(), default_handler);
    let static_count = static_paths.len();

    let yaml_paths = yaml::build_with_mode(payload, mode, Arc::new(static_paths))?;

    tracing::info!(
        yaml_paths = yaml_paths.len(),
        static_paths = static_count,
        strict = settings.redirects.strict,
        "Redirect chain built"
    );

    Ok(RedirectChain::new(Arc::new(yaml_paths)))
}
