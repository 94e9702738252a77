//! URL shortener library.
//!
//! Maps request paths to redirect targets through a chain of resolvers:
//! a mapping parsed from YAML, then a static mapping from settings, then a
//! default handler.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod redirect;

pub use config::schema::Settings;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use redirect::{ConfigParseError, Handler, MapHandler, RedirectChain};
