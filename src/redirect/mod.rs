//! Redirect resolution subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path)
//!     → yaml-backed MapHandler (hit → 303 See Other)
//!     → static MapHandler      (hit → 303 See Other)
//!     → DefaultHandler         (200 at "/", 404 otherwise)
//!
//! Chain Construction (at startup or reload):
//!     YAML payload
//!     → yaml.rs (parse records, fold to map)
//!     → chain.rs (wire resolvers head-to-tail)
//!     → Freeze as immutable RedirectChain
//! ```
//!
//! # Design Decisions
//! - Resolvers are immutable after construction; reload builds a new chain
//! - Composition only through fallback delegation
//! - Exact path match, no prefix or pattern matching
//! - Lookup misses are control flow, not errors

pub mod chain;
pub mod error;
pub mod handler;
pub mod map;
pub mod yaml;

pub use chain::{build_chain, RedirectChain, DEFAULT_REDIRECTS_YAML};
pub use error::ConfigParseError;
pub use handler::{DefaultHandler, Handler};
pub use map::MapHandler;
pub use yaml::{ParseMode, RedirectRecord};
