//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! settings file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → Settings (validated, immutable)
//!
//! redirect file (YAML)
//!     → loader.rs (read bytes)
//!     → redirect::build_chain
//!
//! On redirect file change (--watch):
//!     watcher.rs detects change
//!     → re-read and rebuild chain
//!     → atomic swap of the published RedirectChain
//! ```
//!
//! # Design Decisions
//! - Settings are immutable once loaded
//! - All fields have defaults to allow minimal (or absent) settings files
//! - A bad reload keeps the current chain

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use schema::Settings;
