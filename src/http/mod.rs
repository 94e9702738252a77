//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → current RedirectChain (loaded lock-free)
//!     → 303 redirect, greeting or 404
//!     → Send to client
//! ```

pub mod server;

pub use server::HttpServer;
