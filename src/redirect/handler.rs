//! Request handler abstraction and the terminal default handler.
//!
//! # Responsibilities
//! - Define the single-method `Handler` trait every resolver implements
//! - Provide the handler that ends every fallback chain
//!
//! # Design Decisions
//! - Handlers are synchronous: resolution never performs I/O
//! - Trait objects (`Arc<dyn Handler>`) let resolvers wrap any fallback

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::{IntoResponse, Response};

/// Greeting served at `/` when nothing else is configured.
pub const DEFAULT_GREETING: &str = "Hello, world!\n";

/// Body served for paths no resolver knows about.
pub const NOT_FOUND_BODY: &str = "404 page not found\n";

/// Anything that can turn a request into a response.
pub trait Handler: Send + Sync + std::fmt::Debug {
    /// Produce the response for this request.
    fn handle(&self, req: Request<Body>) -> Response;
}

/// Terminal handler: greeting at the root path, not-found everywhere else.
#[derive(Debug, Clone)]
pub struct DefaultHandler {
    greeting: String,
}

impl DefaultHandler {
    pub fn new(greeting: impl Into<String>) -> Self {
        Self {
            greeting: greeting.into(),
        }
    }
}

impl Default for DefaultHandler {
    fn default() -> Self {
        Self::new(DEFAULT_GREETING)
    }
}

impl Handler for DefaultHandler {
    fn handle(&self, req: Request<Body>) -> Response {
        if req.uri().path() == "/" {
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                self.greeting.clone(),
            )
                .into_response()
        } else {
            tracing::debug!(path = %req.uri().path(), "No redirect matched");
            (
                StatusCode::NOT_FOUND,
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                NOT_FOUND_BODY,
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get(path: &str) -> Request<Body> {
        Request::builder().uri(path).body(Body::empty()).unwrap()
    }

    async fn body_text(resp: Response) -> String {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_root_greeting() {
        let handler = DefaultHandler::default();
        let resp = handler.handle(get("/"));
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_text(resp).await, "Hello, world!\n");
    }

    #[tokio::test]
    async fn test_custom_greeting() {
        let handler = DefaultHandler::new("hi there");
        let resp = handler.handle(get("/"));
        assert_eq!(body_text(resp).await, "hi there");
    }

    #[tokio::test]
    async fn test_other_paths_not_found() {
        let handler = DefaultHandler::default();
        let resp = handler.handle(get("/unknown"));
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(resp).await, NOT_FOUND_BODY);
    }

    #[test]
    fn test_root_with_query_is_greeting() {
        let handler = DefaultHandler::default();
        let resp = handler.handle(get("/?ref=home"));
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
