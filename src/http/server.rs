//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with a single catch-all handler
//! - Wire up middleware (tracing, timeout)
//! - Serve the listener until shutdown
//! - Dispatch every request to the published redirect chain

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::Response,
    Router,
};
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::Settings;
use crate::redirect::{Handler, RedirectChain};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub chain: Arc<ArcSwap<RedirectChain>>,
}

/// HTTP server for the redirect chain.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server serving whatever chain `chain` holds.
    pub fn new(settings: &Settings, chain: Arc<ArcSwap<RedirectChain>>) -> Self {
        let router = Self::build_router(settings, AppState { chain });
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(settings: &Settings, state: AppState) -> Router {
        Router::new()
            .fallback(redirect_handler)
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(settings.timeouts.request_secs)))
            .layer(TraceLayer::new_for_http())
    }

    /// The router, for serving without a socket (tests, embedding).
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` completes.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Hand the request to the currently published chain.
async fn redirect_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    state.chain.load().handle(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::redirect::build_chain;
    use axum::http::{header, StatusCode};
    use tower::ServiceExt;

    fn server(payload: &str) -> HttpServer {
        let settings = Settings::default();
        let chain = build_chain(&settings, payload.as_bytes()).unwrap();
        HttpServer::new(&settings, Arc::new(ArcSwap::from_pointee(chain)))
    }

    #[tokio::test]
    async fn test_router_redirects() {
        let app = server("- path: /a\n  url: https://example.com/a\n").router();
        let resp = app
            .oneshot(Request::builder().uri("/a").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers()[header::LOCATION], "https://example.com/a");
    }

    #[tokio::test]
    async fn test_router_sees_swapped_chain() {
        let settings = Settings::default();
        let chain = Arc::new(ArcSwap::from_pointee(build_chain(&settings, b"").unwrap()));
        let app = HttpServer::new(&settings, chain.clone()).router();

        let req = || Request::builder().uri("/late").body(Body::empty()).unwrap();
        let resp = app.clone().oneshot(req()).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        chain.store(Arc::new(
            build_chain(&settings, b"- path: /late\n  url: https://example.com/late\n").unwrap(),
        ));
        let resp = app.oneshot(req()).await.unwrap();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    }
}
