//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;

use arc_swap::ArcSwap;
use tokio::net::TcpListener;
use urlshort::config::Settings;
use urlshort::http::HttpServer;
use urlshort::lifecycle::Shutdown;
use urlshort::redirect::{build_chain, RedirectChain};

/// A server running on an ephemeral local port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub chain: Arc<ArcSwap<RedirectChain>>,
    pub shutdown: Shutdown,
    pub handle: tokio::task::JoinHandle<Result<(), std::io::Error>>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Start a server for `payload` on 127.0.0.1 with an OS-assigned port.
pub async fn start_server(settings: Settings, payload: &str) -> TestServer {
    let chain = Arc::new(ArcSwap::from_pointee(
        build_chain(&settings, payload.as_bytes()).unwrap(),
    ));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(&settings, chain.clone());
    let handle = tokio::spawn(server.run(listener, shutdown.wait()));

    TestServer {
        addr,
        chain,
        shutdown,
        handle,
    }
}

/// HTTP client that reports redirects instead of following them.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}
