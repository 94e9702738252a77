//! Redirect file watcher for hot reload.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use thiserror::Error;

use crate::config::loader::{read_redirect_file, ConfigError};
use crate::config::schema::Settings;
use crate::redirect::{build_chain, ConfigParseError, RedirectChain};

/// Why a reload was rejected. The previous chain stays published.
#[derive(Debug, Error)]
pub enum ReloadError {
    #[error(transparent)]
    Read(#[from] ConfigError),

    #[error(transparent)]
    Parse(#[from] ConfigParseError),
}

/// How long an empty file must stay empty before it is published.
pub const SETTLE_DELAY: Duration = Duration::from_millis(250);

/// Re-read `path`, rebuild the chain and publish it.
pub fn reload(
    path: &Path,
    settings: &Settings,
    current: &ArcSwap<RedirectChain>,
) -> Result<(), ReloadError> {
    let payload = read_redirect_file(path)?;
    publish(&payload, settings, current)
}

/// Like [`reload`], but an empty read is retried once after `settle`.
///
/// Editors truncate before writing, so a change event can observe an empty
/// file that is about to be filled. Only a file that is still empty after
/// `settle` replaces the chain with an empty one.
pub fn reload_settled(
    path: &Path,
    settings: &Settings,
    current: &ArcSwap<RedirectChain>,
    settle: Duration,
) -> Result<(), ReloadError> {
    let mut payload = read_redirect_file(path)?;
    if is_blank(&payload) {
        std::thread::sleep(settle);
        payload = read_redirect_file(path)?;
        if is_blank(&payload) {
            tracing::warn!(path = ?path, "Redirect file is empty, publishing empty chain");
        }
    }
    publish(&payload, settings, current)
}

fn is_blank(payload: &[u8]) -> bool {
    payload.iter().all(u8::is_ascii_whitespace)
}

fn publish(
    payload: &[u8],
    settings: &Settings,
    current: &ArcSwap<RedirectChain>,
) -> Result<(), ReloadError> {
    let chain = build_chain(settings, payload)?;
    current.store(Arc::new(chain));
    Ok(())
}

/// Watches the redirect file and swaps in a fresh chain on change.
pub struct RedirectWatcher {
    path: PathBuf,
    settings: Settings,
    current: Arc<ArcSwap<RedirectChain>>,
}

impl RedirectWatcher {
    /// Create a watcher that publishes into `current`.
    pub fn new(path: &Path, settings: Settings, current: Arc<ArcSwap<RedirectChain>>) -> Self {
        Self {
            path: path.to_path_buf(),
            settings,
            current,
        }
    }

    /// Start watching the file in a background thread.
    ///
    /// Watching stops when the returned watcher is dropped.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let Self {
            path,
            settings,
            current,
        } = self;
        let watched = path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        tracing::info!(path = ?path, "Redirect file change detected, reloading...");
                        match reload_settled(&path, &settings, &current, SETTLE_DELAY) {
                            Ok(()) => tracing::info!("Redirect chain reloaded"),
                            Err(e) => tracing::error!(
                                error = %e,
                                "Failed to reload redirects. Keeping current chain."
                            ),
                        }
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&watched, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?watched, "Redirect watcher started");
        Ok(watcher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::redirect::Handler;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use std::io::Write;

    fn location(chain: &ArcSwap<RedirectChain>, path: &str) -> Option<String> {
        let resp = chain
            .load()
            .handle(Request::builder().uri(path).body(Body::empty()).unwrap());
        if resp.status() != StatusCode::SEE_OTHER {
            return None;
        }
        resp.headers()
            .get(header::LOCATION)
            .map(|v| v.to_str().unwrap().to_string())
    }

    #[test]
    fn test_reload_swaps_chain() {
        let settings = Settings::default();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"- path: /a\n  url: https://old\n").unwrap();

        let current = ArcSwap::from_pointee(
            build_chain(&settings, &read_redirect_file(file.path()).unwrap()).unwrap(),
        );
        assert_eq!(location(&current, "/a").as_deref(), Some("https://old"));

        std::fs::write(file.path(), b"- path: /a\n  url: https://new\n").unwrap();
        reload(file.path(), &settings, &current).unwrap();
        assert_eq!(location(&current, "/a").as_deref(), Some("https://new"));
    }

    #[test]
    fn test_failed_reload_keeps_chain() {
        let settings = Settings::default();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"- path: /a\n  url: https://old\n").unwrap();
        let current = ArcSwap::from_pointee(
            build_chain(&settings, &read_redirect_file(file.path()).unwrap()).unwrap(),
        );

        std::fs::write(file.path(), b"- path: [broken").unwrap();
        let err = reload(file.path(), &settings, &current).unwrap_err();
        assert!(matches!(err, ReloadError::Parse(_)));
        assert_eq!(location(&current, "/a").as_deref(), Some("https://old"));
    }

    fn published(settings: &Settings, payload: &[u8]) -> ArcSwap<RedirectChain> {
        ArcSwap::from_pointee(build_chain(settings, payload).unwrap())
    }

    #[test]
    fn test_truncate_then_write_keeps_redirects() {
        let settings = Settings::default();
        let file = tempfile::NamedTempFile::new().unwrap();
        let current = published(&settings, b"- path: /a\n  url: https://old\n");

        std::fs::write(file.path(), b"").unwrap();
        let path = file.path().to_path_buf();
        let writer = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(50));
            std::fs::write(path, b"- path: /a\n  url: https://new\n").unwrap();
        });

        reload_settled(file.path(), &settings, &current, Duration::from_millis(500)).unwrap();
        writer.join().unwrap();
        assert_eq!(location(&current, "/a").as_deref(), Some("https://new"));
    }

    #[test]
    fn test_deliberately_emptied_file_clears_chain() {
        let settings = Settings::default();
        let file = tempfile::NamedTempFile::new().unwrap();
        let current = published(&settings, b"- path: /a\n  url: https://old\n");

        std::fs::write(file.path(), b"\n").unwrap();
        reload_settled(file.path(), &settings, &current, Duration::from_millis(20)).unwrap();
        assert_eq!(location(&current, "/a"), None);
    }

    #[test]
    fn test_watcher_picks_up_file_change() {
        let settings = Settings::default();
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), b"- path: /a\n  url: https://old\n").unwrap();
        let current = Arc::new(published(&settings, b"- path: /a\n  url: https://old\n"));

        let _watcher = RedirectWatcher::new(file.path(), settings, current.clone())
            .run()
            .unwrap();
        std::fs::write(file.path(), b"- path: /a\n  url: https://new\n").unwrap();

        let deadline = std::time::Instant::now() + Duration::from_secs(10);
        while location(&current, "/a").as_deref() != Some("https://new") {
            assert!(std::time::Instant::now() < deadline, "watcher never reloaded");
            std::thread::sleep(Duration::from_millis(50));
        }
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let current = ArcSwap::from_pointee(
            build_chain(&Settings::default(), b"").unwrap(),
        );
        let err = reload(Path::new("/no/such/file.yaml"), &Settings::default(), &current)
            .unwrap_err();
        assert!(matches!(err, ReloadError::Read(_)));
    }
}
