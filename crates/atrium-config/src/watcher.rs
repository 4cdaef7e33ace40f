//! Config file watcher.
//!
//! Monitors the config file for changes using the `notify` crate. Raw
//! filesystem events are debounced so atomic editor saves (write + rename)
//! produce a single reload signal instead of a burst.

use atrium_common::ConfigError;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Quiet period after the last raw event before a change signal is sent.
const DEBOUNCE_WINDOW: Duration = Duration::from_millis(500);

/// Watches a single config file and reports settled changes.
pub struct ConfigWatcher {
    path: PathBuf,
    debounce: Duration,
}

impl ConfigWatcher {
    /// Create a watcher for the given config file path.
    ///
    /// The file does not have to exist yet; its directory is watched, so
    /// creating the file later still produces a signal.
    pub fn new(path: PathBuf) -> Result<Self, ConfigError> {
        if !path.exists() {
            warn!(
                "config file {} does not exist yet, will watch for creation",
                path.display()
            );
        }

        Ok(Self {
            path,
            debounce: DEBOUNCE_WINDOW,
        })
    }

    /// Override the debounce window.
    pub fn with_debounce(mut self, window: Duration) -> Self {
        self.debounce = window;
        self
    }

    /// Watch the config file, sending `()` on `changes` once per settled edit.
    ///
    /// Runs until the receiving side of `changes` is dropped. The parent
    /// directory is watched rather than the file itself, since editors
    /// replace the file on save.
    pub async fn watch(&self, changes: mpsc::Sender<()>) -> Result<(), ConfigError> {
        let (raw_tx, mut raw_rx) = mpsc::channel::<()>(16);

        info!("starting config file watcher for {}", self.path.display());
        let _fs_watcher = build_fs_watcher(&self.path, raw_tx)?;

        while raw_rx.recv().await.is_some() {
            // Trailing debounce: each further raw event extends the window.
            loop {
                match tokio::time::timeout(self.debounce, raw_rx.recv()).await {
                    Ok(Some(())) => continue,
                    Ok(None) => return Ok(()),
                    Err(_) => break,
                }
            }

            info!("config file changed, sending reload signal");
            if changes.send(()).await.is_err() {
                debug!("reload signal receiver dropped, stopping watcher");
                break;
            }
        }

        Ok(())
    }
}

/// Attach a filesystem watcher to the config file's directory.
///
/// Returns the watcher handle; dropping it stops event delivery.
fn build_fs_watcher(path: &Path, raw_tx: mpsc::Sender<()>) -> Result<RecommendedWatcher, ConfigError> {
    let watch_dir = watch_dir_for(path);
    let target: OsString = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();

    let mut watcher = RecommendedWatcher::new(
        move |result: Result<Event, notify::Error>| {
            let event = match result {
                Ok(event) => event,
                Err(e) => {
                    error!("file watcher error: {e}");
                    return;
                }
            };

            if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
                return;
            }

            if event
                .paths
                .iter()
                .any(|p| p.file_name() == Some(target.as_os_str()))
            {
                debug!("config file change detected");
                let _ = raw_tx.try_send(());
            }
        },
        notify::Config::default(),
    )
    .map_err(|e| ConfigError::WatchError(format!("failed to create watcher: {e}")))?;

    watcher
        .watch(&watch_dir, RecursiveMode::NonRecursive)
        .map_err(|e| {
            ConfigError::WatchError(format!("failed to watch {}: {e}", watch_dir.display()))
        })?;

    Ok(watcher)
}

/// Directory to watch for a given config file path.
///
/// A bare file name like `atrium.toml` has an empty parent, which `notify`
/// rejects, so fall back to the current directory.
fn watch_dir_for(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
