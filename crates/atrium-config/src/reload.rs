//! Live config reload.
//!
//! Combines the file watcher with config loading to publish validated
//! configs whenever the file changes on disk. A reload that fails to parse
//! or validate is logged and skipped; the last good config stays current.

use std::path::PathBuf;
use tokio::sync::{mpsc, watch};
use tracing::{error, info, warn};

use crate::schema::AtriumConfig;
use crate::toml_loader;
use crate::watcher::ConfigWatcher;

/// Entry point for live config reloading.
pub struct ReloadManager;

impl ReloadManager {
    /// Load the initial config and start watching the file for changes.
    ///
    /// Returns the initial config together with a watch receiver that
    /// yields a new config after every valid on-disk edit. If the file is
    /// missing or unreadable, defaults are returned and the path is still
    /// watched so a later creation picks it up.
    pub async fn start(config_path: PathBuf) -> (AtriumConfig, watch::Receiver<AtriumConfig>) {
        let initial = match toml_loader::load_validated(&config_path) {
            Ok(config) => config,
            Err(e) => {
                warn!("failed to load config: {e}, using defaults");
                AtriumConfig::default()
            }
        };

        let (config_tx, config_rx) = watch::channel(initial.clone());
        tokio::spawn(publish_reloads(config_path, config_tx));

        (initial, config_rx)
    }
}

/// Background task: forward settled file changes as validated configs.
///
/// Ends when the watcher stops or every config receiver is dropped.
async fn publish_reloads(path: PathBuf, config_tx: watch::Sender<AtriumConfig>) {
    let watcher = match ConfigWatcher::new(path.clone()) {
        Ok(watcher) => watcher,
        Err(e) => {
            error!("failed to create config watcher: {e}");
            return;
        }
    };

    let (change_tx, mut change_rx) = mpsc::channel::<()>(4);
    tokio::spawn(async move {
        if let Err(e) = watcher.watch(change_tx).await {
            error!("config watcher stopped: {e}");
        }
    });

    while change_rx.recv().await.is_some() {
        info!("reloading config from {}", path.display());
        // Strict validation here: a bad edit must not clobber the config
        // the app is already running with.
        match toml_loader::load_validated(&path) {
            Ok(config) => {
                if config_tx.send(config).is_err() {
                    info!("all config receivers dropped, stopping reload manager");
                    break;
                }
            }
            Err(e) => warn!("config reload rejected: {e}"),
        }
    }
}
