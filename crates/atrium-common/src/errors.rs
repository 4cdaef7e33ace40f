use std::path::PathBuf;

use crate::types::ElementRole;

#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    /// A required scaffold element could not be resolved. The operation
    /// that hit this aborted before mutating any state.
    #[error("missing scaffold element: {0}")]
    MissingElement(ElementRole),
}

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// No host capability is attached; the call was never attempted.
    #[error("bridge unavailable: no host capability attached")]
    Unavailable,

    /// The asynchronous call was made and came back with a failure.
    #[error("remote call rejected: {0}")]
    Rejected(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),

    #[error("config watch error: {0}")]
    WatchError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum AtriumError {
    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Bridge(#[from] BridgeError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("webview error: {0}")]
    WebView(String),

    #[error("{0}")]
    Other(String),
}
