//! WebView bridge for the Atrium shell.
//!
//! Wraps the `wry` crate to provide:
//! - The single child WebView that renders the scaffold page
//! - The page-to-host IPC protocol and bridge bootstrap script
//! - Event forwarding from page presses to host callbacks

pub mod events;
pub mod forwarder;
pub mod ipc;
pub mod manager;

pub use events::{PageLoadState, ShellEvent};
pub use forwarder::{CallbackBridge, CallbackRegistry, EventForwarder};
pub use ipc::{bridge_init_script, reject_script, resolve_script, PageMessage};
pub use manager::{ShellViewConfig, ShellWebView};
