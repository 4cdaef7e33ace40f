//! Shell WebView lifecycle.
//!
//! `ShellWebView` wraps the single `wry::WebView` that displays the
//! scaffold page as a child of the host window. Page events are pushed
//! into a shared sink and drained by the main event loop each tick.

use std::sync::{Arc, Mutex};

use tracing::debug;
use wry::raw_window_handle;
use wry::{WebView, WebViewBuilder};

use crate::events::{PageLoadState, ShellEvent};

/// Configuration for creating the shell WebView.
#[derive(Debug, Clone)]
pub struct ShellViewConfig {
    /// The scaffold document to render.
    pub html: String,
    /// Initialization script injected before the page runs (the bridge
    /// bootstrap).
    pub init_script: String,
    /// Whether to enable dev tools (always on in debug builds).
    pub devtools: bool,
    /// Custom user agent string.
    pub user_agent: Option<String>,
}

impl Default for ShellViewConfig {
    fn default() -> Self {
        Self {
            html: String::new(),
            init_script: String::new(),
            devtools: cfg!(debug_assertions),
            user_agent: Some("Atrium/0.1".to_string()),
        }
    }
}

/// The shell's child WebView plus its event sink.
pub struct ShellWebView {
    webview: WebView,
    events: Arc<Mutex<Vec<ShellEvent>>>,
}

impl ShellWebView {
    /// Create the WebView as a child of the given window, filling `bounds`.
    pub fn create<W: raw_window_handle::HasWindowHandle>(
        window: &W,
        bounds: wry::Rect,
        config: ShellViewConfig,
    ) -> Result<Self, wry::Error> {
        let events: Arc<Mutex<Vec<ShellEvent>>> = Arc::new(Mutex::new(Vec::new()));

        let mut builder = WebViewBuilder::new()
            .with_bounds(bounds)
            .with_devtools(config.devtools)
            .with_focused(true)
            .with_initialization_script(&config.init_script);

        if let Some(ua) = &config.user_agent {
            builder = builder.with_user_agent(ua);
        }

        // IPC handler: page -> host
        let ipc_events = Arc::clone(&events);
        builder = builder.with_ipc_handler(move |request| {
            let body = request.body().to_string();
            debug!(body = %body, "IPC message from page");
            if let Ok(mut evts) = ipc_events.lock() {
                evts.push(ShellEvent::Ipc { body });
            }
        });

        // Page load handler
        let load_events = Arc::clone(&events);
        builder = builder.with_on_page_load_handler(move |event, url| {
            let state = PageLoadState::from(event);
            debug!(?state, url = %url, "page load");
            if let Ok(mut evts) = load_events.lock() {
                evts.push(ShellEvent::PageLoad { state, url });
            }
        });

        builder = builder.with_html(&config.html);

        let webview = builder.build_as_child(window)?;
        debug!("shell webview created");

        Ok(Self { webview, events })
    }

    /// Drain all pending events.
    pub fn drain_events(&self) -> Vec<ShellEvent> {
        let mut events = self.events.lock().unwrap();
        std::mem::take(&mut *events)
    }

    /// Execute JavaScript in the page context.
    pub fn evaluate_script(&self, js: &str) -> Result<(), wry::Error> {
        self.webview.evaluate_script(js)
    }

    /// Set the WebView bounds (position + size) within the parent window.
    pub fn set_bounds(&self, bounds: wry::Rect) -> Result<(), wry::Error> {
        self.webview.set_bounds(bounds)
    }

    /// Focus the WebView.
    pub fn focus(&self) -> Result<(), wry::Error> {
        self.webview.focus()
    }

    /// Open devtools (if enabled).
    pub fn open_devtools(&self) {
        self.webview.open_devtools();
    }
}
