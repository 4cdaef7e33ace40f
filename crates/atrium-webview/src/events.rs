//! Shell WebView event types.

/// Phase of a page load as reported by the webview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLoadState {
    Started,
    Finished,
}

impl PageLoadState {
    /// Whether the scaffold document and its resources are fully loaded.
    pub fn is_finished(&self) -> bool {
        matches!(self, PageLoadState::Finished)
    }
}

impl From<wry::PageLoadEvent> for PageLoadState {
    fn from(event: wry::PageLoadEvent) -> Self {
        match event {
            wry::PageLoadEvent::Started => PageLoadState::Started,
            wry::PageLoadEvent::Finished => PageLoadState::Finished,
        }
    }
}

/// Events emitted by the shell WebView, drained by the main event loop.
#[derive(Debug, Clone)]
pub enum ShellEvent {
    /// Page load phase changed. Carries the URL.
    PageLoad { state: PageLoadState, url: String },
    /// A raw IPC message body arrived from the page.
    Ipc { body: String },
}
