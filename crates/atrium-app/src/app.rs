//! Top-level application state.
//!
//! Implements `winit::application::ApplicationHandler` to drive the main
//! event loop. Owns the scaffold state, the shell WebView, and the
//! channels that connect them: page presses fan out to the async
//! forwarding task, scaffold commands and settlement scripts come back,
//! and every DOM mutation flows through one ordered script queue.

use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;
use std::time::{Duration, Instant};

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes, WindowId};

use atrium_common::errors::BridgeError;
use atrium_config::{AtriumConfig, ReloadManager};
use atrium_shell::{
    render_page, theme_update_script, ScaffoldCommand, ScaffoldManager, ScriptQueue, ScriptSurface,
};
use atrium_webview::{
    bridge_init_script, reject_script, resolve_script, CallbackRegistry, EventForwarder,
    PageMessage, ShellEvent, ShellViewConfig, ShellWebView,
};

use crate::actions::register_callbacks;

/// Outcome of one forwarded press, reported back by the async task.
struct PressOutcome {
    id: u64,
    result: Result<String, BridgeError>,
}

/// How often to drain the channels feeding the event loop.
const PUMP_INTERVAL: Duration = Duration::from_millis(16);

/// Top-level application state.
pub struct AtriumApp {
    config: AtriumConfig,
    config_path: PathBuf,
    open_devtools: bool,

    // Windowing
    window: Option<Arc<Window>>,
    webview: Option<ShellWebView>,

    // Scaffold state + script pipeline
    queue: ScriptQueue,
    surface: Option<Arc<ScriptSurface>>,
    manager: Option<ScaffoldManager>,

    // Event forwarding
    forwarder: Arc<EventForwarder>,
    tokio_runtime: Option<tokio::runtime::Runtime>,
    command_rx: Option<Receiver<ScaffoldCommand>>,
    outcome_tx: Option<Sender<PressOutcome>>,
    outcome_rx: Option<Receiver<PressOutcome>>,
    config_rx: Option<Receiver<AtriumConfig>>,
}

impl AtriumApp {
    pub fn new(config: AtriumConfig, config_path: PathBuf, open_devtools: bool) -> Self {
        Self {
            config,
            config_path,
            open_devtools,
            window: None,
            webview: None,
            queue: ScriptQueue::new(),
            surface: None,
            manager: None,
            forwarder: Arc::new(EventForwarder::new()),
            tokio_runtime: None,
            command_rx: None,
            outcome_tx: None,
            outcome_rx: None,
            config_rx: None,
        }
    }

    /// Lazily create the tokio runtime backing the forwarding task and the
    /// config watcher.
    fn ensure_runtime(&mut self) {
        if self.tokio_runtime.is_some() {
            return;
        }
        match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
        {
            Ok(rt) => self.tokio_runtime = Some(rt),
            Err(e) => tracing::error!("Failed to create tokio runtime: {e}"),
        }
    }

    /// Start the config watch task, bridging reloads onto the winit thread.
    fn start_config_watch(&mut self) {
        let Some(rt) = &self.tokio_runtime else {
            return;
        };
        let (tx, rx) = std::sync::mpsc::channel();
        self.config_rx = Some(rx);

        let path = self.config_path.clone();
        rt.spawn(async move {
            let (_initial, mut updates) = ReloadManager::start(path).await;
            while updates.changed().await.is_ok() {
                let config = updates.borrow().clone();
                if tx.send(config).is_err() {
                    break;
                }
            }
        });
    }

    /// Hand one press to the forwarding task. The outcome comes back over
    /// the outcome channel and settles the page's promise.
    fn spawn_forward(&self, id: u64, name: String, args: Vec<serde_json::Value>) {
        let (Some(rt), Some(outcome_tx)) = (&self.tokio_runtime, &self.outcome_tx) else {
            tracing::error!(name, "press dropped; forwarding runtime not running");
            return;
        };

        let forwarder = Arc::clone(&self.forwarder);
        let outcome_tx = outcome_tx.clone();
        rt.spawn(async move {
            let result = forwarder.forward_indexed(&name, &args).await;
            let _ = outcome_tx.send(PressOutcome { id, result });
        });
    }

    fn handle_page_message(&mut self, msg: PageMessage) {
        match msg {
            PageMessage::Ready => {
                tracing::info!("Scaffold page ready");
                if let Some(manager) = &mut self.manager {
                    if let Err(e) = manager.recompute_layout() {
                        tracing::error!("Initial layout failed: {e}");
                    }
                }
            }
            PageMessage::Press { id, name, args } => self.spawn_forward(id, name, args),
            PageMessage::Log { level, message } => match level.as_str() {
                "error" => tracing::error!("page: {message}"),
                "warn" => tracing::warn!("page: {message}"),
                "debug" => tracing::debug!("page: {message}"),
                _ => tracing::info!("page: {message}"),
            },
        }
    }

    /// Apply a validated config reload. Scaffold dimensions and theme take
    /// effect live; everything else waits for the next start.
    fn apply_config_reload(&mut self, new: AtriumConfig) {
        for note in restart_notes(&self.config, &new) {
            tracing::info!("{note} changes take effect on restart");
        }

        if let Some(surface) = &self.surface {
            surface.set_widths(
                new.scaffold.left_drawer_width,
                new.scaffold.right_drawer_width,
            );
        }
        self.queue.push(theme_update_script(&new));
        if let Some(manager) = &mut self.manager {
            if let Err(e) = manager.recompute_layout() {
                tracing::error!("Layout recompute after reload failed: {e}");
            }
        }

        self.config = new;
        tracing::info!("Configuration reloaded");
    }

    /// One pump tick: ingest page events, run scaffold commands, settle
    /// press promises, apply config reloads, and flush the script queue.
    fn pump(&mut self) {
        let events = match &self.webview {
            Some(webview) => webview.drain_events(),
            None => return,
        };
        for event in events {
            match event {
                ShellEvent::Ipc { body } => {
                    if let Some(msg) = PageMessage::from_json(&body) {
                        self.handle_page_message(msg);
                    }
                }
                ShellEvent::PageLoad { state, url } => {
                    tracing::debug!(?state, url = %url, "page load");
                    if state.is_finished() {
                        if let Some(webview) = &self.webview {
                            if let Err(e) = webview.focus() {
                                tracing::warn!("Failed to focus webview: {e}");
                            }
                        }
                    }
                }
            }
        }

        // Outcomes are collected before commands are drained. A callback
        // sends its command before the task reports the outcome, so every
        // outcome held here has its command in the channel already and the
        // settlement script lands after the mutations it produced.
        let mut outcomes = Vec::new();
        if let Some(rx) = &self.outcome_rx {
            while let Ok(outcome) = rx.try_recv() {
                outcomes.push(outcome);
            }
        }

        let mut commands = Vec::new();
        if let Some(rx) = &self.command_rx {
            while let Ok(cmd) = rx.try_recv() {
                commands.push(cmd);
            }
        }
        for cmd in commands {
            if let Some(manager) = &mut self.manager {
                if let Err(e) = manager.execute(cmd) {
                    tracing::error!("Scaffold command failed: {e}");
                }
            }
        }

        for PressOutcome { id, result } in outcomes {
            let script = match result {
                Ok(payload) => resolve_script(id, &payload),
                Err(e) => reject_script(id, &e.to_string()),
            };
            self.queue.push(script);
        }

        let mut reloads = Vec::new();
        if let Some(rx) = &self.config_rx {
            while let Ok(config) = rx.try_recv() {
                reloads.push(config);
            }
        }
        // Only the newest reload matters
        if let Some(config) = reloads.pop() {
            self.apply_config_reload(config);
        }

        if let Some(webview) = &self.webview {
            for script in self.queue.drain() {
                if let Err(e) = webview.evaluate_script(&script) {
                    tracing::warn!("Script evaluation failed: {e}");
                }
            }
        }
    }
}

impl ApplicationHandler for AtriumApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.config.window.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                tracing::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let view_config = ShellViewConfig {
            html: render_page(&self.config),
            init_script: bridge_init_script(
                self.config.bridge.call_convention(),
                &self.config.bridge.namespace,
            ),
            devtools: self.open_devtools || cfg!(debug_assertions),
            ..Default::default()
        };

        let webview = match ShellWebView::create(
            window.as_ref(),
            full_bounds(window.inner_size()),
            view_config,
        ) {
            Ok(wv) => wv,
            Err(e) => {
                tracing::error!("Failed to create shell webview: {e}");
                event_loop.exit();
                return;
            }
        };
        if self.open_devtools {
            webview.open_devtools();
        }

        let surface = Arc::new(ScriptSurface::new(
            self.queue.clone(),
            self.config.scaffold.left_drawer_width,
            self.config.scaffold.right_drawer_width,
        ));
        let manager = ScaffoldManager::new(surface.clone(), self.config.scaffold.layout_strategy());
        tracing::info!("Scaffold manager ready ({} strategy)", manager.strategy());

        let registry = Arc::new(CallbackRegistry::new());
        let (command_tx, command_rx) = std::sync::mpsc::channel();
        register_callbacks(&registry, command_tx);
        self.forwarder.attach(registry);

        let (outcome_tx, outcome_rx) = std::sync::mpsc::channel();

        self.ensure_runtime();
        self.start_config_watch();

        self.webview = Some(webview);
        self.surface = Some(surface);
        self.manager = Some(manager);
        self.command_rx = Some(command_rx);
        self.outcome_tx = Some(outcome_tx);
        self.outcome_rx = Some(outcome_rx);
        self.window = Some(window);
        tracing::info!("Window and shell webview created");
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("Window close requested");
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    if let Some(webview) = &self.webview {
                        if let Err(e) = webview.set_bounds(full_bounds(size)) {
                            tracing::warn!("Failed to resize webview: {e}");
                        }
                    }
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.pump();
        event_loop.set_control_flow(winit::event_loop::ControlFlow::WaitUntil(
            Instant::now() + PUMP_INTERVAL,
        ));
    }
}

/// The webview fills the whole window client area.
fn full_bounds(size: winit::dpi::PhysicalSize<u32>) -> wry::Rect {
    wry::Rect {
        position: wry::dpi::Position::Logical(wry::dpi::LogicalPosition::new(0.0, 0.0)),
        size: wry::dpi::Size::Physical(wry::dpi::PhysicalSize::new(size.width, size.height)),
    }
}

/// Which config sections changed in ways the running shell cannot apply.
fn restart_notes(old: &AtriumConfig, new: &AtriumConfig) -> Vec<&'static str> {
    let mut notes = Vec::new();
    if old.window.title != new.window.title
        || old.window.width != new.window.width
        || old.window.height != new.window.height
    {
        notes.push("window");
    }
    if old.bridge.convention != new.bridge.convention
        || old.bridge.namespace != new.bridge.namespace
    {
        notes.push("bridge");
    }
    if old.scaffold.strategy != new.scaffold.strategy {
        notes.push("layout strategy");
    }
    if old.logging.level != new.logging.level {
        notes.push("logging");
    }
    notes
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_bounds_pins_origin_and_keeps_physical_size() {
        let bounds = full_bounds(winit::dpi::PhysicalSize::new(1280, 800));

        match bounds.position {
            wry::dpi::Position::Logical(pos) => {
                assert!(pos.x.abs() < f64::EPSILON);
                assert!(pos.y.abs() < f64::EPSILON);
            }
            _ => panic!("expected logical position"),
        }
        match bounds.size {
            wry::dpi::Size::Physical(size) => {
                assert_eq!(size.width, 1280);
                assert_eq!(size.height, 800);
            }
            _ => panic!("expected physical size"),
        }
    }

    #[test]
    fn restart_notes_empty_when_nothing_changed() {
        let config = AtriumConfig::default();
        assert!(restart_notes(&config, &config.clone()).is_empty());
    }

    #[test]
    fn restart_notes_ignore_live_applicable_changes() {
        let old = AtriumConfig::default();
        let mut new = old.clone();
        new.scaffold.left_drawer_width = 320.0;
        new.theme.app_bar_color = "#123456".to_string();

        assert!(restart_notes(&old, &new).is_empty());
    }

    #[test]
    fn restart_notes_flag_structural_changes() {
        let old = AtriumConfig::default();

        let mut new = old.clone();
        new.window.width = 1200.0;
        assert_eq!(restart_notes(&old, &new), vec!["window"]);

        let mut new = old.clone();
        new.bridge.convention = "flat".to_string();
        assert_eq!(restart_notes(&old, &new), vec!["bridge"]);

        let mut new = old.clone();
        new.scaffold.strategy = "inline".to_string();
        assert_eq!(restart_notes(&old, &new), vec!["layout strategy"]);

        let mut new = old.clone();
        new.logging.level = "debug".to_string();
        assert_eq!(restart_notes(&old, &new), vec!["logging"]);
    }
}
