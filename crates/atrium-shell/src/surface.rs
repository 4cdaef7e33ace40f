//! The render surface capability.
//!
//! The scaffold manager never touches the page directly; everything goes
//! through a [`RenderSurface`]. The production implementation turns each
//! mutation into a guarded DOM script and queues it for the webview; tests
//! substitute a recording fake.

use std::sync::{Arc, Mutex};

use atrium_common::errors::LayoutError;
use atrium_common::types::{DockSide, ElementRole};

// =============================================================================
// CAPABILITY TRAIT
// =============================================================================

/// The shell's only access to the scaffold page.
pub trait RenderSurface: Send + Sync {
    /// Check that the element for a role can be addressed. Operations call
    /// this for every element they will touch before mutating anything.
    fn resolve(&self, role: ElementRole) -> Result<(), LayoutError>;

    /// Toggle a CSS class on an element.
    fn set_class(&self, role: ElementRole, class: &str, enabled: bool);

    /// Write an inline style property on an element.
    fn set_style(&self, role: ElementRole, property: &str, value: &str);

    /// Replace the text content of an element.
    fn set_text(&self, role: ElementRole, text: &str);

    /// Current width of a drawer panel in pixels. Layout reads this on
    /// every recomputation; it is never cached by callers.
    fn panel_width(&self, side: DockSide) -> f64;
}

// =============================================================================
// SCRIPT QUEUE
// =============================================================================

/// Ordered queue of DOM scripts waiting to be evaluated in the webview.
///
/// Cloning shares the underlying storage; the app drains the queue on the
/// main thread each loop iteration, preserving enqueue order.
#[derive(Clone, Default)]
pub struct ScriptQueue {
    scripts: Arc<Mutex<Vec<String>>>,
}

impl ScriptQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, script: impl Into<String>) {
        self.scripts.lock().unwrap().push(script.into());
    }

    /// Take all queued scripts, leaving the queue empty.
    pub fn drain(&self) -> Vec<String> {
        let mut scripts = self.scripts.lock().unwrap();
        std::mem::take(&mut *scripts)
    }

    pub fn len(&self) -> usize {
        self.scripts.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// =============================================================================
// SCRIPT SURFACE
// =============================================================================

/// Production [`RenderSurface`] that emits guarded DOM scripts.
///
/// Each mutation becomes one IIFE that looks the element up by id and
/// relays a warning back to the host if it is missing. `resolve` always
/// succeeds: the generated scaffold page contains every role by
/// construction, and the runtime guard covers the pathological case.
pub struct ScriptSurface {
    queue: ScriptQueue,
    /// Drawer widths in pixels, (left, right). Updated on config reload.
    widths: Mutex<(f64, f64)>,
}

impl ScriptSurface {
    pub fn new(queue: ScriptQueue, left_width: f64, right_width: f64) -> Self {
        Self {
            queue,
            widths: Mutex::new((left_width, right_width)),
        }
    }

    /// Replace both drawer widths. The next layout pass picks them up.
    pub fn set_widths(&self, left: f64, right: f64) {
        *self.widths.lock().unwrap() = (left, right);
    }

    /// Wrap a mutation statement in an element lookup guard. A miss is
    /// relayed to the host log over IPC; the page console is not watched.
    fn guarded(dom_id: &str, body: &str) -> String {
        format!(
            "(function() {{\n  var el = document.getElementById('{dom_id}');\n  if (!el) {{\n    window.ipc.postMessage(JSON.stringify({{ kind: 'log', level: 'warn', message: 'element not found: {dom_id}' }}));\n    return;\n  }}\n  {body}\n}})();"
        )
    }
}

/// Escape a value for embedding in a single-quoted JS string literal.
pub(crate) fn js_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}

impl RenderSurface for ScriptSurface {
    fn resolve(&self, _role: ElementRole) -> Result<(), LayoutError> {
        Ok(())
    }

    fn set_class(&self, role: ElementRole, class: &str, enabled: bool) {
        let method = if enabled { "add" } else { "remove" };
        let body = format!("el.classList.{method}('{}');", js_escape(class));
        self.queue.push(Self::guarded(role.dom_id(), &body));
    }

    fn set_style(&self, role: ElementRole, property: &str, value: &str) {
        let body = format!(
            "el.style.setProperty('{}', '{}');",
            js_escape(property),
            js_escape(value)
        );
        self.queue.push(Self::guarded(role.dom_id(), &body));
    }

    fn set_text(&self, role: ElementRole, text: &str) {
        // serde_json handles quoting and control characters
        let encoded = serde_json::to_string(text).unwrap_or_else(|_| "\"\"".into());
        let body = format!("el.textContent = {encoded};");
        self.queue.push(Self::guarded(role.dom_id(), &body));
    }

    fn panel_width(&self, side: DockSide) -> f64 {
        let (left, right) = *self.widths.lock().unwrap();
        match side {
            DockSide::Left => left,
            DockSide::Right => right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> (ScriptSurface, ScriptQueue) {
        let queue = ScriptQueue::new();
        let surface = ScriptSurface::new(queue.clone(), 250.0, 290.0);
        (surface, queue)
    }

    #[test]
    fn queue_preserves_order() {
        let queue = ScriptQueue::new();
        queue.push("first");
        queue.push("second");
        let drained = queue.drain();
        assert_eq!(drained, vec!["first".to_string(), "second".to_string()]);
        assert!(queue.is_empty());
    }

    #[test]
    fn queue_clone_shares_storage() {
        let queue = ScriptQueue::new();
        let clone = queue.clone();
        clone.push("script");
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn set_class_adds_and_removes() {
        let (surface, queue) = surface();
        surface.set_class(ElementRole::LeftDrawer, "open", true);
        surface.set_class(ElementRole::LeftDrawer, "open", false);

        let scripts = queue.drain();
        assert_eq!(scripts.len(), 2);
        assert!(scripts[0].contains("getElementById('left-drawer')"));
        assert!(scripts[0].contains("classList.add('open')"));
        assert!(scripts[1].contains("classList.remove('open')"));
    }

    #[test]
    fn set_style_uses_set_property() {
        let (surface, queue) = surface();
        surface.set_style(ElementRole::Content, "margin-left", "250px");

        let scripts = queue.drain();
        assert!(scripts[0].contains("getElementById('content')"));
        assert!(scripts[0].contains("setProperty('margin-left', '250px')"));
    }

    #[test]
    fn scripts_guard_missing_elements() {
        let (surface, queue) = surface();
        surface.set_class(ElementRole::BottomNav, "hidden", true);

        let script = queue.drain().remove(0);
        assert!(script.contains("if (!el)"));
        // A miss reports back to the host instead of the page console
        assert!(script.contains("kind: 'log', level: 'warn'"));
        assert!(script.contains("element not found: bottom-nav"));
    }

    #[test]
    fn set_text_json_encodes_content() {
        let (surface, queue) = surface();
        surface.set_text(ElementRole::SnackBarText, "saved \"draft\"\nok");

        let script = queue.drain().remove(0);
        assert!(script.contains("getElementById('snack-bar-text')"));
        assert!(script.contains(r#"el.textContent = "saved \"draft\"\nok";"#));
    }

    #[test]
    fn style_values_escape_quotes() {
        let (surface, queue) = surface();
        surface.set_style(ElementRole::Content, "font-family", "'Menlo', monospace");

        let script = queue.drain().remove(0);
        assert!(script.contains("\\'Menlo\\'"));
    }

    #[test]
    fn panel_width_reads_current_value() {
        let (surface, _queue) = surface();
        assert_eq!(surface.panel_width(DockSide::Left), 250.0);
        assert_eq!(surface.panel_width(DockSide::Right), 290.0);

        surface.set_widths(300.0, 310.0);
        assert_eq!(surface.panel_width(DockSide::Left), 300.0);
        assert_eq!(surface.panel_width(DockSide::Right), 310.0);
    }

    #[test]
    fn resolve_accepts_all_roles() {
        let (surface, _queue) = surface();
        for role in ElementRole::ALL {
            assert!(surface.resolve(role).is_ok());
        }
    }
}
