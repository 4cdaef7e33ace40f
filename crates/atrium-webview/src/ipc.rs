//! IPC protocol between the Rust host and the scaffold page.
//!
//! Messages flow in both directions:
//! - **JS -> Rust**: the page calls `window.ipc.postMessage(JSON.stringify({...}))`,
//!   which triggers the `ipc_handler` registered on the WebView.
//! - **Rust -> JS**: the host calls `evaluate_script` with a settlement
//!   snippet that resolves or rejects the promise a press returned.

use serde::{Deserialize, Serialize};
use tracing::warn;

use atrium_common::types::CallConvention;

/// A typed message from the page to the host.
///
/// Unknown kinds fail deserialization and are dropped; the page cannot
/// invoke anything the host does not model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageMessage {
    /// The page finished booting and installed the bridge surface.
    Ready,
    /// A button press. `id` correlates the host's reply with the pending
    /// promise on the page.
    Press {
        id: u64,
        name: String,
        #[serde(default)]
        args: Vec<serde_json::Value>,
    },
    /// Console relay from the page, for diagnostics.
    Log { level: String, message: String },
}

impl PageMessage {
    /// Parse a message from a raw postMessage body. Malformed input is
    /// logged and dropped, never an error the caller has to route.
    pub fn from_json(raw: &str) -> Option<Self> {
        match serde_json::from_str(raw) {
            Ok(msg) => Some(msg),
            Err(e) => {
                warn!(error = %e, "dropping malformed page message");
                None
            }
        }
    }
}

// =============================================================================
// BRIDGE BOOTSTRAP
// =============================================================================

/// Generate the initialization script that installs the call surface the
/// scaffold markup expects.
///
/// The core is a pending-promise table keyed by call id: a press posts a
/// `press` message and returns a promise that [`resolve_script`] or
/// [`reject_script`] later settles. On top of that the configured
/// convention is exposed: nested installs `<namespace>.api.on_pressed`,
/// flat installs the `on_pressed_str` / `on_pressed` globals. The
/// namespace is validated as an identifier at config load, so it can be
/// interpolated directly.
pub fn bridge_init_script(convention: CallConvention, namespace: &str) -> String {
    let mut js = String::from(
        r#"(function() {
  if (window.__atrium) { return; }
  var bridge = {
    pending: {},
    nextId: 1,
    call: function(name) {
      var args = Array.prototype.slice.call(arguments, 1);
      var id = bridge.nextId++;
      return new Promise(function(resolve, reject) {
        bridge.pending[id] = { resolve: resolve, reject: reject };
        window.ipc.postMessage(JSON.stringify({
          kind: 'press', id: id, name: name, args: args
        }));
      });
    },
    resolve: function(id, value) {
      var entry = bridge.pending[id];
      if (entry) { delete bridge.pending[id]; entry.resolve(value); }
    },
    reject: function(id, reason) {
      var entry = bridge.pending[id];
      if (entry) { delete bridge.pending[id]; entry.reject(new Error(reason)); }
    }
  };
  window.__atrium = bridge;
"#,
    );

    match convention {
        CallConvention::Nested => {
            js.push_str(&format!(
                "  window.{namespace} = window.{namespace} || {{}};\n  window.{namespace}.api = {{\n    on_pressed: function() {{ return bridge.call.apply(null, arguments); }}\n  }};\n"
            ));
        }
        CallConvention::Flat => {
            js.push_str(
                "  window.on_pressed_str = function(name) { return bridge.call(name); };\n  window.on_pressed = function() { return bridge.call.apply(null, arguments); };\n",
            );
        }
    }

    js.push_str(
        r#"  window.addEventListener('DOMContentLoaded', function() {
    window.ipc.postMessage(JSON.stringify({ kind: 'ready' }));
  });
})();
"#,
    );
    js
}

// =============================================================================
// PROMISE SETTLEMENT
// =============================================================================

/// JS that resolves the pending promise for call `id` with a payload.
pub fn resolve_script(id: u64, payload: &str) -> String {
    let encoded = serde_json::to_string(payload).unwrap_or_else(|_| "null".to_string());
    format!("window.__atrium.resolve({id}, {encoded});")
}

/// JS that rejects the pending promise for call `id` with a reason.
pub fn reject_script(id: u64, reason: &str) -> String {
    let encoded = serde_json::to_string(reason).unwrap_or_else(|_| "null".to_string());
    format!("window.__atrium.reject({id}, {encoded});")
}

// =============================================================================
// TESTS
// =============================================================================
