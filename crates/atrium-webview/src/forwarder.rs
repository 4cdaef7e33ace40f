//! Event forwarding from page presses to host callbacks.
//!
//! The page never calls host code directly. A press travels through the
//! [`EventForwarder`], which routes it to whatever [`CallbackBridge`]
//! the embedder attached. The default bridge is a [`CallbackRegistry`]
//! of named handlers, but tests and alternative hosts can attach their
//! own implementation.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;
use tracing::{error, info, warn};

use atrium_common::errors::BridgeError;

/// A capability that executes one remote call and reports its outcome.
#[async_trait]
pub trait CallbackBridge: Send + Sync {
    /// Execute the named callback. `Ok` carries a textual payload for the
    /// caller; `Err` carries the rejection.
    async fn call(&self, name: &str, args: &[Value]) -> Result<String, BridgeError>;
}

// =============================================================================
// CALLBACK REGISTRY
// =============================================================================

type CallbackFn = Box<dyn Fn(&[Value]) -> Result<(), String> + Send + Sync>;

/// Named host callbacks, invoked by name with the press arguments.
#[derive(Default)]
pub struct CallbackRegistry {
    callbacks: Mutex<HashMap<String, CallbackFn>>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under a name. Re-registering replaces the
    /// previous handler.
    pub fn register<F>(&self, name: impl Into<String>, handler: F)
    where
        F: Fn(&[Value]) -> Result<(), String> + Send + Sync + 'static,
    {
        let name = name.into();
        let replaced = self
            .callbacks
            .lock()
            .unwrap()
            .insert(name.clone(), Box::new(handler))
            .is_some();
        if replaced {
            warn!(name, "callback handler replaced");
        }
    }

    /// Remove a handler. Returns whether one was registered.
    pub fn unregister(&self, name: &str) -> bool {
        self.callbacks.lock().unwrap().remove(name).is_some()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.callbacks.lock().unwrap().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.callbacks.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.lock().unwrap().is_empty()
    }
}

#[async_trait]
impl CallbackBridge for CallbackRegistry {
    async fn call(&self, name: &str, args: &[Value]) -> Result<String, BridgeError> {
        let callbacks = self.callbacks.lock().unwrap();
        let Some(handler) = callbacks.get(name) else {
            return Err(BridgeError::Rejected(format!(
                "callback '{name}' is not registered"
            )));
        };
        match handler(args) {
            Ok(()) => Ok(format!("Callback '{name}' executed successfully.")),
            Err(reason) => Err(BridgeError::Rejected(reason)),
        }
    }
}

// =============================================================================
// EVENT FORWARDER
// =============================================================================

/// Forwards page events to the attached bridge.
///
/// Each forwarded event makes exactly one bridge call. When no bridge is
/// attached the event is dropped with one error-level diagnostic and no
/// call is attempted. Successes log the reply payload at info level,
/// rejections at error level; either way the result is returned so the
/// caller can settle the page's promise.
#[derive(Default)]
pub struct EventForwarder {
    bridge: Mutex<Option<Arc<dyn CallbackBridge>>>,
}

impl EventForwarder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the bridge capability. Replaces any previous one.
    pub fn attach(&self, bridge: Arc<dyn CallbackBridge>) {
        *self.bridge.lock().unwrap() = Some(bridge);
    }

    /// Drop the bridge capability. Subsequent forwards fail unavailable.
    pub fn detach(&self) {
        *self.bridge.lock().unwrap() = None;
    }

    pub fn is_attached(&self) -> bool {
        self.bridge.lock().unwrap().is_some()
    }

    /// Forward a bare named event.
    pub async fn forward(&self, name: &str) -> Result<String, BridgeError> {
        self.forward_indexed(name, &[]).await
    }

    /// Forward a named event with arguments.
    pub async fn forward_indexed(&self, name: &str, args: &[Value]) -> Result<String, BridgeError> {
        if name.is_empty() {
            warn!("dropping event with empty name");
            return Err(BridgeError::Rejected("event name is empty".to_string()));
        }

        // Clone the capability out so the lock does not span the await.
        let bridge = self.bridge.lock().unwrap().clone();
        let Some(bridge) = bridge else {
            error!(name, "bridge unavailable; event dropped");
            return Err(BridgeError::Unavailable);
        };

        match bridge.call(name, args).await {
            Ok(payload) => {
                info!(name, payload = %payload, "event forwarded");
                Ok(payload)
            }
            Err(e) => {
                error!(name, error = %e, "event forwarding failed");
                Err(e)
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
