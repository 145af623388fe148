//! App bridge: one-way action dispatch to the hosting dashboard frame.
//!
//! The page runs embedded in the host dashboard. Anything that must
//! happen outside the embed - navigation, most importantly - is
//! requested by dispatching a typed action to the hosting frame.
//! Dispatch is fire-and-forget: no acknowledgment is consumed, and a
//! delivery failure is invisible at this layer.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use tokio::sync::mpsc;
use uuid::Uuid;

/// An action the embedded page can request from the hosting frame.
///
/// Wire shape: `{"type": "redirect", "payload": {"actionId": ..., ...}}`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum AppBridgeAction {
    /// Navigate the hosting frame to a dashboard path.
    #[serde(rename_all = "camelCase")]
    Redirect {
        action_id: Uuid,
        to: String,
        new_context: bool,
    },
}

impl AppBridgeAction {
    /// Build a redirect action with a fresh action id.
    #[must_use]
    pub fn redirect(to: impl Into<String>, new_context: bool) -> Self {
        Self::Redirect {
            action_id: Uuid::new_v4(),
            to: to.into(),
            new_context,
        }
    }
}

/// Handle to the hosting frame's command channel.
///
/// Cheaply cloneable. `ready` reflects the embedding handshake; actions
/// dispatched before the handshake completes are dropped.
#[derive(Clone)]
pub struct AppBridge {
    inner: Arc<AppBridgeInner>,
}

struct AppBridgeInner {
    ready: AtomicBool,
    tx: mpsc::UnboundedSender<AppBridgeAction>,
}

impl AppBridge {
    /// Create a bridge and the receiving end the hosting frame consumes.
    ///
    /// The bridge starts not-ready; call [`handshake`](Self::handshake)
    /// once the frame is attached.
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<AppBridgeAction>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let bridge = Self {
            inner: Arc::new(AppBridgeInner {
                ready: AtomicBool::new(false),
                tx,
            }),
        };
        (bridge, rx)
    }

    /// Mark the embedding handshake as complete.
    pub fn handshake(&self) {
        self.inner.ready.store(true, Ordering::Release);
        tracing::info!("app bridge handshake complete");
    }

    /// Whether the page is embedded and the handshake has completed.
    #[must_use]
    pub fn ready(&self) -> bool {
        self.inner.ready.load(Ordering::Acquire)
    }

    /// Send an action to the hosting frame, fire-and-forget.
    ///
    /// Nothing is awaited and no result is returned: an action dispatched
    /// before the handshake, or after the frame is gone, is dropped.
    pub fn dispatch(&self, action: AppBridgeAction) {
        if !self.ready() {
            tracing::debug!(?action, "bridge not ready, dropping action");
            return;
        }
        if self.inner.tx.send(action).is_err() {
            tracing::debug!("hosting frame gone, action dropped");
        }
    }
}
