//! Viewport change notifications and viewport geometry.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::primitives::{Rect, Size};

/// Capacity of the viewport change channel. Receivers that fall behind
/// only need to know that *something* changed, so lagging is harmless.
const CHANGE_CAPACITY: usize = 16;

/// A change in the viewport's dimensions (window resize, zoom, rotation).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportChange {
    pub size: Size,
}

/// Broadcasts viewport changes to interested position strategies.
///
/// Cloning shares the underlying channel.
#[derive(Debug, Clone)]
pub struct ViewportRuler {
    change_tx: broadcast::Sender<ViewportChange>,
}

impl ViewportRuler {
    pub fn new() -> Self {
        let (change_tx, _) = broadcast::channel(CHANGE_CAPACITY);
        Self { change_tx }
    }

    /// Subscribe to viewport changes.
    pub fn change(&self) -> broadcast::Receiver<ViewportChange> {
        self.change_tx.subscribe()
    }

    /// Notify subscribers that the viewport changed.
    pub fn notify(&self, change: ViewportChange) {
        tracing::trace!(
            "Viewport changed to {}x{}",
            change.size.width,
            change.size.height
        );
        let _ = self.change_tx.send(change);
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.change_tx.receiver_count()
    }
}

impl Default for ViewportRuler {
    fn default() -> Self {
        Self::new()
    }
}

/// The viewport rectangle shrunk by `margin` on every side.
///
/// Built from the document's client size, which excludes scrollbars, so it
/// matches the 100%-sized overlay container the panes live in.
pub fn narrowed_viewport(client_size: Size, margin: f32) -> Rect {
    Rect::new(0.0, 0.0, client_size.width, client_size.height).inset(margin)
}
