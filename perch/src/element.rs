//! Element handles.
//!
//! The engine never owns DOM nodes. It refers to the origin, the overlay
//! pane, its sizing wrapper and every scrollable ancestor through opaque ids
//! that a [`LayoutHost`](crate::host::LayoutHost) resolves.

use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Counter for generating unique element and overlay IDs.
static ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Identifies one element known to the layout host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub u64);

impl ElementId {
    /// Create a new unique element ID.
    ///
    /// Each call returns a different ID.
    pub fn new() -> Self {
        Self(ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Create a stable element ID from a name.
    ///
    /// Deterministic: same name always produces the same ID.
    /// Uses high bit to avoid collision with the atomic counter.
    pub fn named(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self(hasher.finish() | (1 << 63))
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

/// Identifies one overlay surface. A strategy binds to exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverlayId(pub u64);

impl OverlayId {
    pub fn new() -> Self {
        Self(ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for OverlayId {
    fn default() -> Self {
        Self::new()
    }
}
