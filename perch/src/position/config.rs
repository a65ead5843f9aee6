//! Strategy configuration and the state carried between applications.

use serde::{Deserialize, Serialize};

use crate::element::ElementId;
use crate::primitives::Size;

use super::connected::ConnectedPosition;

/// Everything that controls how a position is chosen and applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionConfig {
    /// Ordered list of preferred positions, from most to least desirable.
    pub positions: Vec<ConnectedPosition>,
    /// Space kept between the overlay and the viewport edges, in px.
    pub viewport_margin: f32,
    /// Whether the overlay's width can shrink to fit the viewport.
    pub flexible_width: bool,
    /// Whether the overlay's height can shrink to fit the viewport.
    pub flexible_height: bool,
    /// Whether the overlay may grow via flexible sizing after it opened.
    pub grow_after_open: bool,
    /// Whether the overlay can be pushed on-screen when nothing fits.
    pub push: bool,
    /// Whether the first applied position is kept on later applications.
    pub position_locked: bool,
    /// Scrollable ancestors of the origin, checked on every position change.
    #[serde(skip)]
    pub scrollable_containers: Vec<ElementId>,
}

impl PositionConfig {
    /// Whether any axis may shrink.
    #[inline]
    pub fn has_flexible_dimensions(&self) -> bool {
        self.flexible_width || self.flexible_height
    }
}

impl Default for PositionConfig {
    fn default() -> Self {
        Self {
            positions: Vec::new(),
            viewport_margin: 0.0,
            flexible_width: true,
            flexible_height: true,
            grow_after_open: false,
            push: true,
            position_locked: false,
            scrollable_containers: Vec::new(),
        }
    }
}

/// Mutable bookkeeping threaded from one application to the next.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementState {
    /// The last position that was applied.
    pub last_position: Option<ConnectedPosition>,
    /// Size of the bounding box the last time it was applied.
    pub last_bounding_box_size: Size,
    /// Whether the last application pushed the overlay on-screen.
    pub is_pushed: bool,
    /// Whether no position has been applied yet.
    pub is_initial_render: bool,
}

impl PlacementState {
    /// Whether an already-open overlay must not grow past its last size.
    #[inline]
    pub fn restricts_growth(&self, config: &PositionConfig) -> bool {
        !self.is_initial_render && !config.grow_after_open
    }
}

impl Default for PlacementState {
    fn default() -> Self {
        Self {
            last_position: None,
            last_bounding_box_size: Size::ZERO,
            is_pushed: false,
            is_initial_render: true,
        }
    }
}
