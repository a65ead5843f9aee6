//! Scroll clipping checks.
//!
//! Answers whether an element is cut off by, or scrolled completely out of,
//! one of its scrollable ancestors. Container rects are measured fresh by the
//! caller on every position change.

use serde::{Deserialize, Serialize};

use crate::primitives::Rect;

/// How the origin and the overlay relate to the registered scroll containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScrollingVisibility {
    pub is_origin_clipped: bool,
    pub is_origin_outside_view: bool,
    pub is_overlay_clipped: bool,
    pub is_overlay_outside_view: bool,
}

impl ScrollingVisibility {
    /// Evaluate both elements against the same set of containers.
    pub fn measure(origin: &Rect, overlay: &Rect, containers: &[Rect]) -> Self {
        Self {
            is_origin_clipped: is_element_clipped_by_scrolling(origin, containers),
            is_origin_outside_view: is_element_scrolled_outside_view(origin, containers),
            is_overlay_clipped: is_element_clipped_by_scrolling(overlay, containers),
            is_overlay_outside_view: is_element_scrolled_outside_view(overlay, containers),
        }
    }
}

/// Whether `element` is partially cut off by any of `containers`.
pub fn is_element_clipped_by_scrolling(element: &Rect, containers: &[Rect]) -> bool {
    containers.iter().any(|container| {
        let clipped_above = element.top() < container.top();
        let clipped_below = element.bottom() > container.bottom();
        let clipped_left = element.left() < container.left();
        let clipped_right = element.right() > container.right();

        clipped_above || clipped_below || clipped_left || clipped_right
    })
}

/// Whether `element` has been scrolled entirely past an edge of any of `containers`.
///
/// An element whose edge exactly touches the container edge still counts as in view.
pub fn is_element_scrolled_outside_view(element: &Rect, containers: &[Rect]) -> bool {
    containers.iter().any(|container| {
        let outside_above = element.bottom() < container.top();
        let outside_below = element.top() > container.bottom();
        let outside_left = element.right() < container.left();
        let outside_right = element.left() > container.right();

        outside_above || outside_below || outside_left || outside_right
    })
}
