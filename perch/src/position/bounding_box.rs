//! Geometry of the overlay's sizing wrapper.
//!
//! The wrapper sits on the origin's connection point and stretches towards
//! the viewport edge(s) the overlay opens into. This module only computes
//! numbers; it measures nothing and writes no styles, so every candidate can
//! be scored cheaply.

use serde::Serialize;

use crate::overlay::Direction;
use crate::primitives::{Point, Rect, Size};

use super::config::{PlacementState, PositionConfig};
use super::connected::{ConnectedPosition, HorizontalConnectionPos, VerticalConnectionPos};

/// Position and size of the sizing wrapper for one candidate.
///
/// Edges left as `None` stay `auto`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct BoundingBoxRect {
    pub top: Option<f32>,
    pub left: Option<f32>,
    pub bottom: Option<f32>,
    pub right: Option<f32>,
    pub width: f32,
    pub height: f32,
}

impl BoundingBoxRect {
    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    #[inline]
    pub fn area(&self) -> f32 {
        self.width * self.height
    }
}

/// Compute the wrapper rect for `position` anchored at `origin`.
pub fn bounding_box_rect(
    origin: Point,
    position: &ConnectedPosition,
    viewport: &Rect,
    direction: Direction,
    config: &PositionConfig,
    state: &PlacementState,
) -> BoundingBoxRect {
    let margin = config.viewport_margin;
    let mut rect = BoundingBoxRect::default();

    match position.overlay_y {
        VerticalConnectionPos::Top => {
            // Opening downward, bound by the bottom viewport edge.
            rect.top = Some(origin.y);
            rect.height = viewport.bottom() - origin.y;
        }
        VerticalConnectionPos::Bottom => {
            // Opening upward, bound by the top viewport edge.
            rect.bottom = Some(viewport.bottom() - origin.y + margin);
            rect.height = origin.y - viewport.top();
        }
        VerticalConnectionPos::Center => {
            let smallest_distance = (viewport.bottom() - origin.y).min(origin.y - viewport.top());
            let previous_height = state.last_bounding_box_size.height;

            rect.height = smallest_distance * 2.0;
            rect.top = Some(origin.y - smallest_distance);

            if rect.height > previous_height && state.restricts_growth(config) {
                rect.top = Some(origin.y - previous_height / 2.0);
            }
        }
    }

    // Content flowing to the right is bounded by the right viewport edge.
    let bounded_by_right_edge = matches!(
        (position.overlay_x, direction),
        (HorizontalConnectionPos::Start, Direction::Ltr)
            | (HorizontalConnectionPos::End, Direction::Rtl)
    );
    // Content flowing to the left is bounded by the left viewport edge.
    let bounded_by_left_edge = matches!(
        (position.overlay_x, direction),
        (HorizontalConnectionPos::End, Direction::Ltr)
            | (HorizontalConnectionPos::Start, Direction::Rtl)
    );

    if bounded_by_left_edge {
        rect.right = Some(viewport.right() - origin.x + margin);
        rect.width = origin.x - viewport.left();
    } else if bounded_by_right_edge {
        rect.left = Some(origin.x);
        rect.width = viewport.right() - origin.x;
    } else {
        let smallest_distance = (viewport.right() - origin.x).min(origin.x - viewport.left());
        let previous_width = state.last_bounding_box_size.width;

        rect.width = smallest_distance * 2.0;
        rect.left = Some(origin.x - smallest_distance);

        if rect.width > previous_width && state.restricts_growth(config) {
            rect.left = Some(origin.x - previous_width / 2.0);
        }
    }

    rect
}

/// Keep an already-open overlay from growing while it is re-applied
/// (e.g. on scroll), unless growth after open was requested.
pub fn clamp_to_last_size(
    mut rect: BoundingBoxRect,
    config: &PositionConfig,
    state: &PlacementState,
) -> BoundingBoxRect {
    if state.restricts_growth(config) {
        rect.height = rect.height.min(state.last_bounding_box_size.height);
        rect.width = rect.width.min(state.last_bounding_box_size.width);
    }
    rect
}

#[cfg(test)]
mod tests {
    use super::*;
    use HorizontalConnectionPos::{Center as HCenter, End, Start};
    use VerticalConnectionPos::{Bottom, Center as VCenter, Top};

    fn viewport() -> Rect {
        Rect::new(0.0, 0.0, 1000.0, 800.0)
    }

    fn compute(origin: Point, pos: ConnectedPosition, dir: Direction) -> BoundingBoxRect {
        bounding_box_rect(
            origin,
            &pos,
            &viewport(),
            dir,
            &PositionConfig::default(),
            &PlacementState::default(),
        )
    }

    #[test]
    fn downward_and_rightward() {
        let rect = compute(
            Point::new(100.0, 200.0),
            ConnectedPosition::new(Start, Bottom, Start, Top),
            Direction::Ltr,
        );
        assert_eq!(rect.top, Some(200.0));
        assert_eq!(rect.height, 600.0);
        assert_eq!(rect.left, Some(100.0));
        assert_eq!(rect.width, 900.0);
        assert_eq!(rect.bottom, None);
        assert_eq!(rect.right, None);
    }

    #[test]
    fn upward_and_leftward() {
        let rect = compute(
            Point::new(100.0, 200.0),
            ConnectedPosition::new(End, Top, End, Bottom),
            Direction::Ltr,
        );
        assert_eq!(rect.bottom, Some(600.0));
        assert_eq!(rect.height, 200.0);
        assert_eq!(rect.right, Some(900.0));
        assert_eq!(rect.width, 100.0);
        assert_eq!(rect.top, None);
        assert_eq!(rect.left, None);
    }

    #[test]
    fn rtl_swaps_horizontal_bound() {
        let rect = compute(
            Point::new(100.0, 200.0),
            ConnectedPosition::new(Start, Bottom, Start, Top),
            Direction::Rtl,
        );
        assert_eq!(rect.right, Some(900.0));
        assert_eq!(rect.width, 100.0);
    }

    #[test]
    fn centered_uses_smallest_distance() {
        let rect = compute(
            Point::new(100.0, 200.0),
            ConnectedPosition::new(HCenter, VCenter, HCenter, VCenter),
            Direction::Ltr,
        );
        assert_eq!(rect.height, 400.0);
        assert_eq!(rect.top, Some(0.0));
        assert_eq!(rect.width, 200.0);
        assert_eq!(rect.left, Some(0.0));
    }

    #[test]
    fn margin_is_added_to_far_edges() {
        let config = PositionConfig {
            viewport_margin: 10.0,
            ..Default::default()
        };
        let viewport = viewport().inset(10.0);
        let rect = bounding_box_rect(
            Point::new(100.0, 200.0),
            &ConnectedPosition::new(End, Top, End, Bottom),
            &viewport,
            Direction::Ltr,
            &config,
            &PlacementState::default(),
        );
        assert_eq!(rect.bottom, Some(600.0));
        assert_eq!(rect.height, 190.0);
        assert_eq!(rect.right, Some(900.0));
        assert_eq!(rect.width, 90.0);
    }

    #[test]
    fn centered_box_keeps_previous_size_after_open() {
        let state = PlacementState {
            is_initial_render: false,
            last_bounding_box_size: Size::new(100.0, 100.0),
            ..Default::default()
        };
        let rect = bounding_box_rect(
            Point::new(500.0, 400.0),
            &ConnectedPosition::new(HCenter, VCenter, HCenter, VCenter),
            &viewport(),
            Direction::Ltr,
            &PositionConfig::default(),
            &state,
        );
        assert_eq!(rect.top, Some(350.0));
        assert_eq!(rect.left, Some(450.0));

        let clamped = clamp_to_last_size(rect, &PositionConfig::default(), &state);
        assert_eq!(clamped.size(), Size::new(100.0, 100.0));
    }

    #[test]
    fn clamp_is_skipped_on_initial_render_and_with_growth() {
        let rect = BoundingBoxRect {
            width: 300.0,
            height: 300.0,
            ..Default::default()
        };
        let initial = PlacementState::default();
        assert_eq!(
            clamp_to_last_size(rect, &PositionConfig::default(), &initial),
            rect
        );

        let reopened = PlacementState {
            is_initial_render: false,
            last_bounding_box_size: Size::new(100.0, 100.0),
            ..Default::default()
        };
        let growing = PositionConfig {
            grow_after_open: true,
            ..Default::default()
        };
        assert_eq!(clamp_to_last_size(rect, &growing, &reopened), rect);
    }
}
