//! Choosing one placement out of the preferred positions.
//!
//! Selection order:
//! - the first position that fits completely within the viewport as-is;
//! - with flexible dimensions, the position whose bounding box offers the
//!   most area (scaled by its weight) while satisfying the minimum size;
//! - with pushing, the position that went off-screen the least, pushed
//!   on-screen;
//! - otherwise that same least-bad position, left partially off-screen.

use serde::Serialize;

use crate::overlay::OverlayConfig;
use crate::primitives::{Point, Rect, Size};

use super::bounding_box::{BoundingBoxRect, bounding_box_rect};
use super::candidate::{OverlayFit, origin_point, overlay_fit, overlay_point};
use super::config::{PlacementState, PositionConfig};
use super::connected::ConnectedPosition;

/// Live measurements taken at the start of one application.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurements {
    /// Client size of the document (the overlay container's size).
    pub viewport_size: Size,
    /// Viewport narrowed by the configured margin.
    pub viewport: Rect,
    pub origin: Rect,
    pub overlay: Rect,
}

/// Which selection rule produced a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementKind {
    /// Fits completely inside the viewport.
    Exact,
    /// Fits once its flexible dimensions shrink.
    Flexible,
    /// Least-bad position, pushed on-screen.
    Pushed,
    /// Least-bad position, left as-is.
    Fallback,
    /// The last applied position, reused without selection.
    Reapplied,
}

/// The chosen position and where it connects on the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: ConnectedPosition,
    pub origin_point: Point,
    pub kind: PlacementKind,
}

/// A position that fits once flexible dimensions are taken into account.
struct FlexibleFit {
    position: ConnectedPosition,
    origin_point: Point,
    bounding_box: BoundingBoxRect,
}

/// The best position seen so far that does not fit at all.
struct FallbackPosition {
    position: ConnectedPosition,
    origin_point: Point,
    fit: OverlayFit,
}

/// Pick the placement to apply. Returns `None` only for an empty list.
pub fn select_placement(
    measurements: &Measurements,
    overlay_config: &OverlayConfig,
    config: &PositionConfig,
    state: &PlacementState,
) -> Option<Placement> {
    let direction = overlay_config.direction;
    let overlay = measurements.overlay.size();
    let viewport = &measurements.viewport;

    let mut flexible_fits: Vec<FlexibleFit> = Vec::new();
    let mut fallback: Option<FallbackPosition> = None;

    for position in &config.positions {
        let origin = origin_point(&measurements.origin, position, direction);
        let point = overlay_point(origin, overlay, position, direction);
        let fit = overlay_fit(point, overlay, viewport, position);

        if fit.is_completely_within_viewport {
            return Some(Placement {
                position: *position,
                origin_point: origin,
                kind: PlacementKind::Exact,
            });
        }

        if can_fit_with_flexible_dimensions(&fit, point, viewport, overlay_config, config) {
            flexible_fits.push(FlexibleFit {
                position: *position,
                origin_point: origin,
                bounding_box: bounding_box_rect(
                    origin, position, viewport, direction, config, state,
                ),
            });
            continue;
        }

        let better = fallback
            .as_ref()
            .is_none_or(|best| best.fit.visible_area < fit.visible_area);
        if better {
            fallback = Some(FallbackPosition {
                position: *position,
                origin_point: origin,
                fit,
            });
        }
    }

    // Greatest available area modified by the position's weight; the first
    // maximal score wins.
    let mut best_flexible: Option<&FlexibleFit> = None;
    let mut best_score = f32::NEG_INFINITY;
    for fit in &flexible_fits {
        let score = fit.bounding_box.area() * fit.position.effective_weight();
        if score > best_score {
            best_score = score;
            best_flexible = Some(fit);
        }
    }
    if let Some(fit) = best_flexible {
        return Some(Placement {
            position: fit.position,
            origin_point: fit.origin_point,
            kind: PlacementKind::Flexible,
        });
    }

    let fallback = fallback?;
    let kind = if config.push {
        PlacementKind::Pushed
    } else {
        PlacementKind::Fallback
    };
    Some(Placement {
        position: fallback.position,
        origin_point: fallback.origin_point,
        kind,
    })
}

/// Whether the overlay fits once it may shrink along its flexible axes.
///
/// An axis qualifies when it already fits, or when it is flexible and the
/// configured minimum size fits in the space from `point` to the viewport's
/// far edge.
pub fn can_fit_with_flexible_dimensions(
    fit: &OverlayFit,
    point: Point,
    viewport: &Rect,
    overlay_config: &OverlayConfig,
    config: &PositionConfig,
) -> bool {
    if !config.has_flexible_dimensions() {
        return false;
    }

    let available_height = viewport.bottom() - point.y;
    let available_width = viewport.right() - point.x;
    let min_height = overlay_config.min_height.unwrap_or(0.0);
    let min_width = overlay_config.min_width.unwrap_or(0.0);

    let vertical_fit = fit.fits_in_viewport_vertically
        || (config.flexible_height && min_height <= available_height);
    let horizontal_fit = fit.fits_in_viewport_horizontally
        || (config.flexible_width && min_width <= available_width);

    vertical_fit && horizontal_fit
}

/// Move `start` so the overlay lands inside `viewport`.
///
/// On an axis where the overlay is no larger than the viewport, it slides
/// just far enough to stop overflowing (leading edge first). Where it is
/// larger, its leading edge is pinned to the viewport's leading edge and the
/// trailing end overflows.
pub fn push_overlay_on_screen(start: Point, overlay: Size, viewport: &Rect) -> Point {
    let overflow_right = (start.x + overlay.width - viewport.right()).max(0.0);
    let overflow_bottom = (start.y + overlay.height - viewport.bottom()).max(0.0);
    let overflow_top = (viewport.top() - start.y).max(0.0);
    let overflow_left = (viewport.left() - start.x).max(0.0);

    let push_x = if overlay.width <= viewport.width {
        if overflow_left > 0.0 {
            overflow_left
        } else {
            -overflow_right
        }
    } else {
        viewport.left() - start.x
    };

    let push_y = if overlay.height <= viewport.height {
        if overflow_top > 0.0 {
            overflow_top
        } else {
            -overflow_bottom
        }
    } else {
        viewport.top() - start.y
    };

    Point::new(start.x + push_x, start.y + push_y)
}
