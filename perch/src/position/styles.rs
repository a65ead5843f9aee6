//! Inline styles for the bounding box and the overlay pane.
//!
//! A chosen [`Placement`] is turned into two style declarations plus the
//! resolved pane rectangle. Values are written in insertion order, with
//! `CssValue::Cleared` removing a property set by an earlier application.

use std::fmt;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::overlay::{Direction, OverlayConfig};
use crate::primitives::{Point, Rect};

use super::bounding_box::{BoundingBoxRect, bounding_box_rect, clamp_to_last_size};
use super::candidate::overlay_point;
use super::config::{PlacementState, PositionConfig};
use super::connected::{ConnectedPosition, HorizontalConnectionPos, VerticalConnectionPos};
use super::select::{Measurements, Placement, push_overlay_on_screen};

/// Inline style properties touched by the strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StyleProperty {
    Top,
    Left,
    Right,
    Bottom,
    Width,
    Height,
    MaxWidth,
    MaxHeight,
    Transform,
    JustifyContent,
    AlignItems,
}

impl StyleProperty {
    pub fn css_name(&self) -> &'static str {
        match self {
            StyleProperty::Top => "top",
            StyleProperty::Left => "left",
            StyleProperty::Right => "right",
            StyleProperty::Bottom => "bottom",
            StyleProperty::Width => "width",
            StyleProperty::Height => "height",
            StyleProperty::MaxWidth => "max-width",
            StyleProperty::MaxHeight => "max-height",
            StyleProperty::Transform => "transform",
            StyleProperty::JustifyContent => "justify-content",
            StyleProperty::AlignItems => "align-items",
        }
    }
}

/// A CSS value as written into an inline style.
#[derive(Debug, Clone, PartialEq)]
pub enum CssValue {
    /// Empty string: removes the inline value.
    Cleared,
    Px(f32),
    Percent(f32),
    Keyword(String),
}

impl CssValue {
    pub fn keyword(value: impl Into<String>) -> Self {
        CssValue::Keyword(value.into())
    }
}

impl fmt::Display for CssValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CssValue::Cleared => Ok(()),
            CssValue::Px(px) => write!(f, "{}px", px),
            CssValue::Percent(pct) => write!(f, "{}%", pct),
            CssValue::Keyword(raw) => f.write_str(raw),
        }
    }
}

impl Serialize for CssValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// An ordered set of inline style assignments.
pub type StyleDeclaration = IndexMap<StyleProperty, CssValue>;

/// Everything one application writes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleFrame {
    /// Styles for the sizing wrapper.
    pub bounding_box: StyleDeclaration,
    /// Styles for the overlay pane.
    pub pane: StyleDeclaration,
    /// Wrapper geometry after clamping; becomes the next "last size".
    pub bounding_box_rect: BoundingBoxRect,
    /// Where the pane ends up, offsets included.
    pub overlay_rect: Rect,
}

/// Styles that return the bounding box to a neutral state before measuring.
pub fn reset_bounding_box_styles() -> StyleDeclaration {
    let mut styles = StyleDeclaration::new();
    styles.insert(StyleProperty::Top, CssValue::Px(0.0));
    styles.insert(StyleProperty::Left, CssValue::Px(0.0));
    styles.insert(StyleProperty::Right, CssValue::Px(0.0));
    styles.insert(StyleProperty::Bottom, CssValue::Px(0.0));
    styles.insert(StyleProperty::Height, CssValue::Cleared);
    styles.insert(StyleProperty::Width, CssValue::Cleared);
    styles.insert(StyleProperty::AlignItems, CssValue::Cleared);
    styles.insert(StyleProperty::JustifyContent, CssValue::Cleared);
    styles
}

/// Turn a placement into the styles for both elements.
///
/// Uses `state.is_pushed` to decide between flexible and exact positioning,
/// so the caller updates it before resolving.
pub fn resolve_styles(
    placement: &Placement,
    measurements: &Measurements,
    overlay_config: &OverlayConfig,
    config: &PositionConfig,
    state: &PlacementState,
) -> StyleFrame {
    let position = &placement.position;
    let overlay_top_left = resolved_overlay_point(placement, measurements, overlay_config, state);

    let bounding_box_rect = clamp_to_last_size(
        bounding_box_rect(
            placement.origin_point,
            position,
            &measurements.viewport,
            overlay_config.direction,
            config,
            state,
        ),
        config,
        state,
    );

    let overlay_rect = pane_rect(
        position,
        overlay_top_left,
        &bounding_box_rect,
        measurements,
        overlay_config.direction,
        config,
        state,
    );

    StyleFrame {
        pane: pane_styles(position, overlay_top_left, measurements, overlay_config, config, state),
        bounding_box: bounding_box_styles(&bounding_box_rect, overlay_config, config, state),
        bounding_box_rect,
        overlay_rect,
    }
}

/// Top-left corner of the pane before offsets, pushed on-screen if needed.
fn resolved_overlay_point(
    placement: &Placement,
    measurements: &Measurements,
    overlay_config: &OverlayConfig,
    state: &PlacementState,
) -> Point {
    let overlay = measurements.overlay.size();
    let point = overlay_point(
        placement.origin_point,
        overlay,
        &placement.position,
        overlay_config.direction,
    );
    if !state.is_pushed {
        return point;
    }

    // Push where the pane actually lands, then take the offsets back out
    // since they are written separately as a transform.
    let offset = Point::new(placement.position.offset_x(), placement.position.offset_y());
    push_overlay_on_screen(point + offset, overlay, &measurements.viewport) - offset
}

/// Where a pane sits along one axis of its bounding box.
#[derive(Clone, Copy)]
enum Alignment {
    Start,
    Center,
    End,
}

/// The rect the pane ends up in, offsets included.
///
/// On a flexible axis the pane is pinned inside the bounding box and never
/// exceeds it. Otherwise it keeps its exact point and natural size.
fn pane_rect(
    position: &ConnectedPosition,
    overlay_top_left: Point,
    bounding_box: &BoundingBoxRect,
    measurements: &Measurements,
    direction: Direction,
    config: &PositionConfig,
    state: &PlacementState,
) -> Rect {
    let overlay = measurements.overlay.size();
    let viewport_size = measurements.viewport_size;

    let (x, width) = if config.flexible_width && !state.is_pushed {
        // `right` is measured from the client's right edge.
        let start = match (bounding_box.left, bounding_box.right) {
            (Some(left), _) => left,
            (None, Some(right)) => viewport_size.width - right - bounding_box.width,
            (None, None) => 0.0,
        };
        let alignment = match position.overlay_x {
            HorizontalConnectionPos::Center => Alignment::Center,
            _ if horizontal_anchor_property(position, direction) == StyleProperty::Right => {
                Alignment::End
            }
            _ => Alignment::Start,
        };
        align_within(start, bounding_box.width, overlay.width, alignment)
    } else {
        (overlay_top_left.x, overlay.width)
    };

    let (y, height) = if config.flexible_height && !state.is_pushed {
        let start = match (bounding_box.top, bounding_box.bottom) {
            (Some(top), _) => top,
            (None, Some(bottom)) => viewport_size.height - bottom - bounding_box.height,
            (None, None) => 0.0,
        };
        let alignment = match position.overlay_y {
            VerticalConnectionPos::Top => Alignment::Start,
            VerticalConnectionPos::Center => Alignment::Center,
            VerticalConnectionPos::Bottom => Alignment::End,
        };
        align_within(start, bounding_box.height, overlay.height, alignment)
    } else {
        (overlay_top_left.y, overlay.height)
    };

    Rect::new(x + position.offset_x(), y + position.offset_y(), width, height)
}

/// Fit `length` into the span starting at `start`, returning its start and
/// its (possibly shrunk) length.
fn align_within(start: f32, span: f32, length: f32, alignment: Alignment) -> (f32, f32) {
    let length = length.min(span.max(0.0));
    let lead = match alignment {
        Alignment::Start => 0.0,
        Alignment::Center => (span - length) / 2.0,
        Alignment::End => span - length,
    };
    (start + lead, length)
}

fn bounding_box_styles(
    rect: &BoundingBoxRect,
    overlay_config: &OverlayConfig,
    config: &PositionConfig,
    state: &PlacementState,
) -> StyleDeclaration {
    let mut styles = StyleDeclaration::new();
    let px_or_cleared = |edge: Option<f32>| edge.map_or(CssValue::Cleared, CssValue::Px);

    if !config.flexible_height || state.is_pushed {
        styles.insert(StyleProperty::Top, CssValue::Px(0.0));
        styles.insert(StyleProperty::Bottom, CssValue::Cleared);
        styles.insert(StyleProperty::Height, CssValue::Percent(100.0));
    } else {
        styles.insert(StyleProperty::Height, CssValue::Px(rect.height));
        styles.insert(StyleProperty::Top, px_or_cleared(rect.top));
        styles.insert(StyleProperty::Bottom, px_or_cleared(rect.bottom));
    }

    if !config.flexible_width || state.is_pushed {
        styles.insert(StyleProperty::Left, CssValue::Px(0.0));
        styles.insert(StyleProperty::Right, CssValue::Cleared);
        styles.insert(StyleProperty::Width, CssValue::Percent(100.0));
    } else {
        styles.insert(StyleProperty::Width, CssValue::Px(rect.width));
        styles.insert(StyleProperty::Left, px_or_cleared(rect.left));
        styles.insert(StyleProperty::Right, px_or_cleared(rect.right));
    }

    if config.flexible_height {
        if let Some(max_height) = &overlay_config.max_height {
            styles.insert(StyleProperty::MaxHeight, max_height.to_css());
        }
    }

    if config.flexible_width {
        if let Some(max_width) = &overlay_config.max_width {
            styles.insert(StyleProperty::MaxWidth, max_width.to_css());
        }
    }

    styles
}

fn pane_styles(
    position: &ConnectedPosition,
    overlay_top_left: Point,
    measurements: &Measurements,
    overlay_config: &OverlayConfig,
    config: &PositionConfig,
    state: &PlacementState,
) -> StyleDeclaration {
    let mut styles = StyleDeclaration::new();
    let direction = overlay_config.direction;

    // Reset anything a previous position may have set.
    styles.insert(StyleProperty::Top, CssValue::Cleared);
    styles.insert(StyleProperty::Left, CssValue::Cleared);
    styles.insert(StyleProperty::Bottom, CssValue::Cleared);
    styles.insert(StyleProperty::Right, CssValue::Cleared);

    // Pin the pane to the matching edge of its wrapper unless centered.
    if config.flexible_width
        && position.overlay_x != HorizontalConnectionPos::Center
        && !state.is_pushed
    {
        styles.insert(horizontal_anchor_property(position, direction), CssValue::Px(0.0));
    }

    if config.flexible_height
        && position.overlay_y != VerticalConnectionPos::Center
        && !state.is_pushed
    {
        let property = if position.overlay_y == VerticalConnectionPos::Bottom {
            StyleProperty::Bottom
        } else {
            StyleProperty::Top
        };
        styles.insert(property, CssValue::Px(0.0));
    }

    let overlay = measurements.overlay.size();
    let viewport_size = measurements.viewport_size;

    if !config.flexible_height || state.is_pushed {
        // Anchor from the bottom when the pane opens upward, so it grows away from the origin.
        if position.overlay_y == VerticalConnectionPos::Bottom {
            let bottom = viewport_size.height - (overlay_top_left.y + overlay.height);
            styles.insert(StyleProperty::Top, CssValue::Cleared);
            styles.insert(StyleProperty::Bottom, CssValue::Px(bottom));
        } else {
            styles.insert(StyleProperty::Top, CssValue::Px(overlay_top_left.y));
            styles.insert(StyleProperty::Bottom, CssValue::Cleared);
        }
    }

    if !config.flexible_width || state.is_pushed {
        match horizontal_anchor_property(position, direction) {
            StyleProperty::Right => {
                let right = viewport_size.width - (overlay_top_left.x + overlay.width);
                styles.insert(StyleProperty::Left, CssValue::Cleared);
                styles.insert(StyleProperty::Right, CssValue::Px(right));
            }
            _ => {
                styles.insert(StyleProperty::Left, CssValue::Px(overlay_top_left.x));
                styles.insert(StyleProperty::Right, CssValue::Cleared);
            }
        }
    }

    // Offsets go through a transform: centered panes rely on flex flow, where
    // setting top/left would break the layout.
    let mut transforms = Vec::new();
    if let Some(offset_x) = position.offset_x.filter(|x| *x != 0.0) {
        transforms.push(format!("translateX({}px)", offset_x));
    }
    if let Some(offset_y) = position.offset_y.filter(|y| *y != 0.0) {
        transforms.push(format!("translateY({}px)", offset_y));
    }
    let transform = if transforms.is_empty() {
        CssValue::Cleared
    } else {
        CssValue::Keyword(transforms.join(" "))
    };
    styles.insert(StyleProperty::Transform, transform);

    // Max sizes live on the bounding box while that axis is flexible.
    if config.flexible_height && overlay_config.max_height.is_some() {
        styles.insert(StyleProperty::MaxHeight, CssValue::Cleared);
    }
    if config.flexible_width && overlay_config.max_width.is_some() {
        styles.insert(StyleProperty::MaxWidth, CssValue::Cleared);
    }

    let justify = match position.overlay_x {
        HorizontalConnectionPos::Center => "center",
        HorizontalConnectionPos::End => "flex-end",
        HorizontalConnectionPos::Start => "flex-start",
    };
    styles.insert(StyleProperty::JustifyContent, CssValue::keyword(justify));

    styles
}

/// Which horizontal edge the pane grows away from.
fn horizontal_anchor_property(position: &ConnectedPosition, direction: Direction) -> StyleProperty {
    let is_end = position.overlay_x == HorizontalConnectionPos::End;
    match (direction, is_end) {
        (Direction::Ltr, true) | (Direction::Rtl, false) => StyleProperty::Right,
        _ => StyleProperty::Left,
    }
}
