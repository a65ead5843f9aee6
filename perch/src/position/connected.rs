//! Connection rules between an origin element and an overlay.

use serde::{Deserialize, Serialize};

use crate::scroll_clip::ScrollingVisibility;

/// Horizontal attachment point. `Start`/`End` follow the text direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalConnectionPos {
    Start,
    Center,
    End,
}

/// Vertical attachment point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalConnectionPos {
    Top,
    Center,
    Bottom,
}

/// One candidate placement: which point of the origin connects to which
/// point of the overlay, plus an optional weight and pixel offsets.
///
/// A basic dropdown connects the origin's bottom-start corner to the
/// overlay's top-start corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConnectedPosition {
    pub origin_x: HorizontalConnectionPos,
    pub origin_y: VerticalConnectionPos,
    pub overlay_x: HorizontalConnectionPos,
    pub overlay_y: VerticalConnectionPos,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset_x: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset_y: Option<f32>,
}

impl ConnectedPosition {
    pub const fn new(
        origin_x: HorizontalConnectionPos,
        origin_y: VerticalConnectionPos,
        overlay_x: HorizontalConnectionPos,
        overlay_y: VerticalConnectionPos,
    ) -> Self {
        Self {
            origin_x,
            origin_y,
            overlay_x,
            overlay_y,
            weight: None,
            offset_x: None,
            offset_y: None,
        }
    }

    pub const fn with_weight(mut self, weight: f32) -> Self {
        self.weight = Some(weight);
        self
    }

    pub const fn with_offset(mut self, offset_x: f32, offset_y: f32) -> Self {
        self.offset_x = Some(offset_x);
        self.offset_y = Some(offset_y);
        self
    }

    /// Weight used when scoring flexible fits. Missing or zero counts as 1.
    #[inline]
    pub fn effective_weight(&self) -> f32 {
        match self.weight {
            Some(w) if w != 0.0 => w,
            _ => 1.0,
        }
    }

    #[inline]
    pub fn offset_x(&self) -> f32 {
        self.offset_x.unwrap_or(0.0)
    }

    #[inline]
    pub fn offset_y(&self) -> f32 {
        self.offset_y.unwrap_or(0.0)
    }
}

/// Positions used when the consumer does not provide any: below the origin,
/// falling back to above it.
pub const DEFAULT_POSITIONS: [ConnectedPosition; 2] = [
    ConnectedPosition::new(
        HorizontalConnectionPos::Start,
        VerticalConnectionPos::Bottom,
        HorizontalConnectionPos::Start,
        VerticalConnectionPos::Top,
    ),
    ConnectedPosition::new(
        HorizontalConnectionPos::Start,
        VerticalConnectionPos::Top,
        HorizontalConnectionPos::Start,
        VerticalConnectionPos::Bottom,
    ),
];

/// Emitted every time a position is applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionChange {
    /// The position that was applied.
    pub connection_pair: ConnectedPosition,
    /// Visibility of origin and overlay relative to the scroll containers.
    pub scrollable_view_properties: ScrollingVisibility,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_with_optional_fields() {
        let pos: ConnectedPosition = serde_json::from_str(
            r#"{"origin_x":"start","origin_y":"bottom","overlay_x":"start","overlay_y":"top","weight":2}"#,
        )
        .unwrap();
        assert_eq!(pos, DEFAULT_POSITIONS[0].with_weight(2.0));
        assert_eq!(pos.offset_x(), 0.0);
    }

    #[test]
    fn weight_defaults_to_one() {
        assert_eq!(DEFAULT_POSITIONS[0].effective_weight(), 1.0);
        assert_eq!(DEFAULT_POSITIONS[0].with_weight(0.0).effective_weight(), 1.0);
        assert_eq!(DEFAULT_POSITIONS[0].with_weight(3.0).effective_weight(), 3.0);
    }

    #[test]
    fn serialization_skips_missing_options() {
        let json = serde_json::to_string(&DEFAULT_POSITIONS[1]).unwrap();
        assert!(!json.contains("weight"));
        assert!(json.contains(r#""overlay_y":"bottom""#));
    }
}
