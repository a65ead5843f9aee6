//! The overlay surface a strategy positions.

use serde::{Deserialize, Serialize};

use crate::element::{ElementId, OverlayId};
use crate::position::styles::CssValue;

/// Text direction of the overlay's context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

impl Direction {
    #[inline]
    pub fn is_rtl(self) -> bool {
        self == Direction::Rtl
    }
}

/// A size limit: either pixels or a raw CSS length such as `"50vh"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dimension {
    Px(f32),
    Css(String),
}

impl Dimension {
    pub fn to_css(&self) -> CssValue {
        match self {
            Dimension::Px(px) => CssValue::Px(*px),
            Dimension::Css(raw) => CssValue::Keyword(raw.clone()),
        }
    }
}

/// Sizing and direction settings of an overlay surface.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub direction: Direction,
    pub min_width: Option<f32>,
    pub min_height: Option<f32>,
    pub max_width: Option<Dimension>,
    pub max_height: Option<Dimension>,
}

/// Handle to an overlay surface owned by the overlay container.
///
/// `host` is the sizing wrapper (the "bounding box") the strategy stretches
/// to the available space; `pane` is the panel positioned inside it.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayRef {
    pub id: OverlayId,
    pub host: ElementId,
    pub pane: ElementId,
    pub config: OverlayConfig,
}

impl OverlayRef {
    pub fn new(host: ElementId, pane: ElementId, config: OverlayConfig) -> Self {
        Self {
            id: OverlayId::new(),
            host,
            pane,
            config,
        }
    }
}
