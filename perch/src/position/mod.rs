//! Connected positioning
//!
//! Everything needed to place an overlay next to an origin element, split by
//! stage:
//!
//! - **`connected`**: the vocabulary (`ConnectedPosition`, `PositionChange`).
//! - **`candidate`**: connection points and viewport fit of one candidate.
//! - **`bounding_box`**: size of the sizing wrapper for a candidate.
//! - **`select`**: picking one candidate out of the preferred list.
//! - **`styles`**: turning a placement into inline styles.
//!
//! All of these are pure functions over `PositionConfig`, `PlacementState`
//! and a set of `Measurements`. Only the strategy touches the host.

pub mod bounding_box;
pub mod candidate;
pub mod config;
pub mod connected;
pub mod select;
pub mod styles;

pub use bounding_box::{BoundingBoxRect, bounding_box_rect};
pub use config::{PlacementState, PositionConfig};
pub use connected::{
    ConnectedPosition, DEFAULT_POSITIONS, HorizontalConnectionPos, PositionChange,
    VerticalConnectionPos,
};
pub use select::{Measurements, Placement, PlacementKind, select_placement};
pub use styles::{CssValue, StyleDeclaration, StyleFrame, StyleProperty, resolve_styles};
