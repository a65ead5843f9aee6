//! Perch: flexible connected overlay positioning
//!
//! Places a floating overlay (dropdown, tooltip, menu) next to an origin
//! element so that it stays visible inside the viewport.
//!
//! # Architecture
//!
//! Given an ordered list of preferred [`ConnectedPosition`]s, the strategy
//! picks the first one that fits as-is. Failing that it picks the one with
//! the most room once the overlay may shrink, then pushes the least-bad one
//! on-screen, and finally leaves the least-bad one partially off-screen.
//!
//! - **Geometry** (`position::*`) is pure: measurements in, placement and
//!   inline styles out.
//! - **The host** ([`LayoutHost`]) supplies measurements and receives
//!   styles. [`StaticLayout`] is an in-memory host.
//! - **The strategy** ([`FlexibleConnectedPositionStrategy`]) owns the
//!   lifecycle: attach, apply, re-apply on viewport change, dispose.
//!
//! # Usage
//!
//! ```
//! use perch::{
//!     DEFAULT_POSITIONS, ElementId, FlexibleConnectedPositionStrategy, OverlayConfig,
//!     OverlayRef, Rect, Size, StaticLayout, ViewportRuler,
//! };
//!
//! let origin = ElementId::named("button");
//! let pane = ElementId::named("menu");
//!
//! let mut layout = StaticLayout::new(Size::new(1024.0, 768.0));
//! layout.insert(origin, Rect::new(200.0, 100.0, 60.0, 30.0));
//! layout.insert(pane, Rect::new(0.0, 0.0, 120.0, 200.0));
//!
//! let ruler = ViewportRuler::new();
//! let mut strategy = FlexibleConnectedPositionStrategy::new(origin, &ruler, layout);
//! strategy.with_positions(DEFAULT_POSITIONS.to_vec());
//! strategy
//!     .attach(OverlayRef::new(ElementId::named("host"), pane, OverlayConfig::default()))
//!     .unwrap();
//! strategy.apply().unwrap();
//!
//! assert_eq!(strategy.host().rect(pane), Some(Rect::new(200.0, 130.0, 120.0, 200.0)));
//! ```

// Core primitives
pub mod element;
pub mod error;
pub mod primitives;

// Environment
pub mod host;
pub mod overlay;
pub mod scroll_clip;
pub mod viewport;

// Positioning
pub mod position;
pub mod strategy;

pub use element::{ElementId, OverlayId};
pub use error::PositionError;
pub use host::{LayoutHost, StaticLayout};
pub use overlay::{Dimension, Direction, OverlayConfig, OverlayRef};
pub use position::{
    ConnectedPosition, CssValue, DEFAULT_POSITIONS, HorizontalConnectionPos, Placement,
    PlacementKind, PositionChange, PositionConfig, StyleDeclaration, StyleProperty,
    VerticalConnectionPos,
};
pub use primitives::{Point, Rect, Size};
pub use scroll_clip::ScrollingVisibility;
pub use strategy::{BOUNDING_BOX_CLASS, FlexibleConnectedPositionStrategy};
pub use viewport::{ViewportChange, ViewportRuler};
