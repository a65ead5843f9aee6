//! The flexible connected position strategy.
//!
//! Binds an origin element to one overlay surface and keeps the overlay
//! placed next to it. Each application measures the host, selects a
//! placement, writes the resulting styles and publishes a
//! [`PositionChange`].

use tokio::sync::broadcast;

use crate::element::ElementId;
use crate::error::PositionError;
use crate::host::LayoutHost;
use crate::overlay::OverlayRef;
use crate::position::candidate::origin_point;
use crate::position::config::{PlacementState, PositionConfig};
use crate::position::connected::{ConnectedPosition, PositionChange};
use crate::position::select::{Measurements, Placement, PlacementKind, select_placement};
use crate::position::styles::{reset_bounding_box_styles, resolve_styles};
use crate::scroll_clip::ScrollingVisibility;
use crate::viewport::{ViewportChange, ViewportRuler, narrowed_viewport};

/// Class added to the overlay's sizing wrapper on attach.
pub const BOUNDING_BOX_CLASS: &str = "perch-connected-position-bounding-box";

/// Capacity of the position change channel.
const POSITION_CHANGE_CAPACITY: usize = 64;

/// Positions an overlay relative to an origin element, falling back through
/// a list of preferred positions and shrinking or pushing the overlay when
/// none of them fit.
pub struct FlexibleConnectedPositionStrategy<H: LayoutHost> {
    host: H,
    origin: ElementId,
    ruler: ViewportRuler,
    overlay: Option<OverlayRef>,
    config: PositionConfig,
    state: PlacementState,
    last_placement: Option<Placement>,
    /// `None` once disposed, which closes the stream for subscribers.
    position_tx: Option<broadcast::Sender<PositionChange>>,
    viewport_changes: Option<broadcast::Receiver<ViewportChange>>,
    is_disposed: bool,
}

impl<H: LayoutHost> FlexibleConnectedPositionStrategy<H> {
    pub fn new(origin: ElementId, ruler: &ViewportRuler, host: H) -> Self {
        let (position_tx, _) = broadcast::channel(POSITION_CHANGE_CAPACITY);
        Self {
            host,
            origin,
            ruler: ruler.clone(),
            overlay: None,
            config: PositionConfig::default(),
            state: PlacementState::default(),
            last_placement: None,
            position_tx: Some(position_tx),
            viewport_changes: None,
            is_disposed: false,
        }
    }

    /// Bind to `overlay` and start listening for viewport changes.
    ///
    /// Attaching the same overlay again only resumes listening after a
    /// [`detach`](Self::detach); a different overlay fails.
    pub fn attach(&mut self, overlay: OverlayRef) -> Result<(), PositionError> {
        if let Some(attached) = &self.overlay {
            if attached.id != overlay.id {
                tracing::warn!(
                    "Refusing to attach overlay {:?}, already attached to {:?}",
                    overlay.id,
                    attached.id
                );
                return Err(PositionError::AlreadyAttached {
                    attached: attached.id,
                    requested: overlay.id,
                });
            }
            if self.viewport_changes.is_none() {
                tracing::debug!("Re-attached to overlay {:?}", overlay.id);
                self.viewport_changes = Some(self.ruler.change());
            }
            return Ok(());
        }

        self.host.add_class(overlay.host, BOUNDING_BOX_CLASS);
        self.viewport_changes = Some(self.ruler.change());
        tracing::debug!("Attached to overlay {:?}", overlay.id);
        self.overlay = Some(overlay);
        Ok(())
    }

    /// Select the best position and apply it.
    ///
    /// Once a position was applied with the position locked, this re-applies
    /// that position instead. Does nothing after [`dispose`](Self::dispose).
    pub fn apply(&mut self) -> Result<(), PositionError> {
        if self.is_disposed {
            return Ok(());
        }

        if !self.state.is_initial_render
            && self.config.position_locked
            && self.state.last_position.is_some()
        {
            return self.reapply_last_position();
        }

        let Some(overlay) = &self.overlay else {
            return Err(PositionError::NotAttached);
        };
        if self.config.positions.is_empty() {
            tracing::warn!("No preferred positions configured, nothing to apply");
            return Err(PositionError::NoPositions);
        }

        self.host.set_styles(overlay.host, &reset_bounding_box_styles());

        let measurements = self.measure(overlay.pane);
        let placement = select_placement(&measurements, &overlay.config, &self.config, &self.state)
            .ok_or(PositionError::NoPositions)?;

        tracing::debug!(
            "Selected {:?} placement {:?} at ({}, {})",
            placement.kind,
            placement.position,
            placement.origin_point.x,
            placement.origin_point.y
        );

        // A fallback that is not pushed clears any earlier push.
        self.state.is_pushed = placement.kind == PlacementKind::Pushed;
        self.apply_placement(placement, &measurements);
        Ok(())
    }

    /// Re-align the overlay using the last applied position, even if a more
    /// preferred one would fit now. Uses the first preferred position when
    /// nothing was applied yet.
    pub fn reapply_last_position(&mut self) -> Result<(), PositionError> {
        if self.is_disposed {
            return Ok(());
        }

        let Some(overlay) = &self.overlay else {
            return Err(PositionError::NotAttached);
        };
        let Some(position) = self
            .state
            .last_position
            .or_else(|| self.config.positions.first().copied())
        else {
            tracing::warn!("Nothing to re-apply: no last position and no preferred positions");
            return Err(PositionError::NoPositions);
        };

        let measurements = self.measure(overlay.pane);
        let placement = Placement {
            origin_point: origin_point(&measurements.origin, &position, overlay.config.direction),
            position,
            kind: PlacementKind::Reapplied,
        };
        tracing::debug!("Re-applying position {:?}", position);

        self.apply_placement(placement, &measurements);
        Ok(())
    }

    /// Stop listening for viewport changes.
    pub fn detach(&mut self) {
        if self.viewport_changes.take().is_some() {
            tracing::debug!("Detached from viewport changes");
        }
    }

    /// Tear the strategy down. Completes the position change stream.
    pub fn dispose(&mut self) {
        if self.is_disposed {
            return;
        }
        self.detach();
        self.position_tx = None;
        self.is_disposed = true;
        tracing::debug!("Position strategy disposed");
    }

    /// Drain pending viewport changes and re-apply once if there were any.
    ///
    /// Returns whether a change was seen.
    pub fn poll_viewport_changes(&mut self) -> Result<bool, PositionError> {
        let Some(changes) = self.viewport_changes.as_mut() else {
            return Ok(false);
        };

        let mut changed = false;
        loop {
            match changes.try_recv() {
                Ok(_) | Err(broadcast::error::TryRecvError::Lagged(_)) => changed = true,
                Err(broadcast::error::TryRecvError::Empty)
                | Err(broadcast::error::TryRecvError::Closed) => break,
            }
        }

        if changed {
            self.apply()?;
        }
        Ok(changed)
    }

    /// Subscribe to position changes.
    ///
    /// After disposal the returned receiver is already closed.
    pub fn position_changes(&self) -> broadcast::Receiver<PositionChange> {
        match &self.position_tx {
            Some(tx) => tx.subscribe(),
            None => {
                let (_, rx) = broadcast::channel(1);
                rx
            }
        }
    }

    pub fn with_positions(&mut self, positions: Vec<ConnectedPosition>) -> &mut Self {
        self.config.positions = positions;
        self
    }

    /// Minimum distance kept between the overlay and the viewport edges.
    pub fn with_viewport_margin(&mut self, margin: f32) -> &mut Self {
        self.config.viewport_margin = margin;
        self
    }

    pub fn with_flexible_width(&mut self, flexible_width: bool) -> &mut Self {
        self.config.flexible_width = flexible_width;
        self
    }

    pub fn with_flexible_height(&mut self, flexible_height: bool) -> &mut Self {
        self.config.flexible_height = flexible_height;
        self
    }

    /// Whether the overlay may grow after the initial open.
    pub fn with_grow_after_open(&mut self, grow_after_open: bool) -> &mut Self {
        self.config.grow_after_open = grow_after_open;
        self
    }

    /// Whether the overlay can be pushed on-screen when no position fits.
    pub fn with_push(&mut self, push: bool) -> &mut Self {
        self.config.push = push;
        self
    }

    /// Keep the first applied position on later applications.
    pub fn with_locked_position(&mut self, locked: bool) -> &mut Self {
        self.config.position_locked = locked;
        self
    }

    /// Scrollable ancestors of the origin, used for the visibility snapshot.
    pub fn with_scrollable_containers(&mut self, containers: Vec<ElementId>) -> &mut Self {
        self.config.scrollable_containers = containers;
        self
    }

    /// Replace the whole configuration at once.
    pub fn with_config(&mut self, config: PositionConfig) -> &mut Self {
        self.config = config;
        self
    }

    pub fn positions(&self) -> &[ConnectedPosition] {
        &self.config.positions
    }

    /// The placement written by the most recent application.
    pub fn last_placement(&self) -> Option<&Placement> {
        self.last_placement.as_ref()
    }

    pub fn is_disposed(&self) -> bool {
        self.is_disposed
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Read viewport, origin and pane, in that order.
    fn measure(&self, pane: ElementId) -> Measurements {
        let viewport_size = self.host.viewport_size();
        Measurements {
            viewport_size,
            viewport: narrowed_viewport(viewport_size, self.config.viewport_margin),
            origin: self.host.bounding_client_rect(self.origin),
            overlay: self.host.bounding_client_rect(pane),
        }
    }

    /// Write the styles for `placement`, record it and publish the change.
    fn apply_placement(&mut self, placement: Placement, measurements: &Measurements) {
        let Some(overlay) = &self.overlay else {
            return;
        };

        let frame = resolve_styles(
            &placement,
            measurements,
            &overlay.config,
            &self.config,
            &self.state,
        );
        self.host.set_styles(overlay.pane, &frame.pane);
        self.host.set_styles(overlay.host, &frame.bounding_box);
        self.host.place_overlay(overlay.pane, frame.overlay_rect);

        self.state.last_bounding_box_size = frame.bounding_box_rect.size();
        self.state.last_position = Some(placement.position);

        let change = PositionChange {
            connection_pair: placement.position,
            scrollable_view_properties: self.scroll_visibility(overlay.pane),
        };
        if let Some(tx) = &self.position_tx {
            // No subscribers is fine.
            let _ = tx.send(change);
        }

        self.state.is_initial_render = false;
        self.last_placement = Some(placement);
    }

    /// Fresh measurements: the overlay may have just moved.
    fn scroll_visibility(&self, pane: ElementId) -> ScrollingVisibility {
        let origin = self.host.bounding_client_rect(self.origin);
        let overlay = self.host.bounding_client_rect(pane);
        let containers: Vec<_> = self
            .config
            .scrollable_containers
            .iter()
            .map(|container| self.host.bounding_client_rect(*container))
            .collect();
        ScrollingVisibility::measure(&origin, &overlay, &containers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::StaticLayout;
    use crate::overlay::OverlayConfig;
    use crate::position::connected::DEFAULT_POSITIONS;
    use crate::primitives::{Rect, Size};

    struct Fixture {
        strategy: FlexibleConnectedPositionStrategy<StaticLayout>,
        ruler: ViewportRuler,
        overlay: OverlayRef,
    }

    fn fixture() -> Fixture {
        let origin = ElementId::named("origin");
        let host = ElementId::named("host");
        let pane = ElementId::named("pane");

        let mut layout = StaticLayout::new(Size::new(1024.0, 768.0));
        layout.insert(origin, Rect::new(200.0, 100.0, 60.0, 30.0));
        layout.insert(pane, Rect::new(0.0, 0.0, 60.0, 30.0));

        let ruler = ViewportRuler::new();
        let mut strategy = FlexibleConnectedPositionStrategy::new(origin, &ruler, layout);
        strategy.with_positions(DEFAULT_POSITIONS.to_vec());

        Fixture {
            strategy,
            ruler,
            overlay: OverlayRef::new(host, pane, OverlayConfig::default()),
        }
    }

    #[test]
    fn attach_marks_bounding_box_and_subscribes() {
        let mut f = fixture();
        f.strategy.attach(f.overlay.clone()).unwrap();
        assert!(f.strategy.host().has_class(f.overlay.host, BOUNDING_BOX_CLASS));
        assert_eq!(f.ruler.subscriber_count(), 1);

        // Same overlay again is a no-op.
        f.strategy.attach(f.overlay.clone()).unwrap();
        assert_eq!(f.ruler.subscriber_count(), 1);
    }

    #[test]
    fn reattach_after_detach_resumes_viewport_changes() {
        let mut f = fixture();
        let mut changes = f.strategy.position_changes();
        f.strategy.attach(f.overlay.clone()).unwrap();
        f.strategy.detach();
        assert_eq!(f.ruler.subscriber_count(), 0);

        f.strategy.attach(f.overlay.clone()).unwrap();
        assert_eq!(f.ruler.subscriber_count(), 1);

        f.ruler.notify(ViewportChange {
            size: Size::new(800.0, 600.0),
        });
        assert!(f.strategy.poll_viewport_changes().unwrap());
        assert!(changes.try_recv().is_ok());
    }

    #[test]
    fn attach_to_different_overlay_fails() {
        let mut f = fixture();
        f.strategy.attach(f.overlay.clone()).unwrap();

        let other = OverlayRef::new(ElementId::new(), ElementId::new(), OverlayConfig::default());
        let err = f.strategy.attach(other.clone()).unwrap_err();
        assert_eq!(
            err,
            PositionError::AlreadyAttached {
                attached: f.overlay.id,
                requested: other.id,
            }
        );
    }

    #[test]
    fn apply_requires_attachment_and_positions() {
        let mut f = fixture();
        assert_eq!(f.strategy.apply(), Err(PositionError::NotAttached));

        f.strategy.attach(f.overlay.clone()).unwrap();
        f.strategy.with_positions(Vec::new());
        assert_eq!(f.strategy.apply(), Err(PositionError::NoPositions));
        assert_eq!(f.strategy.reapply_last_position(), Err(PositionError::NoPositions));
    }

    #[test]
    fn apply_publishes_change_and_places_pane() {
        let mut f = fixture();
        let mut changes = f.strategy.position_changes();
        f.strategy.attach(f.overlay.clone()).unwrap();
        f.strategy.apply().unwrap();

        let change = changes.try_recv().unwrap();
        assert_eq!(change.connection_pair, DEFAULT_POSITIONS[0]);
        assert!(changes.try_recv().is_err());

        let placement = f.strategy.last_placement().unwrap();
        assert_eq!(placement.kind, PlacementKind::Exact);
        assert_eq!(
            f.strategy.host().rect(f.overlay.pane),
            Some(Rect::new(200.0, 130.0, 60.0, 30.0))
        );
    }

    #[test]
    fn viewport_changes_trigger_one_reapply() {
        let mut f = fixture();
        let mut changes = f.strategy.position_changes();
        f.strategy.attach(f.overlay.clone()).unwrap();

        assert!(!f.strategy.poll_viewport_changes().unwrap());

        for width in [800.0, 900.0, 1000.0] {
            f.ruler.notify(ViewportChange {
                size: Size::new(width, 768.0),
            });
        }
        assert!(f.strategy.poll_viewport_changes().unwrap());
        assert!(changes.try_recv().is_ok());
        assert!(changes.try_recv().is_err());
    }

    #[test]
    fn detach_stops_listening() {
        let mut f = fixture();
        f.strategy.attach(f.overlay.clone()).unwrap();
        f.strategy.detach();
        assert_eq!(f.ruler.subscriber_count(), 0);

        f.ruler.notify(ViewportChange { size: Size::ZERO });
        assert!(!f.strategy.poll_viewport_changes().unwrap());
    }

    #[test]
    fn dispose_completes_stream_and_silences_apply() {
        let mut f = fixture();
        let mut changes = f.strategy.position_changes();
        f.strategy.attach(f.overlay.clone()).unwrap();

        f.strategy.dispose();
        f.strategy.dispose();
        assert!(f.strategy.is_disposed());
        assert_eq!(f.strategy.apply(), Ok(()));
        assert_eq!(f.strategy.reapply_last_position(), Ok(()));
        assert_eq!(
            changes.try_recv(),
            Err(broadcast::error::TryRecvError::Closed)
        );

        let mut late = f.strategy.position_changes();
        assert_eq!(late.try_recv(), Err(broadcast::error::TryRecvError::Closed));
    }

    #[test]
    fn reapply_before_first_apply_uses_first_position() {
        let mut f = fixture();
        f.strategy.attach(f.overlay.clone()).unwrap();
        f.strategy.reapply_last_position().unwrap();

        let placement = f.strategy.last_placement().unwrap();
        assert_eq!(placement.kind, PlacementKind::Reapplied);
        assert_eq!(placement.position, DEFAULT_POSITIONS[0]);
    }
}
