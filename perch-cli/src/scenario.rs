//! JSON scenarios: a static layout plus a script of steps to run against it.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use perch::{
    ConnectedPosition, DEFAULT_POSITIONS, ElementId, FlexibleConnectedPositionStrategy,
    OverlayConfig, OverlayRef, PlacementKind, Point, PositionChange, PositionConfig, Rect, Size,
    StaticLayout, ViewportChange, ViewportRuler,
};

/// A layout and the steps to run against it.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub viewport: Size,
    pub origin: Rect,
    /// Natural size of the overlay pane.
    pub overlay: Size,
    #[serde(default)]
    pub overlay_config: OverlayConfig,
    /// Rects of the origin's scrollable ancestors.
    #[serde(default)]
    pub scrollables: Vec<Rect>,
    /// Positions default to below-then-above when left empty.
    #[serde(default)]
    pub config: PositionConfig,
    /// A single `apply` when left empty.
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Apply,
    Reapply,
    /// Scroll the origin's content, moving it by `(-dx, -dy)`.
    ScrollBy {
        #[serde(default)]
        dx: f32,
        #[serde(default)]
        dy: f32,
    },
    MoveOrigin {
        x: f32,
        y: f32,
    },
    /// Resize the viewport and let the strategy react to the change.
    Resize {
        width: f32,
        height: f32,
    },
    SetPositions {
        positions: Vec<ConnectedPosition>,
    },
    Lock {
        #[serde(default = "default_true")]
        locked: bool,
    },
}

fn default_true() -> bool {
    true
}

/// What one applying step produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepReport {
    /// Index of the step in the scenario.
    pub step: usize,
    pub kind: PlacementKind,
    pub change: PositionChange,
    /// Where the pane ended up.
    pub overlay_rect: Rect,
}

/// Read and parse a scenario file.
pub fn load(path: &Path) -> Result<Scenario> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read scenario {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse scenario {}", path.display()))
}

/// Run `scenario` and collect one report per position change.
pub fn run(scenario: &Scenario) -> Result<Vec<StepReport>> {
    let origin = ElementId::named("origin");
    let host = ElementId::named("host");
    let pane = ElementId::named("pane");

    let mut layout = StaticLayout::new(scenario.viewport);
    layout.insert(origin, scenario.origin);
    layout.insert(pane, Rect::from_origin_size(Point::ORIGIN, scenario.overlay));

    let scrollables: Vec<ElementId> = scenario
        .scrollables
        .iter()
        .enumerate()
        .map(|(index, rect)| {
            let id = ElementId::named(&format!("scrollable-{}", index));
            layout.insert(id, *rect);
            id
        })
        .collect();

    let mut config = scenario.config.clone();
    if config.positions.is_empty() {
        config.positions = DEFAULT_POSITIONS.to_vec();
    }

    let ruler = ViewportRuler::new();
    let mut strategy = FlexibleConnectedPositionStrategy::new(origin, &ruler, layout);
    strategy.with_config(config).with_scrollable_containers(scrollables);

    let mut changes = strategy.position_changes();
    strategy.attach(OverlayRef::new(host, pane, scenario.overlay_config.clone()))?;

    let default_steps = [Step::Apply];
    let steps = if scenario.steps.is_empty() {
        &default_steps[..]
    } else {
        &scenario.steps[..]
    };

    let mut reports = Vec::new();
    for (index, step) in steps.iter().enumerate() {
        tracing::debug!("Step {}: {:?}", index, step);
        match step {
            Step::Apply => strategy.apply().with_context(|| format!("step {}: apply", index))?,
            Step::Reapply => strategy
                .reapply_last_position()
                .with_context(|| format!("step {}: reapply", index))?,
            Step::ScrollBy { dx, dy } => strategy
                .host_mut()
                .translate(origin, Point::new(-dx, -dy)),
            Step::MoveOrigin { x, y } => {
                let mut rect = strategy.host().rect(origin).unwrap_or(scenario.origin);
                rect.x = *x;
                rect.y = *y;
                strategy.host_mut().insert(origin, rect);
            }
            Step::Resize { width, height } => {
                let size = Size::new(*width, *height);
                strategy.host_mut().set_viewport_size(size);
                ruler.notify(ViewportChange { size });
                strategy
                    .poll_viewport_changes()
                    .with_context(|| format!("step {}: resize", index))?;
            }
            Step::SetPositions { positions } => {
                strategy.with_positions(positions.clone());
            }
            Step::Lock { locked } => {
                strategy.with_locked_position(*locked);
            }
        }

        while let Ok(change) = changes.try_recv() {
            let kind = strategy
                .last_placement()
                .map(|placement| placement.kind)
                .context("position change without a placement")?;
            let overlay_rect = strategy.host().rect(pane).unwrap_or(Rect::ZERO);
            tracing::info!(
                "Step {}: {:?} at ({}, {})",
                index,
                kind,
                overlay_rect.x,
                overlay_rect.y
            );
            reports.push(StepReport {
                step: index,
                kind,
                change,
                overlay_rect,
            });
        }
    }

    strategy.dispose();
    Ok(reports)
}
