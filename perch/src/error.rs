//! Positioning error types.

use thiserror::Error;

use crate::element::OverlayId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PositionError {
    #[error("position strategy is already attached to overlay {attached:?}, cannot attach to {requested:?}")]
    AlreadyAttached {
        attached: OverlayId,
        requested: OverlayId,
    },

    #[error("position strategy is not attached to an overlay")]
    NotAttached,

    #[error("position strategy has no preferred positions")]
    NoPositions,
}
