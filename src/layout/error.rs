use thiserror::Error;

use super::types::{Axis, CellSize, Location};

/// Why a layout operation was rejected.
///
/// A call that returns an error has not changed the grid, the scale flags or the backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("cell {loc} is outside of the {size} grid")]
    OutOfRange { loc: Location, size: CellSize },

    #[error("{axis} {index} is outside of the grid ({len} in total)")]
    TrackOutOfRange {
        axis: Axis,
        index: usize,
        len: usize,
    },

    /// The cell size can only be set once.
    #[error("cell size is already set to {0}")]
    SizeAlreadySet(CellSize),

    /// Declared contents were already placed into the grid.
    #[error("layout contents were already reconciled")]
    AlreadyBound,

    #[error("element is not part of the layout")]
    NotFound,

    #[error("element is already part of the layout")]
    AlreadyPresent,
}

impl GridError {
    /// Whether this is a misuse of the layout lifecycle rather than a bad argument.
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, Self::SizeAlreadySet(_) | Self::AlreadyBound)
    }
}
