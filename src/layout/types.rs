//! Shared types used across layout modules.

use std::fmt;

use bitflags::bitflags;
use serde::Serialize;

/// Coordinate of a single cell.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Location {
    pub x: usize,
    pub y: usize,
}

impl Location {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl From<(usize, usize)> for Location {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Number of columns and rows in a grid.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CellSize {
    pub width: usize,
    pub height: usize,
}

impl CellSize {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Whether this is the zero size that a layout starts with.
    ///
    /// A size with only one zero side (e.g. a table of empty rows) is not empty and still
    /// allocates.
    pub fn is_empty(&self) -> bool {
        self.width == 0 && self.height == 0
    }

    pub fn contains(&self, loc: Location) -> bool {
        loc.x < self.width && loc.y < self.height
    }

    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }
}

impl From<(usize, usize)> for CellSize {
    fn from((width, height): (usize, usize)) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for CellSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Gap between adjacent cells, in logical pixels.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Spacing {
    pub horizontal: i32,
    pub vertical: i32,
}

impl Spacing {
    pub const ZERO: Self = Self::new(0, 0);

    pub const fn new(horizontal: i32, vertical: i32) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }
}

/// Inset around the whole grid, in logical pixels.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Padding {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Padding {
    pub const ZERO: Self = Self::uniform(0);

    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub const fn uniform(value: i32) -> Self {
        Self::new(value, value, value, value)
    }
}

/// Which kind of track an index refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Column,
    Row,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Axis::Column => "column",
            Axis::Row => "row",
        })
    }
}

bitflags! {
    /// Scale hints attached to an element.
    ///
    /// They only matter for declared contents: when the layout reconciles, the column and/or row
    /// the element lands in is marked as scaled.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ScaleHints: u8 {
        const COLUMN = 1 << 0;
        const ROW = 1 << 1;
    }
}

/// Where a layout is in its construction lifecycle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifecycle {
    /// Created without contents being placed yet; children can still be declared.
    #[default]
    Unbound,
    /// Initialization finished without a live parent; waiting for the first activation.
    PendingReconciliation,
    /// Declared contents have been placed. Nothing can be declared anymore.
    Bound,
}
