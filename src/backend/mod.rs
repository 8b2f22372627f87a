//! Physical realization of tables.
//!
//! A [`GridLayout`](crate::layout::GridLayout) keeps the logical grid and forwards every change
//! to its backend. The backend owns everything physical: the real table widget, the scale flags,
//! spacing and padding. One backend instance serves exactly one layout.

use crate::layout::{CellSize, LayoutElement, Location, Padding, Spacing};

pub mod headless;

pub use headless::{BackendEvent, HeadlessBackend};

pub trait GridBackend<W: LayoutElement> {
    /// Creates the physical table.
    ///
    /// Called exactly once, when the layout size becomes known. The size may have zero columns
    /// or zero rows.
    fn allocate(&mut self, size: CellSize);

    /// Places an element into a cell, or empties the cell when `element` is `None`.
    ///
    /// Whatever was physically in the cell before is replaced.
    fn add(&mut self, element: Option<&W>, loc: Location);

    /// Moves an already placed element into another cell.
    fn move_to(&mut self, element: &W, loc: Location);

    /// Takes a placed element out of the table.
    fn remove(&mut self, element: &W);

    fn column_scale(&self, column: usize) -> bool;

    fn set_column_scale(&mut self, column: usize, scale: bool);

    fn row_scale(&self, row: usize) -> bool;

    fn set_row_scale(&mut self, row: usize, scale: bool);

    fn spacing(&self) -> Spacing;

    fn set_spacing(&mut self, spacing: Spacing);

    fn padding(&self) -> Padding;

    fn set_padding(&mut self, padding: Padding);
}
