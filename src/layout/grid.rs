//! Fixed-size storage of cell contents.

use super::types::{CellSize, Location};
use super::LayoutElement;

/// Slots of a grid, each empty or holding exactly one element.
///
/// Cells are stored column by column, so iteration visits `(0, 0), (0, 1), ..., (1, 0), ...`.
#[derive(Debug)]
pub(crate) struct CellGrid<W> {
    size: CellSize,
    cells: Vec<Option<W>>,
}

impl<W: LayoutElement> CellGrid<W> {
    pub fn new(size: CellSize) -> Self {
        let mut cells = Vec::with_capacity(size.cell_count());
        cells.resize_with(size.cell_count(), || None);
        Self { size, cells }
    }

    pub fn size(&self) -> CellSize {
        self.size
    }

    fn index(&self, loc: Location) -> usize {
        debug_assert!(self.size.contains(loc), "{loc} is outside of {}", self.size);
        loc.x * self.size.height + loc.y
    }

    fn location(&self, idx: usize) -> Location {
        Location::new(idx / self.size.height, idx % self.size.height)
    }

    pub fn get(&self, loc: Location) -> Option<&W> {
        self.cells[self.index(loc)].as_ref()
    }

    /// Stores `element` at `loc`, returning the previous occupant.
    pub fn replace(&mut self, loc: Location, element: Option<W>) -> Option<W> {
        let idx = self.index(loc);
        std::mem::replace(&mut self.cells[idx], element)
    }

    pub fn take(&mut self, loc: Location) -> Option<W> {
        self.replace(loc, None)
    }

    /// Finds the cell holding the element with this id.
    ///
    /// This is a linear scan over every cell. Tables are small enough that a reverse index is not
    /// worth keeping in sync.
    pub fn position(&self, id: &W::Id) -> Option<Location> {
        self.cells
            .iter()
            .position(|cell| cell.as_ref().is_some_and(|element| element.id() == id))
            .map(|idx| self.location(idx))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Location, &W)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(idx, cell)| cell.as_ref().map(|element| (self.location(idx), element)))
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }
}
