use tracing::{debug, trace};

use crate::backend::GridBackend;
use crate::layout::types::Location;
use crate::layout::{GridError, GridLayout, LayoutElement};

impl<W: LayoutElement, B: GridBackend<W>> GridLayout<W, B> {
    /// Places an element into a cell.
    ///
    /// An element already in the cell is taken out of the layout and returned; the new element
    /// does not shift anything.
    pub fn add(&mut self, element: W, loc: impl Into<Location>) -> Result<Option<W>, GridError> {
        let loc = loc.into();
        self.check_cell(loc)?;
        if self.owns(element.id()) {
            return Err(GridError::AlreadyPresent);
        }

        Ok(self.occupy(element, loc))
    }

    /// Sets the scale of the element's column and row, then places it.
    pub fn add_scaled(
        &mut self,
        element: W,
        loc: impl Into<Location>,
        column_scale: bool,
        row_scale: bool,
    ) -> Result<Option<W>, GridError> {
        let loc = loc.into();
        self.check_cell(loc)?;
        if self.owns(element.id()) {
            return Err(GridError::AlreadyPresent);
        }

        self.backend.set_column_scale(loc.x, column_scale);
        self.backend.set_row_scale(loc.y, row_scale);
        Ok(self.occupy(element, loc))
    }

    /// Empties a cell, returning the element that was there.
    ///
    /// The backend is told to clear the cell even if it was already empty.
    pub fn clear_cell(&mut self, loc: impl Into<Location>) -> Result<Option<W>, GridError> {
        let loc = loc.into();
        self.check_cell(loc)?;

        let Some(grid) = &mut self.grid else {
            unreachable!("check_cell() passed");
        };

        let old = grid.take(loc);
        if let Some(old) = &old {
            debug!("clearing {:?} out of {loc}", old.id());
            self.attached.remove(old.id());
        }

        self.backend.add(None, loc);
        Ok(old)
    }

    /// Places an element into a cell that was already validated.
    pub(crate) fn occupy(&mut self, element: W, loc: Location) -> Option<W> {
        let Some(grid) = &mut self.grid else {
            unreachable!("cells can only be occupied once allocated");
        };

        let id = element.id();
        trace!("placing {id:?} at {loc}");

        let old = grid.take(loc);
        if let Some(old) = &old {
            debug!("{:?} displaces {:?} from {loc}", id, old.id());
            self.attached.remove(old.id());
        }

        self.attached.set_location(id, loc);
        self.backend.add(Some(&element), loc);
        grid.replace(loc, Some(element));

        old
    }
}
