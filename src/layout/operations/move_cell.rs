use tracing::{debug, trace};

use crate::backend::GridBackend;
use crate::layout::types::Location;
use crate::layout::{GridError, GridLayout, LayoutElement};

impl<W: LayoutElement, B: GridBackend<W>> GridLayout<W, B> {
    /// Moves a placed element into another cell.
    ///
    /// An element already in the destination is taken out of the layout and returned. Moving an
    /// element that is not placed is an error; nothing gets placed implicitly.
    pub fn move_element(
        &mut self,
        id: &W::Id,
        loc: impl Into<Location>,
    ) -> Result<Option<W>, GridError> {
        let loc = loc.into();
        self.check_cell(loc)?;

        let Some(grid) = &mut self.grid else {
            unreachable!("check_cell() passed");
        };

        let from = grid.position(id).ok_or(GridError::NotFound)?;
        trace!("moving {id:?} from {from} to {loc}");

        let old = if from == loc {
            None
        } else {
            let element = grid.take(from);
            let old = grid.replace(loc, element);
            if let Some(old) = &old {
                debug!("{id:?} displaces {:?} from {loc}", old.id());
                self.attached.remove(old.id());
            }
            old
        };

        self.attached.set_location(id, loc);

        if let Some(element) = grid.get(loc) {
            self.backend.move_to(element, loc);
        }

        Ok(old)
    }
}
