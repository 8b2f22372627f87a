use tracing::trace;

use crate::backend::GridBackend;
use crate::layout::{GridLayout, LayoutElement};

impl<W: LayoutElement, B: GridBackend<W>> GridLayout<W, B> {
    /// Takes an element out of the layout.
    ///
    /// Works both for placed elements and for declared contents that have not been placed yet.
    /// Returns `None` and changes nothing if the layout does not have the element.
    pub fn remove(&mut self, id: &W::Id) -> Option<W> {
        if let Some(idx) = self.pending.iter().position(|element| element.id() == id) {
            trace!("removing declared {id:?}");
            self.attached.remove(id);
            return Some(self.pending.remove(idx));
        }

        let grid = self.grid.as_mut()?;
        let loc = grid.position(id)?;
        trace!("removing {id:?} from {loc}");

        let element = grid.take(loc)?;
        self.backend.remove(&element);
        self.attached.remove(id);

        Some(element)
    }
}
