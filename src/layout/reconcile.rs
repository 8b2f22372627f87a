//! Declared contents and their one-time placement.
//!
//! A layout created with [`GridLayout::new`] starts [`Unbound`]: elements can be declared together
//! with the cell they belong in, and the table size can be set later. The declared elements are
//! placed exactly once, by whichever comes first:
//!
//! - [`end_init`] with a live parent, which places them right away;
//! - [`activate`], called by the owning hierarchy before the layout is first shown.
//!
//! `end_init` without a parent only marks the layout as [`PendingReconciliation`].
//!
//! [`Unbound`]: Lifecycle::Unbound
//! [`PendingReconciliation`]: Lifecycle::PendingReconciliation
//! [`end_init`]: GridLayout::end_init
//! [`activate`]: GridLayout::activate

use tracing::debug;

use super::types::{Lifecycle, Location, ScaleHints};
use super::{GridError, GridLayout, LayoutElement};
use crate::backend::GridBackend;
use crate::layout::attached::Attached;

impl<W: LayoutElement, B: GridBackend<W>> GridLayout<W, B> {
    /// Declares an element to be placed at (0, 0) once the layout reconciles.
    pub fn add_content(&mut self, element: W) -> Result<(), GridError> {
        self.add_content_at(element, Location::default())
    }

    /// Declares an element to be placed at `loc` once the layout reconciles.
    ///
    /// The location is not checked against the table size until then, since the size may not
    /// be known yet.
    pub fn add_content_at(
        &mut self,
        element: W,
        loc: impl Into<Location>,
    ) -> Result<(), GridError> {
        if self.lifecycle == Lifecycle::Bound {
            return Err(GridError::AlreadyBound);
        }
        if self.owns(element.id()) {
            return Err(GridError::AlreadyPresent);
        }

        self.attached.insert(
            element.id().clone(),
            Attached {
                location: loc.into(),
                hints: ScaleHints::empty(),
            },
        );
        self.pending.push(element);
        Ok(())
    }

    /// Finishes initialization.
    ///
    /// With a live parent, declared contents are placed right away. Otherwise placement waits for
    /// [`activate`](Self::activate). Does nothing once the contents were placed.
    pub fn end_init(&mut self, has_parent: bool) -> Result<Vec<W>, GridError> {
        match self.lifecycle {
            Lifecycle::Bound => Ok(Vec::new()),
            _ if has_parent => self.reconcile(),
            Lifecycle::Unbound => {
                debug!("deferring placement of {} declared elements", self.pending.len());
                self.lifecycle = Lifecycle::PendingReconciliation;
                Ok(Vec::new())
            }
            Lifecycle::PendingReconciliation => Ok(Vec::new()),
        }
    }

    /// Called by the owning hierarchy before the layout is first shown.
    ///
    /// Places the declared contents unless that already happened, in which case this does
    /// nothing.
    pub fn activate(&mut self) -> Result<Vec<W>, GridError> {
        match self.lifecycle {
            Lifecycle::Bound => Ok(Vec::new()),
            Lifecycle::Unbound | Lifecycle::PendingReconciliation => self.reconcile(),
        }
    }

    /// Places every declared element at its attached location, then applies its scale hints.
    ///
    /// All locations are checked first: if one is outside of the table, nothing is placed and the
    /// layout stays unbound, so the size can still be fixed and placement retried.
    ///
    /// Returns the elements displaced by later declarations of the same cell.
    fn reconcile(&mut self) -> Result<Vec<W>, GridError> {
        for element in &self.pending {
            let loc = self.declared(element.id()).location;
            self.check_cell(loc)?;
        }

        let pending = std::mem::take(&mut self.pending);
        debug!("placing {} declared elements", pending.len());

        let mut displaced = Vec::new();
        for element in pending {
            let Attached { location, hints } = self.declared(element.id());
            displaced.extend(self.occupy(element, location));

            if hints.contains(ScaleHints::COLUMN) {
                self.backend.set_column_scale(location.x, true);
            }
            if hints.contains(ScaleHints::ROW) {
                self.backend.set_row_scale(location.y, true);
            }
        }

        self.lifecycle = Lifecycle::Bound;
        Ok(displaced)
    }

    fn declared(&self, id: &W::Id) -> Attached {
        self.attached.get(id).copied().unwrap_or_default()
    }
}
