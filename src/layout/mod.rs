//! Table layout logic.
//!
//! A [`GridLayout`] arranges elements into a fixed-size table of cells. Each cell holds at most one
//! element. Columns and rows carry a *scale* flag; scaled tracks absorb the extra space when the
//! table is larger than its contents need.
//!
//! The layout only keeps logical state: which element is in which cell. Everything physical
//! (measuring, arranging, the scale flags themselves, spacing and padding) belongs to a
//! [`GridBackend`], and every placement change is forwarded to it as it happens.
//!
//! There are two ways to fill a table:
//!
//! 1. Declaratively, from rows of items ([`GridLayout::from_rows`]). The table size follows from
//!    the rows, and gaps in the rows mark the tracks that should scale.
//! 2. By declaring elements with attached locations first and sizing the table afterwards
//!    ([`GridLayout::new`], [`GridLayout::add_content_at`], [`GridLayout::set_cell_size`]). The
//!    declared elements are placed in one pass once the layout is initialized and attached, or
//!    on its first activation, whichever comes first.
//!
//! Either way, the result is the same grid that explicit [`GridLayout::add`] calls would produce.
//!
//! Elements are owned by the layout while they are in it. Whenever an element leaves the layout,
//! be it removed, displaced by another element or cleared out of its cell, it is handed back to
//! the caller.

use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

use tablegrid_config::Config;
use tracing::debug;

use self::attached::AttachedTable;
use self::grid::CellGrid;
use crate::backend::GridBackend;
#[cfg(test)]
use crate::backend::HeadlessBackend;

mod attached;
pub mod builder;
pub mod error;
mod grid;
mod operations;
mod reconcile;
mod scale;
pub mod snapshot;
pub mod types;

#[cfg(test)]
pub(crate) mod tests;

pub use self::builder::{TableItem, TableRow};
pub use self::error::GridError;
pub use self::types::{Axis, CellSize, Lifecycle, Location, Padding, ScaleHints, Spacing};

pub trait LayoutElement {
    /// Type that can be used as a unique ID of this element.
    type Id: Clone + Eq + Hash + fmt::Debug;

    /// Unique ID of this element.
    fn id(&self) -> &Self::Id;
}

/// An element type that can wrap a whole table, which allows tables nested in table cells.
pub trait ContainerElement<B>: LayoutElement + Sized {
    fn from_layout(layout: GridLayout<Self, B>) -> Self;
}

/// Configurable properties of new layouts.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub spacing: Spacing,
    pub padding: Padding,
}

impl Default for Options {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl Options {
    pub fn from_config(config: &Config) -> Self {
        let layout = &config.layout;
        let [left, top, right, bottom] = layout.padding.resolve();

        Self {
            spacing: Spacing::new(layout.spacing.horizontal.0, layout.spacing.vertical.0),
            padding: Padding::new(left, top, right, bottom),
        }
    }
}

/// A table of cells, each holding at most one element.
#[derive(Debug)]
pub struct GridLayout<W: LayoutElement, B> {
    /// Cell contents. `None` until a non-empty size is set.
    grid: Option<CellGrid<W>>,
    /// Size requested so far. Matches the grid size once allocated.
    size: CellSize,
    /// Elements declared before the table could place them.
    pending: Vec<W>,
    /// Locations and scale hints of every owned element.
    attached: AttachedTable<W::Id>,
    lifecycle: Lifecycle,
    backend: B,
    options: Rc<Options>,
}

impl<W: LayoutElement, B: GridBackend<W>> GridLayout<W, B> {
    /// Creates a layout with no size, ready for declared contents.
    pub fn new(backend: B) -> Self {
        Self::with_options(backend, Rc::new(Options::default()))
    }

    pub fn with_options(mut backend: B, options: Rc<Options>) -> Self {
        backend.set_spacing(options.spacing);
        backend.set_padding(options.padding);

        Self {
            grid: None,
            size: CellSize::default(),
            pending: Vec::new(),
            attached: AttachedTable::new(),
            lifecycle: Lifecycle::Unbound,
            backend,
            options,
        }
    }

    /// Creates a layout of a known size, to be filled with [`add`](Self::add).
    pub fn sized(size: impl Into<CellSize>, backend: B) -> Self {
        Self::sized_with_options(size, backend, Rc::new(Options::default()))
    }

    pub fn sized_with_options(size: impl Into<CellSize>, backend: B, options: Rc<Options>) -> Self {
        let size = size.into();
        let mut layout = Self::with_options(backend, options);
        if !size.is_empty() {
            layout.allocate(size);
        }
        layout.lifecycle = Lifecycle::Bound;
        layout
    }

    /// Wraps one element in a 3×3 table with no spacing, placing the element in the middle.
    ///
    /// With `centered`, the outer columns and rows scale, which keeps the element centered when
    /// the table gets more space than the element needs.
    pub fn auto_sized(element: W, padding: Option<Padding>, centered: bool, backend: B) -> Self {
        let mut layout = Self::sized(CellSize::new(3, 3), backend);
        layout.backend.set_padding(padding.unwrap_or(Padding::ZERO));
        layout.backend.set_spacing(Spacing::ZERO);

        if centered {
            for track in [0, 2] {
                layout.backend.set_column_scale(track, true);
                layout.backend.set_row_scale(track, true);
            }
        }

        layout.occupy(element, Location::new(1, 1));
        layout
    }

    /// Sets the table size.
    ///
    /// The size can only be set once. Setting the empty size leaves the table unallocated, so a
    /// real size can still follow.
    pub fn set_cell_size(&mut self, size: impl Into<CellSize>) -> Result<(), GridError> {
        let size = size.into();
        if self.grid.is_some() {
            return Err(GridError::SizeAlreadySet(self.size));
        }

        if size.is_empty() {
            self.size = size;
        } else {
            self.allocate(size);
        }

        Ok(())
    }

    /// Creates the cell storage and the physical table.
    ///
    /// Unlike [`set_cell_size`](Self::set_cell_size), this allocates even the empty size.
    fn allocate(&mut self, size: CellSize) {
        debug_assert!(self.grid.is_none());
        debug!("allocating a {size} table");

        self.size = size;
        self.grid = Some(CellGrid::new(size));
        self.backend.allocate(size);
    }

    pub fn cell_size(&self) -> CellSize {
        self.size
    }

    pub fn is_allocated(&self) -> bool {
        self.grid.is_some()
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn options(&self) -> &Rc<Options> {
        &self.options
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn spacing(&self) -> Spacing {
        self.backend.spacing()
    }

    pub fn set_spacing(&mut self, spacing: Spacing) {
        self.backend.set_spacing(spacing);
    }

    pub fn padding(&self) -> Padding {
        self.backend.padding()
    }

    pub fn set_padding(&mut self, padding: Padding) {
        self.backend.set_padding(padding);
    }

    /// Element placed at `loc`, if any.
    pub fn element_at(&self, loc: Location) -> Option<&W> {
        let grid = self.grid.as_ref()?;
        if !grid.size().contains(loc) {
            return None;
        }
        grid.get(loc)
    }

    /// Cell of a placed element.
    pub fn position(&self, id: &W::Id) -> Option<Location> {
        self.grid.as_ref()?.position(id)
    }

    /// Whether an element with this id is placed in a cell.
    pub fn contains(&self, id: &W::Id) -> bool {
        self.position(id).is_some()
    }

    /// Placed elements with their cells, column by column.
    pub fn elements(&self) -> impl Iterator<Item = (Location, &W)> + '_ {
        self.grid.iter().flat_map(|grid| grid.iter())
    }

    /// Elements declared but not placed yet.
    pub fn contents(&self) -> &[W] {
        &self.pending
    }

    /// Attached location of an element owned by the layout.
    ///
    /// For a placed element this is its cell. For a declared element it is the cell it will be
    /// placed in.
    pub fn location(&self, id: &W::Id) -> Option<Location> {
        self.attached.get(id).map(|attached| attached.location)
    }

    /// Attached scale hints of an element owned by the layout.
    pub fn scale_hints(&self, id: &W::Id) -> Option<ScaleHints> {
        self.attached.get(id).map(|attached| attached.hints)
    }

    pub fn set_column_scale_hint(&mut self, id: &W::Id, scale: bool) -> Result<(), GridError> {
        self.set_scale_hint(id, ScaleHints::COLUMN, scale)
    }

    pub fn set_row_scale_hint(&mut self, id: &W::Id, scale: bool) -> Result<(), GridError> {
        self.set_scale_hint(id, ScaleHints::ROW, scale)
    }

    fn set_scale_hint(
        &mut self,
        id: &W::Id,
        hint: ScaleHints,
        scale: bool,
    ) -> Result<(), GridError> {
        let attached = self.attached.get_mut(id).ok_or(GridError::NotFound)?;
        attached.hints.set(hint, scale);
        Ok(())
    }

    /// Sets the attached location of an element owned by the layout.
    ///
    /// A placed element moves to the new cell right away, see [`move_element`]. A declared
    /// element is placed there when the layout reconciles.
    ///
    /// [`move_element`]: Self::move_element
    pub fn set_location(
        &mut self,
        id: &W::Id,
        loc: impl Into<Location>,
    ) -> Result<Option<W>, GridError> {
        let loc = loc.into();

        if self.contains(id) {
            return self.move_element(id, loc);
        }

        if self.pending.iter().any(|element| element.id() == id) {
            self.attached.set_location(id, loc);
            return Ok(None);
        }

        Err(GridError::NotFound)
    }

    /// Whether an element with this id is placed or declared.
    fn owns(&self, id: &W::Id) -> bool {
        self.attached.contains(id)
    }

    fn check_cell(&self, loc: Location) -> Result<(), GridError> {
        match &self.grid {
            Some(grid) if grid.size().contains(loc) => Ok(()),
            _ => Err(GridError::OutOfRange {
                loc,
                size: self.size,
            }),
        }
    }
}

#[cfg(test)]
impl<W: LayoutElement> GridLayout<W, HeadlessBackend<W::Id>> {
    pub fn verify_invariants(&self) {
        assert!(
            self.pending.is_empty() || self.lifecycle != Lifecycle::Bound,
            "declared contents must be drained once bound"
        );

        let Some(grid) = &self.grid else {
            assert!(self.size.is_empty(), "a non-empty size must be allocated");
            assert_eq!(self.attached.len(), self.pending.len());
            assert_eq!(self.backend.allocated_size(), None);
            return;
        };

        assert_eq!(grid.size(), self.size);
        assert_eq!(self.backend.allocated_size(), Some(self.size));

        let mut seen = std::collections::HashSet::new();
        for (loc, element) in grid.iter() {
            let id = element.id();
            assert!(seen.insert(id.clone()), "{id:?} is placed more than once");

            let attached = self.attached.get(id).expect("placed element must have attributes");
            assert_eq!(attached.location, loc, "attached location of {id:?} must match its cell");

            assert_eq!(
                self.backend.physical_cell(loc),
                Some(id),
                "backend must show {id:?} at {loc}"
            );
        }

        for x in 0..self.size.width {
            for y in 0..self.size.height {
                let loc = Location::new(x, y);
                if grid.get(loc).is_none() {
                    assert_eq!(self.backend.physical_cell(loc), None, "{loc} must be empty");
                }
            }
        }

        for element in &self.pending {
            let id = element.id();
            assert!(seen.insert(id.clone()), "{id:?} is both declared and placed");
            assert!(self.attached.contains(id));
        }

        assert_eq!(
            self.attached.len(),
            seen.len(),
            "attributes must only be kept for owned elements"
        );
    }
}
