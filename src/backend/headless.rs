//! Headless backend.
//!
//! Keeps a mirror of the physical table in memory and records every call it receives. Useful for
//! tests and for inspecting what a layout asks of a real toolkit.

use serde::Serialize;
use tracing::warn;

use super::GridBackend;
use crate::layout::{CellSize, LayoutElement, Location, Padding, Spacing};

/// One call received by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum BackendEvent<Id> {
    Allocate { width: usize, height: usize },
    Add { element: Option<Id>, x: usize, y: usize },
    Move { element: Id, x: usize, y: usize },
    Remove { element: Id },
    SetColumnScale { column: usize, scale: bool },
    SetRowScale { row: usize, scale: bool },
    SetSpacing { horizontal: i32, vertical: i32 },
    SetPadding { left: i32, top: i32, right: i32, bottom: i32 },
}

#[derive(Debug, Clone)]
pub struct HeadlessBackend<Id> {
    size: Option<CellSize>,
    /// Physical cells, column by column.
    cells: Vec<Option<Id>>,
    column_scale: Vec<bool>,
    row_scale: Vec<bool>,
    spacing: Spacing,
    padding: Padding,
    events: Vec<BackendEvent<Id>>,
}

impl<Id> Default for HeadlessBackend<Id> {
    fn default() -> Self {
        Self {
            size: None,
            cells: Vec::new(),
            column_scale: Vec::new(),
            row_scale: Vec::new(),
            spacing: Spacing::ZERO,
            padding: Padding::ZERO,
            events: Vec::new(),
        }
    }
}

impl<Id: Clone + PartialEq> HeadlessBackend<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Size passed to `allocate`, if it was called.
    pub fn allocated_size(&self) -> Option<CellSize> {
        self.size
    }

    /// Element physically shown in a cell.
    pub fn physical_cell(&self, loc: Location) -> Option<&Id> {
        let idx = self.index(loc)?;
        self.cells[idx].as_ref()
    }

    /// Calls received so far, oldest first.
    pub fn events(&self) -> &[BackendEvent<Id>] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<BackendEvent<Id>> {
        std::mem::take(&mut self.events)
    }

    fn index(&self, loc: Location) -> Option<usize> {
        let size = self.size?;
        size.contains(loc).then(|| loc.x * size.height + loc.y)
    }

    fn physical_position(&self, id: &Id) -> Option<usize> {
        self.cells.iter().position(|cell| cell.as_ref() == Some(id))
    }
}

impl<W: LayoutElement> GridBackend<W> for HeadlessBackend<W::Id> {
    fn allocate(&mut self, size: CellSize) {
        self.events.push(BackendEvent::Allocate {
            width: size.width,
            height: size.height,
        });

        if let Some(current) = self.size {
            warn!("ignoring allocation of a {size} table, already allocated as {current}");
            return;
        }

        self.size = Some(size);
        self.cells = vec![None; size.cell_count()];
        self.column_scale = vec![false; size.width];
        self.row_scale = vec![false; size.height];
    }

    fn add(&mut self, element: Option<&W>, loc: Location) {
        let id = element.map(|element| element.id().clone());
        self.events.push(BackendEvent::Add {
            element: id.clone(),
            x: loc.x,
            y: loc.y,
        });

        let Some(idx) = self.index(loc) else {
            warn!("ignoring add outside of the table at {loc}");
            return;
        };
        self.cells[idx] = id;
    }

    fn move_to(&mut self, element: &W, loc: Location) {
        let id = element.id();
        self.events.push(BackendEvent::Move {
            element: id.clone(),
            x: loc.x,
            y: loc.y,
        });

        let Some(idx) = self.index(loc) else {
            warn!("ignoring move of {id:?} outside of the table to {loc}");
            return;
        };

        if let Some(from) = self.physical_position(id) {
            self.cells[from] = None;
        }
        self.cells[idx] = Some(id.clone());
    }

    fn remove(&mut self, element: &W) {
        let id = element.id();
        self.events.push(BackendEvent::Remove {
            element: id.clone(),
        });

        match self.physical_position(id) {
            Some(idx) => self.cells[idx] = None,
            None => warn!("ignoring removal of {id:?} which is not in the table"),
        }
    }

    fn column_scale(&self, column: usize) -> bool {
        self.column_scale.get(column).copied().unwrap_or(false)
    }

    fn set_column_scale(&mut self, column: usize, scale: bool) {
        self.events
            .push(BackendEvent::SetColumnScale { column, scale });

        match self.column_scale.get_mut(column) {
            Some(flag) => *flag = scale,
            None => warn!("ignoring scale of column {column} outside of the table"),
        }
    }

    fn row_scale(&self, row: usize) -> bool {
        self.row_scale.get(row).copied().unwrap_or(false)
    }

    fn set_row_scale(&mut self, row: usize, scale: bool) {
        self.events.push(BackendEvent::SetRowScale { row, scale });

        match self.row_scale.get_mut(row) {
            Some(flag) => *flag = scale,
            None => warn!("ignoring scale of row {row} outside of the table"),
        }
    }

    fn spacing(&self) -> Spacing {
        self.spacing
    }

    fn set_spacing(&mut self, spacing: Spacing) {
        self.events.push(BackendEvent::SetSpacing {
            horizontal: spacing.horizontal,
            vertical: spacing.vertical,
        });
        self.spacing = spacing;
    }

    fn padding(&self) -> Padding {
        self.padding
    }

    fn set_padding(&mut self, padding: Padding) {
        self.events.push(BackendEvent::SetPadding {
            left: padding.left,
            top: padding.top,
            right: padding.right,
            bottom: padding.bottom,
        });
        self.padding = padding;
    }
}
