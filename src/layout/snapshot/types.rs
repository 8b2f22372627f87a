use std::fmt;

use serde::Serialize;

use crate::backend::GridBackend;
use crate::layout::types::{CellSize, Lifecycle, Location, Padding, Spacing};
use crate::layout::{GridLayout, LayoutElement};

/// Snapshot of a whole table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridSnapshot {
    pub size: CellSize,
    pub lifecycle: Lifecycle,
    /// Occupied cells, column by column.
    pub cells: Vec<CellSnapshot>,
    /// Declared elements that are not placed yet.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub declared: Vec<CellSnapshot>,
    pub column_scales: Vec<usize>,
    pub row_scales: Vec<usize>,
    pub spacing: Spacing,
    pub padding: Padding,
}

/// An element with its (attached) location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellSnapshot {
    pub x: usize,
    pub y: usize,
    /// Debug representation of the element id.
    pub element: String,
}

impl CellSnapshot {
    fn new(loc: Location, id: &impl fmt::Debug) -> Self {
        Self {
            x: loc.x,
            y: loc.y,
            element: format!("{id:?}"),
        }
    }
}

impl GridSnapshot {
    pub fn capture<W: LayoutElement, B: GridBackend<W>>(layout: &GridLayout<W, B>) -> Self {
        let cells = layout
            .elements()
            .map(|(loc, element)| CellSnapshot::new(loc, element.id()))
            .collect();

        let declared = layout
            .contents()
            .iter()
            .map(|element| {
                let id = element.id();
                CellSnapshot::new(layout.location(id).unwrap_or_default(), id)
            })
            .collect();

        Self {
            size: layout.cell_size(),
            lifecycle: layout.lifecycle(),
            cells,
            declared,
            column_scales: layout.column_scales().into_iter().collect(),
            row_scales: layout.row_scales().into_iter().collect(),
            spacing: layout.spacing(),
            padding: layout.padding(),
        }
    }

    fn label(&self, loc: Location) -> &str {
        self.cells
            .iter()
            .find(|cell| cell.x == loc.x && cell.y == loc.y)
            .map_or(".", |cell| cell.element.as_str())
    }
}

impl fmt::Display for GridSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            size,
            spacing,
            padding,
            ..
        } = self;

        write!(
            f,
            "{size} table, spacing {}x{}, padding {} {} {} {}",
            spacing.horizontal,
            spacing.vertical,
            padding.left,
            padding.top,
            padding.right,
            padding.bottom,
        )?;

        if !self.declared.is_empty() {
            write!(f, "\ndeclared:")?;
            for cell in &self.declared {
                write!(f, " {}@({}, {})", cell.element, cell.x, cell.y)?;
            }
        }

        if size.width == 0 || size.height == 0 {
            return Ok(());
        }

        let mark = |scales: &[usize], idx: usize| {
            let star = if scales.contains(&idx) { "*" } else { "" };
            format!("{idx}{star}")
        };
        let column_headers: Vec<_> = (0..size.width)
            .map(|x| mark(&self.column_scales, x))
            .collect();
        let row_headers: Vec<_> = (0..size.height)
            .map(|y| mark(&self.row_scales, y))
            .collect();

        let column_widths: Vec<_> = (0..size.width)
            .map(|x| {
                (0..size.height)
                    .map(|y| self.label(Location::new(x, y)).len())
                    .chain([column_headers[x].len()])
                    .max()
                    .unwrap_or(1)
            })
            .collect();
        let row_width = row_headers.iter().map(String::len).max().unwrap_or(1);

        write!(f, "\n{:row_width$}", "")?;
        for (header, &width) in column_headers.iter().zip(&column_widths) {
            write!(f, " {header:>width$}")?;
        }

        for (y, header) in row_headers.iter().enumerate() {
            write!(f, "\n{header:<row_width$}")?;
            for (x, &width) in column_widths.iter().enumerate() {
                write!(f, " {:>width$}", self.label(Location::new(x, y)))?;
            }
        }

        Ok(())
    }
}
