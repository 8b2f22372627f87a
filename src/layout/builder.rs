//! Building tables from rows of items.
//!
//! A table described as rows is sized by its rows: one row per entry and as many columns as the
//! longest row has items. Shorter rows leave their trailing cells empty.
//!
//! Gaps carry meaning. A `None` item places nothing but makes its column scale, and a `None` row
//! makes that row scale. This is how a declarative table says "put the slack here":
//!
//! ```text
//! [A,    B   ]
//! [C,    None]    <- column 1 scales
//! None            <- row 2 scales
//! ```

use std::rc::Rc;

use tracing::debug;

use super::{ContainerElement, GridError, GridLayout, LayoutElement, Options};
use crate::backend::GridBackend;
use crate::layout::types::{CellSize, Lifecycle, Location};

/// One cell of a row.
#[derive(Debug)]
pub struct TableItem<W> {
    pub element: W,
    /// Whether the column of this item scales.
    pub scale_width: bool,
}

impl<W: LayoutElement> TableItem<W> {
    pub fn new(element: W) -> Self {
        Self {
            element,
            scale_width: false,
        }
    }

    /// An item whose column scales.
    pub fn scaled(element: W) -> Self {
        Self {
            element,
            scale_width: true,
        }
    }

    pub fn with_scale_width(mut self, scale_width: bool) -> Self {
        self.scale_width = scale_width;
        self
    }

    /// An item holding a nested single-row table of `items`.
    pub fn from_items<B>(
        items: impl IntoIterator<Item = Option<TableItem<W>>>,
        backend: B,
    ) -> Result<Self, GridError>
    where
        W: ContainerElement<B>,
        B: GridBackend<W>,
    {
        let layout = GridLayout::from_items(items, backend)?;
        Ok(Self::new(W::from_layout(layout)))
    }

    /// An item holding a nested table built from `rows`.
    pub fn from_rows<B>(
        rows: impl IntoIterator<Item = Option<TableRow<W>>>,
        backend: B,
    ) -> Result<Self, GridError>
    where
        W: ContainerElement<B>,
        B: GridBackend<W>,
    {
        let layout = GridLayout::from_rows(rows, backend)?;
        Ok(Self::new(W::from_layout(layout)))
    }
}

/// One row of a table.
#[derive(Debug)]
pub struct TableRow<W> {
    /// Items from left to right. `None` leaves the cell empty and makes its column scale.
    pub items: Vec<Option<TableItem<W>>>,
    /// Whether this row scales.
    pub scale_height: bool,
}

impl<W: LayoutElement> TableRow<W> {
    pub fn new(items: impl IntoIterator<Item = Option<TableItem<W>>>) -> Self {
        Self {
            items: items.into_iter().collect(),
            scale_height: false,
        }
    }

    /// A row with a single element.
    pub fn from_element(element: W) -> Self {
        Self::new([Some(TableItem::new(element))])
    }

    /// A row of elements with no gaps and no scaling.
    pub fn from_elements(elements: impl IntoIterator<Item = W>) -> Self {
        Self::new(elements.into_iter().map(|element| Some(TableItem::new(element))))
    }

    pub fn scale_height(mut self, scale_height: bool) -> Self {
        self.scale_height = scale_height;
        self
    }
}

impl<W: LayoutElement, B: GridBackend<W>> GridLayout<W, B> {
    /// Builds a table from rows of items.
    ///
    /// Fails if the same element id appears twice.
    pub fn from_rows(
        rows: impl IntoIterator<Item = Option<TableRow<W>>>,
        backend: B,
    ) -> Result<Self, GridError> {
        Self::from_rows_with_options(rows, backend, Rc::new(Options::default()))
    }

    pub fn from_rows_with_options(
        rows: impl IntoIterator<Item = Option<TableRow<W>>>,
        backend: B,
        options: Rc<Options>,
    ) -> Result<Self, GridError> {
        let rows: Vec<_> = rows.into_iter().collect();

        let width = rows
            .iter()
            .map(|row| row.as_ref().map_or(0, |row| row.items.len()))
            .max()
            .unwrap_or(0);
        let size = CellSize::new(width, rows.len());
        debug!("building a {size} table from rows");

        let mut layout = Self::with_options(backend, options);
        layout.allocate(size);
        layout.lifecycle = Lifecycle::Bound;

        for (y, row) in rows.into_iter().enumerate() {
            let Some(row) = row else {
                layout.set_row_scale(y, true)?;
                continue;
            };

            for (x, item) in row.items.into_iter().enumerate() {
                match item {
                    Some(item) => {
                        layout.add(item.element, Location::new(x, y))?;
                        if item.scale_width {
                            layout.set_column_scale(x, true)?;
                        }
                    }
                    None => layout.set_column_scale(x, true)?,
                }
            }

            if row.scale_height {
                layout.set_row_scale(y, true)?;
            }
        }

        Ok(layout)
    }

    /// Builds a single-row table.
    pub fn from_items(
        items: impl IntoIterator<Item = Option<TableItem<W>>>,
        backend: B,
    ) -> Result<Self, GridError> {
        Self::from_rows([Some(TableRow::new(items))], backend)
    }
}
