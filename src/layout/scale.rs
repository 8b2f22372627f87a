//! Column and row scale flags.
//!
//! The backend keeps the flags; the layout checks indices against the table size and offers the
//! whole-set accessors used for declarative configuration.

use std::collections::BTreeSet;

use crate::backend::GridBackend;
use crate::layout::types::Axis;
use crate::layout::{GridError, GridLayout, LayoutElement};

impl<W: LayoutElement, B: GridBackend<W>> GridLayout<W, B> {
    pub fn column_scale(&self, column: usize) -> Result<bool, GridError> {
        self.check_track(Axis::Column, column)?;
        Ok(self.backend.column_scale(column))
    }

    pub fn set_column_scale(&mut self, column: usize, scale: bool) -> Result<(), GridError> {
        self.check_track(Axis::Column, column)?;
        self.backend.set_column_scale(column, scale);
        Ok(())
    }

    pub fn row_scale(&self, row: usize) -> Result<bool, GridError> {
        self.check_track(Axis::Row, row)?;
        Ok(self.backend.row_scale(row))
    }

    pub fn set_row_scale(&mut self, row: usize, scale: bool) -> Result<(), GridError> {
        self.check_track(Axis::Row, row)?;
        self.backend.set_row_scale(row, scale);
        Ok(())
    }

    /// Indices of the columns that scale, in ascending order.
    pub fn column_scales(&self) -> BTreeSet<usize> {
        (0..self.size.width)
            .filter(|&column| self.backend.column_scale(column))
            .collect()
    }

    /// Replaces the scale of every column: the listed columns scale, all others do not.
    pub fn set_column_scales(
        &mut self,
        columns: impl IntoIterator<Item = usize>,
    ) -> Result<(), GridError> {
        let columns = self.collect_tracks(Axis::Column, columns)?;
        for column in 0..self.size.width {
            self.backend.set_column_scale(column, false);
        }
        for column in columns {
            self.backend.set_column_scale(column, true);
        }
        Ok(())
    }

    /// Indices of the rows that scale, in ascending order.
    pub fn row_scales(&self) -> BTreeSet<usize> {
        (0..self.size.height)
            .filter(|&row| self.backend.row_scale(row))
            .collect()
    }

    /// Replaces the scale of every row: the listed rows scale, all others do not.
    pub fn set_row_scales(&mut self, rows: impl IntoIterator<Item = usize>) -> Result<(), GridError> {
        let rows = self.collect_tracks(Axis::Row, rows)?;
        for row in 0..self.size.height {
            self.backend.set_row_scale(row, false);
        }
        for row in rows {
            self.backend.set_row_scale(row, true);
        }
        Ok(())
    }

    fn track_count(&self, axis: Axis) -> usize {
        if !self.is_allocated() {
            return 0;
        }

        match axis {
            Axis::Column => self.size.width,
            Axis::Row => self.size.height,
        }
    }

    fn check_track(&self, axis: Axis, index: usize) -> Result<(), GridError> {
        let len = self.track_count(axis);
        if index < len {
            Ok(())
        } else {
            Err(GridError::TrackOutOfRange { axis, index, len })
        }
    }

    fn collect_tracks(
        &self,
        axis: Axis,
        indices: impl IntoIterator<Item = usize>,
    ) -> Result<BTreeSet<usize>, GridError> {
        indices
            .into_iter()
            .map(|index| self.check_track(axis, index).map(|()| index))
            .collect()
    }
}
