//! A table layout manager.
//!
//! Elements go into the cells of a fixed-size table. Columns and rows can be marked as scaling,
//! so that they absorb extra space. See [`layout`] for the logical table and [`backend`] for how
//! it is shown.

pub mod backend;
pub mod layout;
