//! Plain-data captures of a layout.
//!
//! A [`GridSnapshot`] holds everything observable about a table: its size, which element sits in
//! which cell, the scale flags, spacing and padding. It is serializable for tooling, and its
//! `Display` renders a compact text grid used by golden tests:
//!
//! ```text
//! 2x3 table, spacing 5x5, padding 5 5 5 5
//!    0 1*
//! 0  1  2
//! 1  3  .
//! 2* .  .
//! ```
//!
//! Scaled columns and rows are marked with `*`, empty cells with `.`.

mod types;

pub use types::{CellSnapshot, GridSnapshot};
