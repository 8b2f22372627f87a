//! Placement operations.
//!
//! ```text
//! operations/
//! ├── mod.rs       - This file
//! ├── add.rs       - Placing elements into cells and clearing cells
//! ├── move_cell.rs - Moving placed elements between cells
//! └── remove.rs    - Taking elements out of the layout
//! ```
//!
//! Every operation validates its arguments before touching anything, so a failed call leaves the
//! grid, the attached attributes and the backend as they were.

mod add;
mod move_cell;
mod remove;
