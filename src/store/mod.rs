//! Item store: the owned collection of placed items and the operations that
//! change it.
//!
//! The store consults the grid engine before every validated commit so no two
//! live items ever share a cell.

mod core;
mod drag;

pub use self::core::{Change, ItemStore, ResizeOption};
pub use drag::{DragSession, DropOutcome, DropPreview};
