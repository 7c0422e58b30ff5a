//! Grid geometry engine.
//!
//! Maps pixels to cells and back, validates placements against bounds and
//! occupied cells, and owns the monotonically growing row count. Nothing in
//! here mutates items; the store hands them in for inspection.

mod config;
mod core;

pub use config::GridConfig;
pub use self::core::GridState;
