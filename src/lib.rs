//! Placement engine for a bento-style card grid.
//!
//! Cards sit on a snapping grid of fixed columns and a row count that grows
//! as content needs it. The [`grid`] module does the geometry: pixel/cell
//! mapping, bounds and collision checks, capacity growth. The [`store`]
//! module owns the cards and exposes the mutations a view layer drives,
//! including a drag/drop protocol that rolls rejected drops back.
//!
//! ```
//! use bento_grid::{GridConfig, ItemStore, Position, Size};
//!
//! let mut store = ItemStore::new(GridConfig::default())?;
//! let card = store.add_at_first_free(Size::new(2, 1), "About Me")?;
//!
//! let drag = store.begin_drag(card)?;
//! let outcome = store.drop_by_offset(drag, 270, 255)?;
//! assert_eq!(outcome.position(), Position::new(260, 260));
//! # Ok::<(), bento_grid::GridError>(())
//! ```

pub mod error;
pub mod geometry;
pub mod grid;
pub mod item;
pub mod logging;
pub mod metrics;
pub mod store;

pub use error::{ConfigError, GridError, Rejection, Result};
pub use geometry::{Cell, CellRect, Position, Size, SizePreset};
pub use grid::{GridConfig, GridState};
pub use item::{Item, ItemContent, ItemId};
pub use logging::{
    FileSink, LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult,
    MemorySink,
};
pub use metrics::{MetricSnapshot, StoreMetrics};
pub use store::{Change, DragSession, DropOutcome, DropPreview, ItemStore, ResizeOption};
