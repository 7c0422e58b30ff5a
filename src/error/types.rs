use thiserror::Error;

use crate::item::ItemId;

/// Unified result type for the bento grid crate.
pub type Result<T> = std::result::Result<T, GridError>;

/// Errors surfaced by the grid engine and item store.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("item `{0}` not found")]
    ItemNotFound(ItemId),
    #[error("item `{0}` appears more than once")]
    DuplicateId(ItemId),
    #[error("placement rejected: {0}")]
    Rejected(#[from] Rejection),
    #[error("grid capacity exhausted: {rows} rows in use, limit is {max_rows}")]
    CapacityExhausted { rows: u32, max_rows: u32 },
    #[error("invalid grid configuration: {0}")]
    Config(#[from] ConfigError),
}

impl GridError {
    /// The placement verdict when this error is a rejection.
    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            GridError::Rejected(reason) => Some(*reason),
            _ => None,
        }
    }
}

/// Why a candidate placement failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("size {cols}x{rows} has no area")]
    EmptySize { cols: u16, rows: u16 },
    #[error(
        "{cols}x{rows} at cell ({col}, {row}) does not fit a grid of {columns} columns and {grid_rows} rows"
    )]
    OutOfBounds {
        col: i32,
        row: i32,
        cols: u16,
        rows: u16,
        columns: u32,
        grid_rows: u32,
    },
    #[error("overlaps item `{with}`")]
    Collision { with: ItemId },
}

/// Grid configuration problems detected at load or construction time.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid must have at least one column")]
    ZeroColumns,
    #[error("grid must start with at least one row")]
    ZeroRows,
    #[error("cell size plus gap must be positive")]
    ZeroPitch,
    #[error("growth step must be positive")]
    ZeroGrowthStep,
    #[error("row limit {max_rows} is below the initial row count {rows}")]
    RowLimitBelowInitial { rows: u32, max_rows: u32 },
    #[error("failed to parse grid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
