//! Error types shared by the grid engine and the item store.

mod types;

pub use types::{ConfigError, GridError, Rejection, Result};
