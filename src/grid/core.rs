use crate::error::{GridError, Rejection, Result};
use crate::geometry::{Cell, CellRect, Position, Size};
use crate::item::{Item, ItemId};

use super::config::GridConfig;

/// Live grid: a validated configuration plus the current row watermark.
///
/// The row count only ever grows. Deleting or moving items upward leaves it
/// where it is.
#[derive(Debug, Clone)]
pub struct GridState {
    config: GridConfig,
    rows: u32,
}

impl GridState {
    pub fn new(config: GridConfig) -> Result<Self> {
        config.validate()?;
        let rows = config.rows;
        Ok(Self { config, rows })
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn columns(&self) -> u32 {
        self.config.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Pixel distance between adjacent cell origins (`cell_size + gap`).
    pub fn pitch(&self) -> i64 {
        self.config.pitch()
    }

    /// Nearest cell to a pixel coordinate. Halfway values round up, so `-0.5`
    /// becomes `0` and `1.5` becomes `2`.
    pub fn to_grid_cell(&self, position: Position) -> Cell {
        let pitch = self.pitch();
        Cell::new(
            round_div(i64::from(position.x), pitch),
            round_div(i64::from(position.y), pitch),
        )
    }

    /// Pixel origin of a cell. Exact inverse of [`to_grid_cell`](Self::to_grid_cell)
    /// for aligned input.
    pub fn to_pixels(&self, cell: Cell) -> Position {
        let pitch = self.pitch();
        Position::new(
            saturate(i64::from(cell.col) * pitch),
            saturate(i64::from(cell.row) * pitch),
        )
    }

    pub fn snap(&self, position: Position) -> Position {
        self.to_pixels(self.to_grid_cell(position))
    }

    pub fn cell_rect(&self, position: Position, size: Size) -> CellRect {
        CellRect::new(self.to_grid_cell(position), size)
    }

    /// Pixel width and height of an item of `size`, gutters between its cells
    /// included.
    pub fn footprint(&self, size: Size) -> (u64, u64) {
        (
            self.span(u64::from(size.cols)),
            self.span(u64::from(size.rows)),
        )
    }

    /// Pixel width and height of the whole grid at its current row count.
    pub fn pixel_extent(&self) -> (u64, u64) {
        (
            self.span(u64::from(self.config.columns)),
            self.span(u64::from(self.rows)),
        )
    }

    fn span(&self, cells: u64) -> u64 {
        let pitch = u64::from(self.config.cell_size) + u64::from(self.config.gap);
        cells
            .saturating_mul(pitch)
            .saturating_sub(u64::from(self.config.gap))
    }

    /// Every cell of the current grid in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + use<> {
        let columns = saturate(i64::from(self.config.columns));
        let rows = saturate(i64::from(self.rows));
        (0..rows).flat_map(move |row| (0..columns).map(move |col| Cell::new(col, row)))
    }

    /// Validate a candidate placement against the grid bounds and every item
    /// except `exclude`. Reports the first colliding item in collection order.
    pub fn check_placement<'a, I>(
        &self,
        position: Position,
        size: Size,
        items: I,
        exclude: Option<ItemId>,
    ) -> std::result::Result<(), Rejection>
    where
        I: IntoIterator<Item = &'a Item>,
    {
        if size.is_empty() {
            return Err(Rejection::EmptySize {
                cols: size.cols,
                rows: size.rows,
            });
        }

        let candidate = self.cell_rect(position, size);
        if !self.in_bounds(&candidate) {
            return Err(Rejection::OutOfBounds {
                col: candidate.origin.col,
                row: candidate.origin.row,
                cols: size.cols,
                rows: size.rows,
                columns: self.config.columns,
                grid_rows: self.rows,
            });
        }

        let collision = items
            .into_iter()
            .filter(|item| Some(item.id) != exclude)
            .find(|item| candidate.overlaps(&self.cell_rect(item.position, item.size)));

        match collision {
            Some(item) => Err(Rejection::Collision { with: item.id }),
            None => Ok(()),
        }
    }

    pub fn is_valid<'a, I>(
        &self,
        position: Position,
        size: Size,
        items: I,
        exclude: Option<ItemId>,
    ) -> bool
    where
        I: IntoIterator<Item = &'a Item>,
    {
        self.check_placement(position, size, items, exclude).is_ok()
    }

    fn in_bounds(&self, rect: &CellRect) -> bool {
        rect.left() >= 0
            && rect.top() >= 0
            && rect.right() <= i64::from(self.config.columns)
            && rect.bottom() <= i64::from(self.rows)
    }

    /// First cell, scanning rows then columns, where `size` fits.
    pub fn find_first_free(&self, size: Size, items: &[Item]) -> Option<Position> {
        self.cells()
            .map(|cell| self.to_pixels(cell))
            .find(|position| self.is_valid(*position, size, items, None))
    }

    /// Row index just below the lowest item edge; zero for an empty collection.
    pub fn required_rows<'a, I>(&self, items: I) -> u32
    where
        I: IntoIterator<Item = &'a Item>,
    {
        let pitch = self.pitch();
        let deepest = items
            .into_iter()
            .map(|item| {
                let bottom = i64::from(item.position.y) + i64::from(item.size.rows) * pitch;
                ceil_div(bottom, pitch)
            })
            .max()
            .unwrap_or(0);
        u32::try_from(deepest.max(0)).unwrap_or(u32::MAX)
    }

    /// Raise the row count to cover every item. Never lowers it.
    pub fn ensure_capacity<'a, I>(&mut self, items: I) -> u32
    where
        I: IntoIterator<Item = &'a Item>,
    {
        let required = self.required_rows(items);
        if required > self.rows {
            self.rows = required;
        }
        self.rows
    }

    /// Add `growth_step` rows, stopping at `max_rows`.
    pub fn grow(&mut self) -> Result<u32> {
        let max_rows = self.config.max_rows;
        if self.rows >= max_rows {
            return Err(GridError::CapacityExhausted {
                rows: self.rows,
                max_rows,
            });
        }
        self.rows = self
            .rows
            .saturating_add(self.config.growth_step)
            .min(max_rows);
        Ok(self.rows)
    }
}

/// Division rounding to nearest, ties toward positive infinity.
fn round_div(n: i64, d: i64) -> i32 {
    saturate((2 * n + d).div_euclid(2 * d))
}

fn ceil_div(n: i64, d: i64) -> i64 {
    -(-n).div_euclid(d)
}

fn saturate(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
