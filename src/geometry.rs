/// Pixel coordinate of an item's top-left corner on the grid surface.
///
/// Committed positions are grid aligned; positions produced mid-drag may not be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

/// Item extent measured in grid cells, not pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Size {
    pub cols: u16,
    pub rows: u16,
}

impl Size {
    pub const fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }

    pub const fn unit() -> Self {
        Self::new(1, 1)
    }

    pub fn is_empty(&self) -> bool {
        self.cols == 0 || self.rows == 0
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::unit()
    }
}

/// Column/row coordinate of a grid cell. Origin is the top-left cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    pub col: i32,
    pub row: i32,
}

impl Cell {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }
}

/// Half-open rectangle of cells: `[col, col + cols) x [row, row + rows)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRect {
    pub origin: Cell,
    pub size: Size,
}

impl CellRect {
    pub const fn new(origin: Cell, size: Size) -> Self {
        Self { origin, size }
    }

    pub fn left(&self) -> i64 {
        i64::from(self.origin.col)
    }

    pub fn top(&self) -> i64 {
        i64::from(self.origin.row)
    }

    pub fn right(&self) -> i64 {
        self.left() + i64::from(self.size.cols)
    }

    pub fn bottom(&self) -> i64 {
        self.top() + i64::from(self.size.rows)
    }

    /// Separating-axis test on integer half-open intervals. Touching edges do
    /// not overlap.
    pub fn overlaps(&self, other: &CellRect) -> bool {
        !(self.right() <= other.left()
            || other.right() <= self.left()
            || self.bottom() <= other.top()
            || other.bottom() <= self.top())
    }

    pub fn contains(&self, cell: Cell) -> bool {
        let (col, row) = (i64::from(cell.col), i64::from(cell.row));
        col >= self.left() && col < self.right() && row >= self.top() && row < self.bottom()
    }
}

/// Named sizes offered by the resize menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizePreset {
    SmallSquare,
    HorizontalRectangle,
    VerticalRectangle,
    LargeSquare,
}

impl SizePreset {
    pub const ALL: [SizePreset; 4] = [
        SizePreset::SmallSquare,
        SizePreset::HorizontalRectangle,
        SizePreset::VerticalRectangle,
        SizePreset::LargeSquare,
    ];

    pub const fn size(self) -> Size {
        match self {
            SizePreset::SmallSquare => Size::new(1, 1),
            SizePreset::HorizontalRectangle => Size::new(2, 1),
            SizePreset::VerticalRectangle => Size::new(1, 2),
            SizePreset::LargeSquare => Size::new(2, 2),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            SizePreset::SmallSquare => "Small Square",
            SizePreset::HorizontalRectangle => "Horizontal Rectangle",
            SizePreset::VerticalRectangle => "Vertical Rectangle",
            SizePreset::LargeSquare => "Large Square",
        }
    }

    pub fn from_size(size: Size) -> Option<Self> {
        Self::ALL.into_iter().find(|preset| preset.size() == size)
    }
}
