use std::collections::HashMap;

use blake3::Hash;
use serde_json::Value;

use crate::error::{GridError, Rejection, Result};
use crate::geometry::{Cell, Position, Size, SizePreset};
use crate::grid::{GridConfig, GridState};
use crate::item::{Item, ItemContent, ItemId};
use crate::logging::{LogLevel, Logger, event_with_fields, json_kv};
use crate::metrics::{MetricSnapshot, StoreMetrics};

pub(super) const STORE_TARGET: &str = "bento::store";
const GRID_TARGET: &str = "bento::grid";
const METRICS_TARGET: &str = "bento::metrics";

/// Something a view layer has to redraw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Updated(Item),
    Removed(ItemId),
}

/// One entry of the resize menu for a given item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeOption {
    pub preset: SizePreset,
    /// The item already has this size.
    pub current: bool,
    /// Resizing in place to this preset would pass validation.
    pub valid: bool,
}

/// Owns the item collection and the grid it lives on.
///
/// `move_item` and `resize_item` commit without validation; `try_move`,
/// `try_resize` and the drop helpers validate first and leave the store
/// untouched on rejection. Every commit re-runs capacity growth.
#[derive(Debug)]
pub struct ItemStore {
    grid: GridState,
    items: Vec<Item>,
    hashes: HashMap<ItemId, Hash>,
    dirty: Vec<ItemId>,
    metrics: StoreMetrics,
    logger: Option<Logger>,
}

impl ItemStore {
    pub fn new(config: GridConfig) -> Result<Self> {
        Ok(Self {
            grid: GridState::new(config)?,
            items: Vec::new(),
            hashes: HashMap::new(),
            dirty: Vec::new(),
            metrics: StoreMetrics::new(),
            logger: None,
        })
    }

    /// Build a store around existing items. Rows grow to fit them; a repeated
    /// id, or an item outside the columns or overlapping an earlier item, is
    /// rejected.
    pub fn from_items(config: GridConfig, items: Vec<Item>) -> Result<Self> {
        let mut store = Self::new(config)?;
        store.grid.ensure_capacity(&items);
        for (index, item) in items.iter().enumerate() {
            if items[..index].iter().any(|earlier| earlier.id == item.id) {
                return Err(GridError::DuplicateId(item.id));
            }
            store
                .grid
                .check_placement(item.position, item.size, &items[..index], None)?;
        }
        for item in &items {
            store.hashes.insert(item.id, content_hash(&item.content));
            store.dirty.push(item.id);
        }
        store.items = items;
        Ok(store)
    }

    /// The demo layout shown when the editor first opens.
    pub fn starter(config: GridConfig) -> Result<Self> {
        let grid = GridState::new(config.clone())?;
        let place = |col, row, size, content: &str| {
            Item::new(grid.to_pixels(Cell::new(col, row)), size, content)
        };
        let items = vec![
            place(0, 0, SizePreset::SmallSquare.size(), "Welcome 👋"),
            place(1, 0, SizePreset::HorizontalRectangle.size(), "About Me"),
            place(0, 1, SizePreset::VerticalRectangle.size(), "Projects"),
            place(1, 1, SizePreset::LargeSquare.size(), "Contact"),
        ];
        Self::from_items(config, items)
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn grid(&self) -> &GridState {
        &self.grid
    }

    pub fn rows(&self) -> u32 {
        self.grid.rows()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Owned copy of the collection for consumers that keep their own state.
    pub fn snapshot(&self) -> Vec<Item> {
        self.items.clone()
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn metrics(&self) -> MetricSnapshot {
        self.metrics.snapshot(self.grid.rows(), self.items.len())
    }

    /// Push the current metrics snapshot through the logger, if any.
    pub fn log_metrics(&self) {
        if let Some(logger) = &self.logger {
            let _ = logger.log_with_fields(
                LogLevel::Info,
                METRICS_TARGET,
                "store_metrics",
                self.metrics().as_fields(),
            );
        }
    }

    pub fn check_placement(
        &self,
        position: Position,
        size: Size,
        exclude: Option<ItemId>,
    ) -> std::result::Result<(), Rejection> {
        self.grid
            .check_placement(position, size, &self.items, exclude)
    }

    pub fn is_valid(&self, position: Position, size: Size, exclude: Option<ItemId>) -> bool {
        self.check_placement(position, size, exclude).is_ok()
    }

    /// Rewrite an item's position without validation.
    pub fn move_item(&mut self, id: ItemId, position: Position) -> Result<()> {
        let index = self.index_of(id)?;
        self.items[index].position = position;
        self.metrics.record_move();
        self.mark_dirty(id);
        let cell = self.grid.to_grid_cell(position);
        self.emit(
            LogLevel::Debug,
            STORE_TARGET,
            "item_moved",
            [
                json_kv("id", id.to_string()),
                json_kv("col", cell.col),
                json_kv("row", cell.row),
            ],
        );
        self.sync_capacity();
        Ok(())
    }

    /// Rewrite an item's size without validation.
    pub fn resize_item(&mut self, id: ItemId, size: Size) -> Result<()> {
        let index = self.index_of(id)?;
        self.items[index].size = size;
        self.metrics.record_resize();
        self.mark_dirty(id);
        self.emit(
            LogLevel::Debug,
            STORE_TARGET,
            "item_resized",
            [
                json_kv("id", id.to_string()),
                json_kv("cols", size.cols),
                json_kv("rows", size.rows),
            ],
        );
        self.sync_capacity();
        Ok(())
    }

    pub fn delete_item(&mut self, id: ItemId) -> Result<Item> {
        let index = self.index_of(id)?;
        let removed = self.items.remove(index);
        self.hashes.remove(&id);
        self.metrics.record_delete();
        self.mark_dirty(id);
        self.emit(
            LogLevel::Debug,
            STORE_TARGET,
            "item_deleted",
            [json_kv("id", id.to_string())],
        );
        Ok(removed)
    }

    /// Replace an item's payload. Returns `false` when the content is unchanged.
    pub fn set_content(&mut self, id: ItemId, content: impl Into<ItemContent>) -> Result<bool> {
        let index = self.index_of(id)?;
        let content = content.into();
        let new_hash = content_hash(&content);
        if self.hashes.get(&id) == Some(&new_hash) {
            return Ok(false);
        }
        self.items[index].content = content;
        self.hashes.insert(id, new_hash);
        self.mark_dirty(id);
        self.emit(
            LogLevel::Debug,
            STORE_TARGET,
            "content_updated",
            [json_kv("id", id.to_string())],
        );
        Ok(true)
    }

    /// Snap `target`, validate it for the item's current size and commit.
    /// Returns the committed position.
    pub fn try_move(&mut self, id: ItemId, target: Position) -> Result<Position> {
        let size = self.item(id)?.size;
        let snapped = self.grid.snap(target);
        if let Err(reason) = self.check_placement(snapped, size, Some(id)) {
            self.reject("move_rejected", id, reason);
            return Err(reason.into());
        }
        self.move_item(id, snapped)?;
        Ok(snapped)
    }

    /// Validate `size` at the item's current position and commit.
    pub fn try_resize(&mut self, id: ItemId, size: Size) -> Result<()> {
        let position = self.item(id)?.position;
        if let Err(reason) = self.check_placement(position, size, Some(id)) {
            self.reject("resize_rejected", id, reason);
            return Err(reason.into());
        }
        self.resize_item(id, size)
    }

    /// Insert a new item at the first cell, scanning rows then columns, where
    /// `size` fits. Rows grow by the configured step until it does, up to the
    /// configured row limit.
    pub fn add_at_first_free(
        &mut self,
        size: Size,
        content: impl Into<ItemContent>,
    ) -> Result<ItemId> {
        if size.is_empty() {
            return Err(Rejection::EmptySize {
                cols: size.cols,
                rows: size.rows,
            }
            .into());
        }
        if u32::from(size.cols) > self.grid.columns() {
            return Err(Rejection::OutOfBounds {
                col: 0,
                row: 0,
                cols: size.cols,
                rows: size.rows,
                columns: self.grid.columns(),
                grid_rows: self.grid.rows(),
            }
            .into());
        }

        let position = loop {
            if let Some(position) = self.grid.find_first_free(size, &self.items) {
                break position;
            }
            match self.grid.grow() {
                Ok(rows) => {
                    self.metrics.record_growth();
                    self.emit(
                        LogLevel::Info,
                        GRID_TARGET,
                        "capacity_grown",
                        [json_kv("rows", rows), json_kv("reason", "no_free_cell")],
                    );
                }
                Err(err) => {
                    self.emit(
                        LogLevel::Warn,
                        GRID_TARGET,
                        "capacity_exhausted",
                        [json_kv("rows", self.grid.rows())],
                    );
                    return Err(err);
                }
            }
        };

        let item = Item::new(position, size, content);
        let id = item.id;
        self.hashes.insert(id, content_hash(&item.content));
        self.items.push(item);
        self.metrics.record_add();
        self.mark_dirty(id);
        let cell = self.grid.to_grid_cell(position);
        self.emit(
            LogLevel::Info,
            STORE_TARGET,
            "item_added",
            [
                json_kv("id", id.to_string()),
                json_kv("col", cell.col),
                json_kv("row", cell.row),
                json_kv("cols", size.cols),
                json_kv("rows", size.rows),
            ],
        );
        self.sync_capacity();
        Ok(id)
    }

    /// Every size preset with whether it is current and whether it would fit
    /// in place.
    pub fn resize_options(&self, id: ItemId) -> Result<Vec<ResizeOption>> {
        let item = self.item(id)?;
        Ok(SizePreset::ALL
            .into_iter()
            .map(|preset| ResizeOption {
                preset,
                current: preset.size() == item.size,
                valid: self.is_valid(item.position, preset.size(), Some(id)),
            })
            .collect())
    }

    /// Drain pending redraws in the order they were first recorded.
    pub fn take_dirty(&mut self) -> Vec<Change> {
        std::mem::take(&mut self.dirty)
            .into_iter()
            .map(|id| match self.get(id) {
                Some(item) => Change::Updated(item.clone()),
                None => Change::Removed(id),
            })
            .collect()
    }

    pub fn has_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    pub(super) fn item(&self, id: ItemId) -> Result<&Item> {
        self.get(id).ok_or(GridError::ItemNotFound(id))
    }

    /// Record a rejected drop. The item keeps its last committed position,
    /// which is returned; nothing is written back.
    pub(super) fn roll_back(&mut self, id: ItemId) -> Result<Position> {
        let position = self.item(id)?.position;
        self.metrics.record_rollback();
        Ok(position)
    }

    pub(super) fn reject(&mut self, message: &str, id: ItemId, reason: Rejection) {
        self.metrics.record_rejection();
        self.emit(
            LogLevel::Info,
            STORE_TARGET,
            message,
            [
                json_kv("id", id.to_string()),
                json_kv("reason", reason.to_string()),
            ],
        );
    }

    pub(super) fn emit(
        &self,
        level: LogLevel,
        target: &str,
        message: &str,
        fields: impl IntoIterator<Item = (String, Value)>,
    ) {
        if let Some(logger) = &self.logger {
            let _ = logger.log_event(event_with_fields(level, target, message, fields));
        }
    }

    fn index_of(&self, id: ItemId) -> Result<usize> {
        self.items
            .iter()
            .position(|item| item.id == id)
            .ok_or(GridError::ItemNotFound(id))
    }

    fn mark_dirty(&mut self, id: ItemId) {
        if !self.dirty.contains(&id) {
            self.dirty.push(id);
        }
    }

    fn sync_capacity(&mut self) {
        let before = self.grid.rows();
        let after = self.grid.ensure_capacity(&self.items);
        if after > before {
            self.metrics.record_growth();
            self.emit(
                LogLevel::Info,
                GRID_TARGET,
                "capacity_grown",
                [json_kv("rows", after), json_kv("reason", "item_extent")],
            );
        }
    }
}

fn content_hash(content: &str) -> Hash {
    blake3::hash(content.as_bytes())
}
