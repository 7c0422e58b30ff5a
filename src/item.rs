use std::fmt;

use uuid::Uuid;

use crate::geometry::{Position, Size};

/// Opaque identifier assigned when an item is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// User facing payload carried by each item. The engine never inspects it.
pub type ItemContent = String;

/// A card placed on the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    pub position: Position,
    pub size: Size,
    pub content: ItemContent,
}

impl Item {
    pub fn new(position: Position, size: Size, content: impl Into<ItemContent>) -> Self {
        Self {
            id: ItemId::new(),
            position,
            size,
            content: content.into(),
        }
    }
}
