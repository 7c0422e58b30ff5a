//! Drag and drop on top of the item store.
//!
//! A drag captures where the item started. The drop snaps the pointer
//! location, validates it with the dragged item excluded at its current
//! size, and either commits the move or leaves the item at its last committed
//! position. An abandoned drag never touches the store.

use crate::error::{Rejection, Result};
use crate::geometry::{Cell, Position};
use crate::item::ItemId;
use crate::logging::{LogLevel, json_kv};

use super::core::{ItemStore, STORE_TARGET};

/// An in-progress drag of a single item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    id: ItemId,
    origin: Position,
}

impl DragSession {
    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn origin(&self) -> Position {
        self.origin
    }
}

/// Result of a drop that reached the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    Placed(Position),
    /// The drop was rejected; the item stays at `position`.
    RolledBack { position: Position, reason: Rejection },
}

impl DropOutcome {
    pub fn is_placed(&self) -> bool {
        matches!(self, DropOutcome::Placed(_))
    }

    /// Where the item ended up.
    pub fn position(&self) -> Position {
        match self {
            DropOutcome::Placed(position) => *position,
            DropOutcome::RolledBack { position, .. } => *position,
        }
    }
}

/// Hover feedback for a pointer location; nothing is committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropPreview {
    pub snapped: Position,
    pub verdict: std::result::Result<(), Rejection>,
}

impl DropPreview {
    pub fn is_valid(&self) -> bool {
        self.verdict.is_ok()
    }
}

impl ItemStore {
    pub fn begin_drag(&self, id: ItemId) -> Result<DragSession> {
        let origin = self.item(id)?.position;
        Ok(DragSession { id, origin })
    }

    pub fn preview(&self, session: &DragSession, raw: Position) -> Result<DropPreview> {
        let size = self.item(session.id)?.size;
        let snapped = self.grid().snap(raw);
        Ok(DropPreview {
            snapped,
            verdict: self.check_placement(snapped, size, Some(session.id)),
        })
    }

    /// Drop at the pointer's offset from where the drag started.
    pub fn drop_by_offset(&mut self, session: DragSession, dx: i32, dy: i32) -> Result<DropOutcome> {
        self.drop_at(session, session.origin.offset(dx, dy))
    }

    /// Drop at a raw, unsnapped pixel location.
    pub fn drop_at(&mut self, session: DragSession, raw: Position) -> Result<DropOutcome> {
        let preview = self.preview(&session, raw)?;
        match preview.verdict {
            Ok(()) => {
                self.move_item(session.id, preview.snapped)?;
                Ok(DropOutcome::Placed(preview.snapped))
            }
            Err(reason) => {
                self.reject("move_rejected", session.id, reason);
                let position = self.roll_back(session.id)?;
                self.emit(
                    LogLevel::Debug,
                    STORE_TARGET,
                    "drop_rolled_back",
                    [
                        json_kv("id", session.id.to_string()),
                        json_kv("x", position.x),
                        json_kv("y", position.y),
                    ],
                );
                Ok(DropOutcome::RolledBack { position, reason })
            }
        }
    }

    /// Drop directly onto a grid cell target. A rejected drop leaves the item
    /// where it is.
    pub fn drop_on_cell(&mut self, id: ItemId, cell: Cell) -> Result<DropOutcome> {
        let session = self.begin_drag(id)?;
        let target = self.grid().to_pixels(cell);
        self.drop_at(session, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GridError;
    use crate::geometry::Size;
    use crate::grid::GridConfig;
    use crate::item::Item;

    fn two_items() -> (ItemStore, ItemId, ItemId) {
        let mut store = ItemStore::new(GridConfig::default()).unwrap();
        let a = store.add_at_first_free(Size::unit(), "a").unwrap();
        let b = store.add_at_first_free(Size::unit(), "b").unwrap();
        store.take_dirty();
        (store, a, b)
    }

    #[test]
    fn drop_onto_neighbour_rolls_back() {
        let (mut store, a, b) = two_items();
        let before: Vec<Item> = store.snapshot();

        let session = store.begin_drag(a).unwrap();
        let outcome = store.drop_by_offset(session, 250, 12).unwrap();

        assert_eq!(
            outcome,
            DropOutcome::RolledBack {
                position: Position::new(0, 0),
                reason: Rejection::Collision { with: b },
            }
        );
        assert_eq!(store.snapshot(), before);
        assert!(!store.has_dirty());
        assert_eq!(store.metrics().rollbacks, 1);
    }

    #[test]
    fn drop_snaps_to_nearest_free_cell() {
        let (mut store, a, _) = two_items();
        let session = store.begin_drag(a).unwrap();
        let outcome = store.drop_by_offset(session, 300, 240).unwrap();

        assert_eq!(outcome, DropOutcome::Placed(Position::new(260, 260)));
        assert_eq!(store.get(a).unwrap().position, Position::new(260, 260));
        assert_eq!(store.take_dirty().len(), 1);
    }

    #[test]
    fn drop_outside_grid_restores_origin() {
        let (mut store, _, b) = two_items();
        let session = store.begin_drag(b).unwrap();
        let outcome = store.drop_at(session, Position::new(-400, 0)).unwrap();

        assert!(!outcome.is_placed());
        assert_eq!(outcome.position(), Position::new(260, 0));
        assert_eq!(store.get(b).unwrap().position, Position::new(260, 0));
    }

    #[test]
    fn preview_does_not_mutate() {
        let (store, a, b) = two_items();
        let session = store.begin_drag(a).unwrap();

        let blocked = store.preview(&session, Position::new(250, 0)).unwrap();
        assert_eq!(blocked.snapped, Position::new(260, 0));
        assert_eq!(blocked.verdict, Err(Rejection::Collision { with: b }));

        let open = store.preview(&session, Position::new(520, 0)).unwrap();
        assert!(open.is_valid());
        assert_eq!(store.get(a).unwrap().position, Position::new(0, 0));
    }

    #[test]
    fn drop_on_cell_targets_exact_cell() {
        let (mut store, a, _) = two_items();
        let outcome = store.drop_on_cell(a, Cell::new(3, 3)).unwrap();
        assert_eq!(outcome, DropOutcome::Placed(Position::new(780, 780)));

        let blocked = store.drop_on_cell(a, Cell::new(4, 0)).unwrap();
        assert!(!blocked.is_placed());
        assert_eq!(store.get(a).unwrap().position, Position::new(780, 780));
    }

    #[test]
    fn drag_of_deleted_item_fails() {
        let (mut store, a, _) = two_items();
        let session = store.begin_drag(a).unwrap();
        store.delete_item(a).unwrap();
        assert!(matches!(
            store.drop_at(session, Position::new(520, 0)),
            Err(GridError::ItemNotFound(_))
        ));
    }

    #[test]
    fn rejected_drop_keeps_item_off_reused_origin() {
        let (mut store, a, _) = two_items();
        let session = store.begin_drag(a).unwrap();
        store.try_move(a, Position::new(520, 0)).unwrap();
        let c = store.add_at_first_free(Size::unit(), "c").unwrap();
        assert_eq!(store.get(c).unwrap().position, Position::new(0, 0));

        let outcome = store.drop_at(session, Position::new(260, 0)).unwrap();
        assert!(!outcome.is_placed());
        assert_eq!(outcome.position(), Position::new(520, 0));
        assert_eq!(store.get(a).unwrap().position, Position::new(520, 0));
        assert_eq!(store.get(c).unwrap().position, Position::new(0, 0));
    }

    #[test]
    fn drop_validates_size_at_drop_time() {
        let (mut store, a, _) = two_items();
        let session = store.begin_drag(a).unwrap();
        store.try_move(a, Position::new(0, 260)).unwrap();
        store.try_resize(a, Size::new(2, 1)).unwrap();

        let outcome = store.drop_on_cell(a, Cell::new(3, 2)).unwrap();
        assert!(matches!(
            outcome,
            DropOutcome::RolledBack {
                reason: Rejection::OutOfBounds { cols: 2, .. },
                ..
            }
        ));
        let outcome = store.drop_at(session, Position::new(780, 520)).unwrap();
        assert!(!outcome.is_placed());
        assert_eq!(store.get(a).unwrap().position, Position::new(0, 260));
    }
}
