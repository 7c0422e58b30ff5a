use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;

/// Running counters for item store activity.
#[derive(Debug, Default, Clone)]
pub struct StoreMetrics {
    adds: u64,
    moves: u64,
    resizes: u64,
    deletes: u64,
    rejections: u64,
    rollbacks: u64,
    growths: u64,
}

impl StoreMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_add(&mut self) {
        self.adds = self.adds.saturating_add(1);
    }

    pub fn record_move(&mut self) {
        self.moves = self.moves.saturating_add(1);
    }

    pub fn record_resize(&mut self) {
        self.resizes = self.resizes.saturating_add(1);
    }

    pub fn record_delete(&mut self) {
        self.deletes = self.deletes.saturating_add(1);
    }

    pub fn record_rejection(&mut self) {
        self.rejections = self.rejections.saturating_add(1);
    }

    pub fn record_rollback(&mut self) {
        self.rollbacks = self.rollbacks.saturating_add(1);
    }

    pub fn record_growth(&mut self) {
        self.growths = self.growths.saturating_add(1);
    }

    pub fn snapshot(&self, rows: u32, items: usize) -> MetricSnapshot {
        MetricSnapshot {
            rows,
            items: items as u64,
            adds: self.adds,
            moves: self.moves,
            resizes: self.resizes,
            deletes: self.deletes,
            rejections: self.rejections,
            rollbacks: self.rollbacks,
            growths: self.growths,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub rows: u32,
    pub items: u64,
    pub adds: u64,
    pub moves: u64,
    pub resizes: u64,
    pub deletes: u64,
    pub rejections: u64,
    pub rollbacks: u64,
    pub growths: u64,
}

impl MetricSnapshot {
    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(LogLevel::Info, target, "store_metrics", self.as_fields())
    }

    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("rows".to_string(), json!(self.rows));
        map.insert("items".to_string(), json!(self.items));
        map.insert("adds".to_string(), json!(self.adds));
        map.insert("moves".to_string(), json!(self.moves));
        map.insert("resizes".to_string(), json!(self.resizes));
        map.insert("deletes".to_string(), json!(self.deletes));
        map.insert("rejections".to_string(), json!(self.rejections));
        map.insert("rollbacks".to_string(), json!(self.rollbacks));
        map.insert("growths".to_string(), json!(self.growths));
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_reflects_recorded_activity() {
        let mut metrics = StoreMetrics::new();
        metrics.record_add();
        metrics.record_add();
        metrics.record_rejection();
        metrics.record_rollback();

        let snapshot = metrics.snapshot(6, 2);
        assert_eq!(snapshot.adds, 2);
        assert_eq!(snapshot.rejections, 1);
        assert_eq!(snapshot.rollbacks, 1);
        assert_eq!(snapshot.moves, 0);
        assert_eq!(snapshot.rows, 6);
    }

    #[test]
    fn snapshot_renders_as_log_event() {
        let mut metrics = StoreMetrics::new();
        metrics.record_growth();
        let event = metrics.snapshot(8, 3).to_log_event("bento::metrics");
        assert_eq!(event.message, "store_metrics");
        assert_eq!(event.target, "bento::metrics");
        assert_eq!(event.field("growths"), Some(&json!(1)));
        assert_eq!(event.field("items"), Some(&json!(3)));
    }
}
