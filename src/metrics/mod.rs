use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;

/// Counters accumulated across generation passes and interactive moves.
#[derive(Debug, Default, Clone)]
pub struct PlacementMetrics {
    layouts: u64,
    rooms_placed: u64,
    rooms_unplaced: u64,
    search_attempts: u64,
    moves_applied: u64,
    moves_rejected: u64,
}

impl PlacementMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_layout(&mut self) {
        self.layouts = self.layouts.saturating_add(1);
    }

    pub fn record_search(&mut self, attempts: u32, placed: bool) {
        self.search_attempts = self.search_attempts.saturating_add(attempts as u64);
        if placed {
            self.rooms_placed = self.rooms_placed.saturating_add(1);
        } else {
            self.rooms_unplaced = self.rooms_unplaced.saturating_add(1);
        }
    }

    pub fn record_move(&mut self, applied: bool) {
        if applied {
            self.moves_applied = self.moves_applied.saturating_add(1);
        } else {
            self.moves_rejected = self.moves_rejected.saturating_add(1);
        }
    }

    pub fn snapshot(&self) -> MetricSnapshot {
        MetricSnapshot {
            layouts: self.layouts,
            rooms_placed: self.rooms_placed,
            rooms_unplaced: self.rooms_unplaced,
            search_attempts: self.search_attempts,
            moves_applied: self.moves_applied,
            moves_rejected: self.moves_rejected,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub layouts: u64,
    pub rooms_placed: u64,
    pub rooms_unplaced: u64,
    pub search_attempts: u64,
    pub moves_applied: u64,
    pub moves_rejected: u64,
}

impl MetricSnapshot {
    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(LogLevel::Info, target, "placement_metrics", self.as_fields())
    }

    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("layouts".to_string(), json!(self.layouts));
        map.insert("rooms_placed".to_string(), json!(self.rooms_placed));
        map.insert("rooms_unplaced".to_string(), json!(self.rooms_unplaced));
        map.insert("search_attempts".to_string(), json!(self.search_attempts));
        map.insert("moves_applied".to_string(), json!(self.moves_applied));
        map.insert("moves_rejected".to_string(), json!(self.moves_rejected));
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_reflects_recorded_counts() {
        let mut metrics = PlacementMetrics::new();
        metrics.record_layout();
        metrics.record_search(3, true);
        metrics.record_search(40, false);
        metrics.record_move(true);
        metrics.record_move(false);
        metrics.record_move(false);

        let snap = metrics.snapshot();
        assert_eq!(snap.layouts, 1);
        assert_eq!(snap.rooms_placed, 1);
        assert_eq!(snap.rooms_unplaced, 1);
        assert_eq!(snap.search_attempts, 43);
        assert_eq!(snap.moves_applied, 1);
        assert_eq!(snap.moves_rejected, 2);
    }

    #[test]
    fn snapshot_event_carries_fields() {
        let snap = PlacementMetrics::new().snapshot();
        let event = snap.to_log_event("floorplan::metrics");
        assert_eq!(event.message, "placement_metrics");
        assert_eq!(event.field("moves_rejected"), Some(&json!(0)));
    }
}
