use blake3::Hash;
use serde_json::json;

use crate::config::LayoutConfig;
use crate::error::Result;
use crate::geometry::{Plot, Rect};
use crate::layout::LayoutOutcome;
use crate::logging::{LogLevel, SESSION_TARGET, event_with_fields, json_kv, json_str};
use crate::placement::PlacementSet;

use super::moves::{MoveDirection, MoveOutcome, shift_room};

/// Result of sliding a room until it stops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    pub steps: u32,
    /// The move that ended the slide.
    pub stop: MoveOutcome,
}

/// One user's editable layout.
///
/// A session owns its [`PlacementSet`] outright; hosts serving several users
/// keep one session per user. The digest and revision only change when a
/// move is committed, so a UI can redraw on change alone. The config is
/// validated on construction, so every move uses a positive step.
#[derive(Clone)]
pub struct LayoutSession {
    plot: Plot,
    config: LayoutConfig,
    placements: PlacementSet,
    digest: Hash,
    revision: u64,
}

impl LayoutSession {
    pub fn new(plot: Plot, placements: PlacementSet, config: LayoutConfig) -> Result<Self> {
        config.search.validate()?;
        let digest = placements.digest();
        Ok(Self {
            plot,
            config,
            placements,
            digest,
            revision: 0,
        })
    }

    pub fn from_outcome(outcome: &LayoutOutcome, config: LayoutConfig) -> Result<Self> {
        Self::new(outcome.plot, outcome.placements.clone(), config)
    }

    pub fn plot(&self) -> Plot {
        self.plot
    }

    pub fn placements(&self) -> &PlacementSet {
        &self.placements
    }

    pub fn into_placements(self) -> PlacementSet {
        self.placements
    }

    pub fn rect_of(&self, key: &str) -> Option<Rect> {
        self.placements.get(key)
    }

    pub fn digest(&self) -> Hash {
        self.digest
    }

    /// Number of committed moves since the session was created.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Move `key` one configured step in `direction`.
    pub fn nudge(&mut self, key: &str, direction: MoveDirection) -> MoveOutcome {
        let outcome = shift_room(
            &mut self.placements,
            self.plot,
            key,
            direction,
            self.config.search.step,
        );
        self.record(key, direction, &outcome);
        outcome
    }

    /// Repeat single-step moves until the room is blocked or flush against
    /// the plot edge.
    pub fn slide(&mut self, key: &str, direction: MoveDirection) -> Slide {
        let limit = self.plot.width.max(self.plot.height) as u32 + 1;
        let mut steps = 0;
        loop {
            let outcome = self.nudge(key, direction);
            if !outcome.is_moved() || steps + 1 >= limit {
                return Slide {
                    steps: steps + u32::from(outcome.is_moved()),
                    stop: outcome,
                };
            }
            steps += 1;
        }
    }

    fn record(&mut self, key: &str, direction: MoveDirection, outcome: &MoveOutcome) {
        match outcome {
            MoveOutcome::Moved { to, .. } => {
                self.revision += 1;
                self.digest = self.placements.digest();
                self.config.with_metrics(|m| m.record_move(true));
                self.config.emit(event_with_fields(
                    LogLevel::Debug,
                    SESSION_TARGET,
                    "move_applied",
                    [
                        json_str("key", key),
                        json_str("direction", direction.as_str()),
                        json_kv("rect", json!(to)),
                        json_kv("revision", self.revision),
                    ],
                ));
            }
            MoveOutcome::Blocked { by } => {
                self.config.with_metrics(|m| m.record_move(false));
                self.config.emit(event_with_fields(
                    LogLevel::Debug,
                    SESSION_TARGET,
                    "move_rejected",
                    [
                        json_str("key", key),
                        json_str("direction", direction.as_str()),
                        json_str("blocked_by", by.as_str()),
                    ],
                ));
            }
            MoveOutcome::Unchanged => {
                self.config.with_metrics(|m| m.record_move(false));
                self.config.emit(event_with_fields(
                    LogLevel::Trace,
                    SESSION_TARGET,
                    "move_rejected",
                    [
                        json_str("key", key),
                        json_str("direction", direction.as_str()),
                        json_str("blocked_by", "boundary"),
                    ],
                ));
            }
            MoveOutcome::Missing => {}
        }
    }
}
