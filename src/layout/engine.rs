use serde::Serialize;
use serde_json::json;

use crate::config::LayoutConfig;
use crate::error::Result;
use crate::geometry::{Plot, Rect};
use crate::logging::{GENERATE_TARGET, LogLevel, event_with_fields, json_kv, json_str};
use crate::placement::PlacementSet;
use crate::spec::{ConstraintWarning, RawRoom, RoomSpec, ValidatedRooms, validate_rooms};

use super::placer::Placer;
use super::resolver::{AnchorSource, Cursor, anchor_for, resolution_order};

/// Area bookkeeping for one generated layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LayoutStats {
    pub room_area: u64,
    pub placed_area: u64,
    pub plot_area: u64,
    /// Placed area as an integer percentage of the plot area.
    pub efficiency: u32,
}

impl LayoutStats {
    fn compute(plot: Plot, rooms: &[RoomSpec], placements: &PlacementSet) -> Self {
        // Requested area is unbounded: rooms may be larger than the plot.
        let room_area = rooms
            .iter()
            .map(RoomSpec::area)
            .fold(0u64, u64::saturating_add);
        let placed_area = placements.placed_area();
        let plot_area = plot.area();
        let efficiency = (placed_area as u128 * 100 / plot_area.max(1) as u128).min(100);
        Self {
            room_area,
            placed_area,
            plot_area,
            efficiency: efficiency as u32,
        }
    }
}

/// Everything a renderer or UI needs from one generation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutOutcome {
    pub plot: Plot,
    /// Validated rooms in input order, for labels and dimensions.
    pub rooms: Vec<RoomSpec>,
    pub placements: PlacementSet,
    /// Keys of rooms that found no legal position, in resolution order.
    pub unplaced: Vec<String>,
    pub unplaced_count: usize,
    pub warnings: Vec<ConstraintWarning>,
    pub stats: LayoutStats,
}

impl LayoutOutcome {
    pub fn is_complete(&self) -> bool {
        self.unplaced.is_empty()
    }

    pub fn rect_of(&self, key: &str) -> Option<Rect> {
        self.placements.get(key)
    }

    pub fn room(&self, key: &str) -> Option<&RoomSpec> {
        self.rooms.iter().find(|room| room.key == key)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Runs validation, constraint resolution and collision-avoiding placement.
#[derive(Clone, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Result<Self> {
        config.search.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Validate `raw` and lay it out on `plot`. Only validation can fail;
    /// rooms that cannot be placed are listed in the outcome.
    pub fn generate(&self, plot: Plot, raw: &[RawRoom]) -> Result<LayoutOutcome> {
        let validated = validate_rooms(raw, self.config.search.constraint_policy)?;
        Ok(self.place(plot, validated))
    }

    /// Lay out already validated rooms.
    pub fn place(&self, plot: Plot, validated: ValidatedRooms) -> LayoutOutcome {
        let ValidatedRooms { rooms, warnings } = validated;
        let settings = &self.config.search;

        for warning in &warnings {
            self.config.emit(event_with_fields(
                LogLevel::Warn,
                GENERATE_TARGET,
                "constraint_unrecognized",
                [
                    json_str("key", warning.key.as_str()),
                    json_str("constraint", warning.constraint.as_str()),
                    json_kv("kind", json!(warning.kind)),
                ],
            ));
        }

        let placer = Placer::new(plot, settings);
        let mut cursor = Cursor::new(settings.cursor_margin, settings.cursor_gap);
        let mut placements = PlacementSet::new();
        let mut unplaced = Vec::new();

        for idx in resolution_order(&rooms, settings.free_order) {
            let room = &rooms[idx];
            let anchor = anchor_for(room, plot, &placements, &mut cursor);
            let outcome = placer.search(&anchor, room.width, room.height, &placements);
            self.config
                .with_metrics(|m| m.record_search(outcome.attempts, outcome.rect.is_some()));

            match outcome.rect {
                Some(rect) => {
                    placements.try_insert(room.key.clone(), rect);
                    if anchor.source == AnchorSource::Cursor {
                        cursor.advance(&rect);
                    }
                    self.config.emit(event_with_fields(
                        LogLevel::Debug,
                        GENERATE_TARGET,
                        "room_placed",
                        [
                            json_str("key", room.key.as_str()),
                            json_str("constraint", room.constraint.to_string()),
                            json_kv("rect", json!(rect)),
                            json_kv("attempts", outcome.attempts),
                        ],
                    ));
                }
                None => {
                    self.config.emit(event_with_fields(
                        LogLevel::Warn,
                        GENERATE_TARGET,
                        "room_unplaced",
                        [
                            json_str("key", room.key.as_str()),
                            json_kv("width", room.width),
                            json_kv("height", room.height),
                            json_kv("attempts", outcome.attempts),
                        ],
                    ));
                    unplaced.push(room.key.clone());
                }
            }
        }

        let stats = LayoutStats::compute(plot, &rooms, &placements);
        self.config.with_metrics(|m| m.record_layout());
        self.config.emit(event_with_fields(
            LogLevel::Info,
            GENERATE_TARGET,
            "layout_generated",
            [
                json_kv("rooms", rooms.len()),
                json_kv("placed", placements.len()),
                json_kv("unplaced", unplaced.len()),
                json_kv("efficiency", stats.efficiency),
            ],
        ));

        LayoutOutcome {
            plot,
            rooms,
            placements,
            unplaced_count: unplaced.len(),
            unplaced,
            warnings,
            stats,
        }
    }
}

/// Generate a layout with the default configuration.
pub fn generate(plot: Plot, rooms: &[RawRoom]) -> Result<LayoutOutcome> {
    LayoutEngine::default().generate(plot, rooms)
}
