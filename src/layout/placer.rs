use crate::config::SearchSettings;
use crate::geometry::{Plot, Point, Rect};
use crate::placement::PlacementSet;

use super::resolver::{Anchor, NudgeAxis};

/// Result of one bounded search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    pub rect: Option<Rect>,
    pub attempts: u32,
}

/// Finds the nearest legal position for a room from its anchor.
///
/// A position is legal when the rectangle lies inside the plot and overlaps
/// nothing already placed. The walk is deterministic: the anchor is clamped
/// into the plot, then candidates advance one `step` along the anchor's
/// axis, wrapping at the plot edges, until a legal one turns up or the
/// attempt budget runs out.
#[derive(Debug, Clone, Copy)]
pub struct Placer {
    plot: Plot,
    step: i32,
    max_attempts: u32,
}

impl Placer {
    pub fn new(plot: Plot, settings: &SearchSettings) -> Self {
        Self {
            plot,
            step: settings.step.max(1),
            max_attempts: settings.max_attempts.max(1),
        }
    }

    /// Number of distinct step-aligned origins for a `width x height` room.
    fn position_count(&self, width: i32, height: i32) -> u64 {
        let cols = ((self.plot.width - width) / self.step) as u64 + 1;
        let rows = ((self.plot.height - height) / self.step) as u64 + 1;
        cols.saturating_mul(rows)
    }

    pub fn search(
        &self,
        anchor: &Anchor,
        width: i32,
        height: i32,
        placed: &PlacementSet,
    ) -> SearchOutcome {
        if !self.plot.fits(width, height) {
            return SearchOutcome {
                rect: None,
                attempts: 0,
            };
        }

        let max_x = self.plot.width - width;
        let max_y = self.plot.height - height;
        let budget = self.position_count(width, height).min(self.max_attempts as u64) as u32;

        let Point { mut x, mut y } = self.plot.clamp_origin(anchor.point, width, height);
        for attempt in 1..=budget {
            let candidate = Rect::new(x, y, width, height);
            if !placed.collides(&candidate, None) {
                return SearchOutcome {
                    rect: Some(candidate),
                    attempts: attempt,
                };
            }
            match anchor.axis {
                NudgeAxis::Vertical => {
                    y = y.saturating_add(self.step);
                    if y > max_y {
                        y = 0;
                        x = wrap(x.saturating_add(self.step), max_x);
                    }
                }
                NudgeAxis::Horizontal => {
                    x = x.saturating_add(self.step);
                    if x > max_x {
                        x = 0;
                        y = wrap(y.saturating_add(self.step), max_y);
                    }
                }
            }
        }

        SearchOutcome {
            rect: None,
            attempts: budget,
        }
    }

    /// Row-major first fit from the top-left corner. Exhaustive at `step`
    /// granularity regardless of the attempt budget.
    pub fn grid_scan(&self, width: i32, height: i32, placed: &PlacementSet) -> Option<Rect> {
        if !self.plot.fits(width, height) {
            return None;
        }
        let max_x = self.plot.width - width;
        let max_y = self.plot.height - height;
        (0..=max_y)
            .step_by(self.step as usize)
            .flat_map(|y| {
                (0..=max_x)
                    .step_by(self.step as usize)
                    .map(move |x| Rect::new(x, y, width, height))
            })
            .find(|candidate| !placed.collides(candidate, None))
    }
}

fn wrap(value: i32, max: i32) -> i32 {
    if value > max { 0 } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::resolver::AnchorSource;

    fn placer(w: i64, h: i64) -> Placer {
        Placer::new(Plot::new(w, h).unwrap(), &SearchSettings::default())
    }

    fn anchor(x: i32, y: i32, axis: NudgeAxis) -> Anchor {
        Anchor {
            point: Point::new(x, y),
            axis,
            source: AnchorSource::Constraint,
        }
    }

    #[test]
    fn free_anchor_is_taken_as_is() {
        let out = placer(40, 30).search(
            &anchor(3, 4, NudgeAxis::Vertical),
            5,
            5,
            &PlacementSet::new(),
        );
        assert_eq!(out.rect, Some(Rect::new(3, 4, 5, 5)));
        assert_eq!(out.attempts, 1);
    }

    #[test]
    fn vertical_nudge_slides_below_blocker() {
        let mut placed = PlacementSet::new();
        placed.try_insert("bedroom", Rect::new(0, 0, 12, 10));
        let out = placer(40, 30).search(&anchor(0, 0, NudgeAxis::Vertical), 14, 12, &placed);
        assert_eq!(out.rect, Some(Rect::new(0, 10, 14, 12)));
        assert_eq!(out.attempts, 11);
    }

    #[test]
    fn horizontal_nudge_slides_right_of_blocker() {
        let mut placed = PlacementSet::new();
        placed.try_insert("bedroom", Rect::new(0, 0, 12, 10));
        let out = placer(40, 30).search(&anchor(0, 0, NudgeAxis::Horizontal), 5, 5, &placed);
        assert_eq!(out.rect, Some(Rect::new(12, 0, 5, 5)));
    }

    #[test]
    fn vertical_nudge_wraps_to_next_column() {
        let mut placed = PlacementSet::new();
        placed.try_insert("wall", Rect::new(0, 0, 1, 10));
        let out = placer(10, 10).search(&anchor(0, 5, NudgeAxis::Vertical), 2, 2, &placed);
        assert_eq!(out.rect, Some(Rect::new(1, 0, 2, 2)));
    }

    #[test]
    fn out_of_bounds_anchor_is_clamped() {
        let out = placer(40, 30).search(
            &anchor(-7, 28, NudgeAxis::Vertical),
            5,
            5,
            &PlacementSet::new(),
        );
        assert_eq!(out.rect, Some(Rect::new(0, 25, 5, 5)));
    }

    #[test]
    fn oversized_room_fails_without_attempts() {
        let out = placer(10, 10).search(
            &anchor(0, 0, NudgeAxis::Vertical),
            20,
            20,
            &PlacementSet::new(),
        );
        assert_eq!(out, SearchOutcome { rect: None, attempts: 0 });
    }

    #[test]
    fn full_plot_exhausts_budget() {
        let mut placed = PlacementSet::new();
        placed.try_insert("all", Rect::new(0, 0, 10, 10));
        let out = placer(10, 10).search(&anchor(4, 4, NudgeAxis::Horizontal), 3, 3, &placed);
        assert_eq!(out.rect, None);
        assert_eq!(out.attempts, 64);
    }

    #[test]
    fn search_is_exhaustive_at_unit_step() {
        // Single free cell, reachable only by wrapping past both edges.
        let mut placed = PlacementSet::new();
        placed.try_insert("top", Rect::new(0, 0, 10, 4));
        placed.try_insert("left", Rect::new(0, 4, 2, 6));
        placed.try_insert("right", Rect::new(4, 4, 6, 6));
        placed.try_insert("low", Rect::new(2, 6, 2, 4));
        let out = placer(10, 10).search(&anchor(9, 9, NudgeAxis::Vertical), 2, 2, &placed);
        assert_eq!(out.rect, Some(Rect::new(2, 4, 2, 2)));
    }

    #[test]
    fn max_attempts_caps_search() {
        let settings = SearchSettings {
            max_attempts: 3,
            ..SearchSettings::default()
        };
        let mut placed = PlacementSet::new();
        placed.try_insert("block", Rect::new(0, 0, 10, 10));
        let p = Placer::new(Plot::new(40, 30).unwrap(), &settings);
        let out = p.search(&anchor(0, 0, NudgeAxis::Vertical), 4, 4, &placed);
        assert_eq!(out, SearchOutcome { rect: None, attempts: 3 });
    }

    #[test]
    fn grid_scan_is_row_major_first_fit() {
        let mut placed = PlacementSet::new();
        placed.try_insert("a", Rect::new(0, 0, 14, 12));
        placed.try_insert("b", Rect::new(26, 0, 14, 12));
        let p = placer(40, 30);
        assert_eq!(p.grid_scan(12, 10, &placed), Some(Rect::new(14, 0, 12, 10)));
        assert_eq!(p.grid_scan(13, 10, &placed), Some(Rect::new(0, 12, 13, 10)));
        assert_eq!(p.grid_scan(41, 1, &placed), None);
    }
}
