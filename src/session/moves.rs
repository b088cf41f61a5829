use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};
use crate::geometry::{Plot, Rect};
use crate::placement::PlacementSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Left,
    Right,
    Up,
    Down,
}

impl MoveDirection {
    pub const ALL: [MoveDirection; 4] = [
        MoveDirection::Left,
        MoveDirection::Right,
        MoveDirection::Up,
        MoveDirection::Down,
    ];

    /// Offset of one move of `step` units. `Up` decreases `y`.
    pub fn delta(&self, step: i32) -> (i32, i32) {
        match self {
            MoveDirection::Left => (-step, 0),
            MoveDirection::Right => (step, 0),
            MoveDirection::Up => (0, -step),
            MoveDirection::Down => (0, step),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MoveDirection::Left => "left",
            MoveDirection::Right => "right",
            MoveDirection::Up => "up",
            MoveDirection::Down => "down",
        }
    }
}

impl FromStr for MoveDirection {
    type Err = LayoutError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "left" | "l" => Ok(MoveDirection::Left),
            "right" | "r" => Ok(MoveDirection::Right),
            "up" | "u" => Ok(MoveDirection::Up),
            "down" | "d" => Ok(MoveDirection::Down),
            _ => Err(LayoutError::UnknownDirection(s.to_string())),
        }
    }
}

/// What a single move did to the placement set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved { from: Rect, to: Rect },
    /// The clamped target overlaps another room; nothing changed.
    Blocked { by: String },
    /// The room is already flush against the boundary in that direction.
    Unchanged,
    /// No room with that key is placed.
    Missing,
}

impl MoveOutcome {
    pub fn is_moved(&self) -> bool {
        matches!(self, MoveOutcome::Moved { .. })
    }
}

/// Shift one placed room by `step` in `direction`.
///
/// The target is clamped into the plot on each axis independently, then
/// checked against every other placement. The set is only written when the
/// target is legal, so the no-overlap invariant holds after every call.
/// A `step` below 1 is rejected with [`LayoutError::InvalidConfig`].
pub fn move_room(
    placements: &mut PlacementSet,
    plot: Plot,
    key: &str,
    direction: MoveDirection,
    step: i32,
) -> Result<MoveOutcome> {
    check_step(step)?;
    Ok(shift_room(placements, plot, key, direction, step))
}

fn check_step(step: i32) -> Result<()> {
    if step <= 0 {
        return Err(LayoutError::InvalidConfig(format!(
            "move step must be positive, got {step}"
        )));
    }
    Ok(())
}

/// [`move_room`] for callers that already hold a validated step.
pub(super) fn shift_room(
    placements: &mut PlacementSet,
    plot: Plot,
    key: &str,
    direction: MoveDirection,
    step: i32,
) -> MoveOutcome {
    let Some(current) = placements.get(key) else {
        return MoveOutcome::Missing;
    };

    let (dx, dy) = direction.delta(step);
    let origin = plot.clamp_origin(
        current.translate(dx, dy).origin(),
        current.width,
        current.height,
    );
    let target = Rect::at(origin, current.width, current.height);
    if target == current {
        return MoveOutcome::Unchanged;
    }

    if let Some(blocker) = placements.first_collision(&target, Some(key)) {
        return MoveOutcome::Blocked {
            by: blocker.to_string(),
        };
    }

    placements.replace(key, target);
    MoveOutcome::Moved {
        from: current,
        to: target,
    }
}

/// Value-returning form of [`move_room`]: the input set is left untouched
/// and the result equals it whenever the move was rejected.
pub fn moved(
    placements: &PlacementSet,
    plot: Plot,
    key: &str,
    direction: MoveDirection,
    step: i32,
) -> Result<PlacementSet> {
    let mut next = placements.clone();
    move_room(&mut next, plot, key, direction, step)?;
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plot() -> Plot {
        Plot::new(40, 30).unwrap()
    }

    fn two_rooms() -> PlacementSet {
        PlacementSet::from_rects([
            ("bedroom", Rect::new(0, 0, 12, 10)),
            ("bath", Rect::new(12, 0, 6, 6)),
        ])
        .unwrap()
    }

    #[test]
    fn parses_directions() {
        assert_eq!("Left".parse::<MoveDirection>().unwrap(), MoveDirection::Left);
        assert_eq!(" down ".parse::<MoveDirection>().unwrap(), MoveDirection::Down);
        assert!(matches!(
            "sideways".parse::<MoveDirection>(),
            Err(LayoutError::UnknownDirection(_))
        ));
    }

    #[test]
    fn free_move_commits() {
        let mut set = two_rooms();
        let out = move_room(&mut set, plot(), "bath", MoveDirection::Down, 1).unwrap();
        assert_eq!(
            out,
            MoveOutcome::Moved {
                from: Rect::new(12, 0, 6, 6),
                to: Rect::new(12, 1, 6, 6)
            }
        );
        assert_eq!(set.get("bath"), Some(Rect::new(12, 1, 6, 6)));
    }

    #[test]
    fn move_into_neighbour_is_rejected() {
        let mut set = two_rooms();
        let before = set.clone();
        let out = move_room(&mut set, plot(), "bath", MoveDirection::Left, 1).unwrap();
        assert_eq!(out, MoveOutcome::Blocked { by: "bedroom".into() });
        assert_eq!(set, before);

        let out = move_room(&mut set, plot(), "bedroom", MoveDirection::Right, 1).unwrap();
        assert_eq!(out, MoveOutcome::Blocked { by: "bath".into() });
        assert_eq!(set, before);
    }

    #[test]
    fn flush_room_is_unchanged_at_boundary() {
        let mut set = two_rooms();
        let before = set.clone();
        for _ in 0..3 {
            assert_eq!(
                move_room(&mut set, plot(), "bedroom", MoveDirection::Up, 1).unwrap(),
                MoveOutcome::Unchanged
            );
            assert_eq!(
                move_room(&mut set, plot(), "bedroom", MoveDirection::Left, 1).unwrap(),
                MoveOutcome::Unchanged
            );
        }
        assert_eq!(set, before);
    }

    #[test]
    fn large_step_is_clamped_per_axis() {
        let mut set = two_rooms();
        let out = move_room(&mut set, plot(), "bath", MoveDirection::Down, 100).unwrap();
        assert_eq!(
            out,
            MoveOutcome::Moved {
                from: Rect::new(12, 0, 6, 6),
                to: Rect::new(12, 24, 6, 6)
            }
        );
    }

    #[test]
    fn non_positive_step_is_rejected() {
        let mut set = two_rooms();
        let before = set.clone();
        for step in [0, -3] {
            let err = move_room(&mut set, plot(), "bath", MoveDirection::Right, step).unwrap_err();
            assert!(matches!(err, LayoutError::InvalidConfig(_)), "{step}");
            assert!(moved(&set, plot(), "bath", MoveDirection::Right, step).is_err());
        }
        assert_eq!(set, before);
    }

    #[test]
    fn missing_key_is_noop() {
        let mut set = two_rooms();
        let before = set.clone();
        assert_eq!(
            move_room(&mut set, plot(), "garage", MoveDirection::Right, 1).unwrap(),
            MoveOutcome::Missing
        );
        assert_eq!(set, before);
    }

    #[test]
    fn moved_leaves_input_untouched() {
        let set = two_rooms();
        let next = moved(&set, plot(), "bath", MoveDirection::Right, 2).unwrap();
        assert_eq!(set.get("bath"), Some(Rect::new(12, 0, 6, 6)));
        assert_eq!(next.get("bath"), Some(Rect::new(14, 0, 6, 6)));
        assert_eq!(next.get("bedroom"), set.get("bedroom"));
    }
}
