use serde::{Deserialize, Serialize};

use crate::geometry::{Plot, Point, Rect};
use crate::placement::PlacementSet;
use crate::spec::{Constraint, Corner, Horizontal, RelativeDirection, RoomSpec, Vertical};

/// Order of the second resolution phase (relative and free rooms).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FreeOrder {
    /// Input order.
    #[default]
    Input,
    /// Descending area, ties kept in input order.
    LargestFirst,
}

/// Indices into `rooms` in the order they are placed: corner and centered
/// rooms first, then relative and free rooms, each phase in input order
/// unless `free_order` says otherwise.
pub fn resolution_order(rooms: &[RoomSpec], free_order: FreeOrder) -> Vec<usize> {
    let (mut order, mut rest): (Vec<usize>, Vec<usize>) =
        (0..rooms.len()).partition(|&i| rooms[i].constraint.is_fixed());
    if free_order == FreeOrder::LargestFirst {
        rest.sort_by(|&a, &b| rooms[b].area().cmp(&rooms[a].area()));
    }
    order.extend(rest);
    order
}

/// Direction the placer walks from an anchor when the anchor is blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NudgeAxis {
    /// Down the column, wrapping to the top of the next column.
    Vertical,
    /// Along the row, wrapping to the start of the next row.
    Horizontal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorSource {
    Constraint,
    Cursor,
}

/// Candidate top-left corner for a room before collision avoidance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    pub point: Point,
    pub axis: NudgeAxis,
    pub source: AnchorSource,
}

impl Anchor {
    fn constraint(point: Point, axis: NudgeAxis) -> Self {
        Self {
            point,
            axis,
            source: AnchorSource::Constraint,
        }
    }
}

/// Shelf-packing scan position for free rooms and failed relative lookups.
///
/// The cursor belongs to one generation pass. It walks left to right and
/// drops to a new shelf below the tallest room of the current one when the
/// next room would cross the right edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    x: i32,
    y: i32,
    shelf_height: i32,
    margin: i32,
    gap: i32,
}

impl Cursor {
    pub fn new(margin: i32, gap: i32) -> Self {
        Self {
            x: margin,
            y: margin,
            shelf_height: 0,
            margin,
            gap,
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Anchor for a room of `width`, wrapping to the next shelf first when
    /// the room would run past the right edge.
    pub fn anchor_for(&mut self, width: i32, plot: Plot) -> Point {
        if self.x.saturating_add(width) > plot.width && self.x > self.margin {
            self.x = self.margin;
            self.y = self
                .y
                .saturating_add(self.shelf_height)
                .saturating_add(self.gap);
            self.shelf_height = 0;
        }
        self.position()
    }

    /// Move past a room that was placed from this cursor.
    pub fn advance(&mut self, placed: &Rect) {
        if placed.y != self.y {
            self.y = placed.y;
            self.shelf_height = 0;
        }
        self.x = placed.right().saturating_add(self.gap);
        self.shelf_height = self.shelf_height.max(placed.height);
    }
}

/// Compute the anchor for `room` given what has been placed so far.
pub fn anchor_for(
    room: &RoomSpec,
    plot: Plot,
    placed: &PlacementSet,
    cursor: &mut Cursor,
) -> Anchor {
    let (w, h) = (room.width, room.height);
    match &room.constraint {
        Constraint::Corner(corner) => {
            let point = match corner {
                Corner::TopLeft => Point::new(0, 0),
                Corner::TopRight => Point::new(plot.width - w, 0),
                Corner::BottomLeft => Point::new(0, plot.height - h),
                Corner::BottomRight => Point::new(plot.width - w, plot.height - h),
            };
            Anchor::constraint(point, NudgeAxis::Vertical)
        }
        Constraint::Centered => Anchor::constraint(
            Point::new(
                (plot.width - w).div_euclid(2),
                (plot.height - h).div_euclid(2),
            ),
            NudgeAxis::Vertical,
        ),
        Constraint::RelativeTo { direction, target } => match placed.get(target) {
            Some(target_rect) => Anchor::constraint(
                relative_point(*direction, &target_rect, w, h),
                relative_axis(*direction),
            ),
            None => cursor_anchor(w, plot, cursor),
        },
        Constraint::Free => cursor_anchor(w, plot, cursor),
    }
}

fn cursor_anchor(width: i32, plot: Plot, cursor: &mut Cursor) -> Anchor {
    Anchor {
        point: cursor.anchor_for(width, plot),
        axis: NudgeAxis::Horizontal,
        source: AnchorSource::Cursor,
    }
}

fn relative_point(direction: RelativeDirection, target: &Rect, w: i32, h: i32) -> Point {
    let (horizontal, vertical) = direction.components();
    let x = match horizontal {
        Horizontal::Left => target.x.saturating_sub(w),
        Horizontal::Aligned => target.x,
        Horizontal::Right => target.right(),
    };
    let y = match vertical {
        Vertical::Above => target.y.saturating_sub(h),
        Vertical::Aligned => target.y,
        Vertical::Below => target.bottom(),
    };
    Point::new(x, y)
}

/// Nudge along the side shared with the target: rooms beside it slide
/// vertically, rooms above or below it slide horizontally.
fn relative_axis(direction: RelativeDirection) -> NudgeAxis {
    match direction.components() {
        (Horizontal::Aligned, _) => NudgeAxis::Horizontal,
        _ => NudgeAxis::Vertical,
    }
}
