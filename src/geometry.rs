//! Integer plot geometry shared by every placement phase.
//!
//! Coordinates are signed so that anchors computed relative to another room
//! (for example `left-of` a room sitting at `x = 0`) can land outside the
//! plot before the placer pulls them back in.

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};

/// Outer boundary of one layout run, occupying `[0, width) x [0, height)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Plot {
    #[serde(rename = "w")]
    pub width: i32,
    #[serde(rename = "h")]
    pub height: i32,
}

impl Plot {
    pub fn new(width: i64, height: i64) -> Result<Self> {
        let valid = |v: i64| v > 0 && v <= i32::MAX as i64;
        if !valid(width) || !valid(height) {
            return Err(LayoutError::InvalidPlot(format!(
                "plot dimensions must be positive, got {width}x{height}"
            )));
        }
        Ok(Self {
            width: width as i32,
            height: height as i32,
        })
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Whether `rect` lies fully inside the plot.
    pub fn contains(&self, rect: &Rect) -> bool {
        rect.x >= 0 && rect.y >= 0 && rect.right() <= self.width && rect.bottom() <= self.height
    }

    /// Whether a rectangle of the given size can fit inside the plot at all.
    pub fn fits(&self, width: i32, height: i32) -> bool {
        width <= self.width && height <= self.height
    }

    /// Pull `point` into the range of legal top-left corners for a
    /// `width x height` rectangle. Each axis is clamped independently.
    pub fn clamp_origin(&self, point: Point, width: i32, height: i32) -> Point {
        let max_x = (self.width - width).max(0);
        let max_y = (self.height - height).max(0);
        Point::new(point.x.clamp(0, max_x), point.y.clamp(0, max_y))
    }
}

/// Top-left corner in plot coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle assigned to a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    #[serde(rename = "w")]
    pub width: i32,
    #[serde(rename = "h")]
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn at(origin: Point, width: i32, height: i32) -> Self {
        Self::new(origin.x, origin.y, width, height)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    pub fn area(&self) -> u64 {
        self.width.max(0) as u64 * self.height.max(0) as u64
    }

    /// Interior intersection test. Rectangles that only share an edge or a
    /// corner do not overlap, so rooms may share a wall.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Self::new(
            self.x.saturating_add(dx),
            self.y.saturating_add(dy),
            self.width,
            self.height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_wall_is_not_overlap() {
        let a = Rect::new(0, 0, 12, 10);
        let b = Rect::new(12, 0, 5, 5);
        let c = Rect::new(0, 10, 5, 5);
        assert!(!a.overlaps(&b));
        assert!(!a.overlaps(&c));
        assert!(!Rect::new(12, 10, 3, 3).overlaps(&a));
    }

    #[test]
    fn interior_intersection_overlaps_both_ways() {
        let a = Rect::new(0, 0, 12, 10);
        let b = Rect::new(11, 9, 5, 5);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));

        let inner = Rect::new(2, 2, 1, 1);
        assert!(a.overlaps(&inner));
    }

    #[test]
    fn plot_rejects_non_positive_dimensions() {
        for (w, h) in [(0, 10), (10, -3), (i32::MAX as i64 + 1, 10)] {
            let err = Plot::new(w, h).unwrap_err();
            assert!(matches!(err, LayoutError::InvalidPlot(_)), "{w}x{h}");
            assert!(err.is_invalid_spec());
        }
        assert!(Plot::new(40, 30).is_ok());
    }

    #[test]
    fn plot_containment_includes_far_edges() {
        let plot = Plot::new(40, 30).unwrap();
        assert!(plot.contains(&Rect::new(28, 20, 12, 10)));
        assert!(!plot.contains(&Rect::new(29, 20, 12, 10)));
        assert!(!plot.contains(&Rect::new(-1, 0, 5, 5)));
    }

    #[test]
    fn clamp_origin_handles_each_axis() {
        let plot = Plot::new(40, 30).unwrap();
        assert_eq!(
            plot.clamp_origin(Point::new(-5, 100), 10, 10),
            Point::new(0, 20)
        );
        assert_eq!(plot.clamp_origin(Point::new(7, 3), 10, 10), Point::new(7, 3));
    }
}
