//! Hit-testing: which shape, if any, lies under a canvas-space point.
//!
//! Lines, arrows, and pencil strokes are tested against their axis-aligned
//! bounding boxes rather than the stroked path. Callers must not assume
//! sub-pixel accuracy near line ends.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::consts::EDGE_HIT_TOLERANCE_PX;
use crate::doc::{Point, Shape, ShapeKind};

/// Axis-aligned bounding box in canvas space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Smallest box containing both corners, in any order.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self { min_x: a.x.min(b.x), min_y: a.y.min(b.y), max_x: a.x.max(b.x), max_y: a.y.max(b.y) }
    }

    /// Smallest box containing every point, or `None` for an empty slice.
    #[must_use]
    pub fn enclosing(points: &[Point]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        Some(rest.iter().fold(Self::from_corners(*first, *first), |b, p| Self {
            min_x: b.min_x.min(p.x),
            min_y: b.min_y.min(p.y),
            max_x: b.max_x.max(p.x),
            max_y: b.max_y.max(p.y),
        }))
    }

    /// Grow the box by `margin` on every side.
    #[must_use]
    pub fn inflate(self, margin: f64) -> Self {
        Self {
            min_x: self.min_x - margin,
            min_y: self.min_y - margin,
            max_x: self.max_x + margin,
            max_y: self.max_y + margin,
        }
    }

    /// Edge-inclusive containment.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.min_x && pt.x <= self.max_x && pt.y >= self.min_y && pt.y <= self.max_y
    }
}

/// Whether `pt` falls inside `shape` under its variant's containment rule.
#[must_use]
pub fn contains(shape: &Shape, pt: Point) -> bool {
    let origin = Point::new(shape.x, shape.y);
    match &shape.kind {
        ShapeKind::Circle { radius, .. } => (pt.x - shape.x).hypot(pt.y - shape.y) <= *radius,
        ShapeKind::Line { x2, y2 } | ShapeKind::Arrow { x2, y2 } => Bounds::from_corners(origin, Point::new(*x2, *y2))
            .inflate(EDGE_HIT_TOLERANCE_PX)
            .contains(pt),
        ShapeKind::Pencil { points } => Bounds::enclosing(points).is_some_and(|b| b.contains(pt)),
        ShapeKind::Rectangle { .. } | ShapeKind::Text { .. } => {
            let (w, h) = shape.nominal_size();
            pt.x >= shape.x && pt.x <= shape.x + w && pt.y >= shape.y && pt.y <= shape.y + h
        }
    }
}

/// Return the topmost shape under `pt`.
///
/// Shapes later in the list are drawn on top, so the list is walked back to
/// front and the first match wins.
#[must_use]
pub fn hit_test(pt: Point, shapes: &[Shape]) -> Option<&Shape> {
    shapes.iter().rev().find(|s| contains(s, pt))
}
