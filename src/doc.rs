//! Document model: shapes, their geometric fields, and the ordered store.
//!
//! This module defines the data types that describe what is on the canvas
//! (`Shape`, `ShapeKind`) and the runtime store that owns the live list
//! (`DocStore`). List order is draw order: the first shape is drawn at the
//! back, the last on top.
//!
//! Data flows into this layer from the persistence bridge (JSON snapshot on
//! startup) and from the interaction engine (creation and drag). The renderer
//! and hit-tester read the list through `DocStore::shapes`.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{
    DEFAULT_CIRCLE_RADIUS, DEFAULT_EDGE_LENGTH, DEFAULT_FILL, DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE,
    DEFAULT_RECT_HEIGHT, DEFAULT_RECT_WIDTH,
};

/// Unique identifier for a shape.
pub type ShapeId = String;

/// Identifier of the page a shape belongs to.
pub type PageId = String;

/// A point in canvas space (logical pixels).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Generate a fresh shape id.
#[must_use]
pub fn new_shape_id() -> ShapeId {
    Uuid::new_v4().to_string()
}

/// A shape as stored in the document, the local cache, and on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    /// Unique identifier, assigned at creation and never reassigned.
    pub id: ShapeId,
    /// The page this shape belongs to.
    #[serde(rename = "pageId")]
    pub page_id: PageId,
    /// Origin x in canvas space.
    pub x: f64,
    /// Origin y in canvas space.
    pub y: f64,
    /// Variant-specific geometry, tagged by `type` on the wire.
    #[serde(flatten)]
    pub kind: ShapeKind,
}

/// Variant-specific shape data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ShapeKind {
    /// Filled box anchored at its top-left corner.
    Rectangle {
        #[serde(default = "default_rect_width")]
        width: f64,
        #[serde(default = "default_rect_height")]
        height: f64,
        #[serde(default = "default_fill")]
        color: String,
    },
    /// Filled disc centered on the shape origin.
    Circle {
        #[serde(default = "default_circle_radius")]
        radius: f64,
        #[serde(default = "default_fill")]
        color: String,
    },
    /// Segment from the origin to `(x2, y2)`.
    Line { x2: f64, y2: f64 },
    /// Segment from the origin to `(x2, y2)` with a head at the far end.
    Arrow { x2: f64, y2: f64 },
    /// Freehand stroke. Points are absolute canvas coordinates.
    Pencil { points: Vec<Point> },
    /// A single run of text with its top edge at the origin.
    Text {
        content: String,
        #[serde(rename = "fontSize", default = "default_font_size")]
        font_size: f64,
        #[serde(rename = "fontFamily", default = "default_font_family")]
        font_family: String,
    },
}

fn default_rect_width() -> f64 {
    DEFAULT_RECT_WIDTH
}

fn default_rect_height() -> f64 {
    DEFAULT_RECT_HEIGHT
}

fn default_circle_radius() -> f64 {
    DEFAULT_CIRCLE_RADIUS
}

fn default_fill() -> String {
    DEFAULT_FILL.to_owned()
}

fn default_font_size() -> f64 {
    DEFAULT_FONT_SIZE
}

fn default_font_family() -> String {
    DEFAULT_FONT_FAMILY.to_owned()
}

/// Shapes that can be created with a single quick-add action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickShape {
    Rectangle,
    Circle,
    Line,
    Arrow,
}

impl QuickShape {
    /// Default geometry for this variant with its origin at `(x, y)`.
    #[must_use]
    pub fn default_kind(self, x: f64, y: f64) -> ShapeKind {
        match self {
            Self::Rectangle => ShapeKind::Rectangle {
                width: DEFAULT_RECT_WIDTH,
                height: DEFAULT_RECT_HEIGHT,
                color: default_fill(),
            },
            Self::Circle => ShapeKind::Circle { radius: DEFAULT_CIRCLE_RADIUS, color: default_fill() },
            Self::Line => ShapeKind::Line { x2: x + DEFAULT_EDGE_LENGTH, y2: y },
            Self::Arrow => ShapeKind::Arrow { x2: x + DEFAULT_EDGE_LENGTH, y2: y },
        }
    }
}

impl FromStr for QuickShape {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rectangle" | "rect" => Ok(Self::Rectangle),
            "circle" => Ok(Self::Circle),
            "line" => Ok(Self::Line),
            "arrow" => Ok(Self::Arrow),
            other => Err(UnknownVariant(other.to_owned())),
        }
    }
}

/// A name that does not match any known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown variant: {0}")]
pub struct UnknownVariant(pub String);

impl Shape {
    /// Build a quick-add shape with an explicit id.
    #[must_use]
    pub fn with_defaults(id: ShapeId, page_id: &str, variant: QuickShape, at: Point) -> Self {
        Self { id, page_id: page_id.to_owned(), x: at.x, y: at.y, kind: variant.default_kind(at.x, at.y) }
    }

    /// Build a quick-add shape with a freshly generated id.
    #[must_use]
    pub fn quick(variant: QuickShape, page_id: &str, at: Point) -> Self {
        Self::with_defaults(new_shape_id(), page_id, variant, at)
    }

    /// Build a text shape at `at` using the default font.
    #[must_use]
    pub fn text(page_id: &str, at: Point, content: String) -> Self {
        Self {
            id: new_shape_id(),
            page_id: page_id.to_owned(),
            x: at.x,
            y: at.y,
            kind: ShapeKind::Text { content, font_size: DEFAULT_FONT_SIZE, font_family: default_font_family() },
        }
    }

    /// Wire name of this shape's variant.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self.kind {
            ShapeKind::Rectangle { .. } => "rectangle",
            ShapeKind::Circle { .. } => "circle",
            ShapeKind::Line { .. } => "line",
            ShapeKind::Arrow { .. } => "arrow",
            ShapeKind::Pencil { .. } => "pencil",
            ShapeKind::Text { .. } => "text",
        }
    }

    /// Width and height of the selection box.
    ///
    /// Explicit dimensions win, then the circle's diameter, then the
    /// rectangle default. Text is not measured.
    #[must_use]
    pub fn nominal_size(&self) -> (f64, f64) {
        match self.kind {
            ShapeKind::Rectangle { width, height, .. } => (width, height),
            ShapeKind::Circle { radius, .. } => (radius * 2.0, radius * 2.0),
            _ => (DEFAULT_RECT_WIDTH, DEFAULT_RECT_HEIGHT),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} at ({}, {})", self.type_name(), self.id, self.x, self.y)
    }
}

/// Ordered in-memory store of shapes.
#[derive(Debug, Default)]
pub struct DocStore {
    shapes: Vec<Shape>,
}

impl DocStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a shape on top of the stack.
    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Return a reference to a shape by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id)
    }

    /// Move a shape's origin. Line endpoints and stroke points are left as is.
    ///
    /// Returns the updated shape, or `None` if no shape has that id.
    pub fn reposition(&mut self, id: &str, x: f64, y: f64) -> Option<&Shape> {
        let shape = self.shapes.iter_mut().find(|s| s.id == id)?;
        shape.x = x;
        shape.y = y;
        Some(&*shape)
    }

    /// Replace all shapes with a full snapshot.
    pub fn load_snapshot(&mut self, shapes: Vec<Shape>) {
        self.shapes = shapes;
    }

    /// All shapes in draw order (back to front).
    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Number of shapes currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Returns `true` if the store contains no shapes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
