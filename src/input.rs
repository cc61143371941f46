//! Input model: tools, the pencil draft, and the gesture state machine.
//!
//! `Tool` captures the user's intent at the time of a pointer event.
//! `InputState` is the active gesture tracked between pointer-down and
//! pointer-up; it folds the "is drawing", draft, and drag-session flags into
//! one enum so that a draft and a drag can never be active together.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::fmt;
use std::str::FromStr;

use crate::doc::{Point, Shape, ShapeId, ShapeKind, UnknownVariant, new_shape_id};

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Pick and drag shapes (default).
    #[default]
    Select,
    /// Freehand strokes.
    Pencil,
    /// Place a text shape at the pointer.
    Text,
}

impl FromStr for Tool {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "select" => Ok(Self::Select),
            "pencil" => Ok(Self::Pencil),
            "text" => Ok(Self::Text),
            other => Err(UnknownVariant(other.to_owned())),
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Select => "select",
            Self::Pencil => "pencil",
            Self::Text => "text",
        })
    }
}

/// Persistent UI state visible to the renderer and the shape panel.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Currently active tool.
    pub tool: Tool,
    /// The id of the selected shape, if any.
    pub selected_id: Option<ShapeId>,
}

/// A pencil stroke being drawn. Not part of the document until finalized.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    shape: Shape,
}

impl Draft {
    /// Start a stroke at `start` with a single point.
    #[must_use]
    pub fn begin(page_id: &str, start: Point) -> Self {
        Self {
            shape: Shape {
                id: new_shape_id(),
                page_id: page_id.to_owned(),
                x: start.x,
                y: start.y,
                kind: ShapeKind::Pencil { points: vec![start] },
            },
        }
    }

    /// Append a point to the stroke.
    pub fn extend(&mut self, pt: Point) {
        if let ShapeKind::Pencil { points } = &mut self.shape.kind {
            points.push(pt);
        }
    }

    /// Number of points captured so far.
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.shape.kind {
            ShapeKind::Pencil { points } => points.len(),
            _ => 0,
        }
    }

    /// Always `false`: a draft starts with one point and only grows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The stroke as a shape, for previewing.
    #[must_use]
    pub fn as_shape(&self) -> &Shape {
        &self.shape
    }

    /// Finalize into a committed shape.
    #[must_use]
    pub fn finish(self) -> Shape {
        self.shape
    }
}

/// Which shape is being dragged and where it was grabbed.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    /// Id of the shape being dragged.
    pub shape_id: ShapeId,
    /// Pointer x minus shape x at pointer-down.
    pub offset_x: f64,
    /// Pointer y minus shape y at pointer-down.
    pub offset_y: f64,
}

impl DragSession {
    /// Shape origin that keeps the grab point under `pointer`.
    #[must_use]
    pub fn origin_for(&self, pointer: Point) -> Point {
        Point::new(pointer.x - self.offset_x, pointer.y - self.offset_y)
    }
}

/// Internal state for the input state machine.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is drawing a pencil stroke.
    Drawing(Draft),
    /// The user is moving an existing shape.
    Dragging(DragSession),
}

impl InputState {
    /// Whether a pencil draft is active.
    #[must_use]
    pub fn is_drawing(&self) -> bool {
        matches!(self, Self::Drawing(_))
    }

    /// The active draft, if any.
    #[must_use]
    pub fn draft(&self) -> Option<&Draft> {
        match self {
            Self::Drawing(draft) => Some(draft),
            _ => None,
        }
    }

    /// The active drag session, if any.
    #[must_use]
    pub fn drag_session(&self) -> Option<&DragSession> {
        match self {
            Self::Dragging(session) => Some(session),
            _ => None,
        }
    }
}
