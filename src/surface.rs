//! Drawing surfaces: the Canvas2D-shaped trait the renderer targets, plus an
//! in-memory recording implementation.
//!
//! `RecordingSurface` keeps a display list of every operation together with
//! the transform that was active when it was issued. The headless binary and
//! the test suite draw into it.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use std::convert::Infallible;
use std::fmt::Debug;

/// 2D affine transform in Canvas2D `(a, b, c, d, e, f)` order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Transform {
    pub const IDENTITY: Self = Self { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: 0.0, f: 0.0 };

    /// This transform followed by a translation in local coordinates.
    #[must_use]
    pub fn translated(self, tx: f64, ty: f64) -> Self {
        Self { e: self.a * tx + self.c * ty + self.e, f: self.b * tx + self.d * ty + self.f, ..self }
    }

    /// This transform followed by a scale in local coordinates.
    #[must_use]
    pub fn scaled(self, sx: f64, sy: f64) -> Self {
        Self { a: self.a * sx, b: self.b * sx, c: self.c * sy, d: self.d * sy, ..self }
    }

    /// Map a local point to device pixels.
    #[must_use]
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (self.a * x + self.c * y + self.e, self.b * x + self.d * y + self.f)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// The subset of the Canvas2D API the renderer uses.
///
/// Methods mirror their `CanvasRenderingContext2d` namesakes. Only calls that
/// can fail on a real canvas return `Result`.
pub trait Surface {
    type Error: Debug;

    /// Resize the backing store to `width × height` physical pixels.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the backing store cannot be resized.
    fn resize(&mut self, width: u32, height: u32) -> Result<(), Self::Error>;

    /// Current backing store size in physical pixels.
    fn physical_size(&self) -> (u32, u32);

    /// Replace the current transform.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the underlying context rejects the call.
    fn set_transform(&mut self, t: Transform) -> Result<(), Self::Error>;

    /// Post-multiply the current transform by a scale.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the underlying context rejects the call.
    fn scale(&mut self, sx: f64, sy: f64) -> Result<(), Self::Error>;

    /// Post-multiply the current transform by a translation.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the underlying context rejects the call.
    fn translate(&mut self, tx: f64, ty: f64) -> Result<(), Self::Error>;

    fn save(&mut self);
    fn restore(&mut self);
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn set_fill_style(&mut self, color: &str);
    fn set_stroke_style(&mut self, color: &str);
    fn set_line_width(&mut self, width: f64);
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn close_path(&mut self);

    /// Add a circular arc to the current path.
    ///
    /// # Errors
    ///
    /// Returns `Err` for a negative radius.
    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) -> Result<(), Self::Error>;

    fn fill(&mut self);
    fn stroke(&mut self);
    fn set_font(&mut self, font: &str);
    fn set_text_baseline(&mut self, baseline: &str);

    /// Fill a run of text at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the underlying context rejects the call.
    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), Self::Error>;
}

/// One recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    ClearRect { x: f64, y: f64, w: f64, h: f64 },
    FillRect { x: f64, y: f64, w: f64, h: f64, color: String },
    StrokeRect { x: f64, y: f64, w: f64, h: f64, color: String },
    BeginPath,
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    ClosePath,
    Arc { x: f64, y: f64, radius: f64 },
    Fill { color: String },
    Stroke { color: String, width: f64 },
    FillText { text: String, x: f64, y: f64, font: String, baseline: String },
}

/// A drawing operation and the transform active when it was issued.
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub op: DrawOp,
    pub transform: Transform,
}

#[derive(Debug, Clone)]
struct DrawState {
    transform: Transform,
    fill: String,
    stroke: String,
    line_width: f64,
    font: String,
    baseline: String,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            transform: Transform::IDENTITY,
            fill: "#000000".to_owned(),
            stroke: "#000000".to_owned(),
            line_width: 1.0,
            font: "10px sans-serif".to_owned(),
            baseline: "alphabetic".to_owned(),
        }
    }
}

/// In-memory surface that records a display list.
///
/// `clear_rect` over the full surface drops everything recorded so far, so
/// after a render the list holds exactly one frame.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    state: DrawState,
    stack: Vec<DrawState>,
    ops: Vec<Recorded>,
}

impl RecordingSurface {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, ..Self::default() }
    }

    /// Operations recorded since the last full clear.
    #[must_use]
    pub fn ops(&self) -> &[Recorded] {
        &self.ops
    }

    /// The transform currently in effect.
    #[must_use]
    pub fn transform(&self) -> Transform {
        self.state.transform
    }

    /// Depth of the save/restore stack. Zero after a balanced render.
    #[must_use]
    pub fn save_depth(&self) -> usize {
        self.stack.len()
    }

    fn record(&mut self, op: DrawOp) {
        self.ops.push(Recorded { op, transform: self.state.transform });
    }
}

impl Surface for RecordingSurface {
    type Error = Infallible;

    fn resize(&mut self, width: u32, height: u32) -> Result<(), Infallible> {
        // Resizing a canvas resets its context state.
        self.width = width;
        self.height = height;
        self.state = DrawState::default();
        self.stack.clear();
        self.ops.clear();
        Ok(())
    }

    fn physical_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn set_transform(&mut self, t: Transform) -> Result<(), Infallible> {
        self.state.transform = t;
        Ok(())
    }

    fn scale(&mut self, sx: f64, sy: f64) -> Result<(), Infallible> {
        self.state.transform = self.state.transform.scaled(sx, sy);
        Ok(())
    }

    fn translate(&mut self, tx: f64, ty: f64) -> Result<(), Infallible> {
        self.state.transform = self.state.transform.translated(tx, ty);
        Ok(())
    }

    fn save(&mut self) {
        self.stack.push(self.state.clone());
    }

    fn restore(&mut self) {
        if let Some(prev) = self.stack.pop() {
            self.state = prev;
        }
    }

    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        let covers_all = self.state.transform == Transform::IDENTITY
            && x <= 0.0
            && y <= 0.0
            && x + w >= f64::from(self.width)
            && y + h >= f64::from(self.height);
        if covers_all {
            self.ops.clear();
        }
        self.record(DrawOp::ClearRect { x, y, w, h });
    }

    fn set_fill_style(&mut self, color: &str) {
        color.clone_into(&mut self.state.fill);
    }

    fn set_stroke_style(&mut self, color: &str) {
        color.clone_into(&mut self.state.stroke);
    }

    fn set_line_width(&mut self, width: f64) {
        self.state.line_width = width;
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        let color = self.state.fill.clone();
        self.record(DrawOp::FillRect { x, y, w, h, color });
    }

    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        let color = self.state.stroke.clone();
        self.record(DrawOp::StrokeRect { x, y, w, h, color });
    }

    fn begin_path(&mut self) {
        self.record(DrawOp::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.record(DrawOp::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.record(DrawOp::LineTo { x, y });
    }

    fn close_path(&mut self) {
        self.record(DrawOp::ClosePath);
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, _start: f64, _end: f64) -> Result<(), Infallible> {
        self.record(DrawOp::Arc { x, y, radius });
        Ok(())
    }

    fn fill(&mut self) {
        let color = self.state.fill.clone();
        self.record(DrawOp::Fill { color });
    }

    fn stroke(&mut self) {
        let color = self.state.stroke.clone();
        let width = self.state.line_width;
        self.record(DrawOp::Stroke { color, width });
    }

    fn set_font(&mut self, font: &str) {
        font.clone_into(&mut self.state.font);
    }

    fn set_text_baseline(&mut self, baseline: &str) {
        baseline.clone_into(&mut self.state.baseline);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), Infallible> {
        let op = DrawOp::FillText {
            text: text.to_owned(),
            x,
            y,
            font: self.state.font.clone(),
            baseline: self.state.baseline.clone(),
        };
        self.record(op);
        Ok(())
    }
}
