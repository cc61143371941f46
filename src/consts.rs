//! Shared numeric and style constants for the sketchboard crate.

use std::f64::consts::PI;

// ── Shape defaults ──────────────────────────────────────────────

/// Width of a freshly added rectangle in canvas pixels.
pub const DEFAULT_RECT_WIDTH: f64 = 60.0;

/// Height of a freshly added rectangle in canvas pixels.
pub const DEFAULT_RECT_HEIGHT: f64 = 40.0;

/// Radius of a freshly added circle in canvas pixels.
pub const DEFAULT_CIRCLE_RADIUS: f64 = 30.0;

/// Horizontal length of a freshly added line or arrow.
pub const DEFAULT_EDGE_LENGTH: f64 = 80.0;

/// Translucent black fill used when a shape carries no color of its own.
pub const DEFAULT_FILL: &str = "rgba(0, 0, 0, 0.1)";

/// Font size for text shapes, in canvas pixels.
pub const DEFAULT_FONT_SIZE: f64 = 16.0;

/// Font family for text shapes.
pub const DEFAULT_FONT_FAMILY: &str = "sans-serif";

// ── Hit-testing ─────────────────────────────────────────────────

/// Slop around a line/arrow bounding box, in canvas pixels.
pub const EDGE_HIT_TOLERANCE_PX: f64 = 6.0;

// ── Rendering ───────────────────────────────────────────────────

/// Outline color for every shape.
pub const STROKE_COLOR: &str = "#1F1A17";

/// Outline width for every shape.
pub const STROKE_WIDTH: f64 = 2.0;

/// Accent color of the selection rectangle.
pub const SELECTION_COLOR: &str = "#1E90FF";

/// Gap between a selected shape's bounds and its selection rectangle.
pub const SELECTION_PADDING_PX: f64 = 6.0;

/// Length of each arrowhead back edge.
pub const ARROW_SIZE: f64 = 10.0;

/// Arrowhead half-angle in radians (30°).
pub const ARROW_ANGLE: f64 = PI / 6.0;

// ── Interaction ─────────────────────────────────────────────────

/// Distance kept between a quick-added shape's origin and the viewport edge.
pub const QUICK_ADD_MARGIN_PX: f64 = 50.0;
