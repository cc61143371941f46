//! Rendering: draws the full shape list to a [`Surface`].
//!
//! The renderer receives read-only views of the document and selection and
//! produces pixels. It does not mutate any application state.
//!
//! Frame layout:
//! 1. reset the transform and clear the whole physical surface,
//! 2. scale by the device pixel ratio so shapes are drawn in logical pixels,
//! 3. draw shapes back to front, each under its own translate to `(x, y)`,
//! 4. draw the in-progress pencil draft on top, if any.
//!
//! The selection rectangle is drawn right after its shape under the identity
//! transform, so it ignores both the per-shape translate and the pixel ratio.
//!
//! All fallible surface calls propagate errors via `Result<(), S::Error>`.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::f64::consts::PI;

use crate::consts::{
    ARROW_ANGLE, ARROW_SIZE, SELECTION_COLOR, SELECTION_PADDING_PX, STROKE_COLOR, STROKE_WIDTH,
};
use crate::doc::{Point, Shape, ShapeKind};
use crate::surface::{Surface, Transform};

/// Read-only view of everything a frame depends on.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    /// Committed shapes in draw order.
    pub shapes: &'a [Shape],
    /// Pencil stroke still being drawn.
    pub draft: Option<&'a Shape>,
    /// Selected shape id. May name a shape that no longer exists.
    pub selected_id: Option<&'a str>,
    /// Device pixel ratio.
    pub dpr: f64,
}

/// Draw a full frame.
///
/// # Errors
///
/// Returns `Err` if any surface call fails.
pub fn draw<S: Surface>(surface: &mut S, scene: &Scene<'_>) -> Result<(), S::Error> {
    let (phys_w, phys_h) = surface.physical_size();

    // Layer 1: clear in device pixels, then switch to logical pixels.
    surface.set_transform(Transform::IDENTITY)?;
    surface.clear_rect(0.0, 0.0, f64::from(phys_w), f64::from(phys_h));
    surface.scale(scene.dpr, scene.dpr)?;

    // Layer 2: shapes in list order (bottom first).
    for shape in scene.shapes {
        draw_shape(surface, shape)?;
        if scene.selected_id == Some(shape.id.as_str()) {
            draw_selection(surface, shape)?;
        }
    }

    // Layer 3: uncommitted stroke.
    if let Some(draft) = scene.draft {
        draw_shape(surface, draft)?;
    }

    Ok(())
}

// =============================================================
// Shape dispatch
// =============================================================

fn draw_shape<S: Surface>(surface: &mut S, shape: &Shape) -> Result<(), S::Error> {
    surface.save();
    surface.translate(shape.x, shape.y)?;
    surface.set_stroke_style(STROKE_COLOR);
    surface.set_line_width(STROKE_WIDTH);

    let result = match &shape.kind {
        ShapeKind::Rectangle { width, height, color } => {
            draw_rect(surface, *width, *height, color);
            Ok(())
        }
        ShapeKind::Circle { radius, color } => draw_circle(surface, *radius, color),
        ShapeKind::Line { x2, y2 } => {
            draw_segment(surface, x2 - shape.x, y2 - shape.y);
            Ok(())
        }
        ShapeKind::Arrow { x2, y2 } => {
            let (dx, dy) = (x2 - shape.x, y2 - shape.y);
            draw_segment(surface, dx, dy);
            draw_arrowhead(surface, dx, dy, dy.atan2(dx));
            Ok(())
        }
        ShapeKind::Pencil { points } => {
            draw_polyline(surface, Point::new(shape.x, shape.y), points);
            Ok(())
        }
        ShapeKind::Text { content, font_size, font_family } => draw_text(surface, content, *font_size, font_family),
    };

    surface.restore();
    result
}

// =============================================================
// Shape renderers
// =============================================================

fn draw_rect<S: Surface>(surface: &mut S, width: f64, height: f64, color: &str) {
    surface.set_fill_style(color);
    surface.fill_rect(0.0, 0.0, width, height);
    surface.stroke_rect(0.0, 0.0, width, height);
}

fn draw_circle<S: Surface>(surface: &mut S, radius: f64, color: &str) -> Result<(), S::Error> {
    surface.begin_path();
    surface.arc(0.0, 0.0, radius, 0.0, 2.0 * PI)?;
    surface.set_fill_style(color);
    surface.fill();
    surface.stroke();
    Ok(())
}

fn draw_segment<S: Surface>(surface: &mut S, dx: f64, dy: f64) {
    surface.begin_path();
    surface.move_to(0.0, 0.0);
    surface.line_to(dx, dy);
    surface.stroke();
}

/// Filled triangle at the tip; back edges sit at ±30° from the shaft.
fn draw_arrowhead<S: Surface>(surface: &mut S, tip_x: f64, tip_y: f64, angle: f64) {
    let x1 = tip_x - ARROW_SIZE * (angle - ARROW_ANGLE).cos();
    let y1 = tip_y - ARROW_SIZE * (angle - ARROW_ANGLE).sin();
    let x2 = tip_x - ARROW_SIZE * (angle + ARROW_ANGLE).cos();
    let y2 = tip_y - ARROW_SIZE * (angle + ARROW_ANGLE).sin();

    surface.begin_path();
    surface.move_to(tip_x, tip_y);
    surface.line_to(x1, y1);
    surface.line_to(x2, y2);
    surface.close_path();
    surface.set_fill_style(STROKE_COLOR);
    surface.fill();
}

fn draw_polyline<S: Surface>(surface: &mut S, origin: Point, points: &[Point]) {
    let Some((first, rest)) = points.split_first() else {
        return;
    };
    surface.begin_path();
    surface.move_to(first.x - origin.x, first.y - origin.y);
    for p in rest {
        surface.line_to(p.x - origin.x, p.y - origin.y);
    }
    surface.stroke();
}

fn draw_text<S: Surface>(surface: &mut S, content: &str, font_size: f64, font_family: &str) -> Result<(), S::Error> {
    surface.set_fill_style(STROKE_COLOR);
    surface.set_font(&format!("{font_size}px {font_family}"));
    surface.set_text_baseline("top");
    surface.fill_text(content, 0.0, 0.0)
}

// =============================================================
// Selection UI
// =============================================================

fn draw_selection<S: Surface>(surface: &mut S, shape: &Shape) -> Result<(), S::Error> {
    let (w, h) = shape.nominal_size();
    surface.save();
    surface.set_transform(Transform::IDENTITY)?;
    surface.set_stroke_style(SELECTION_COLOR);
    surface.set_line_width(1.0);
    surface.stroke_rect(
        shape.x - SELECTION_PADDING_PX,
        shape.y - SELECTION_PADDING_PX,
        w + SELECTION_PADDING_PX * 2.0,
        h + SELECTION_PADDING_PX * 2.0,
    );
    surface.restore();
    Ok(())
}
