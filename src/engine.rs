//! Interaction engine: turns pointer events and tool actions into document
//! mutations.
//!
//! `EngineCore` holds no surface and does no I/O, so it can be driven
//! directly in tests. Every handler returns the [`Action`]s the host must act
//! on: persist a committed shape, re-render, or ask the user for text.
//!
//! All document writes go through `EngineCore::commit`, which applies the
//! mutation once and produces the matching persistence action. Draft points
//! never pass through it; only the finished stroke does.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::consts::QUICK_ADD_MARGIN_PX;
use crate::doc::{DocStore, PageId, Point, QuickShape, Shape, ShapeId};
use crate::hit;
use crate::input::{DragSession, Draft, InputState, Tool, UiState};
use crate::render::Scene;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A new shape was appended to the document.
    ShapeCreated(Shape),
    /// An existing shape changed; carries the full updated shape.
    ShapeUpdated(Shape),
    /// The text tool was used at `at`; the host should ask for content and
    /// answer with [`EngineCore::provide_text`].
    TextInputRequested { at: Point },
    /// Something visible changed.
    RenderNeeded,
}

/// A committed document change.
#[derive(Debug, Clone)]
enum Mutation {
    Append(Shape),
    Move { id: ShapeId, to: Point },
}

/// Core engine state: everything that doesn't depend on a drawing surface.
pub struct EngineCore {
    pub doc: DocStore,
    pub ui: UiState,
    pub input: InputState,
    pub page_id: PageId,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub dpr: f64,
    rng: StdRng,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::new("default")
    }
}

impl EngineCore {
    /// Create an engine for `page_id` with an OS-seeded position generator.
    #[must_use]
    pub fn new(page_id: &str) -> Self {
        Self::with_rng(page_id, StdRng::from_os_rng())
    }

    /// Create an engine with a fixed seed for reproducible quick-add placement.
    #[must_use]
    pub fn seeded(page_id: &str, seed: u64) -> Self {
        Self::with_rng(page_id, StdRng::seed_from_u64(seed))
    }

    fn with_rng(page_id: &str, rng: StdRng) -> Self {
        Self {
            doc: DocStore::new(),
            ui: UiState::default(),
            input: InputState::default(),
            page_id: page_id.to_owned(),
            viewport_width: 0.0,
            viewport_height: 0.0,
            dpr: 1.0,
            rng,
        }
    }

    // --- Data inputs ---

    /// Hydrate the document from a startup snapshot.
    pub fn load_snapshot(&mut self, shapes: Vec<Shape>) -> Vec<Action> {
        self.doc.load_snapshot(shapes);
        vec![Action::RenderNeeded]
    }

    /// Update viewport dimensions (logical pixels) and device pixel ratio.
    pub fn set_viewport(&mut self, width: f64, height: f64, dpr: f64) {
        self.viewport_width = width;
        self.viewport_height = height;
        self.dpr = dpr;
    }

    // --- Tool / shell actions ---

    /// Set the active tool. Gestures already in progress run to completion.
    pub fn set_tool(&mut self, tool: Tool) {
        self.ui.tool = tool;
    }

    /// Append a default shape at a random on-canvas position.
    ///
    /// Works with any tool and leaves selection untouched.
    pub fn add_shape(&mut self, variant: QuickShape) -> Vec<Action> {
        let at = self.random_position();
        let shape = Shape::quick(variant, &self.page_id, at);
        self.commit_and_render(Mutation::Append(shape))
    }

    /// Answer a [`Action::TextInputRequested`]. Empty content is a no-op.
    pub fn provide_text(&mut self, at: Point, content: &str) -> Vec<Action> {
        if content.is_empty() {
            return Vec::new();
        }
        let shape = Shape::text(&self.page_id, at, content.to_owned());
        self.commit_and_render(Mutation::Append(shape))
    }

    // --- Pointer events ---

    /// Pointer pressed. A gesture still in progress is finished first, as
    /// if the pointer had been released.
    pub fn on_pointer_down(&mut self, pt: Point) -> Vec<Action> {
        let mut actions = self.end_gesture();
        actions.extend(match self.ui.tool {
            Tool::Pencil => {
                self.input = InputState::Drawing(Draft::begin(&self.page_id, pt));
                vec![Action::RenderNeeded]
            }
            Tool::Text => vec![Action::TextInputRequested { at: pt }],
            Tool::Select => self.select_at(pt),
        });
        actions
    }

    /// Pointer moved: extend the stroke or drag the grabbed shape.
    pub fn on_pointer_move(&mut self, pt: Point) -> Vec<Action> {
        match &mut self.input {
            InputState::Drawing(draft) => {
                draft.extend(pt);
                vec![Action::RenderNeeded]
            }
            InputState::Dragging(session) => {
                let id = session.shape_id.clone();
                let to = session.origin_for(pt);
                self.commit_and_render(Mutation::Move { id, to })
            }
            InputState::Idle => Vec::new(),
        }
    }

    /// Pointer released: commit the stroke or end the drag.
    pub fn on_pointer_up(&mut self, _pt: Point) -> Vec<Action> {
        self.end_gesture()
    }

    /// The pointer left the surface or was captured elsewhere. Ends the
    /// gesture exactly as a release would.
    pub fn on_pointer_cancel(&mut self, pt: Point) -> Vec<Action> {
        self.on_pointer_up(pt)
    }

    // --- Queries ---

    /// All committed shapes in draw order.
    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        self.doc.shapes()
    }

    /// The currently selected shape id, if any.
    #[must_use]
    pub fn selection(&self) -> Option<&str> {
        self.ui.selected_id.as_deref()
    }

    /// The active tool.
    #[must_use]
    pub fn tool(&self) -> Tool {
        self.ui.tool
    }

    /// Look up a shape by id.
    #[must_use]
    pub fn shape(&self, id: &str) -> Option<&Shape> {
        self.doc.get(id)
    }

    /// Everything the renderer needs for the next frame.
    #[must_use]
    pub fn scene(&self) -> Scene<'_> {
        Scene {
            shapes: self.doc.shapes(),
            draft: self.input.draft().map(Draft::as_shape),
            selected_id: self.selection(),
            dpr: self.dpr,
        }
    }

    // --- Internals ---

    /// Finish the active gesture: commit a draft, drop a drag session.
    fn end_gesture(&mut self) -> Vec<Action> {
        match std::mem::take(&mut self.input) {
            InputState::Drawing(draft) => {
                debug!(points = draft.len(), "pencil stroke finished");
                self.commit_and_render(Mutation::Append(draft.finish()))
            }
            InputState::Dragging(session) => {
                debug!(id = %session.shape_id, "drag finished");
                Vec::new()
            }
            InputState::Idle => Vec::new(),
        }
    }

    fn select_at(&mut self, pt: Point) -> Vec<Action> {
        let Some(shape) = hit::hit_test(pt, self.doc.shapes()) else {
            self.ui.selected_id = None;
            return vec![Action::RenderNeeded];
        };
        let session = DragSession { shape_id: shape.id.clone(), offset_x: pt.x - shape.x, offset_y: pt.y - shape.y };
        self.ui.selected_id = Some(shape.id.clone());
        self.input = InputState::Dragging(session);
        vec![Action::RenderNeeded]
    }

    /// Apply a mutation to the document and describe it for persistence.
    fn commit(&mut self, mutation: Mutation) -> Option<Action> {
        match mutation {
            Mutation::Append(shape) => {
                self.doc.push(shape.clone());
                Some(Action::ShapeCreated(shape))
            }
            Mutation::Move { id, to } => {
                let moved = self.doc.reposition(&id, to.x, to.y)?;
                Some(Action::ShapeUpdated(moved.clone()))
            }
        }
    }

    fn commit_and_render(&mut self, mutation: Mutation) -> Vec<Action> {
        match self.commit(mutation) {
            Some(action) => vec![action, Action::RenderNeeded],
            None => Vec::new(),
        }
    }

    fn random_position(&mut self) -> Point {
        let x_max = (self.viewport_width - QUICK_ADD_MARGIN_PX * 2.0).max(QUICK_ADD_MARGIN_PX + 1.0);
        let y_max = (self.viewport_height - QUICK_ADD_MARGIN_PX * 2.0).max(QUICK_ADD_MARGIN_PX + 1.0);
        Point::new(
            self.rng.random_range(QUICK_ADD_MARGIN_PX..x_max),
            self.rng.random_range(QUICK_ADD_MARGIN_PX..y_max),
        )
    }
}
