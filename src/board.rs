//! Whiteboard session: the engine wired to a surface and a persistence bridge.
//!
//! `Whiteboard` is the single place where engine [`Action`]s are acted on.
//! Each public call runs one event to completion on the caller's thread:
//! mutate through the engine, mirror committed shapes, redraw once. Remote
//! writes are the only thing that outlives the call, and they never touch
//! local state.

#[cfg(test)]
#[path = "board_test.rs"]
mod board_test;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::doc::{Point, QuickShape, Shape};
use crate::engine::{Action, EngineCore};
use crate::input::Tool;
use crate::persistence::cache::LocalCache;
use crate::persistence::{LoadSource, PersistenceBridge, RemoteWrite};
use crate::render;
use crate::surface::Surface;

/// One open page: the engine, the surface it draws on, and its persistence.
pub struct Whiteboard<S, C> {
    core: EngineCore,
    surface: S,
    bridge: PersistenceBridge<C>,
    canvas_height: f64,
    pending: Vec<JoinHandle<()>>,
}

impl<S: Surface, C: LocalCache> Whiteboard<S, C> {
    /// Load the configured page, size the surface, and draw the first frame.
    pub async fn open(config: &Config, surface: S, bridge: PersistenceBridge<C>) -> (Self, LoadSource) {
        Self::open_with(EngineCore::new(&config.page_id), config, surface, bridge).await
    }

    /// Like [`Whiteboard::open`] with a caller-supplied engine.
    pub async fn open_with(
        mut core: EngineCore,
        config: &Config,
        surface: S,
        bridge: PersistenceBridge<C>,
    ) -> (Self, LoadSource) {
        core.set_viewport(config.canvas_width, config.canvas_height, config.device_pixel_ratio);
        let (shapes, source) = bridge.load(&core.page_id).await;
        info!(page_id = %core.page_id, count = shapes.len(), ?source, "whiteboard opened");
        core.load_snapshot(shapes);

        let mut board = Self { core, surface, bridge, canvas_height: config.canvas_height, pending: Vec::new() };
        board.resize(config.canvas_width);
        (board, source)
    }

    // --- Shell operations ---

    /// Switch the active tool.
    pub fn set_tool(&mut self, tool: Tool) {
        debug!(%tool, "tool changed");
        self.core.set_tool(tool);
    }

    /// Append a default shape at a random position.
    pub fn add_shape(&mut self, variant: QuickShape) -> Vec<Action> {
        let actions = self.core.add_shape(variant);
        self.dispatch(actions)
    }

    /// Answer a text request. Empty content is a no-op.
    pub fn provide_text(&mut self, at: Point, content: &str) -> Vec<Action> {
        let actions = self.core.provide_text(at, content);
        self.dispatch(actions)
    }

    /// Resize to a new logical width. The height stays fixed. Redraws
    /// before returning so nobody observes a blank surface.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn resize(&mut self, logical_width: f64) {
        let dpr = self.core.dpr;
        self.core.set_viewport(logical_width, self.canvas_height, dpr);
        let width = (logical_width * dpr).round() as u32;
        let height = (self.canvas_height * dpr).round() as u32;
        if let Err(e) = self.surface.resize(width, height) {
            warn!(error = ?e, width, height, "surface resize failed");
        }
        self.redraw();
    }

    // --- Pointer events ---

    /// Pointer pressed at `pt` in logical coordinates.
    pub fn pointer_down(&mut self, pt: Point) -> Vec<Action> {
        let actions = self.core.on_pointer_down(pt);
        self.dispatch(actions)
    }

    /// Pointer moved to `pt`.
    pub fn pointer_move(&mut self, pt: Point) -> Vec<Action> {
        let actions = self.core.on_pointer_move(pt);
        self.dispatch(actions)
    }

    /// Pointer released at `pt`.
    pub fn pointer_up(&mut self, pt: Point) -> Vec<Action> {
        let actions = self.core.on_pointer_up(pt);
        self.dispatch(actions)
    }

    /// Pointer lost; ends the gesture like a release.
    pub fn pointer_cancel(&mut self, pt: Point) -> Vec<Action> {
        let actions = self.core.on_pointer_cancel(pt);
        self.dispatch(actions)
    }

    // --- Queries ---

    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        self.core.shapes()
    }

    #[must_use]
    pub fn selected_id(&self) -> Option<&str> {
        self.core.selection()
    }

    #[must_use]
    pub fn tool(&self) -> Tool {
        self.core.tool()
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[must_use]
    pub fn engine(&self) -> &EngineCore {
        &self.core
    }

    /// Wait for every remote write fired so far. Local state is unaffected.
    pub async fn settle(&mut self) {
        for handle in self.pending.drain(..) {
            if let Err(e) = handle.await {
                warn!(error = %e, "remote write task failed");
            }
        }
    }

    // --- Internals ---

    /// Act on engine output. Returns the actions the shell must handle.
    fn dispatch(&mut self, actions: Vec<Action>) -> Vec<Action> {
        let mut render_needed = false;
        let mut unhandled = Vec::new();
        for action in actions {
            match action {
                Action::ShapeCreated(shape) => self.mirror(RemoteWrite::Create(shape)),
                Action::ShapeUpdated(shape) => self.mirror(RemoteWrite::Update(shape)),
                Action::RenderNeeded => render_needed = true,
                Action::TextInputRequested { .. } => unhandled.push(action),
            }
        }
        if render_needed {
            self.redraw();
        }
        unhandled
    }

    fn mirror(&mut self, write: RemoteWrite) {
        self.pending.retain(|h| !h.is_finished());
        let handle = self.bridge.mirror(self.core.shapes(), write);
        self.pending.push(handle);
    }

    fn redraw(&mut self) {
        if let Err(e) = render::draw(&mut self.surface, &self.core.scene()) {
            warn!(error = ?e, "render failed");
        }
    }
}
