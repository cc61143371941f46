//! Single-page drawing board: an in-memory shape document edited through
//! pointer gestures, drawn onto a 2D surface, and mirrored to a local cache
//! and a remote shape store.
//!
//! The engine is synchronous and surface-agnostic. It turns pointer events
//! into document mutations and reports what happened as
//! [`engine::Action`]s. The [`board::Whiteboard`] session acts on those
//! actions: it redraws through a [`surface::Surface`] and hands committed
//! shapes to the [`persistence`] bridge. The headless binary drives it from
//! stdin.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`board`] | Session wiring engine, surface, and persistence |
//! | [`engine`] | Testable [`engine::EngineCore`] and the commit path |
//! | [`doc`] | Shape types and the ordered document store |
//! | [`input`] | Tools, UI state, and the gesture state machine |
//! | [`hit`] | Hit-testing against shapes |
//! | [`render`] | Scene rendering onto any [`surface::Surface`] |
//! | [`surface`] | Drawing surface trait and the recording surface |
//! | [`persistence`] | Startup load and commit mirroring |
//! | [`config`] | Command-line and environment configuration |
//! | [`command`] | Line commands for the headless driver |
//! | [`consts`] | Shared numeric constants (defaults, tolerances, colors) |

pub mod board;
pub mod command;
pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod hit;
pub mod input;
pub mod persistence;
pub mod render;
pub mod surface;

#[cfg(test)]
mod test_support;
