//! Rendering seam for the scene walker.
//!
//! # Invariants
//! - A renderer consumes a camera pose and a scene status; it never mutates
//!   walker state.
//! - The simulation has no dependency on any backend; the wgpu backend and
//!   the debug text backend are interchangeable behind [`Renderer`].

mod renderer;
mod view;

pub use renderer::{DebugTextRenderer, ModelSummary, Renderer, SceneStatus};
pub use view::Projection;
