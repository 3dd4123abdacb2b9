//! wgpu render backend for the scene walker.
//!
//! Renders a ground plane and the loaded model (or its placeholder) under
//! a sky-colored clear, lit by ambient plus one directional light.
//!
//! # Invariants
//! - The renderer never mutates walker state; it consumes a camera pose.
//! - The model may be absent on any given frame; rendering proceeds with
//!   just the ground until the loader delivers.

mod gpu;
mod shaders;

pub use gpu::WgpuRenderer;
