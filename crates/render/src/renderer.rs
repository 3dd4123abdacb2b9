use crate::Projection;
use walker_common::CameraPose;

/// What the renderer may know about the scene, beyond the camera pose.
///
/// The frame loop fills this in each frame; a `None` model means loading
/// has not finished yet and the renderer must cope.
#[derive(Debug, Clone, Default)]
pub struct SceneStatus {
    /// Label of the active view mode, e.g. "View: First Person".
    pub view_label: &'static str,
    /// Summary of the loaded model; `None` while the loader is still running.
    pub model: Option<ModelSummary>,
}

/// A loaded model, reduced to what status displays need.
#[derive(Debug, Clone)]
pub struct ModelSummary {
    pub name: String,
    pub mesh_count: usize,
    pub clip_count: usize,
}

/// Renderer-agnostic interface. All backends implement this trait.
///
/// A renderer reads the scene status, the camera pose, and the projection,
/// then produces output. It never mutates walker state.
pub trait Renderer {
    /// The output type produced by this backend.
    type Output;

    fn render(
        &self,
        scene: &SceneStatus,
        pose: &CameraPose,
        projection: &Projection,
    ) -> Self::Output;
}

/// Text backend: renders the frame as a human-readable string.
///
/// Used by the CLI and by tests; needs no window and no GPU.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(
        &self,
        scene: &SceneStatus,
        pose: &CameraPose,
        projection: &Projection,
    ) -> String {
        let mut out = String::new();
        out.push_str(&format!("=== {} ===\n", scene.view_label));
        out.push_str(&format!(
            "Camera: pos=({:.2}, {:.2}, {:.2}) facing=({:.2}, {:.2}, {:.2}) fov={:.0}\n",
            pose.position.x,
            pose.position.y,
            pose.position.z,
            pose.forward().x,
            pose.forward().y,
            pose.forward().z,
            projection.fov_y.to_degrees(),
        ));
        match &scene.model {
            Some(m) => out.push_str(&format!(
                "Model: {} ({} meshes, {} clips)\n",
                m.name, m.mesh_count, m.clip_count
            )),
            None => out.push_str("Model: not loaded\n"),
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_renderer_without_model() {
        let scene = SceneStatus {
            view_label: "View: First Person",
            model: None,
        };
        let out = DebugTextRenderer::new().render(
            &scene,
            &CameraPose::default(),
            &Projection::default(),
        );
        assert!(out.contains("View: First Person"));
        assert!(out.contains("Model: not loaded"));
    }

    #[test]
    fn debug_renderer_with_model() {
        let scene = SceneStatus {
            view_label: "View: Third Person",
            model: Some(ModelSummary {
                name: "model.glb".into(),
                mesh_count: 4,
                clip_count: 1,
            }),
        };
        let out = DebugTextRenderer::new().render(
            &scene,
            &CameraPose::default(),
            &Projection::default(),
        );
        assert!(out.contains("Third Person"));
        assert!(out.contains("4 meshes"));
        assert!(out.contains("1 clips"));
    }
}
