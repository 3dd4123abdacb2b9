//! Model loading for the scene walker.
//!
//! One model per session. The loader tries the primary file (`.glb`), then
//! the fallback (`.gltf`), then hands back a deterministic placeholder box.
//! It never returns an error to the caller: every failure is logged and
//! degraded, and the frame loop keeps running either way.
//!
//! Loading runs on a background thread ([`spawn_loader`]) and delivers the
//! finished [`Model`] exactly once over a channel; until then the frame
//! loop simply sees "no model yet".

mod animation;
mod decode;

pub use animation::{AnimationClip, Playhead};

use std::path::{Path, PathBuf};
use std::sync::mpsc;
use tracing::{error, info, warn};

/// Errors from decoding a single model file.
///
/// These never escape the loader chain; they exist so each fallback step
/// can log precisely what went wrong.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("glTF import error: {0}")]
    Import(#[from] gltf::Error),
    #[error("model contains no geometry")]
    NoGeometry,
}

/// Which step of the loading chain produced the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelSource {
    Primary,
    Fallback,
    Placeholder,
}

/// One mesh primitive, flattened into world space.
#[derive(Debug, Clone)]
pub struct MeshData {
    pub name: String,
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
    /// PBR base-color factor of the primitive's material.
    pub base_color: [f32; 4],
}

/// A loaded model: meshes plus its animation clip inventory.
#[derive(Debug, Clone)]
pub struct Model {
    pub name: String,
    pub source: ModelSource,
    pub meshes: Vec<MeshData>,
    pub clips: Vec<AnimationClip>,
}

impl Model {
    pub fn is_placeholder(&self) -> bool {
        self.source == ModelSource::Placeholder
    }

    pub fn vertex_count(&self) -> usize {
        self.meshes.iter().map(|m| m.positions.len()).sum()
    }

    /// The deterministic stand-in shown when no model file can be loaded:
    /// a 2x2x2 box resting on the ground at the origin.
    pub fn placeholder() -> Self {
        Self {
            name: "placeholder".into(),
            source: ModelSource::Placeholder,
            meshes: vec![placeholder_mesh()],
            clips: Vec::new(),
        }
    }
}

/// Load a model, degrading through the chain: primary, fallback,
/// placeholder. Infallible by design.
pub fn load_model(primary: &Path, fallback: &Path) -> Model {
    match decode::decode_file(primary) {
        Ok((meshes, clips)) => {
            info!("loaded model from {}", primary.display());
            return Model {
                name: file_label(primary),
                source: ModelSource::Primary,
                meshes,
                clips,
            };
        }
        Err(e) => {
            warn!(
                "could not load {}: {e}; trying {}",
                primary.display(),
                fallback.display()
            );
        }
    }
    match decode::decode_file(fallback) {
        Ok((meshes, clips)) => {
            info!("loaded model from {}", fallback.display());
            Model {
                name: file_label(fallback),
                source: ModelSource::Fallback,
                meshes,
                clips,
            }
        }
        Err(e) => {
            error!(
                "could not load {} either: {e}; using placeholder box",
                fallback.display()
            );
            Model::placeholder()
        }
    }
}

/// Run [`load_model`] on a background thread.
///
/// The returned receiver yields the model exactly once. Poll it with
/// `try_recv` from the frame loop; frames before delivery see no model
/// and must tolerate that.
pub fn spawn_loader(primary: PathBuf, fallback: PathBuf) -> mpsc::Receiver<Model> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let model = load_model(&primary, &fallback);
        // The receiver may already be gone if the window closed; that is
        // not an error worth surfacing.
        let _ = tx.send(model);
    });
    rx
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn placeholder_mesh() -> MeshData {
    let (lo, hi) = (-1.0_f32, 1.0_f32);
    #[rustfmt::skip]
    let positions = vec![
        // +Z face
        [lo, 0.0, hi], [hi, 0.0, hi], [hi, 2.0, hi], [lo, 2.0, hi],
        // -Z face
        [hi, 0.0, lo], [lo, 0.0, lo], [lo, 2.0, lo], [hi, 2.0, lo],
        // +X face
        [hi, 0.0, hi], [hi, 0.0, lo], [hi, 2.0, lo], [hi, 2.0, hi],
        // -X face
        [lo, 0.0, lo], [lo, 0.0, hi], [lo, 2.0, hi], [lo, 2.0, lo],
        // +Y face
        [lo, 2.0, hi], [hi, 2.0, hi], [hi, 2.0, lo], [lo, 2.0, lo],
        // -Y face
        [lo, 0.0, lo], [hi, 0.0, lo], [hi, 0.0, hi], [lo, 0.0, hi],
    ];
    let face_normals = [
        [0.0, 0.0, 1.0],
        [0.0, 0.0, -1.0],
        [1.0, 0.0, 0.0],
        [-1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, -1.0, 0.0],
    ];
    let normals = face_normals
        .iter()
        .flat_map(|&n| std::iter::repeat_n(n, 4))
        .collect();
    let indices = (0..6u32)
        .flat_map(|f| {
            let base = f * 4;
            [base, base + 1, base + 2, base + 2, base + 3, base]
        })
        .collect();
    MeshData {
        name: "placeholder".into(),
        positions,
        normals,
        indices,
        base_color: [1.0, 0.42, 0.42, 1.0],
    }
}
