use crate::{AnimationClip, MeshData, ModelError};
use glam::Mat4;
use std::path::Path;
use tracing::{debug, warn};

/// Decode one glTF file (`.glb` or `.gltf`) into flattened mesh data and
/// an animation clip inventory.
pub fn decode_file(path: &Path) -> Result<(Vec<MeshData>, Vec<AnimationClip>), ModelError> {
    let (document, buffers, _images) = gltf::import(path)?;

    let mut meshes = Vec::new();
    for scene in document.scenes() {
        for node in scene.nodes() {
            collect_node(&node, &buffers, Mat4::IDENTITY, &mut meshes);
        }
    }
    if meshes.is_empty() {
        return Err(ModelError::NoGeometry);
    }

    let clips = document
        .animations()
        .map(|a| AnimationClip {
            name: a.name().unwrap_or("unnamed").to_string(),
            duration: clip_duration(&a, &buffers),
        })
        .collect();

    debug!(
        "decoded {}: {} meshes, {} animations",
        path.display(),
        meshes.len(),
        document.animations().count()
    );
    Ok((meshes, clips))
}

/// Walk the node hierarchy, accumulating transforms so vertices land in
/// world space.
fn collect_node(
    node: &gltf::Node,
    buffers: &[gltf::buffer::Data],
    parent: Mat4,
    out: &mut Vec<MeshData>,
) {
    let transform = parent * Mat4::from_cols_array_2d(&node.transform().matrix());

    if let Some(mesh) = node.mesh() {
        for primitive in mesh.primitives() {
            match read_primitive(&mesh, &primitive, buffers, transform) {
                Some(data) => out.push(data),
                None => warn!(
                    "skipping primitive of mesh {:?}: no positions",
                    mesh.name()
                ),
            }
        }
    }
    for child in node.children() {
        collect_node(&child, buffers, transform, out);
    }
}

fn read_primitive(
    mesh: &gltf::Mesh,
    primitive: &gltf::Primitive,
    buffers: &[gltf::buffer::Data],
    transform: Mat4,
) -> Option<MeshData> {
    let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

    let positions: Vec<[f32; 3]> = reader
        .read_positions()?
        .map(|p| transform.transform_point3(p.into()).to_array())
        .collect();
    if positions.is_empty() {
        return None;
    }

    // Normals rotate but never translate; missing normals default to +Y.
    let normals: Vec<[f32; 3]> = match reader.read_normals() {
        Some(iter) => iter
            .map(|n| transform.transform_vector3(n.into()).normalize_or_zero().to_array())
            .collect(),
        None => vec![[0.0, 1.0, 0.0]; positions.len()],
    };

    let indices: Vec<u32> = match reader.read_indices() {
        Some(iter) => iter.into_u32().collect(),
        None => (0..positions.len() as u32).collect(),
    };

    let base_color = primitive
        .material()
        .pbr_metallic_roughness()
        .base_color_factor();

    Some(MeshData {
        name: mesh.name().unwrap_or("unnamed").to_string(),
        positions,
        normals,
        indices,
        base_color,
    })
}

/// A clip lasts until its latest keyframe: the maximum sampler input time
/// across all channels.
fn clip_duration(animation: &gltf::Animation, buffers: &[gltf::buffer::Data]) -> f32 {
    let mut max_time = 0.0_f32;
    for channel in animation.channels() {
        let reader = channel.reader(|buffer| Some(&buffers[buffer.index()]));
        if let Some(inputs) = reader.read_inputs() {
            for t in inputs {
                max_time = max_time.max(t);
            }
        }
    }
    max_time
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ModelSource, load_model};

    /// A minimal single-triangle glTF with an external binary buffer.
    fn write_triangle_gltf(dir: &Path, name: &str) -> std::path::PathBuf {
        let positions: [f32; 9] = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
        let mut bytes = Vec::with_capacity(36);
        for v in positions {
            bytes.extend_from_slice(&v.to_le_bytes());
        }
        std::fs::write(dir.join("tri.bin"), &bytes).unwrap();

        let json = r#"{
            "asset": {"version": "2.0"},
            "scene": 0,
            "scenes": [{"nodes": [0]}],
            "nodes": [{"mesh": 0, "translation": [0.0, 1.0, 0.0]}],
            "meshes": [{"name": "tri", "primitives": [{"attributes": {"POSITION": 0}}]}],
            "buffers": [{"uri": "tri.bin", "byteLength": 36}],
            "bufferViews": [{"buffer": 0, "byteOffset": 0, "byteLength": 36}],
            "accessors": [{
                "bufferView": 0,
                "componentType": 5126,
                "count": 3,
                "type": "VEC3",
                "min": [0.0, 0.0, 0.0],
                "max": [1.0, 1.0, 0.0]
            }]
        }"#;
        let path = dir.join(name);
        std::fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn decodes_a_minimal_triangle() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_triangle_gltf(dir.path(), "tri.gltf");

        let (meshes, clips) = decode_file(&path).unwrap();
        assert_eq!(meshes.len(), 1);
        assert_eq!(meshes[0].positions.len(), 3);
        assert_eq!(meshes[0].indices, vec![0, 1, 2]);
        assert_eq!(meshes[0].normals, vec![[0.0, 1.0, 0.0]; 3]);
        assert!(clips.is_empty());
    }

    #[test]
    fn node_transform_is_applied() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_triangle_gltf(dir.path(), "tri.gltf");

        let (meshes, _) = decode_file(&path).unwrap();
        // The node lifts the triangle one unit up.
        assert_eq!(meshes[0].positions[0], [0.0, 1.0, 0.0]);
        assert_eq!(meshes[0].positions[2], [0.0, 2.0, 0.0]);
    }

    #[test]
    fn fallback_provenance_is_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let fallback = write_triangle_gltf(dir.path(), "model.gltf");

        let model = load_model(&dir.path().join("model.glb"), &fallback);
        assert_eq!(model.source, ModelSource::Fallback);
        assert_eq!(model.name, "model.gltf");
        assert_eq!(model.vertex_count(), 3);
    }

    #[test]
    fn primary_provenance_is_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let primary = write_triangle_gltf(dir.path(), "model.gltf");

        let model = load_model(&primary, &dir.path().join("other.gltf"));
        assert_eq!(model.source, ModelSource::Primary);
    }

    #[test]
    fn missing_file_is_an_import_error() {
        let err = decode_file(Path::new("/nonexistent/model.glb")).unwrap_err();
        assert!(matches!(err, ModelError::Import(_)));
    }
}
