//! # Geometry Extraction
//!
//! Turns scene mesh objects into codec sections.
//!
//! Extraction triangulates the source object in place, then reads a snapshot
//! of its geometry. Corner colors are projected onto vertices through the
//! configured [`ColorSource`](config::settings::ColorSource); when several
//! corners share a vertex, the last one visited wins.

use config::settings::CodecConfig;
use plg_codec::color::encode_corner;
use plg_codec::{CodecError, PlgAsset, Section};
use plg_types::{Diagnostic, Stage};

use crate::error::{SceneError, SceneResult};
use crate::scene::{MeshSnapshot, SceneSource};

/// Sections extracted from one collection.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub asset: PlgAsset,
    pub diagnostics: Vec<Diagnostic>,
}

/// Builds a section from a triangulated snapshot.
///
/// # Errors
///
/// Fails if a face is not a triangle or refers to a missing vertex.
///
/// # Example
///
/// ```rust
/// use config::settings::{CodecConfig, ColorSource};
/// use glam::DVec3;
/// use plg_scene::extract::section_from_snapshot;
/// use plg_scene::scene::MeshSnapshot;
///
/// let snapshot = MeshSnapshot {
///     vertices: vec![DVec3::new(0.123456, 0.0, 0.0), DVec3::X, DVec3::Y],
///     faces: vec![vec![0, 1, 2]],
///     loop_colors: Some(vec![[1.0, 1.0, 1.0, 1.0]; 3]),
/// };
/// let config = CodecConfig::default().with_color_source(ColorSource::Heuristic);
/// let section = section_from_snapshot("Tri", &snapshot, &config).unwrap();
///
/// assert_eq!(section.vertices[0].x, 0.1235);
/// assert_eq!(section.colors, vec![0xFFFF_FFFF; 3]);
/// ```
pub fn section_from_snapshot(
    name: impl Into<String>,
    snapshot: &MeshSnapshot,
    config: &CodecConfig,
) -> SceneResult<Section> {
    if !snapshot.is_triangulated() {
        return Err(CodecError::NotTriangulated {
            count: snapshot.loop_count(),
        }
        .into());
    }

    let indices: Vec<u32> = snapshot.faces.iter().flatten().copied().collect();

    let mut colors = vec![0; snapshot.vertices.len()];
    if let Some(loop_colors) = &snapshot.loop_colors {
        for (&vertex, &rgba) in indices.iter().zip(loop_colors) {
            if let (Some(slot), Some(packed)) = (
                colors.get_mut(vertex as usize),
                encode_corner(config.color_source, rgba),
            ) {
                *slot = packed;
            }
        }
    }

    let mut section = Section::new(name, snapshot.vertices.clone(), indices, colors);
    section.round_positions(config.json_decimals);
    section.validate()?;
    Ok(section)
}

/// Triangulates `object` in place and extracts it as a section.
pub fn extract_section<S: SceneSource>(
    scene: &mut S,
    object: S::Object,
    config: &CodecConfig,
) -> SceneResult<Section> {
    scene.triangulate_in_place(object)?;
    let snapshot = scene.mesh_snapshot(object)?;
    section_from_snapshot(scene.object_name(object), &snapshot, config)
}

/// Extracts every mesh in the active object's collection.
///
/// The asset is named after the collection and keeps the collection's
/// object order. Non-mesh objects are skipped with an info diagnostic.
///
/// # Errors
///
/// Fails when nothing is active, when the active object belongs to no
/// collection, or when any mesh cannot be extracted.
pub fn extract_collection<S: SceneSource>(
    scene: &mut S,
    config: &CodecConfig,
) -> SceneResult<Extraction> {
    let active = scene.active_object().ok_or(SceneError::NoActiveObject)?;
    let collection = scene
        .owning_collection(active)
        .ok_or_else(|| SceneError::NotInCollection {
            object: scene.object_name(active),
        })?;

    let mut extraction = Extraction {
        asset: PlgAsset::new(collection.clone()),
        diagnostics: Vec::new(),
    };

    for object in scene.collection_objects(&collection) {
        let name = scene.object_name(object);
        if !scene.is_mesh(object) {
            tracing::debug!("Skipping non-mesh object '{}'", name);
            extraction.diagnostics.push(Diagnostic::info(
                Stage::Extract,
                format!("skipped non-mesh object '{name}'"),
            ));
            continue;
        }

        let section = extract_section(scene, object, config)?;
        tracing::debug!(
            "Extracted '{}': {} vertices, {} triangles",
            name,
            section.vertex_count(),
            section.triangle_count()
        );
        extraction.asset.push(section);
    }

    Ok(extraction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{InMemoryScene, MeshObject};
    use config::constants::{PACKED_BLACK, PACKED_WHITE};
    use config::settings::ColorSource;
    use glam::DVec3;
    use plg_codec::Bounds2;

    const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    const BLACK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    const GRAY: [f32; 4] = [0.5, 0.5, 0.5, 1.0];

    fn triangle(colors: Option<Vec<[f32; 4]>>) -> MeshSnapshot {
        MeshSnapshot {
            vertices: vec![
                DVec3::new(0.0, 0.0, 0.0),
                DVec3::new(2.0, 0.0, 0.0),
                DVec3::new(0.0, -3.0, 1.0),
            ],
            faces: vec![vec![0, 1, 2]],
            loop_colors: colors,
        }
    }

    fn config(source: ColorSource) -> CodecConfig {
        CodecConfig::default().with_color_source(source)
    }

    #[test]
    fn test_no_color_layer_gives_zero_colors() {
        let section =
            section_from_snapshot("t", &triangle(None), &config(ColorSource::VertexLayer)).unwrap();
        assert_eq!(section.colors, vec![0, 0, 0]);
        assert_eq!(section.indices, vec![0, 1, 2]);
        assert_eq!(
            section.bounds,
            Bounds2 {
                min_x: 0.0,
                min_y: -3.0,
                max_x: 2.0,
                max_y: 0.0
            }
        );
    }

    #[test]
    fn test_heuristic_tags_only_black_and_white() {
        let snapshot = triangle(Some(vec![WHITE, BLACK, GRAY]));
        let section =
            section_from_snapshot("t", &snapshot, &config(ColorSource::Heuristic)).unwrap();
        assert_eq!(section.colors, vec![PACKED_WHITE, PACKED_BLACK, 0]);

        let section = section_from_snapshot("t", &snapshot, &config(ColorSource::None)).unwrap();
        assert_eq!(section.colors, vec![0, 0, 0]);

        let section =
            section_from_snapshot("t", &snapshot, &config(ColorSource::VertexLayer)).unwrap();
        assert_eq!(section.colors, vec![0xFFFF_FFFF, 0xFF00_0000, 0xFF80_8080]);
    }

    /// Two triangles share vertex 0; the second visit decides its color.
    #[test]
    fn test_last_corner_wins() {
        let snapshot = MeshSnapshot {
            vertices: vec![DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::NEG_X],
            faces: vec![vec![0, 1, 2], vec![0, 2, 3]],
            loop_colors: Some(vec![WHITE, WHITE, WHITE, BLACK, BLACK, BLACK]),
        };
        let section =
            section_from_snapshot("t", &snapshot, &config(ColorSource::Heuristic)).unwrap();
        assert_eq!(section.colors, vec![PACKED_BLACK, PACKED_WHITE, PACKED_BLACK, PACKED_BLACK]);
    }

    #[test]
    fn test_untriangulated_snapshot_fails() {
        let snapshot = MeshSnapshot {
            vertices: vec![DVec3::ZERO, DVec3::X, DVec3::ONE, DVec3::Y],
            faces: vec![vec![0, 1, 2, 3]],
            loop_colors: None,
        };
        let err = section_from_snapshot("q", &snapshot, &CodecConfig::default()).unwrap_err();
        assert!(matches!(err, SceneError::Codec(CodecError::NotTriangulated { .. })));
    }

    #[test]
    fn test_empty_mesh_gives_empty_section() {
        let section =
            section_from_snapshot("void", &MeshSnapshot::default(), &CodecConfig::default())
                .unwrap();
        assert!(section.is_empty());
        assert_eq!(section.bounds, Bounds2::ZERO);
    }

    #[test]
    fn test_extract_section_triangulates_source() {
        let mut scene = InMemoryScene::new();
        let quad = scene.add_mesh(
            None,
            MeshObject::new(
                "Quad",
                vec![DVec3::ZERO, DVec3::X, DVec3::new(1.0, 1.0, 0.0), DVec3::Y],
                vec![vec![0, 1, 2, 3]],
            ),
        );

        let section = extract_section(&mut scene, quad, &CodecConfig::default()).unwrap();
        assert_eq!(section.name, "Quad");
        assert_eq!(section.indices, vec![0, 1, 2, 0, 2, 3]);
        assert_eq!(scene.mesh(quad).unwrap().faces.len(), 2);
    }

    #[test]
    fn test_extract_collection_walks_collection_order() {
        let mut scene = InMemoryScene::new();
        let level = scene.add_collection("Level01");
        let tri = |name: &str| {
            MeshObject::new(name, vec![DVec3::ZERO, DVec3::X, DVec3::Y], vec![vec![0, 1, 2]])
        };
        scene.add_mesh(Some(level), tri("A"));
        scene.add_empty(Some(level), "Lamp");
        let b = scene.add_mesh(Some(level), tri("B"));
        scene.add_mesh(None, tri("Outside"));
        scene.set_active(Some(b));

        let extraction = extract_collection(&mut scene, &CodecConfig::default()).unwrap();
        let names: Vec<_> = extraction.asset.sections.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(extraction.asset.name, "Level01");
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(extraction.diagnostics.len(), 1);
        assert!(extraction.diagnostics[0].message.contains("Lamp"));
    }

    #[test]
    fn test_extract_collection_user_errors() {
        let mut scene = InMemoryScene::new();
        assert!(matches!(
            extract_collection(&mut scene, &CodecConfig::default()),
            Err(SceneError::NoActiveObject)
        ));

        let loose = scene.add_empty(None, "Loose");
        scene.set_active(Some(loose));
        assert!(matches!(
            extract_collection(&mut scene, &CodecConfig::default()),
            Err(SceneError::NotInCollection { object }) if object == "Loose"
        ));
    }
}
