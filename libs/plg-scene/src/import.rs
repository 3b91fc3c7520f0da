//! # Import
//!
//! PLG JSON file → mesh objects in one scene collection.
//!
//! ## Flow
//!
//! 1. Decode the document (envelope errors abort before the scene is touched)
//! 2. Create or reuse the collection named after the file
//! 3. Create the black and white classification materials
//! 4. Build one mesh object per decoded section
//!
//! A section that fails to decode or to build is skipped with an error
//! diagnostic. Objects created before a later failure stay in the scene.

use std::path::Path;

use config::constants::{
    BLACK_MATERIAL_NAME, BLACK_MATERIAL_RGBA, CORNER_COLOR_LAYER, MAX_FILE_SIZE,
    WHITE_MATERIAL_NAME, WHITE_MATERIAL_RGBA,
};
use plg_codec::{decode_str, MaterialSlot, MeshPlan};
use plg_types::{Diagnostic, Stage};

use crate::diagnostics::log_diagnostics;
use crate::error::{SceneError, SceneResult};
use crate::scene::{NewMesh, SceneBuilder};

/// The two classification materials created by one import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterialPair<M> {
    pub black: M,
    pub white: M,
}

impl<M: Copy> MaterialPair<M> {
    /// Returns the materials in slot order.
    pub fn slots(&self) -> [M; 2] {
        let mut slots = [self.black; 2];
        slots[MaterialSlot::White.index()] = self.white;
        slots
    }

    /// Returns the material for a slot.
    pub fn get(&self, slot: MaterialSlot) -> M {
        match slot {
            MaterialSlot::Black => self.black,
            MaterialSlot::White => self.white,
        }
    }
}

/// One mesh object created by an import.
#[derive(Debug, Clone)]
pub struct ImportedObject<O> {
    pub object: O,
    pub section_index: usize,
    pub name: String,
    pub vertex_count: usize,
    pub face_count: usize,
    pub white_faces: usize,
}

/// Outcome of an import.
///
/// An import that skipped sections still succeeds; the skipped sections are
/// listed as error diagnostics.
#[derive(Debug)]
pub struct ImportReport<B: SceneBuilder> {
    pub collection_name: String,
    pub collection: B::Collection,
    pub materials: MaterialPair<B::Material>,
    pub objects: Vec<ImportedObject<B::Object>>,
    /// Number of sections in the document, skipped ones included.
    pub section_count: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl<B: SceneBuilder> ImportReport<B> {
    /// Returns true if any section was skipped.
    pub fn is_partial(&self) -> bool {
        self.objects.len() < self.section_count
    }

    /// Returns the indices of the sections that produced no object.
    pub fn skipped_sections(&self) -> Vec<usize> {
        (0..self.section_count)
            .filter(|i| !self.objects.iter().any(|o| o.section_index == *i))
            .collect()
    }
}

/// Returns the collection name for an input file: its base name without
/// extension.
///
/// # Example
///
/// ```rust
/// use std::path::Path;
/// use plg_scene::import::collection_name_for;
///
/// assert_eq!(collection_name_for(Path::new("maps/Level01.json")), "Level01");
/// ```
pub fn collection_name_for(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Reads a PLG JSON file, refusing files above the size limit.
pub fn read_plg_file(path: &Path) -> SceneResult<String> {
    let metadata = std::fs::metadata(path).map_err(|e| SceneError::io(path, e))?;
    if metadata.len() > MAX_FILE_SIZE {
        return Err(SceneError::FileTooLarge {
            size: metadata.len(),
            max: MAX_FILE_SIZE,
        });
    }
    std::fs::read_to_string(path).map_err(|e| SceneError::io(path, e))
}

/// Imports a PLG JSON file into a collection named after the file.
///
/// # Errors
///
/// Fails on unreadable files, malformed envelopes, and host failures while
/// creating the collection or the materials.
pub fn import<B: SceneBuilder>(
    scene: &mut B,
    input_path: impl AsRef<Path>,
) -> SceneResult<ImportReport<B>> {
    let path = input_path.as_ref();
    let json = read_plg_file(path)?;
    import_json(scene, &collection_name_for(path), &json)
}

/// Imports PLG JSON text into the collection called `collection_name`.
pub fn import_json<B: SceneBuilder>(
    scene: &mut B,
    collection_name: &str,
    json: &str,
) -> SceneResult<ImportReport<B>> {
    let decoded = decode_str(json)?;

    let collection = scene.create_collection(collection_name)?;
    let materials = MaterialPair {
        black: scene.create_material(BLACK_MATERIAL_NAME, BLACK_MATERIAL_RGBA)?,
        white: scene.create_material(WHITE_MATERIAL_NAME, WHITE_MATERIAL_RGBA)?,
    };

    let mut diagnostics = decoded.diagnostics;
    let mut objects = Vec::with_capacity(decoded.plans.len());
    for plan in &decoded.plans {
        match build_mesh(scene, plan, collection, &materials) {
            Ok(object) => objects.push(ImportedObject {
                object,
                section_index: plan.section_index,
                name: plan.name.clone(),
                vertex_count: plan.vertices.len(),
                face_count: plan.face_count(),
                white_faces: plan.faces_with(MaterialSlot::White),
            }),
            Err(err) => diagnostics.push(
                Diagnostic::error(Stage::Import, format!("mesh not created: {err}"))
                    .in_section(plan.section_index),
            ),
        }
    }
    diagnostics.sort_by_key(|d| d.section);

    log_diagnostics(&diagnostics);
    tracing::info!(
        "Imported {} of {} sections into '{}'",
        objects.len(),
        decoded.section_count,
        collection_name
    );

    Ok(ImportReport {
        collection_name: collection_name.to_string(),
        collection,
        materials,
        objects,
        section_count: decoded.section_count,
        diagnostics,
    })
}

/// Creates the mesh object for one plan and applies colors and materials.
fn build_mesh<B: SceneBuilder>(
    scene: &mut B,
    plan: &MeshPlan,
    collection: B::Collection,
    materials: &MaterialPair<B::Material>,
) -> SceneResult<B::Object> {
    let data_name = plan.mesh_data_name();
    let object = scene.create_mesh_object(
        NewMesh {
            name: &plan.name,
            data_name: &data_name,
            vertices: &plan.vertices,
            faces: &plan.faces,
        },
        collection,
    )?;

    scene.set_corner_colors(object, CORNER_COLOR_LAYER, &plan.corner_colors)?;

    let face_slots: Vec<usize> = plan.face_materials.iter().map(|m| m.index()).collect();
    scene.assign_materials_to_faces(object, &materials.slots(), &face_slots)?;

    tracing::debug!(
        "Built '{}': {} vertices, {} faces",
        plan.name,
        plan.vertices.len(),
        plan.face_count()
    );
    Ok(object)
}
