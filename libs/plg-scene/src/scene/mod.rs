//! Scene capabilities required by export and import.
//!
//! The PLG pipeline never talks to a concrete editor. Instead the host
//! implements these two narrow traits and passes itself in by `&mut`
//! borrow for the duration of one export or import.
//!
//! Handles (`Object`, `Collection`, `Material`) are opaque, cheap to copy and
//! only meaningful to the host that issued them.

use std::fmt;

use glam::DVec3;

use crate::error::SceneResult;

/// Geometry of one mesh object as the host stores it.
///
/// # Examples
/// ```
/// use glam::DVec3;
/// use plg_scene::scene::MeshSnapshot;
///
/// let snapshot = MeshSnapshot {
///     vertices: vec![DVec3::ZERO, DVec3::X, DVec3::Y],
///     faces: vec![vec![0, 1, 2]],
///     loop_colors: None,
/// };
/// assert!(snapshot.is_triangulated());
/// assert_eq!(snapshot.loop_count(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeshSnapshot {
    pub vertices: Vec<DVec3>,
    /// Polygon loops, each a list of vertex indices.
    pub faces: Vec<Vec<u32>>,
    /// One RGBA color per face corner in face order; `None` when the mesh
    /// has no active color layer.
    pub loop_colors: Option<Vec<[f32; 4]>>,
}

impl MeshSnapshot {
    /// Returns the total number of face corners.
    pub fn loop_count(&self) -> usize {
        self.faces.iter().map(Vec::len).sum()
    }

    /// Returns true if every face has exactly three corners.
    pub fn is_triangulated(&self) -> bool {
        self.faces.iter().all(|f| f.len() == 3)
    }
}

/// Read access to a scene, plus the one mutation export needs.
pub trait SceneSource {
    /// Opaque object handle.
    type Object: Copy + fmt::Debug;

    /// Returns the object the user has selected, if any.
    fn active_object(&self) -> Option<Self::Object>;

    /// Returns the name of the first collection `object` is linked to.
    fn owning_collection(&self, object: Self::Object) -> Option<String>;

    /// Returns every object in the named collection, in collection order.
    fn collection_objects(&self, collection: &str) -> Vec<Self::Object>;

    /// Returns the display name of `object`.
    fn object_name(&self, object: Self::Object) -> String;

    /// Returns true if `object` carries mesh geometry.
    fn is_mesh(&self, object: Self::Object) -> bool;

    /// Splits every face with more than three corners into triangles.
    ///
    /// Per-corner data (colors, face materials) must follow the split.
    fn triangulate_in_place(&mut self, object: Self::Object) -> SceneResult<()>;

    /// Copies the current geometry of a mesh object.
    fn mesh_snapshot(&self, object: Self::Object) -> SceneResult<MeshSnapshot>;
}

/// Description of a mesh object to create.
#[derive(Debug, Clone, Copy)]
pub struct NewMesh<'a> {
    /// Object name.
    pub name: &'a str,
    /// Name of the mesh data block.
    pub data_name: &'a str,
    pub vertices: &'a [DVec3],
    pub faces: &'a [Vec<u32>],
}

/// Write access to a scene, used by import.
pub trait SceneBuilder {
    /// Opaque collection handle.
    type Collection: Copy + fmt::Debug;
    /// Opaque object handle.
    type Object: Copy + fmt::Debug;
    /// Opaque material handle.
    type Material: Copy + fmt::Debug;

    /// Returns the collection called `name`, creating it if needed.
    ///
    /// Calling this twice with the same name returns the same collection.
    fn create_collection(&mut self, name: &str) -> SceneResult<Self::Collection>;

    /// Creates a mesh object and links it into `collection`.
    fn create_mesh_object(
        &mut self,
        mesh: NewMesh<'_>,
        collection: Self::Collection,
    ) -> SceneResult<Self::Object>;

    /// Creates a material with a flat diffuse color.
    fn create_material(&mut self, name: &str, rgba: [f32; 4]) -> SceneResult<Self::Material>;

    /// Stores one color per face corner in a named color layer.
    fn set_corner_colors(
        &mut self,
        object: Self::Object,
        layer: &str,
        colors: &[[f32; 4]],
    ) -> SceneResult<()>;

    /// Appends `materials` as the object's material slots, in order, and sets
    /// the slot index of every face.
    fn assign_materials_to_faces(
        &mut self,
        object: Self::Object,
        materials: &[Self::Material],
        face_slots: &[usize],
    ) -> SceneResult<()>;
}

mod memory;

pub use memory::{
    Collection, CollectionId, ColorLayer, InMemoryScene, Material, MaterialId, MeshObject,
    ObjectId, SceneObject,
};
