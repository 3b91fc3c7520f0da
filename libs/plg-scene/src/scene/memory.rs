//! In-memory scene host.
//!
//! A small but real implementation of both scene traits. Tests and the
//! command-line tool run the full export and import paths against it.

use config::constants::MESH_DATA_SUFFIX;
use glam::DVec3;

use super::{MeshSnapshot, NewMesh, SceneBuilder, SceneSource};
use crate::error::{SceneError, SceneResult};

/// Handle of an object in an [`InMemoryScene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(usize);

/// Handle of a collection in an [`InMemoryScene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollectionId(usize);

/// Handle of a material in an [`InMemoryScene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(usize);

/// A named per-corner color layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorLayer {
    pub name: String,
    /// One color per face corner, in face order.
    pub colors: Vec<[f32; 4]>,
}

/// Mesh object stored by the in-memory host.
///
/// The first color layer is the active one.
///
/// # Examples
/// ```
/// use glam::DVec3;
/// use plg_scene::scene::MeshObject;
///
/// let quad = MeshObject::new(
///     "Floor",
///     vec![DVec3::ZERO, DVec3::X, DVec3::new(1.0, 1.0, 0.0), DVec3::Y],
///     vec![vec![0, 1, 2, 3]],
/// );
/// assert_eq!(quad.data_name, "Floor_mesh");
/// assert_eq!(quad.loop_count(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeshObject {
    pub name: String,
    pub data_name: String,
    pub vertices: Vec<DVec3>,
    pub faces: Vec<Vec<u32>>,
    pub color_layers: Vec<ColorLayer>,
    /// Material slots, in slot order.
    pub materials: Vec<MaterialId>,
    /// Material slot index per face.
    pub face_slots: Vec<usize>,
}

impl MeshObject {
    /// Creates a mesh object with a data block named `<name>_mesh`.
    pub fn new(name: impl Into<String>, vertices: Vec<DVec3>, faces: Vec<Vec<u32>>) -> Self {
        let name = name.into();
        Self {
            data_name: format!("{name}{MESH_DATA_SUFFIX}"),
            name,
            vertices,
            faces,
            ..Self::default()
        }
    }

    /// Adds a color layer holding one color per face corner.
    pub fn with_color_layer(mut self, name: impl Into<String>, colors: Vec<[f32; 4]>) -> Self {
        self.color_layers.push(ColorLayer {
            name: name.into(),
            colors,
        });
        self
    }

    /// Returns the total number of face corners.
    pub fn loop_count(&self) -> usize {
        self.faces.iter().map(Vec::len).sum()
    }

    /// Returns the color layer called `name`.
    pub fn color_layer(&self, name: &str) -> Option<&ColorLayer> {
        self.color_layers.iter().find(|l| l.name == name)
    }

    /// Returns the active color layer.
    pub fn active_color_layer(&self) -> Option<&ColorLayer> {
        self.color_layers.first()
    }

    /// Fan-triangulates every face with more than three corners.
    ///
    /// Color layers and face slots are rewritten to follow the new faces.
    fn triangulate(&mut self) {
        if self.faces.iter().all(|f| f.len() <= 3) {
            return;
        }

        let mut faces = Vec::with_capacity(self.faces.len());
        let mut face_slots = Vec::with_capacity(self.face_slots.len());
        let mut layers: Vec<Vec<[f32; 4]>> = vec![Vec::new(); self.color_layers.len()];
        let mut offset = 0;

        for (face_index, face) in self.faces.iter().enumerate() {
            for corners in fan(face.len()) {
                faces.push(corners.iter().map(|&c| face[c]).collect());
                if let Some(&slot) = self.face_slots.get(face_index) {
                    face_slots.push(slot);
                }
                for (layer, out) in self.color_layers.iter().zip(layers.iter_mut()) {
                    out.extend(corners.iter().filter_map(|&c| layer.colors.get(offset + c)));
                }
            }
            offset += face.len();
        }

        self.faces = faces;
        self.face_slots = face_slots;
        for (layer, colors) in self.color_layers.iter_mut().zip(layers) {
            layer.colors = colors;
        }
    }
}

/// Local corner lists of the triangles covering an `n`-corner face.
///
/// Faces with three corners or fewer are returned whole.
fn fan(n: usize) -> Vec<Vec<usize>> {
    if n <= 3 {
        return vec![(0..n).collect()];
    }
    (1..n - 1).map(|i| vec![0, i, i + 1]).collect()
}

/// Anything the in-memory host can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneObject {
    Mesh(MeshObject),
    /// An object without geometry (camera, light, empty).
    Empty { name: String },
}

impl SceneObject {
    /// Returns the object name.
    pub fn name(&self) -> &str {
        match self {
            SceneObject::Mesh(mesh) => &mesh.name,
            SceneObject::Empty { name } => name,
        }
    }
}

/// A flat-colored material.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub rgba: [f32; 4],
}

/// A named, ordered group of objects.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Collection {
    pub name: String,
    pub objects: Vec<ObjectId>,
}

/// Scene host that keeps everything in vectors.
///
/// # Examples
/// ```
/// use glam::DVec3;
/// use plg_scene::scene::{InMemoryScene, MeshObject, SceneSource};
///
/// let mut scene = InMemoryScene::default();
/// let level = scene.add_collection("Level01");
/// let floor = scene.add_mesh(
///     Some(level),
///     MeshObject::new("Floor", vec![DVec3::ZERO, DVec3::X, DVec3::Y], vec![vec![0, 1, 2]]),
/// );
/// scene.set_active(Some(floor));
///
/// assert_eq!(scene.owning_collection(floor).as_deref(), Some("Level01"));
/// assert!(scene.is_mesh(floor));
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryScene {
    objects: Vec<SceneObject>,
    collections: Vec<Collection>,
    materials: Vec<Material>,
    active: Option<ObjectId>,
}

impl InMemoryScene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the collection called `name`, creating it if needed.
    pub fn add_collection(&mut self, name: impl Into<String>) -> CollectionId {
        let name = name.into();
        if let Some(id) = self.collection_id(&name) {
            return id;
        }
        self.collections.push(Collection {
            name,
            objects: Vec::new(),
        });
        CollectionId(self.collections.len() - 1)
    }

    /// Adds a mesh object, optionally linking it into a collection.
    pub fn add_mesh(&mut self, collection: Option<CollectionId>, mesh: MeshObject) -> ObjectId {
        self.add_object(collection, SceneObject::Mesh(mesh))
    }

    /// Adds an object without geometry.
    pub fn add_empty(
        &mut self,
        collection: Option<CollectionId>,
        name: impl Into<String>,
    ) -> ObjectId {
        self.add_object(collection, SceneObject::Empty { name: name.into() })
    }

    fn add_object(&mut self, collection: Option<CollectionId>, object: SceneObject) -> ObjectId {
        self.objects.push(object);
        let id = ObjectId(self.objects.len() - 1);
        if let Some(c) = collection.and_then(|c| self.collections.get_mut(c.0)) {
            c.objects.push(id);
        }
        id
    }

    /// Selects (or clears) the active object.
    pub fn set_active(&mut self, object: Option<ObjectId>) {
        self.active = object;
    }

    /// Returns the object behind a handle.
    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id.0)
    }

    /// Returns the mesh behind a handle, if it is a mesh.
    pub fn mesh(&self, id: ObjectId) -> Option<&MeshObject> {
        match self.objects.get(id.0) {
            Some(SceneObject::Mesh(mesh)) => Some(mesh),
            _ => None,
        }
    }

    fn mesh_mut(&mut self, id: ObjectId) -> SceneResult<&mut MeshObject> {
        match self.objects.get_mut(id.0) {
            Some(SceneObject::Mesh(mesh)) => Ok(mesh),
            Some(other) => Err(SceneError::host(format!(
                "object '{}' is not a mesh",
                other.name()
            ))),
            None => Err(SceneError::host(format!("unknown object {id:?}"))),
        }
    }

    /// Returns the number of objects in the scene.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Returns the handle of the collection called `name`.
    pub fn collection_id(&self, name: &str) -> Option<CollectionId> {
        self.collections
            .iter()
            .position(|c| c.name == name)
            .map(CollectionId)
    }

    /// Returns the collection called `name`.
    pub fn collection(&self, name: &str) -> Option<&Collection> {
        self.collections.iter().find(|c| c.name == name)
    }

    /// Returns every collection, in creation order.
    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    /// Iterates over the meshes linked into the collection called `name`.
    pub fn meshes_in<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a MeshObject> + 'a {
        self.collection(name)
            .map(|c| c.objects.as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(move |&id| self.mesh(id))
    }

    /// Returns every material, in creation order.
    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    /// Returns the material behind a handle.
    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.0)
    }
}

impl SceneSource for InMemoryScene {
    type Object = ObjectId;

    fn active_object(&self) -> Option<ObjectId> {
        self.active
    }

    fn owning_collection(&self, object: ObjectId) -> Option<String> {
        self.collections
            .iter()
            .find(|c| c.objects.contains(&object))
            .map(|c| c.name.clone())
    }

    fn collection_objects(&self, collection: &str) -> Vec<ObjectId> {
        self.collection(collection)
            .map(|c| c.objects.clone())
            .unwrap_or_default()
    }

    fn object_name(&self, object: ObjectId) -> String {
        self.object(object)
            .map(|o| o.name().to_string())
            .unwrap_or_default()
    }

    fn is_mesh(&self, object: ObjectId) -> bool {
        self.mesh(object).is_some()
    }

    fn triangulate_in_place(&mut self, object: ObjectId) -> SceneResult<()> {
        self.mesh_mut(object)?.triangulate();
        Ok(())
    }

    fn mesh_snapshot(&self, object: ObjectId) -> SceneResult<MeshSnapshot> {
        let mesh = self
            .mesh(object)
            .ok_or_else(|| SceneError::host(format!("object {object:?} is not a mesh")))?;
        Ok(MeshSnapshot {
            vertices: mesh.vertices.clone(),
            faces: mesh.faces.clone(),
            loop_colors: mesh.active_color_layer().map(|l| l.colors.clone()),
        })
    }
}

impl SceneBuilder for InMemoryScene {
    type Collection = CollectionId;
    type Object = ObjectId;
    type Material = MaterialId;

    fn create_collection(&mut self, name: &str) -> SceneResult<CollectionId> {
        Ok(self.add_collection(name))
    }

    fn create_mesh_object(
        &mut self,
        mesh: NewMesh<'_>,
        collection: CollectionId,
    ) -> SceneResult<ObjectId> {
        if self.collections.get(collection.0).is_none() {
            return Err(SceneError::host(format!("unknown collection {collection:?}")));
        }
        let vertex_count = mesh.vertices.len();
        if let Some(&index) = mesh
            .faces
            .iter()
            .flatten()
            .find(|&&i| i as usize >= vertex_count)
        {
            return Err(SceneError::host(format!(
                "face index {index} out of range for {vertex_count} vertices"
            )));
        }

        let object = MeshObject {
            name: mesh.name.to_string(),
            data_name: mesh.data_name.to_string(),
            vertices: mesh.vertices.to_vec(),
            faces: mesh.faces.to_vec(),
            ..MeshObject::default()
        };
        Ok(self.add_mesh(Some(collection), object))
    }

    fn create_material(&mut self, name: &str, rgba: [f32; 4]) -> SceneResult<MaterialId> {
        self.materials.push(Material {
            name: name.to_string(),
            rgba,
        });
        Ok(MaterialId(self.materials.len() - 1))
    }

    fn set_corner_colors(
        &mut self,
        object: ObjectId,
        layer: &str,
        colors: &[[f32; 4]],
    ) -> SceneResult<()> {
        let mesh = self.mesh_mut(object)?;
        let loops = mesh.loop_count();
        if colors.len() != loops {
            return Err(SceneError::host(format!(
                "{} corner colors for {loops} corners",
                colors.len()
            )));
        }

        match mesh.color_layers.iter_mut().find(|l| l.name == layer) {
            Some(existing) => existing.colors = colors.to_vec(),
            None => mesh.color_layers.push(ColorLayer {
                name: layer.to_string(),
                colors: colors.to_vec(),
            }),
        }
        Ok(())
    }

    fn assign_materials_to_faces(
        &mut self,
        object: ObjectId,
        materials: &[MaterialId],
        face_slots: &[usize],
    ) -> SceneResult<()> {
        if let Some(unknown) = materials.iter().find(|m| self.materials.get(m.0).is_none()) {
            return Err(SceneError::host(format!("unknown material {unknown:?}")));
        }

        let mesh = self.mesh_mut(object)?;
        if face_slots.len() != mesh.faces.len() {
            return Err(SceneError::host(format!(
                "{} face slots for {} faces",
                face_slots.len(),
                mesh.faces.len()
            )));
        }

        let slot_count = mesh.materials.len() + materials.len();
        if let Some(&slot) = face_slots.iter().find(|&&s| s >= slot_count) {
            return Err(SceneError::host(format!(
                "material slot {slot} does not exist"
            )));
        }
        mesh.materials.extend_from_slice(materials);
        mesh.face_slots = face_slots.to_vec();
        Ok(())
    }
}
