use std::collections::{HashMap, HashSet};
use std::path::Path;

use glam::{DMat4, DQuat, DVec3, Vec3};
use id_arena::Arena;

use crate::scene_graph::attributes::{AttributeValue, Attributes};
use crate::scene_graph::error::SceneError;
use crate::scene_graph::mesh::{Buffers, Mesh, MeshId};
use crate::scene_graph::object3d::{Object3D, ObjectId, ObjectKind};
use crate::scene_graph::transform::Transform;

pub struct Scene {
    pub objects: Arena<Object3D>,
    pub meshes: Arena<Mesh>,
    // id-arena never frees slots; removed objects are tombstoned here.
    removed: HashSet<ObjectId>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            objects: Arena::new(),
            meshes: Arena::new(),
            removed: HashSet::new(),
        }
    }

    pub fn add_object(&mut self, object: Object3D) -> Result<ObjectId, SceneError> {
        if self.get_object_by_name(&object.name).is_some() {
            return Err(SceneError::DuplicateName(object.name));
        }

        Ok(self.objects.alloc(object))
    }

    pub fn add_mesh(&mut self, mesh: Mesh) -> MeshId {
        self.meshes.alloc(mesh)
    }

    pub fn get_object(&self, id: ObjectId) -> Option<&Object3D> {
        if self.removed.contains(&id) {
            return None;
        }
        self.objects.get(id)
    }

    pub fn get_object_mut(&mut self, id: ObjectId) -> Option<&mut Object3D> {
        if self.removed.contains(&id) {
            return None;
        }
        self.objects.get_mut(id)
    }

    pub fn get_object_by_name(&self, name: &str) -> Option<ObjectId> {
        self.iter_objects()
            .find(|(_, object)| object.name == name)
            .map(|(id, _)| id)
    }

    pub fn get_mesh(&self, id: MeshId) -> Option<&Mesh> {
        self.meshes.get(id)
    }

    pub fn get_mesh_mut(&mut self, id: MeshId) -> Option<&mut Mesh> {
        self.meshes.get_mut(id)
    }

    /// Mesh of an object, if it has one.
    pub fn object_mesh(&self, object_id: ObjectId) -> Option<&Mesh> {
        self.get_object(object_id)?
            .mesh_id
            .and_then(|mesh_id| self.get_mesh(mesh_id))
    }

    /// Live objects in insertion order.
    pub fn iter_objects(&self) -> impl Iterator<Item = (ObjectId, &Object3D)> {
        self.objects
            .iter()
            .filter(|(id, _)| !self.removed.contains(id))
    }

    pub fn iter_objects_mut(&mut self) -> impl Iterator<Item = (ObjectId, &mut Object3D)> {
        let removed = &self.removed;
        self.objects
            .iter_mut()
            .filter(move |(id, _)| !removed.contains(id))
    }

    pub fn mesh_object_ids(&self) -> Vec<ObjectId> {
        self.iter_objects()
            .filter(|(_, object)| object.is_mesh())
            .map(|(id, _)| id)
            .collect()
    }

    pub fn object_count(&self) -> usize {
        self.objects.len() - self.removed.len()
    }

    /// Resolves selected object names in order. Unknown and repeated names are
    /// dropped with a warning.
    pub fn resolve_selection<S: AsRef<str>>(&self, names: &[S]) -> Vec<ObjectId> {
        let mut selection = Vec::with_capacity(names.len());

        for name in names {
            let name = name.as_ref();
            match self.get_object_by_name(name) {
                Some(id) if selection.contains(&id) => {
                    log::warn!("{} selected more than once", name);
                }
                Some(id) => selection.push(id),
                None => log::warn!("Selected object {} is not in the scene", name),
            }
        }

        selection
    }

    /// Sets the parent of an object and updates child relationships
    pub fn set_object_parent(
        &mut self,
        child_id: ObjectId,
        new_parent_id: Option<ObjectId>,
    ) -> Result<(), SceneError> {
        // Walk up from the new parent; meeting the child means a cycle
        let mut ancestor = new_parent_id;
        while let Some(ancestor_id) = ancestor {
            if ancestor_id == child_id {
                return Err(SceneError::ParentCycle {
                    child: self.object_name(child_id),
                    parent: new_parent_id.map(|id| self.object_name(id)).unwrap_or_default(),
                });
            }
            ancestor = self.get_object(ancestor_id).and_then(|object| object.parent_id);
        }

        // Remove from old parent's children list
        if let Some(old_parent_id) = self.get_object(child_id).and_then(|child| child.parent_id) {
            if let Some(old_parent) = self.get_object_mut(old_parent_id) {
                old_parent.child_ids.retain(|&id| id != child_id);
            }
        }

        // Set new parent and add to new parent's children list
        if let Some(child) = self.get_object_mut(child_id) {
            child.parent_id = new_parent_id;
        }

        if let Some(new_parent_id) = new_parent_id {
            if let Some(new_parent) = self.get_object_mut(new_parent_id) {
                new_parent.child_ids.push(child_id);
            }
        }

        Ok(())
    }

    /// Removes an object. Its children are detached to the scene root and keep
    /// their local transforms.
    pub fn remove_object(&mut self, object_id: ObjectId) {
        let Some(object) = self.get_object(object_id) else {
            return;
        };
        let child_ids = object.child_ids.clone();

        for child_id in child_ids {
            if let Some(child) = self.get_object_mut(child_id) {
                child.parent_id = None;
            }
        }

        // Detaching from a live parent cannot form a cycle
        let _ = self.set_object_parent(object_id, None);
        self.removed.insert(object_id);
    }

    /// World matrix: parent world matrix times local matrix, up to the root.
    pub fn world_matrix(&self, object_id: ObjectId) -> DMat4 {
        let mut matrix = DMat4::IDENTITY;
        let mut current = self.get_object(object_id);

        while let Some(object) = current {
            matrix = object.transform.local_matrix() * matrix;
            current = object.parent(self);
        }

        matrix
    }

    /// Mesh vertices of an object transformed to world space.
    pub fn world_vertices(&self, object_id: ObjectId) -> Vec<DVec3> {
        let Some(mesh) = self.object_mesh(object_id) else {
            return Vec::new();
        };
        let world_matrix = self.world_matrix(object_id);

        mesh.positions
            .iter()
            .map(|position| world_matrix.transform_point3(*position))
            .collect()
    }

    fn object_name(&self, object_id: ObjectId) -> String {
        self.objects
            .get(object_id)
            .map(|object| object.name.clone())
            .unwrap_or_default()
    }

    /// Host-style unique name: `Cube`, `Cube.001`, `Cube.002`, ...
    fn unique_name(&self, base: &str) -> String {
        if self.get_object_by_name(base).is_none() {
            return base.to_string();
        }

        (1..)
            .map(|suffix| format!("{}.{:03}", base, suffix))
            .find(|candidate| self.get_object_by_name(candidate).is_none())
            .unwrap_or_else(|| base.to_string())
    }

    /// Loads the default (or first) scene of a glTF/GLB file. Node extras
    /// become custom attributes.
    pub fn from_gltf_file(path: &Path) -> Result<Scene, SceneError> {
        let (document, buffers, _images) =
            gltf::import(path).map_err(|source| SceneError::Gltf {
                path: path.to_path_buf(),
                source,
            })?;

        let gltf_scene = document
            .default_scene()
            .or_else(|| document.scenes().next())
            .ok_or_else(|| SceneError::NoScenes(path.to_path_buf()))?;

        let mut scene = Scene::new();
        let mut mesh_cache = HashMap::new();

        for node in gltf_scene.nodes() {
            scene.spawn_gltf_node(&buffers, &node, None, &mut mesh_cache)?;
        }

        log::debug!(
            "Loaded {} objects from {}",
            scene.object_count(),
            path.display()
        );

        Ok(scene)
    }

    fn spawn_gltf_node(
        &mut self,
        buffers: Buffers,
        node: &gltf::Node,
        parent: Option<ObjectId>,
        mesh_cache: &mut HashMap<usize, Mesh>,
    ) -> Result<ObjectId, SceneError> {
        let node_name = self.unique_name(node.name().unwrap_or("Unnamed"));
        let (translation, rotation, scale) = node.transform().decomposed();

        let transform = Transform::from_quat(
            Vec3::from(translation).as_dvec3(),
            DQuat::from_array(rotation.map(f64::from)),
            Vec3::from(scale).as_dvec3(),
        );

        let kind = if node.mesh().is_some() {
            ObjectKind::Mesh
        } else if node.camera().is_some() {
            ObjectKind::Camera
        } else {
            ObjectKind::Empty
        };

        let mut object = Object3D::new(node_name.clone(), kind, transform);
        object.attributes = gltf_extras(node);

        if let Some(gltf_mesh) = node.mesh() {
            let mesh_index = gltf_mesh.index();

            // Each object owns its mesh so later edits stay local
            let mesh = match mesh_cache.get(&mesh_index) {
                Some(mesh) => mesh.clone(),
                None => {
                    let mesh_name = gltf_mesh
                        .name()
                        .map(String::from)
                        .unwrap_or_else(|| format!("{} (Mesh)", node_name));
                    let mesh = Mesh::from_gltf(mesh_name, gltf_mesh, buffers)?;
                    mesh_cache.insert(mesh_index, mesh.clone());
                    mesh
                }
            };

            object.mesh_id = Some(self.add_mesh(mesh));
        }

        let object_id = self.add_object(object)?;

        if let Some(parent_id) = parent {
            self.set_object_parent(object_id, Some(parent_id))?;
        }

        for child in node.children() {
            self.spawn_gltf_node(buffers, &child, Some(object_id), mesh_cache)?;
        }

        Ok(object_id)
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

fn gltf_extras(node: &gltf::Node) -> Attributes {
    let Some(raw) = node.extras().as_ref() else {
        return Attributes::new();
    };

    let extras: serde_json::Map<String, serde_json::Value> = match serde_json::from_str(raw.get())
    {
        Ok(extras) => extras,
        Err(e) => {
            log::warn!("Ignoring extras of node {:?}: {}", node.name(), e);
            return Attributes::new();
        }
    };

    extras
        .iter()
        .filter_map(|(key, value)| match AttributeValue::from_json(value) {
            Some(value) => Some((key.clone(), value)),
            None => {
                log::debug!("Skipping non-scalar extra {} on {:?}", key, node.name());
                None
            }
        })
        .collect()
}
