//! JSON scene snapshot: the host-side dump of objects, transforms, mesh
//! vertices, custom attributes and the operator's selection.

use std::path::{Path, PathBuf};

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::scene_graph::attributes::Attributes;
use crate::scene_graph::error::SceneError;
use crate::scene_graph::mesh::Mesh;
use crate::scene_graph::object3d::{Object3D, ObjectKind};
use crate::scene_graph::scene::Scene;
use crate::scene_graph::transform::Transform;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub objects: Vec<ObjectDescriptor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub selection: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectDescriptor {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: ObjectKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default)]
    pub location: [f64; 3],
    #[serde(default)]
    pub rotation: [f64; 3],
    #[serde(default = "unit_scale")]
    pub scale: [f64; 3],
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vertices: Vec<[f64; 3]>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub indices: Vec<u32>,
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
}

fn unit_scale() -> [f64; 3] {
    [1.0; 3]
}

impl ObjectDescriptor {
    pub fn new(name: impl Into<String>, kind: ObjectKind) -> Self {
        Self {
            name: name.into(),
            kind,
            parent: None,
            location: [0.0; 3],
            rotation: [0.0; 3],
            scale: unit_scale(),
            vertices: Vec::new(),
            indices: Vec::new(),
            attributes: Attributes::new(),
        }
    }
}

impl Scene {
    pub fn from_snapshot(snapshot: &SceneSnapshot) -> Result<Scene, SceneError> {
        let mut scene = Scene::new();

        for descriptor in &snapshot.objects {
            let transform = Transform::new(
                DVec3::from_array(descriptor.location),
                DVec3::from_array(descriptor.rotation),
                DVec3::from_array(descriptor.scale),
            );

            let mut object = Object3D::new(descriptor.name.clone(), descriptor.kind, transform);
            object.attributes = descriptor.attributes.clone();

            if descriptor.kind == ObjectKind::Mesh {
                let mesh = Mesh::new(
                    descriptor.name.clone(),
                    descriptor.vertices.iter().copied().map(DVec3::from_array).collect(),
                    descriptor.indices.clone(),
                );
                mesh.validate()?;
                object.mesh_id = Some(scene.add_mesh(mesh));
            } else if !descriptor.vertices.is_empty() {
                log::warn!(
                    "Ignoring vertices of {} object {}",
                    descriptor.kind.as_str(),
                    descriptor.name
                );
            }

            scene.add_object(object)?;
        }

        // Parents may be declared after their children
        for descriptor in &snapshot.objects {
            let Some(parent_name) = &descriptor.parent else {
                continue;
            };

            let parent_id = scene.get_object_by_name(parent_name).ok_or_else(|| {
                SceneError::UnknownParent {
                    child: descriptor.name.clone(),
                    parent: parent_name.clone(),
                }
            })?;

            if let Some(child_id) = scene.get_object_by_name(&descriptor.name) {
                scene.set_object_parent(child_id, Some(parent_id))?;
            }
        }

        Ok(scene)
    }

    pub fn to_snapshot(&self, selection: &[String]) -> SceneSnapshot {
        let objects = self
            .iter_objects()
            .map(|(id, object)| {
                let mesh = self.object_mesh(id);

                ObjectDescriptor {
                    name: object.name.clone(),
                    kind: object.kind,
                    parent: object.parent(self).map(|parent| parent.name.clone()),
                    location: object.transform.translation().to_array(),
                    rotation: object.transform.rotation().to_array(),
                    scale: object.transform.scale().to_array(),
                    vertices: mesh
                        .map(|mesh| mesh.positions.iter().map(|v| v.to_array()).collect())
                        .unwrap_or_default(),
                    indices: mesh.map(|mesh| mesh.indices.clone()).unwrap_or_default(),
                    attributes: object.attributes.clone(),
                }
            })
            .collect();

        // Objects removed since loading drop out of the selection
        let selection = selection
            .iter()
            .filter(|name| self.get_object_by_name(name).is_some())
            .cloned()
            .collect();

        SceneSnapshot { objects, selection }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneFormat {
    Snapshot,
    Gltf,
}

impl SceneFormat {
    pub fn from_path(path: &Path) -> Result<Self, SceneError> {
        let extension = path
            .extension()
            .and_then(|extension| extension.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("json") => Ok(SceneFormat::Snapshot),
            Some("gltf") | Some("glb") => Ok(SceneFormat::Gltf),
            _ => Err(SceneError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// A scene together with the selection recorded alongside it.
pub struct LoadedScene {
    pub scene: Scene,
    pub selection: Vec<String>,
    pub format: SceneFormat,
    pub path: PathBuf,
}

pub fn load_scene(path: &Path) -> Result<LoadedScene, SceneError> {
    let format = SceneFormat::from_path(path)?;

    let (scene, selection) = match format {
        SceneFormat::Snapshot => {
            let snapshot = read_snapshot(path)?;
            (Scene::from_snapshot(&snapshot)?, snapshot.selection)
        }
        SceneFormat::Gltf => (Scene::from_gltf_file(path)?, Vec::new()),
    };

    log::info!(
        "Loaded {} objects ({} selected) from {}",
        scene.object_count(),
        selection.len(),
        path.display()
    );

    Ok(LoadedScene {
        scene,
        selection,
        format,
        path: path.to_path_buf(),
    })
}

pub fn read_snapshot(path: &Path) -> Result<SceneSnapshot, SceneError> {
    let json = std::fs::read_to_string(path).map_err(|source| SceneError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&json).map_err(|source| SceneError::Snapshot {
        path: path.to_path_buf(),
        source,
    })
}

pub fn write_snapshot(snapshot: &SceneSnapshot, path: &Path) -> Result<(), SceneError> {
    let json = serde_json::to_string_pretty(snapshot).map_err(|source| SceneError::Snapshot {
        path: path.to_path_buf(),
        source,
    })?;

    std::fs::write(path, json).map_err(|source| SceneError::Io {
        path: path.to_path_buf(),
        source,
    })
}
