//! Factory functions for test scenes.

use crate::scene_graph::{AttributeValue, ObjectDescriptor, ObjectKind, Scene, SceneSnapshot};

/// Corners of the host's default cube (2 units across, centered on the origin).
pub fn unit_cube() -> Vec<[f64; 3]> {
    let mut corners = Vec::with_capacity(8);
    for x in [-1.0, 1.0] {
        for y in [-1.0, 1.0] {
            for z in [-1.0, 1.0] {
                corners.push([x, y, z]);
            }
        }
    }
    corners
}

/// A mesh object at `location` with the given local vertices.
pub fn mesh_descriptor(name: &str, location: [f64; 3], vertices: &[[f64; 3]]) -> ObjectDescriptor {
    let mut descriptor = ObjectDescriptor::new(name, ObjectKind::Mesh);
    descriptor.location = location;
    descriptor.vertices = vertices.to_vec();
    descriptor
}

/// A mesh object with a `gameObjectType` attribute.
pub fn typed_mesh(
    name: &str,
    object_type: &str,
    location: [f64; 3],
    vertices: &[[f64; 3]],
) -> ObjectDescriptor {
    let mut descriptor = mesh_descriptor(name, location, vertices);
    descriptor
        .attributes
        .insert("gameObjectType".to_string(), AttributeValue::from(object_type));
    descriptor
}

pub fn empty_descriptor(name: &str) -> ObjectDescriptor {
    ObjectDescriptor::new(name, ObjectKind::Empty)
}

pub fn snapshot(objects: Vec<ObjectDescriptor>) -> SceneSnapshot {
    SceneSnapshot {
        objects,
        selection: Vec::new(),
    }
}

pub fn scene_from(objects: Vec<ObjectDescriptor>) -> Scene {
    Scene::from_snapshot(&snapshot(objects)).unwrap()
}
