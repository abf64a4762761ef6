use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building or loading a scene
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("Duplicate object name: {0}")]
    DuplicateName(String),

    #[error("Object {child} references unknown parent {parent}")]
    UnknownParent { child: String, parent: String },

    #[error("Parenting {child} to {parent} would create a cycle")]
    ParentCycle { child: String, parent: String },

    #[error("Mesh {mesh} has {count} indices, which is not a whole number of triangles")]
    IncompleteTriangle { mesh: String, count: usize },

    #[error("Mesh {mesh} references vertex {index} but only has {vertex_count} vertices")]
    IndexOutOfRange {
        mesh: String,
        index: u32,
        vertex_count: usize,
    },

    #[error("Mesh {mesh} has no readable positions")]
    MissingPositions { mesh: String },

    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid scene snapshot {path}: {source}")]
    Snapshot {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to import glTF {path}: {source}")]
    Gltf {
        path: PathBuf,
        #[source]
        source: gltf::Error,
    },

    #[error("glTF file {0} contains no scenes")]
    NoScenes(PathBuf),

    #[error("Unsupported scene file {0} (expected .json, .gltf or .glb)")]
    UnsupportedFormat(PathBuf),
}
