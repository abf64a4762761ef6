pub mod attributes;
pub mod error;
pub mod mesh;
pub mod object3d;
pub mod scene;
pub mod snapshot;
pub mod transform;

// Re-export main types for convenience
pub use attributes::{AttributeValue, Attributes};
pub use object3d::{Object3D, ObjectId, ObjectKind};
pub use scene::Scene;
pub use snapshot::{load_scene, write_snapshot, LoadedScene, ObjectDescriptor, SceneFormat, SceneSnapshot};
pub use transform::Transform;
