use glam::DMat4;
use thiserror::Error;

use crate::scene_graph::{ObjectId, Scene};

pub const SELECT_AT_LEAST_TWO: &str = "Please select at least two objects.";

#[derive(Debug, Error)]
pub enum MergeError {
    #[error("{0} is not a mesh object")]
    NotAMesh(String),

    #[error("Selected object is no longer in the scene")]
    MissingObject,

    #[error("{0} has a zero scale, so other meshes cannot be moved into its space")]
    DegenerateBase(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Fewer than two objects selected; the scene is untouched.
    Skipped,
    Merged { base: String, removed: Vec<String> },
}

/// Unions the geometry of the selected objects into the first one and removes
/// the others. Geometry is concatenated in the base object's local space;
/// interior faces are kept.
pub fn union_selected(scene: &mut Scene, selection: &[ObjectId]) -> Result<MergeOutcome, MergeError> {
    if selection.len() < 2 {
        return Ok(MergeOutcome::Skipped);
    }
    let base_id = selection[0];
    let others = &selection[1..];

    // Validate everything up front so a failure leaves no partial merge
    for &object_id in selection {
        let object = scene.get_object(object_id).ok_or(MergeError::MissingObject)?;
        if !object.is_mesh() || scene.object_mesh(object_id).is_none() {
            return Err(MergeError::NotAMesh(object.name.clone()));
        }
    }

    let base_mesh_id = scene
        .get_object(base_id)
        .and_then(|object| object.mesh_id)
        .ok_or(MergeError::MissingObject)?;
    let base_name = scene
        .get_object(base_id)
        .map(|object| object.name.clone())
        .ok_or(MergeError::MissingObject)?;
    // Checked before any change so a degenerate base leaves the scene untouched
    base_space(scene, base_id, &base_name)?;

    let mut removed = Vec::with_capacity(others.len());

    for &object_id in others {
        // Removing an ancestor of the base moves the base, so recompute each time
        let to_base = base_space(scene, base_id, &base_name)? * scene.world_matrix(object_id);
        let other_mesh = scene
            .object_mesh(object_id)
            .cloned()
            .ok_or(MergeError::MissingObject)?;

        if let Some(base_mesh) = scene.get_mesh_mut(base_mesh_id) {
            base_mesh.append_transformed(&other_mesh, &to_base);
        }

        if let Some(object) = scene.get_object(object_id) {
            removed.push(object.name.clone());
        }
        scene.remove_object(object_id);
    }

    log::debug!("Merged {} objects into {}", removed.len(), base_name);

    Ok(MergeOutcome::Merged {
        base: base_name,
        removed,
    })
}

/// Inverse of the base's world matrix. Fails when a zero scale (or a
/// non-finite transform) flattens the base so nothing can be moved into it.
fn base_space(scene: &Scene, base_id: ObjectId, base_name: &str) -> Result<DMat4, MergeError> {
    let base_world = scene.world_matrix(base_id);
    let determinant = base_world.determinant();
    if determinant == 0.0 || !determinant.is_finite() {
        return Err(MergeError::DegenerateBase(base_name.to_string()));
    }

    Ok(base_world.inverse())
}
