use glam::{DMat4, DVec3, Vec3};
use gltf::buffer;
use id_arena::Id;

use crate::math::AABB;
use crate::scene_graph::error::SceneError;

pub type MeshId = Id<Mesh>;

pub type Buffers<'a> = &'a [buffer::Data];

/// Vertex data of a mesh object, in object-local space.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh {
    pub name: String,
    pub positions: Vec<DVec3>,
    /// Triangle list. May be empty for point or edge meshes.
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new(name: impl Into<String>, positions: Vec<DVec3>, indices: Vec<u32>) -> Self {
        Self {
            name: name.into(),
            positions,
            indices,
        }
    }

    /// Checks that the index buffer forms whole triangles over existing vertices.
    pub fn validate(&self) -> Result<(), SceneError> {
        if self.indices.len() % 3 != 0 {
            return Err(SceneError::IncompleteTriangle {
                mesh: self.name.clone(),
                count: self.indices.len(),
            });
        }

        if let Some(&index) = self
            .indices
            .iter()
            .find(|&&index| index as usize >= self.positions.len())
        {
            return Err(SceneError::IndexOutOfRange {
                mesh: self.name.clone(),
                index,
                vertex_count: self.positions.len(),
            });
        }

        Ok(())
    }

    pub fn local_bounds(&self) -> Option<AABB> {
        AABB::from_points(self.positions.iter().copied())
    }

    /// Appends another mesh's geometry, moved into this mesh's space by `matrix`.
    pub fn append_transformed(&mut self, other: &Mesh, matrix: &DMat4) {
        let vertex_offset = self.positions.len() as u32;

        self.positions.extend(
            other
                .positions
                .iter()
                .map(|position| matrix.transform_point3(*position)),
        );
        self.indices
            .extend(other.indices.iter().map(|index| index + vertex_offset));
    }

    /// Reads positions and triangle indices of every primitive of a glTF mesh.
    pub fn from_gltf(
        name: impl Into<String>,
        mesh: gltf::Mesh,
        buffers: Buffers,
    ) -> Result<Mesh, SceneError> {
        let mut result = Mesh {
            name: name.into(),
            positions: Vec::new(),
            indices: Vec::new(),
        };

        for primitive in mesh.primitives() {
            let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

            let position_reader =
                reader
                    .read_positions()
                    .ok_or_else(|| SceneError::MissingPositions {
                        mesh: result.name.clone(),
                    })?;

            let vertex_offset = result.positions.len() as u32;
            result
                .positions
                .extend(position_reader.map(|position| Vec3::from(position).as_dvec3()));
            let vertex_count = result.positions.len() as u32 - vertex_offset;

            if primitive.mode() != gltf::mesh::Mode::Triangles {
                log::debug!(
                    "{}: keeping vertices of {:?} primitive {} without faces",
                    result.name,
                    primitive.mode(),
                    primitive.index()
                );
                continue;
            }

            match reader.read_indices() {
                Some(indices) => result
                    .indices
                    .extend(indices.into_u32().map(|index| index + vertex_offset)),
                None => result
                    .indices
                    .extend((0..vertex_count).map(|index| index + vertex_offset)),
            }
        }

        result.validate()?;

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Mesh {
        Mesh::new(
            "Triangle",
            vec![DVec3::ZERO, DVec3::X, DVec3::Y],
            vec![0, 1, 2],
        )
    }

    #[test]
    fn test_validate_accepts_triangle() {
        assert!(triangle().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_dangling_index() {
        let mut mesh = triangle();
        mesh.indices = vec![0, 1, 3];
        assert!(matches!(
            mesh.validate(),
            Err(SceneError::IndexOutOfRange { index: 3, .. })
        ));
    }

    #[test]
    fn test_validate_rejects_partial_triangle() {
        let mut mesh = triangle();
        mesh.indices.push(0);
        assert!(matches!(
            mesh.validate(),
            Err(SceneError::IncompleteTriangle { count: 4, .. })
        ));
    }

    #[test]
    fn test_append_transformed_offsets_indices() {
        let mut mesh = triangle();
        let other = triangle();
        mesh.append_transformed(&other, &DMat4::from_translation(DVec3::new(0.0, 0.0, 5.0)));

        assert_eq!(mesh.positions.len(), 6);
        assert_eq!(mesh.indices, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(mesh.positions[4], DVec3::new(1.0, 0.0, 5.0));
        assert!(mesh.validate().is_ok());
    }
}
