use glam::{DVec2, DVec3};
use itertools::Itertools;

use crate::config::ExportConfig;
use crate::export::schema::{DimensionStrategy, PositionStrategy};
use crate::math::AABB;
use crate::scene_graph::{ObjectId, Scene};

/// Geometric part of a level record.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometrySummary {
    pub position: DVec3,
    pub dimensions: DVec3,
    /// Euler XYZ radians, as stored on the object.
    pub rotation: DVec3,
    /// World-space bounds, `None` for meshes without vertices.
    pub bounds: Option<AABB>,
    /// (X, Z) outline, empty unless the type is allow-listed.
    pub vertices2d: Vec<DVec2>,
}

pub fn summarize(
    scene: &Scene,
    object_id: ObjectId,
    object_type: Option<&str>,
    config: &ExportConfig,
) -> GeometrySummary {
    let Some(object) = scene.get_object(object_id) else {
        return GeometrySummary {
            position: DVec3::ZERO,
            dimensions: DVec3::ZERO,
            rotation: DVec3::ZERO,
            bounds: None,
            vertices2d: Vec::new(),
        };
    };

    let world_matrix = scene.world_matrix(object_id);
    let origin = world_matrix.transform_point3(DVec3::ZERO);
    let world_vertices = scene.world_vertices(object_id);
    let bounds = AABB::from_points(world_vertices.iter().copied());

    let uses_bounds = config.position == PositionStrategy::BoundsCenter
        || config.dimensions != DimensionStrategy::TransformScale;
    if world_vertices.is_empty() && uses_bounds {
        log::warn!(
            "{} has no vertices; using its origin and zero size",
            object.name
        );
    }

    let position = match config.position {
        PositionStrategy::Origin => origin,
        PositionStrategy::BoundsCenter => bounds.map(|bounds| bounds.center()).unwrap_or(origin),
    };

    let dimensions = match config.dimensions {
        DimensionStrategy::LocalBounds => scene
            .object_mesh(object_id)
            .and_then(|mesh| mesh.local_bounds())
            .map(|local| (local.size() * object.transform.scale()).abs())
            .unwrap_or(DVec3::ZERO),
        DimensionStrategy::WorldBounds => bounds.map(|bounds| bounds.size()).unwrap_or(DVec3::ZERO),
        DimensionStrategy::TransformScale => object.transform.scale() * 2.0,
    };

    let vertices2d = if config.exports_outline(object_type) {
        project_outline(&world_vertices)
    } else {
        Vec::new()
    };

    GeometrySummary {
        position,
        dimensions,
        rotation: object.transform.rotation(),
        bounds,
        vertices2d,
    }
}

/// Projects world-space vertices onto the (X, Z) plane, ordered by X.
/// Equal X keeps vertex order. NaN sorts after every number.
pub fn project_outline(world_vertices: &[DVec3]) -> Vec<DVec2> {
    world_vertices
        .iter()
        .map(|vertex| DVec2::new(vertex.x, vertex.z))
        .sorted_by(|a, b| a.x.total_cmp(&b.x))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::schema::SchemaPreset;
    use crate::fixtures::*;

    #[test]
    fn test_outline_sorted_by_x() {
        let outline = project_outline(&[
            DVec3::new(2.0, 0.0, 1.0),
            DVec3::new(0.0, 0.0, 1.0),
            DVec3::new(1.0, 0.0, 0.0),
        ]);
        assert_eq!(
            outline,
            vec![DVec2::new(0.0, 1.0), DVec2::new(1.0, 0.0), DVec2::new(2.0, 1.0)]
        );
    }

    #[test]
    fn test_outline_ties_keep_vertex_order() {
        let outline = project_outline(&[
            DVec3::new(1.0, 0.0, 3.0),
            DVec3::new(0.0, 0.0, 9.0),
            DVec3::new(1.0, 0.0, -1.0),
            DVec3::new(1.0, 5.0, 2.0),
        ]);
        assert_eq!(
            outline,
            vec![
                DVec2::new(0.0, 9.0),
                DVec2::new(1.0, 3.0),
                DVec2::new(1.0, -1.0),
                DVec2::new(1.0, 2.0),
            ]
        );
    }

    #[test]
    fn test_outline_with_nan_vertices() {
        let vertices: Vec<DVec3> = (0..40)
            .map(|i| {
                let x = if i % 3 == 0 { f64::NAN } else { (40 - i) as f64 };
                DVec3::new(x, 0.0, i as f64)
            })
            .collect();

        let outline = project_outline(&vertices);
        assert_eq!(outline.len(), 40);

        let (finite, nan): (Vec<&DVec2>, Vec<&DVec2>) = outline.iter().partition(|v| !v.x.is_nan());
        assert_eq!(nan.len(), 14);
        assert!(finite.windows(2).all(|pair| pair[0].x <= pair[1].x));
        // Every NaN vertex is placed after the finite ones, in vertex order
        assert!(outline[..26].iter().all(|v| !v.x.is_nan()));
        assert!(nan.windows(2).all(|pair| pair[0].y < pair[1].y));
    }

    #[test]
    fn test_position_strategies() {
        // Vertices are offset from the origin so the two strategies differ
        let mut descriptor = mesh_descriptor(
            "Offset",
            [10.0, 0.0, 0.0],
            &[[1.0, 1.0, 1.0], [3.0, 1.0, 1.0], [1.0, 3.0, 5.0]],
        );
        descriptor.scale = [2.0, 1.0, 1.0];
        let scene = scene_from(vec![descriptor]);
        let id = scene.get_object_by_name("Offset").unwrap();

        let mut config = ExportConfig::default();
        config.position = PositionStrategy::Origin;
        let summary = summarize(&scene, id, None, &config);
        assert_eq!(summary.position, DVec3::new(10.0, 0.0, 0.0));

        config.position = PositionStrategy::BoundsCenter;
        let summary = summarize(&scene, id, None, &config);
        // World x spans 12..16, y 1..3, z 1..5
        assert_eq!(summary.position, DVec3::new(14.0, 2.0, 3.0));
        assert_eq!(
            summary.bounds.unwrap(),
            AABB::new(DVec3::new(12.0, 1.0, 1.0), DVec3::new(16.0, 3.0, 5.0))
        );
    }

    #[test]
    fn test_dimension_strategies() {
        let mut descriptor = mesh_descriptor("Box", [0.0; 3], &unit_cube());
        descriptor.scale = [2.0, 3.0, 0.5];
        descriptor.rotation = [0.0, 0.0, std::f64::consts::FRAC_PI_2];
        let scene = scene_from(vec![descriptor]);
        let id = scene.get_object_by_name("Box").unwrap();

        let mut config = ExportConfig::default();

        config.dimensions = DimensionStrategy::LocalBounds;
        let dimensions = summarize(&scene, id, None, &config).dimensions;
        assert!(dimensions.abs_diff_eq(DVec3::new(4.0, 6.0, 1.0), 1e-9));

        // Rotated a quarter turn about Z, so world X and Y swap
        config.dimensions = DimensionStrategy::WorldBounds;
        let dimensions = summarize(&scene, id, None, &config).dimensions;
        assert!(dimensions.abs_diff_eq(DVec3::new(6.0, 4.0, 1.0), 1e-9));

        config.dimensions = DimensionStrategy::TransformScale;
        let dimensions = summarize(&scene, id, None, &config).dimensions;
        assert_eq!(dimensions, DVec3::new(4.0, 6.0, 1.0));
    }

    #[test]
    fn test_rotation_is_not_normalized() {
        let mut descriptor = mesh_descriptor("Spun", [0.0; 3], &unit_cube());
        descriptor.rotation = [7.0, -4.0, 0.25];
        let scene = scene_from(vec![descriptor]);
        let id = scene.get_object_by_name("Spun").unwrap();

        let summary = summarize(&scene, id, None, &ExportConfig::default());
        assert_eq!(summary.rotation, DVec3::new(7.0, -4.0, 0.25));
    }

    #[test]
    fn test_outline_only_for_allow_listed_types() {
        let scene = scene_from(vec![mesh_descriptor("Plat", [0.0; 3], &unit_cube())]);
        let id = scene.get_object_by_name("Plat").unwrap();
        let config = ExportConfig::from_preset(SchemaPreset::Current);

        assert!(summarize(&scene, id, Some("Platform"), &config)
            .vertices2d
            .is_empty());
        assert!(summarize(&scene, id, None, &config).vertices2d.is_empty());

        let outline = summarize(&scene, id, Some("EdgeOneWayPlatform"), &config).vertices2d;
        assert_eq!(outline.len(), 8);
        assert!(outline.windows(2).all(|pair| pair[0].x <= pair[1].x));
    }

    #[test]
    fn test_empty_mesh_falls_back_to_origin() {
        let scene = scene_from(vec![mesh_descriptor("Empty", [1.0, 2.0, 3.0], &[])]);
        let id = scene.get_object_by_name("Empty").unwrap();
        let config = ExportConfig::from_preset(SchemaPreset::Legacy);

        let summary = summarize(&scene, id, None, &config);
        assert_eq!(summary.position, DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(summary.dimensions, DVec3::ZERO);
        assert!(summary.bounds.is_none());
    }
}
