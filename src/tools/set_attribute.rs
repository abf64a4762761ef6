use crate::scene_graph::{AttributeValue, ObjectId, Scene};

/// Sets `key` on every target object, replacing any previous value.
/// Returns the names of the updated objects.
pub fn set_attribute(
    scene: &mut Scene,
    targets: &[ObjectId],
    key: &str,
    value: &AttributeValue,
) -> Vec<String> {
    let mut updated = Vec::with_capacity(targets.len());

    for &object_id in targets {
        if let Some(object) = scene.get_object_mut(object_id) {
            object.attributes.insert(key.to_string(), value.clone());
            updated.push(object.name.clone());
        }
    }

    updated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::*;

    #[test]
    fn test_sets_only_targets() {
        let mut scene = scene_from(vec![
            mesh_descriptor("Ladder", [0.0; 3], &[]),
            empty_descriptor("Marker"),
            mesh_descriptor("Floor", [0.0; 3], &[]),
        ]);
        let targets = scene.resolve_selection(&["Ladder", "Marker"]);

        let updated = set_attribute(
            &mut scene,
            &targets,
            "isConnectedLadder",
            &AttributeValue::Bool(true),
        );
        assert_eq!(updated, vec!["Ladder".to_string(), "Marker".to_string()]);

        let value_of = |name: &str| {
            let id = scene.get_object_by_name(name).unwrap();
            scene
                .get_object(id)
                .unwrap()
                .attribute("isConnectedLadder")
                .cloned()
        };
        assert_eq!(value_of("Ladder"), Some(AttributeValue::Bool(true)));
        assert_eq!(value_of("Marker"), Some(AttributeValue::Bool(true)));
        assert_eq!(value_of("Floor"), None);
    }
}
