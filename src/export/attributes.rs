use crate::export::schema::ValueLayout;
use crate::scene_graph::{AttributeValue, Object3D};

pub const TYPE_KEY: &str = "gameObjectType";
pub const VALUE_KEY: &str = "gameObjectValue";
pub const VISIBLE_KEY: &str = "gameObjectVisible";

/// `gameObjectValue0`, `gameObjectValue1`, ...
pub fn indexed_value_key(index: usize) -> String {
    format!("{}{}", VALUE_KEY, index)
}

/// Game metadata read off one object. Missing attributes are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameAttributes {
    pub object_type: Option<String>,
    pub values: Vec<Option<AttributeValue>>,
    pub visible: Option<bool>,
}

pub fn read_game_attributes(object: &Object3D, layout: ValueLayout) -> GameAttributes {
    let object_type = match object.attribute(TYPE_KEY) {
        Some(AttributeValue::String(value)) => Some(value.clone()),
        Some(other) => {
            log::warn!(
                "{}: {} is a {}, not a string; exporting null",
                object.name,
                TYPE_KEY,
                other.type_name()
            );
            None
        }
        None => None,
    };

    let values = match layout {
        ValueLayout::Single => vec![object.attribute(VALUE_KEY).cloned()],
        ValueLayout::Indexed(slots) => (0..slots as usize)
            .map(|index| object.attribute(&indexed_value_key(index)).cloned())
            .collect(),
    };

    let visible = object.attribute(VISIBLE_KEY).and_then(|value| {
        let visible = value.as_bool();
        if visible.is_none() {
            log::warn!(
                "{}: {} is a {}; exporting null",
                object.name,
                VISIBLE_KEY,
                value.type_name()
            );
        }
        visible
    });

    GameAttributes {
        object_type,
        values,
        visible,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene_graph::{ObjectKind, Transform};

    fn object_with(attributes: &[(&str, AttributeValue)]) -> Object3D {
        let mut object = Object3D::new("Obj", ObjectKind::Mesh, Transform::default());
        for (key, value) in attributes {
            object.attributes.insert(key.to_string(), value.clone());
        }
        object
    }

    #[test]
    fn test_missing_attributes_are_null() {
        let object = object_with(&[]);

        let attributes = read_game_attributes(&object, ValueLayout::Indexed(4));
        assert_eq!(attributes.object_type, None);
        assert_eq!(attributes.values, vec![None; 4]);
        assert_eq!(attributes.visible, None);

        let attributes = read_game_attributes(&object, ValueLayout::Single);
        assert_eq!(attributes.values, vec![None]);
    }

    #[test]
    fn test_reads_present_attributes() {
        let object = object_with(&[
            (TYPE_KEY, AttributeValue::from("Teleporter")),
            ("gameObjectValue0", AttributeValue::Int(2)),
            ("gameObjectValue2", AttributeValue::Float(0.5)),
            (VISIBLE_KEY, AttributeValue::Int(0)),
        ]);

        let attributes = read_game_attributes(&object, ValueLayout::Indexed(3));
        assert_eq!(attributes.object_type.as_deref(), Some("Teleporter"));
        assert_eq!(
            attributes.values,
            vec![
                Some(AttributeValue::Int(2)),
                None,
                Some(AttributeValue::Float(0.5))
            ]
        );
        assert_eq!(attributes.visible, Some(false));
    }

    #[test]
    fn test_non_string_type_reads_as_null() {
        let object = object_with(&[(TYPE_KEY, AttributeValue::Int(5))]);
        assert_eq!(read_game_attributes(&object, ValueLayout::Single).object_type, None);
    }
}
