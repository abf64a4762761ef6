use glam::{DVec2, DVec3};
use serde_json::{json, Map, Value};

use crate::export::attributes::GameAttributes;
use crate::export::geometry::GeometrySummary;
use crate::export::schema::{ExportFields, ValueLayout};
use crate::math::AABB;
use crate::scene_graph::AttributeValue;

/// One object's entry in the level file.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRecord {
    pub position: DVec3,
    pub dimensions: DVec3,
    pub rotation: DVec3,
    pub bounds: Option<AABB>,
    pub object_type: Option<String>,
    pub values: Vec<Option<AttributeValue>>,
    pub visible: Option<bool>,
    pub vertices2d: Vec<DVec2>,
}

impl ExportRecord {
    pub fn new(geometry: GeometrySummary, attributes: GameAttributes) -> Self {
        Self {
            position: geometry.position,
            dimensions: geometry.dimensions,
            rotation: geometry.rotation,
            bounds: geometry.bounds,
            object_type: attributes.object_type,
            values: attributes.values,
            visible: attributes.visible,
            vertices2d: geometry.vertices2d,
        }
    }

    /// JSON object with keys in schema order.
    pub fn to_json(&self, fields: &ExportFields) -> Value {
        let mut record = Map::new();

        if fields.bounds {
            let (min, max) = match self.bounds {
                Some(bounds) => (Some(bounds.min), Some(bounds.max)),
                None => (None, None),
            };
            for (axis, index) in [("x", 0), ("y", 1), ("z", 2)] {
                record.insert(format!("min_{}", axis), json!(min.map(|min| min[index])));
                record.insert(format!("max_{}", axis), json!(max.map(|max| max[index])));
            }
        }

        record.insert("width".into(), json!(self.dimensions.x));
        record.insert("height".into(), json!(self.dimensions.y));
        record.insert("depth".into(), json!(self.dimensions.z));
        record.insert("position".into(), vec3(self.position));

        if fields.rotation {
            record.insert("rotation".into(), vec3(self.rotation));
        }

        record.insert("type".into(), json!(self.object_type));

        match fields.values {
            ValueLayout::Single => {
                record.insert("value".into(), json!(self.value(0)));
            }
            ValueLayout::Indexed(slots) => {
                for index in 0..slots as usize {
                    record.insert(format!("value{}", index), json!(self.value(index)));
                }
            }
        }

        if fields.visible {
            record.insert("visible".into(), json!(self.visible));
        }

        if fields.vertices && !self.vertices2d.is_empty() {
            let vertices = self
                .vertices2d
                .iter()
                .map(|vertex| json!([vertex.x, vertex.y]))
                .collect();
            record.insert("vertices".into(), Value::Array(vertices));
        }

        Value::Object(record)
    }

    /// Fields holding NaN or infinity. JSON has no form for those, so they
    /// are written as null.
    pub fn non_finite_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();

        if !self.position.is_finite() {
            fields.push("position");
        }
        if !self.dimensions.is_finite() {
            fields.push("dimensions");
        }
        if !self.rotation.is_finite() {
            fields.push("rotation");
        }
        if self
            .bounds
            .is_some_and(|bounds| !bounds.min.is_finite() || !bounds.max.is_finite())
        {
            fields.push("bounds");
        }
        if self.vertices2d.iter().any(|vertex| !vertex.is_finite()) {
            fields.push("vertices");
        }

        fields
    }

    fn value(&self, index: usize) -> Option<&AttributeValue> {
        self.values.get(index).and_then(Option::as_ref)
    }
}

fn vec3(v: DVec3) -> Value {
    json!([v.x, v.y, v.z])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::schema::SchemaPreset;

    fn record() -> ExportRecord {
        ExportRecord {
            position: DVec3::new(1.0, 2.0, 3.0),
            dimensions: DVec3::new(4.0, 5.0, 6.0),
            rotation: DVec3::new(0.0, 0.5, 0.0),
            bounds: Some(AABB::new(DVec3::new(-1.0, 0.0, 1.0), DVec3::new(3.0, 4.0, 5.0))),
            object_type: Some("EdgeOneWayPlatform".to_string()),
            values: vec![Some(AttributeValue::Int(1)), None],
            visible: Some(true),
            vertices2d: vec![DVec2::new(0.0, 1.0), DVec2::new(2.0, 1.0)],
        }
    }

    fn keys(value: &Value) -> Vec<&str> {
        value.as_object().unwrap().keys().map(String::as_str).collect()
    }

    #[test]
    fn test_current_layout() {
        let json = record().to_json(&SchemaPreset::Current.fields());

        assert_eq!(
            keys(&json),
            vec![
                "width", "height", "depth", "position", "rotation", "type", "value0", "value1",
                "value2", "value3", "vertices"
            ]
        );
        assert_eq!(json["value0"], json!(1));
        assert_eq!(json["value1"], Value::Null);
        assert_eq!(json["value3"], Value::Null);
        assert_eq!(json["vertices"], json!([[0.0, 1.0], [2.0, 1.0]]));
    }

    #[test]
    fn test_legacy_layout() {
        let json = record().to_json(&SchemaPreset::Legacy.fields());

        assert_eq!(
            keys(&json),
            vec![
                "min_x", "max_x", "min_y", "max_y", "min_z", "max_z", "width", "height", "depth",
                "position", "type", "value"
            ]
        );
        assert_eq!(json["min_x"], json!(-1.0));
        assert_eq!(json["max_z"], json!(5.0));
        assert_eq!(json["value"], json!(1));
    }

    #[test]
    fn test_level_layout() {
        let mut record = record();
        record.object_type = None;
        record.visible = None;
        let json = record.to_json(&SchemaPreset::Level.fields());

        assert_eq!(
            keys(&json),
            vec!["width", "height", "depth", "position", "rotation", "type", "value", "visible"]
        );
        assert_eq!(json["type"], Value::Null);
        assert_eq!(json["visible"], Value::Null);
        assert_eq!(json["rotation"], json!([0.0, 0.5, 0.0]));
    }

    #[test]
    fn test_empty_outline_omitted() {
        let mut record = record();
        record.vertices2d.clear();
        let json = record.to_json(&SchemaPreset::Current.fields());
        assert!(json.get("vertices").is_none());
    }

    #[test]
    fn test_missing_bounds_are_null() {
        let mut record = record();
        record.bounds = None;
        let json = record.to_json(&SchemaPreset::Legacy.fields());
        assert_eq!(json["min_y"], Value::Null);
    }

    #[test]
    fn test_non_finite_fields() {
        assert!(record().non_finite_fields().is_empty());

        let mut record = record();
        record.dimensions.x = f64::NAN;
        record.vertices2d.push(DVec2::new(f64::INFINITY, 0.0));
        assert_eq!(record.non_finite_fields(), vec!["dimensions", "vertices"]);

        let json = record.to_json(&SchemaPreset::Current.fields());
        assert_eq!(json["width"], Value::Null);
        assert_eq!(json["height"], json!(5.0));
    }
}
