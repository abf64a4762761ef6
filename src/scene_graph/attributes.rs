use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Custom key/value metadata attached to a scene object.
pub type Attributes = BTreeMap<String, AttributeValue>;

/// A scalar custom attribute as stored by the host editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl AttributeValue {
    /// Booleans as-is, integers as `!= 0`. Anything else has no truth value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Bool(value) => Some(*value),
            AttributeValue::Int(value) => Some(*value != 0),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            AttributeValue::Bool(_) => "bool",
            AttributeValue::Int(_) => "int",
            AttributeValue::Float(_) => "float",
            AttributeValue::String(_) => "string",
        }
    }

    /// Converts a JSON scalar. Arrays, objects and null have no attribute form.
    pub fn from_json(value: &serde_json::Value) -> Option<AttributeValue> {
        match value {
            serde_json::Value::Bool(value) => Some(AttributeValue::Bool(*value)),
            serde_json::Value::Number(number) => number
                .as_i64()
                .map(AttributeValue::Int)
                .or_else(|| number.as_f64().map(AttributeValue::Float)),
            serde_json::Value::String(value) => Some(AttributeValue::String(value.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Bool(value) => write!(f, "{}", value),
            AttributeValue::Int(value) => write!(f, "{}", value),
            AttributeValue::Float(value) => write!(f, "{}", value),
            AttributeValue::String(value) => write!(f, "{}", value),
        }
    }
}

impl FromStr for AttributeValue {
    type Err = std::convert::Infallible;

    /// Command-line form: `true`/`false`, integers and floats are typed,
    /// everything else is a string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(value) = s.parse::<bool>() {
            return Ok(AttributeValue::Bool(value));
        }
        if let Ok(value) = s.parse::<i64>() {
            return Ok(AttributeValue::Int(value));
        }
        if let Ok(value) = s.parse::<f64>() {
            return Ok(AttributeValue::Float(value));
        }

        Ok(AttributeValue::String(s.to_string()))
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::String(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untagged_deserialize() {
        let attributes: Attributes = serde_json::from_str(
            r#"{"a": true, "b": 3, "c": 0.5, "d": "OneWayPlatform"}"#,
        )
        .unwrap();

        assert_eq!(attributes["a"], AttributeValue::Bool(true));
        assert_eq!(attributes["b"], AttributeValue::Int(3));
        assert_eq!(attributes["c"], AttributeValue::Float(0.5));
        assert_eq!(attributes["d"], AttributeValue::from("OneWayPlatform"));
    }

    #[test]
    fn test_parse_command_line_values() {
        assert_eq!("true".parse::<AttributeValue>().unwrap(), AttributeValue::Bool(true));
        assert_eq!("12".parse::<AttributeValue>().unwrap(), AttributeValue::Int(12));
        assert_eq!("-1.5".parse::<AttributeValue>().unwrap(), AttributeValue::Float(-1.5));
        assert_eq!(
            "ladder".parse::<AttributeValue>().unwrap(),
            AttributeValue::from("ladder")
        );
    }

    #[test]
    fn test_truth_values() {
        assert_eq!(AttributeValue::Int(0).as_bool(), Some(false));
        assert_eq!(AttributeValue::Int(2).as_bool(), Some(true));
        assert_eq!(AttributeValue::Float(1.0).as_bool(), None);
        assert_eq!(AttributeValue::from("true").as_bool(), None);
    }

    #[test]
    fn test_from_json_skips_compound_values() {
        assert_eq!(AttributeValue::from_json(&serde_json::json!([1, 2])), None);
        assert_eq!(AttributeValue::from_json(&serde_json::Value::Null), None);
        assert_eq!(
            AttributeValue::from_json(&serde_json::json!(7)),
            Some(AttributeValue::Int(7))
        );
    }
}
