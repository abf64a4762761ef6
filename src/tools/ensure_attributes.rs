use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::export::attributes::{indexed_value_key, TYPE_KEY, VALUE_KEY, VISIBLE_KEY};
use crate::scene_graph::{AttributeValue, Attributes, Scene};

pub const BUILTIN_PROFILES: &[&str] = &["graphics", "platform", "indexed"];

/// Default attributes every mesh object should carry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AttributeProfile {
    pub defaults: Attributes,
    /// Obsolete keys deleted from every mesh object.
    #[serde(default)]
    pub remove: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum EnsureMode {
    /// Only add attributes that are missing.
    #[default]
    FillMissing,
    /// Also overwrite attributes that are present. Destroys manual edits.
    ForceReset,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnsureReport {
    pub objects: usize,
    pub added: usize,
    pub reset: usize,
    pub removed: usize,
}

impl EnsureReport {
    pub fn changed(&self) -> bool {
        self.added + self.reset + self.removed > 0
    }
}

pub fn builtin_profile(name: &str) -> Option<AttributeProfile> {
    let mut defaults = Attributes::new();

    let remove = match name {
        "graphics" => {
            defaults.insert(TYPE_KEY.into(), AttributeValue::from("GraphicsObject"));
            for index in 0..4 {
                defaults.insert(indexed_value_key(index), AttributeValue::Int(0));
            }
            vec![VISIBLE_KEY.to_string()]
        }
        "platform" => {
            defaults.insert(TYPE_KEY.into(), AttributeValue::from("platform"));
            defaults.insert(VALUE_KEY.into(), AttributeValue::Int(0));
            defaults.insert(VISIBLE_KEY.into(), AttributeValue::Bool(true));
            Vec::new()
        }
        "indexed" => {
            defaults.insert(TYPE_KEY.into(), AttributeValue::from("platform"));
            for index in 0..2 {
                defaults.insert(indexed_value_key(index), AttributeValue::Int(0));
            }
            defaults.insert(VISIBLE_KEY.into(), AttributeValue::Bool(true));
            Vec::new()
        }
        _ => return None,
    };

    Some(AttributeProfile { defaults, remove })
}

/// Applies a profile to every mesh object in the scene.
pub fn ensure_attributes(scene: &mut Scene, profile: &AttributeProfile, mode: EnsureMode) -> EnsureReport {
    let mut report = EnsureReport::default();

    for (_, object) in scene.iter_objects_mut() {
        if !object.is_mesh() {
            continue;
        }
        report.objects += 1;

        for (key, default) in &profile.defaults {
            match object.attributes.get_mut(key) {
                None => {
                    object.attributes.insert(key.clone(), default.clone());
                    report.added += 1;
                }
                Some(current) if mode == EnsureMode::ForceReset && current != default => {
                    log::debug!("{}: resetting {} from {} to {}", object.name, key, current, default);
                    *current = default.clone();
                    report.reset += 1;
                }
                Some(_) => {}
            }
        }

        for key in &profile.remove {
            if object.attributes.remove(key).is_some() {
                report.removed += 1;
            }
        }
    }

    report
}
