use crate::export::attributes::TYPE_KEY;
use crate::scene_graph::{AttributeValue, ObjectId, Scene};

/// Type names the level loader knows, matched case-insensitively.
const CANONICAL_TYPES: &[&str] = &[
    "TrashCan",
    "PlayerStart",
    "CameraStart",
    "BarrelLauncher",
    "CameraSensor",
    "LadderTopSensor",
    "LadderCoreSensor",
    "LadderBottomSensor",
    "OneWayPlatform",
    "EdgeOneWayPlatform",
    "LineOneWayPlatform",
    "ConvexOneWayPlatform",
    "WinFlag",
    "CrazyEnemy",
];

/// Canonical spelling of a free-text type, or the value capitalized
/// (first letter upper, rest lower) when it is not a known type.
pub fn canonical_type_name(value: &str) -> String {
    CANONICAL_TYPES
        .iter()
        .find(|canonical| canonical.eq_ignore_ascii_case(value))
        .map(|canonical| canonical.to_string())
        .unwrap_or_else(|| capitalize(value))
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rename {
    pub object: String,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameReport {
    pub renamed: Vec<Rename>,
    /// Objects whose type attribute is not a string.
    pub skipped: Vec<String>,
}

/// Canonicalizes `gameObjectType` on the target objects. Objects without the
/// attribute are left alone.
pub fn rename_types(scene: &mut Scene, targets: &[ObjectId]) -> RenameReport {
    let mut report = RenameReport::default();

    for &object_id in targets {
        let Some(object) = scene.get_object_mut(object_id) else {
            continue;
        };

        let Some(current) = object.attributes.get_mut(TYPE_KEY) else {
            continue;
        };

        let AttributeValue::String(value) = current else {
            log::warn!(
                "Skipped {}: '{}' is a {}, not a string",
                object.name,
                TYPE_KEY,
                current.type_name()
            );
            report.skipped.push(object.name.clone());
            continue;
        };

        let renamed = canonical_type_name(value);
        log::debug!("{}: {} -> {}", object.name, value, renamed);

        report.renamed.push(Rename {
            object: object.name.clone(),
            from: std::mem::replace(value, renamed.clone()),
            to: renamed,
        });
    }

    report
}
