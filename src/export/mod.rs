//! Scene to level-file export: read game attributes, summarize geometry,
//! serialize one record per mesh object keyed by object name.

pub mod attributes;
pub mod geometry;
pub mod record;
pub mod schema;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{ser::PrettyFormatter, Map, Value};
use thiserror::Error;

use crate::config::ExportConfig;
use crate::scene_graph::{ObjectId, Scene};

use record::ExportRecord;
use schema::{ExportFields, ExportScope};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to serialize level: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write level file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// All records of one export pass, ordered by object name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LevelExport {
    records: BTreeMap<String, ExportRecord>,
}

impl LevelExport {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&ExportRecord> {
        self.records.get(name)
    }

    pub fn to_json(&self, fields: &ExportFields) -> Value {
        let records: Map<String, Value> = self
            .records
            .iter()
            .map(|(name, record)| (name.clone(), record.to_json(fields)))
            .collect();

        Value::Object(records)
    }

    /// Pretty-printed with `indent` spaces. No trailing newline.
    pub fn to_pretty_string(&self, fields: &ExportFields, indent: usize) -> Result<String, ExportError> {
        let indent = " ".repeat(indent);
        let mut buffer = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(
            &mut buffer,
            PrettyFormatter::with_indent(indent.as_bytes()),
        );
        self.to_json(fields).serialize(&mut serializer)?;

        // serde_json only writes valid UTF-8
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    /// Overwrites `path` with the whole level.
    pub fn write(&self, path: &Path, fields: &ExportFields, indent: usize) -> Result<(), ExportError> {
        let json = self.to_pretty_string(fields, indent)?;

        std::fs::write(path, json).map_err(|source| ExportError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Objects an export pass looks at, before the mesh filter.
pub fn export_candidates(scene: &Scene, selection: &[ObjectId], scope: ExportScope) -> Vec<ObjectId> {
    match scope {
        ExportScope::Scene => scene.iter_objects().map(|(id, _)| id).collect(),
        ExportScope::Selection => selection.to_vec(),
    }
}

pub fn export_level(scene: &Scene, selection: &[ObjectId], config: &ExportConfig) -> LevelExport {
    let mut level = LevelExport::default();

    if config.scope == ExportScope::Selection && selection.is_empty() {
        log::warn!("Exporting the selection, but nothing is selected");
    }

    for object_id in export_candidates(scene, selection, config.scope) {
        let Some(object) = scene.get_object(object_id) else {
            continue;
        };

        if !object.is_mesh() {
            log::debug!("Skipping {} object {}", object.kind.as_str(), object.name);
            continue;
        }

        let game_attributes = attributes::read_game_attributes(object, config.fields.values);
        let geometry = geometry::summarize(
            scene,
            object_id,
            game_attributes.object_type.as_deref(),
            config,
        );

        log::debug!(
            "{}: type {:?}, position {}, size {}",
            object.name,
            game_attributes.object_type,
            geometry.position,
            geometry.dimensions
        );

        let record = ExportRecord::new(geometry, game_attributes);
        let non_finite = record.non_finite_fields();
        if !non_finite.is_empty() {
            log::warn!(
                "{}: {} not finite, written as null",
                object.name,
                non_finite.join(", ")
            );
        }

        level.records.insert(object.name.clone(), record);
    }

    level
}
