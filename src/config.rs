use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::export::schema::{
    DimensionStrategy, ExportFields, ExportScope, PositionStrategy, SchemaPreset, ValueLayout,
};
use crate::tools::ensure_attributes::{builtin_profile, AttributeProfile, BUILTIN_PROFILES};

/// Object types that get a projected 2D outline.
pub const DEFAULT_VERTEX_TYPES: &[&str] = &[
    "ConvexOneWayPlatform",
    "EdgeOneWayPlatform",
    "LineOneWayPlatform",
    "LadderCoreSensor",
];

pub const DEFAULT_OUTPUT: &str = "blenderExport.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown attribute profile {name:?} (known: {known})")]
    UnknownProfile { name: String, known: String },
}

/// Fully resolved settings of one export pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportConfig {
    pub output: PathBuf,
    pub scope: ExportScope,
    pub position: PositionStrategy,
    pub dimensions: DimensionStrategy,
    pub fields: ExportFields,
    pub vertex_types: Vec<String>,
    pub indent: usize,
}

impl ExportConfig {
    pub fn from_preset(preset: SchemaPreset) -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            scope: preset.scope(),
            position: preset.position(),
            dimensions: preset.dimensions(),
            fields: preset.fields(),
            vertex_types: DEFAULT_VERTEX_TYPES.iter().map(|t| t.to_string()).collect(),
            indent: 4,
        }
    }

    pub fn apply(&mut self, overrides: &ExportOverrides) {
        if let Some(output) = &overrides.output {
            self.output = output.clone();
        }
        if let Some(scope) = overrides.scope {
            self.scope = scope;
        }
        if let Some(position) = overrides.position {
            self.position = position;
        }
        if let Some(dimensions) = overrides.dimensions {
            self.dimensions = dimensions;
        }
        if let Some(bounds) = overrides.bounds {
            self.fields.bounds = bounds;
        }
        if let Some(rotation) = overrides.rotation {
            self.fields.rotation = rotation;
        }
        if let Some(values) = overrides.values {
            self.fields.values = values;
        }
        if let Some(visible) = overrides.visible {
            self.fields.visible = visible;
        }
        if let Some(vertices) = overrides.vertices {
            self.fields.vertices = vertices;
        }
        if let Some(vertex_types) = &overrides.vertex_types {
            self.vertex_types = vertex_types.clone();
        }
        if let Some(indent) = overrides.indent {
            self.indent = indent;
        }
    }

    pub fn exports_outline(&self, object_type: Option<&str>) -> bool {
        object_type.is_some_and(|object_type| self.vertex_types.iter().any(|t| t == object_type))
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self::from_preset(SchemaPreset::default())
    }
}

/// Partial export settings layered over a preset, from the config file or
/// the command line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportOverrides {
    pub output: Option<PathBuf>,
    pub scope: Option<ExportScope>,
    pub position: Option<PositionStrategy>,
    pub dimensions: Option<DimensionStrategy>,
    pub bounds: Option<bool>,
    pub rotation: Option<bool>,
    pub values: Option<ValueLayout>,
    pub visible: Option<bool>,
    pub vertices: Option<bool>,
    pub vertex_types: Option<Vec<String>>,
    pub indent: Option<usize>,
}

/// Contents of the `--config` JSON file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    pub preset: Option<SchemaPreset>,
    pub export: ExportOverrides,
    /// Attribute profiles, checked before the built-in ones.
    pub profiles: BTreeMap<String, AttributeProfile>,
}

impl ToolConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config: ToolConfig =
            serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        log::debug!("Loaded config from {}", path.display());

        Ok(config)
    }

    /// Preset, then config file overrides, then command-line overrides.
    pub fn export_config(
        &self,
        preset: Option<SchemaPreset>,
        cli: &ExportOverrides,
    ) -> ExportConfig {
        let preset = preset.or(self.preset).unwrap_or_default();
        let mut config = ExportConfig::from_preset(preset);
        config.apply(&self.export);
        config.apply(cli);
        config
    }

    pub fn profile(&self, name: &str) -> Result<AttributeProfile, ConfigError> {
        if let Some(profile) = self.profiles.get(name) {
            return Ok(profile.clone());
        }

        builtin_profile(name).ok_or_else(|| ConfigError::UnknownProfile {
            name: name.to_string(),
            known: self
                .profiles
                .keys()
                .map(String::as_str)
                .chain(BUILTIN_PROFILES.iter().copied())
                .collect::<Vec<_>>()
                .join(", "),
        })
    }
}
