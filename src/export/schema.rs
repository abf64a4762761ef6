use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Where a record's `position` comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PositionStrategy {
    /// World-space origin of the object.
    Origin,
    /// Center of the world-space bounding box of the mesh vertices.
    BoundsCenter,
}

/// Where a record's `width`/`height`/`depth` come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DimensionStrategy {
    /// Local bounding box extents multiplied by the object scale.
    LocalBounds,
    /// Extents of the world-space bounding box of the mesh vertices.
    WorldBounds,
    /// Object scale times two (a unit host cube spans two units).
    TransformScale,
}

/// Which objects one export pass looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ExportScope {
    Scene,
    Selection,
}

/// How game values are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValueLayout {
    /// One `value` field read from `gameObjectValue`.
    Single,
    /// `value0..valueN-1` read from `gameObjectValue0..N-1`.
    Indexed(u8),
}

impl ValueLayout {
    /// `0` slots means the single-value layout.
    pub fn from_slots(slots: u8) -> Self {
        match slots {
            0 => ValueLayout::Single,
            slots => ValueLayout::Indexed(slots),
        }
    }
}

/// Optional fields of a level record. `width`, `height`, `depth`,
/// `position` and `type` are always written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportFields {
    pub bounds: bool,
    pub rotation: bool,
    pub values: ValueLayout,
    pub visible: bool,
    pub vertices: bool,
}

/// Named record layouts matching the level loaders that consume them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SchemaPreset {
    /// Selection export with raw bounds and a single value.
    Legacy,
    /// Whole-scene export with rotation, visibility and scale-based size.
    Level,
    /// Four indexed values and 2D outlines for platforms.
    #[default]
    Current,
}

impl SchemaPreset {
    pub fn fields(&self) -> ExportFields {
        match self {
            SchemaPreset::Legacy => ExportFields {
                bounds: true,
                rotation: false,
                values: ValueLayout::Single,
                visible: false,
                vertices: false,
            },
            SchemaPreset::Level => ExportFields {
                bounds: false,
                rotation: true,
                values: ValueLayout::Single,
                visible: true,
                vertices: false,
            },
            SchemaPreset::Current => ExportFields {
                bounds: false,
                rotation: true,
                values: ValueLayout::Indexed(4),
                visible: false,
                vertices: true,
            },
        }
    }

    pub fn position(&self) -> PositionStrategy {
        match self {
            SchemaPreset::Legacy | SchemaPreset::Level => PositionStrategy::BoundsCenter,
            SchemaPreset::Current => PositionStrategy::Origin,
        }
    }

    pub fn dimensions(&self) -> DimensionStrategy {
        match self {
            SchemaPreset::Legacy => DimensionStrategy::WorldBounds,
            SchemaPreset::Level => DimensionStrategy::TransformScale,
            SchemaPreset::Current => DimensionStrategy::LocalBounds,
        }
    }

    pub fn scope(&self) -> ExportScope {
        match self {
            SchemaPreset::Legacy => ExportScope::Selection,
            SchemaPreset::Level | SchemaPreset::Current => ExportScope::Scene,
        }
    }
}
