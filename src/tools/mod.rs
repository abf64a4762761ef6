//! Scene edits that prepare objects for export.

pub mod ensure_attributes;
pub mod merge;
pub mod rename_types;
pub mod set_attribute;
