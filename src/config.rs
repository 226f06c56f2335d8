//! Load/save of the JSON configuration record at `<app-data-dir>/config.json`.
//!
//! The record is kept as a raw JSON object so fields owned by other parts of
//! the app survive a read-modify-write cycle untouched.

use std::path::Path;

use serde_json::{Map, Value};

use crate::error::AppError;

/// The persisted configuration record: a flat JSON object.
pub type ConfigMap = Map<String, Value>;

/// Load the configuration record from `path`.
///
/// A missing or empty file means "no prior config" and yields an empty
/// record.
/// Malformed JSON propagates as a parse failure; callers decide whether to
/// abort or fall back.
pub fn load_config(path: &Path) -> Result<ConfigMap, AppError> {
    if !path.exists() {
        return Ok(ConfigMap::new());
    }

    let raw = std::fs::read_to_string(path)?;
    if raw.trim().is_empty() {
        return Ok(ConfigMap::new());
    }

    match serde_json::from_str::<Value>(&raw)? {
        Value::Object(map) => Ok(map),
        _ => Err(AppError::Config(format!(
            "{}: expected a JSON object at the top level",
            path.display()
        ))),
    }
}

/// Persist the full record as pretty-printed JSON, creating parent
/// directories as needed.
pub fn save_config(path: &Path, config: &ConfigMap) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(path, json)?;
    Ok(())
}
