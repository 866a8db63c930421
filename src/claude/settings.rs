use crate::claude::types::Settings;
use crate::config::SETTINGS_FILE;
use crate::error::{CcsettingError, Result};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Load `<claude_dir>/settings.json`. A missing file is `Ok(None)`; invalid JSON is fatal.
pub fn load_settings(claude_dir: &Path) -> Result<Option<Settings>> {
    let path = claude_dir.join(SETTINGS_FILE);
    if !path.exists() {
        debug!(path = %path.display(), "no settings file");
        return Ok(None);
    }

    let content = fs::read_to_string(&path).map_err(|e| CcsettingError::read(&path, e))?;
    let object = serde_json::from_str::<IndexMap<String, Value>>(&content)
        .map_err(|e| CcsettingError::parse(&path, e))?;
    let settings = decode(&path, object);
    debug!(path = %path.display(), "loaded settings");
    Ok(Some(settings))
}

/// Decode one top-level key at a time. A known key holding a value of an unexpected
/// shape lands in the extension map untouched, so it still reaches the exports.
fn decode(path: &Path, object: IndexMap<String, Value>) -> Settings {
    let mut settings = Settings::default();
    for (key, value) in object {
        let mut single = Map::new();
        single.insert(key.clone(), value.clone());
        match serde_json::from_value::<Settings>(Value::Object(single)) {
            Ok(part) => settings.absorb(part),
            Err(e) => {
                warn!(
                    path = %path.display(),
                    key = %key,
                    error = %e,
                    "keeping settings value as-is"
                );
                settings.extra.insert(key, value);
            }
        }
    }
    settings
}
