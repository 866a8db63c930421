use crate::claude::types::ClaudeConfig;
use crate::error::Result;

/// Pretty-printed JSON with two-space indentation, fields in declaration order.
pub fn export_json(config: &ClaudeConfig) -> Result<String> {
    Ok(serde_json::to_string_pretty(config)?)
}
