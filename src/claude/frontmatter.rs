//! YAML front matter parsing for markdown documents.
//!
//! A document may start with a block delimited by `---` lines. Only the block is
//! interpreted; the markdown body is dropped.

use crate::error::{CcsettingError, Result};
use serde::de::DeserializeOwned;
use serde_yaml::{Mapping, Value};
use std::path::Path;

const DELIMITER: &str = "---";

#[derive(Debug, PartialEq, Eq)]
enum Block<'a> {
    Absent,
    Present(&'a str),
    Unterminated,
}

fn extract(content: &str) -> Block<'_> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content.split_inclusive('\n');
    let Some(first) = lines.next() else {
        return Block::Absent;
    };
    if first.trim_end() != DELIMITER {
        return Block::Absent;
    }

    let start = first.len();
    let mut offset = start;
    for line in lines {
        if line.trim_end() == DELIMITER {
            return Block::Present(&content[start..offset]);
        }
        offset += line.len();
    }
    Block::Unterminated
}

/// Parse the front matter of `content` into a generic mapping.
///
/// A document without a front matter block yields an empty mapping. An unterminated
/// block, invalid YAML, or a block that is not a mapping is a parse error naming `path`.
pub fn parse_document(path: &Path, content: &str) -> Result<Mapping> {
    let block = match extract(content) {
        Block::Absent => return Ok(Mapping::new()),
        Block::Unterminated => {
            return Err(CcsettingError::parse(
                path,
                "front matter block is not closed with `---`",
            ));
        }
        Block::Present(block) => block,
    };
    if block.trim().is_empty() {
        return Ok(Mapping::new());
    }

    match serde_yaml::from_str::<Value>(block).map(stringify_keys) {
        Ok(Value::Mapping(mapping)) => Ok(mapping),
        Ok(Value::Null) => Ok(Mapping::new()),
        Ok(_) => Err(CcsettingError::parse(
            path,
            "front matter must be a key-value mapping",
        )),
        Err(e) => Err(CcsettingError::parse(path, e)),
    }
}

// YAML allows keys such as `1:` or `true:`; metadata keys are always text.
fn stringify_keys(value: Value) -> Value {
    match value {
        Value::Mapping(mapping) => Value::Mapping(
            mapping
                .into_iter()
                .map(|(key, value)| (Value::String(key_text(key)), stringify_keys(value)))
                .collect(),
        ),
        Value::Sequence(items) => Value::Sequence(items.into_iter().map(stringify_keys).collect()),
        Value::Tagged(tagged) => stringify_keys(tagged.value),
        other => other,
    }
}

fn key_text(key: Value) -> String {
    match key {
        Value::String(text) => text,
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Null => "null".to_string(),
        other => serde_yaml::to_string(&other)
            .map(|text| text.trim_end().to_string())
            .unwrap_or_default(),
    }
}

/// Parse the front matter of `content` straight into a typed metadata record.
pub fn parse_metadata<M: DeserializeOwned>(path: &Path, content: &str) -> Result<M> {
    let mapping = parse_document(path, content)?;
    serde_yaml::from_value(Value::Mapping(mapping)).map_err(|e| CcsettingError::parse(path, e))
}
