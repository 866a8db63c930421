use crate::config::SKILL_FILE;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};
use std::borrow::Cow;
use std::fmt;
use std::path::PathBuf;

/// Unrecognized keys, kept in file order.
pub type Extra = IndexMap<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Global,
    Project,
}

impl Scope {
    pub fn as_str(self) -> &'static str {
        match self {
            Scope::Global => "global",
            Scope::Project => "project",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScopeSelector {
    Global,
    Project,
    #[default]
    All,
}

impl ScopeSelector {
    pub fn includes(self, scope: Scope) -> bool {
        match self {
            ScopeSelector::All => true,
            ScopeSelector::Global => scope == Scope::Global,
            ScopeSelector::Project => scope == Scope::Project,
        }
    }
}

/// Which part of the aggregated configuration an action is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    All,
    Agents,
    Skills,
    Rules,
    Settings,
}

/// One discovered document. `file` is relative to the scope base directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigRecord<M> {
    pub metadata: M,
    pub file: PathBuf,
    pub scope: Scope,
}

pub type AgentRecord = ConfigRecord<AgentMetadata>;
pub type SkillRecord = ConfigRecord<SkillMetadata>;
pub type RuleRecord = ConfigRecord<RuleMetadata>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentMetadata {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(
        default,
        deserialize_with = "lenient_joined",
        skip_serializing_if = "Option::is_none"
    )]
    pub tools: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub model: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub color: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub skills: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillMetadata {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(
        rename = "allowed-tools",
        alias = "allowedTools",
        default,
        deserialize_with = "lenient_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub allowed_tools: Option<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub context: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub agent: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleMetadata {
    #[serde(
        default,
        deserialize_with = "lenient_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub paths: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl RuleMetadata {
    pub fn applies_to(&self) -> Option<&[String]> {
        self.paths.as_deref().filter(|paths| !paths.is_empty())
    }
}

/// Metadata that carries a human-facing name.
pub trait Titled {
    fn title(&self) -> &str;
}

impl Titled for AgentMetadata {
    fn title(&self) -> &str {
        &self.name
    }
}

impl Titled for SkillMetadata {
    fn title(&self) -> &str {
        &self.name
    }
}

impl<M: Titled> ConfigRecord<M> {
    /// Frontmatter name, falling back to the skill directory or file stem.
    pub fn display_name(&self) -> Cow<'_, str> {
        let title = self.metadata.title().trim();
        if !title.is_empty() {
            return Cow::Borrowed(title);
        }
        let fallback = if self.file.file_name().is_some_and(|name| name == SKILL_FILE) {
            self.file.parent().and_then(|dir| dir.file_name())
        } else {
            self.file.file_stem()
        };
        fallback
            .map(|name| name.to_string_lossy())
            .unwrap_or(Cow::Borrowed("(unnamed)"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(
        default,
        deserialize_with = "lenient_string_map",
        skip_serializing_if = "Option::is_none"
    )]
    pub env: Option<IndexMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Permissions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hooks: Option<IndexMap<String, Vec<HookGroup>>>,
    #[serde(
        default,
        deserialize_with = "lenient_flag_map",
        skip_serializing_if = "Option::is_none"
    )]
    pub enabled_plugins: Option<IndexMap<String, bool>>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub plans_directory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_line: Option<StatusLine>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub language: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_flag",
        skip_serializing_if = "Option::is_none"
    )]
    pub always_thinking_enabled: Option<bool>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub effort_level: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub model: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Settings {
    pub fn is_empty(&self) -> bool {
        self == &Settings::default()
    }

    /// Take every field still unset from `other` and append its extension keys.
    pub fn absorb(&mut self, other: Settings) {
        self.env = self.env.take().or(other.env);
        self.permissions = self.permissions.take().or(other.permissions);
        self.hooks = self.hooks.take().or(other.hooks);
        self.enabled_plugins = self.enabled_plugins.take().or(other.enabled_plugins);
        self.plans_directory = self.plans_directory.take().or(other.plans_directory);
        self.status_line = self.status_line.take().or(other.status_line);
        self.language = self.language.take().or(other.language);
        self.always_thinking_enabled = self
            .always_thinking_enabled
            .or(other.always_thinking_enabled);
        self.effort_level = self.effort_level.take().or(other.effort_level);
        self.model = self.model.take().or(other.model);
        self.extra.extend(other.extra);
    }

    pub fn allow(&self) -> &[String] {
        self.permissions
            .as_ref()
            .and_then(|p| p.allow.as_deref())
            .unwrap_or_default()
    }

    pub fn deny(&self) -> &[String] {
        self.permissions
            .as_ref()
            .and_then(|p| p.deny.as_deref())
            .unwrap_or_default()
    }

    /// (enabled, total) plugin counts.
    pub fn plugin_counts(&self) -> (usize, usize) {
        self.enabled_plugins
            .as_ref()
            .map(|plugins| {
                let enabled = plugins.values().filter(|on| **on).count();
                (enabled, plugins.len())
            })
            .unwrap_or((0, 0))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permissions {
    #[serde(
        default,
        deserialize_with = "lenient_items",
        skip_serializing_if = "Option::is_none"
    )]
    pub allow: Option<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "lenient_items",
        skip_serializing_if = "Option::is_none"
    )]
    pub deny: Option<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_mode: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HookGroup {
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub matcher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hooks: Option<Vec<HookCommand>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HookCommand {
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub kind: String,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "String::is_empty"
    )]
    pub command: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<Number>,
    #[serde(
        rename = "async",
        default,
        deserialize_with = "lenient_flag",
        skip_serializing_if = "Option::is_none"
    )]
    pub run_async: Option<bool>,
    #[serde(
        default,
        deserialize_with = "lenient_flag",
        skip_serializing_if = "Option::is_none"
    )]
    pub once: Option<bool>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusLine {
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub kind: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub command: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<Number>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Everything discovered under both scopes. Global records precede project records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaudeConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_settings: Option<Settings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_settings: Option<Settings>,
    #[serde(default)]
    pub agents: Vec<AgentRecord>,
    #[serde(default)]
    pub skills: Vec<SkillRecord>,
    #[serde(default)]
    pub rules: Vec<RuleRecord>,
}

impl ClaudeConfig {
    pub fn is_empty(&self) -> bool {
        self.global_settings.is_none()
            && self.project_settings.is_none()
            && self.agents.is_empty()
            && self.skills.is_empty()
            && self.rules.is_empty()
    }
}

fn text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    }
}

fn flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::String(text) => text.trim().parse().ok(),
        Value::Number(number) => number.as_i64().map(|n| n != 0),
        _ => None,
    }
}

fn items(value: Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.into_iter().filter_map(text).collect(),
        other => text(other).into_iter().collect(),
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_opt_string(deserializer)?.unwrap_or_default())
}

fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(text))
}

// `"alwaysThinkingEnabled": "true"` reads as `true`; anything unreadable as unset.
fn lenient_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(|value| flag(&value)))
}

// `tools: [Read, Grep]` is folded into the documented `tools: Read, Grep` form.
fn lenient_joined<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<Value>::deserialize(deserializer)?.and_then(|value| match value {
            Value::Array(_) => Some(items(value).join(", ")),
            other => text(other),
        }),
    )
}

// `allowed-tools: Read, Grep` is split into a list.
fn lenient_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<Value>::deserialize(deserializer)?.map(|value| match value {
            Value::Array(_) => items(value),
            other => text(other)
                .unwrap_or_default()
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect(),
        }),
    )
}

// Permission rules may contain commas, so a single string stays one entry.
fn lenient_items<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.map(items))
}

// `"env": {"MAX_THINKING_TOKENS": 10000}` keeps the value as `"10000"`.
fn lenient_string_map<'de, D>(deserializer: D) -> Result<Option<IndexMap<String, String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<IndexMap<String, Value>>::deserialize(deserializer)?.map(|map| {
            map.into_iter()
                .filter_map(|(key, value)| text(value).map(|value| (key, value)))
                .collect()
        }),
    )
}

fn lenient_flag_map<'de, D>(deserializer: D) -> Result<Option<IndexMap<String, bool>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<IndexMap<String, Value>>::deserialize(deserializer)?.map(|map| {
            map.into_iter()
                .map(|(key, value)| {
                    let enabled = flag(&value).unwrap_or(false);
                    (key, enabled)
                })
                .collect()
        }),
    )
}
