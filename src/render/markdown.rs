//! Markdown export of an aggregated configuration.
//!
//! Sections appear in a fixed order (global settings, project settings, agents,
//! skills, rules) and are left out when they have nothing to show. Lists are never
//! truncated here. Settings keys without a dedicated rendering go under "Other".

use crate::claude::types::{AgentRecord, ClaudeConfig, RuleRecord, Settings, SkillRecord};
use crate::render::{is_secret_key, mask_secret};
use serde_json::Value;

pub fn export_markdown(config: &ClaudeConfig) -> String {
    let mut lines = vec!["# Claude Code Configuration".to_string(), String::new()];

    if let Some(settings) = &config.global_settings {
        push_settings(&mut lines, "Global Settings", settings);
    }
    if let Some(settings) = &config.project_settings {
        push_settings(&mut lines, "Project Settings", settings);
    }

    if !config.agents.is_empty() {
        lines.push(format!("## Agents ({})", config.agents.len()));
        lines.push(String::new());
        for agent in &config.agents {
            push_agent(&mut lines, agent);
        }
    }

    if !config.skills.is_empty() {
        lines.push(format!("## Skills ({})", config.skills.len()));
        lines.push(String::new());
        for skill in &config.skills {
            push_skill(&mut lines, skill);
        }
    }

    if !config.rules.is_empty() {
        lines.push(format!("## Rules ({})", config.rules.len()));
        lines.push(String::new());
        for rule in &config.rules {
            push_rule(&mut lines, rule);
        }
    }

    while lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Emits nothing when no line of the section would have content.
fn push_settings(lines: &mut Vec<String>, heading: &str, settings: &Settings) {
    let body = settings_body(settings);
    if body.is_empty() {
        return;
    }
    lines.push(format!("## {heading}"));
    lines.push(String::new());
    lines.extend(body);
}

fn settings_body(settings: &Settings) -> Vec<String> {
    let mut lines = Vec::new();

    let mut fields = Vec::new();
    if let Some(language) = &settings.language {
        fields.push(format!("- **Language**: {language}"));
    }
    if let Some(model) = &settings.model {
        fields.push(format!("- **Model**: {model}"));
    }
    if let Some(effort) = &settings.effort_level {
        fields.push(format!("- **Effort Level**: {effort}"));
    }
    if let Some(thinking) = settings.always_thinking_enabled {
        fields.push(format!("- **Always Thinking**: {thinking}"));
    }
    if let Some(dir) = &settings.plans_directory {
        fields.push(format!("- **Plans Directory**: {dir}"));
    }
    if let Some(mode) = settings
        .permissions
        .as_ref()
        .and_then(|p| p.default_mode.as_ref())
    {
        fields.push(format!("- **Default Mode**: {mode}"));
    }
    if let Some(status_line) = settings
        .status_line
        .as_ref()
        .filter(|status_line| !status_line.command.is_empty())
    {
        fields.push(format!("- **Status Line**: `{}`", status_line.command));
    }
    if !fields.is_empty() {
        lines.extend(fields);
        lines.push(String::new());
    }

    push_list(&mut lines, "Allowed Permissions", settings.allow());
    push_list(&mut lines, "Denied Permissions", settings.deny());

    if let Some(env) = settings.env.as_ref().filter(|env| !env.is_empty()) {
        lines.push("### Environment".to_string());
        lines.push(String::new());
        for (key, value) in env {
            let shown = if is_secret_key(key) {
                mask_secret(value)
            } else {
                value.clone()
            };
            lines.push(format!("- `{key}` = `{shown}`"));
        }
        lines.push(String::new());
    }

    if let Some(hooks) = settings.hooks.as_ref().filter(|hooks| !hooks.is_empty()) {
        lines.push("### Hooks".to_string());
        lines.push(String::new());
        for (event, groups) in hooks {
            lines.push(format!("- **{event}**"));
            for group in groups {
                let matcher = group.matcher.as_deref().unwrap_or("*");
                for hook in group.hooks.iter().flatten() {
                    let action = if hook.command.is_empty() {
                        hook.kind.as_str()
                    } else {
                        hook.command.as_str()
                    };
                    lines.push(format!("  - `{matcher}`: `{action}`"));
                }
            }
        }
        lines.push(String::new());
    }

    if let Some(plugins) = settings.enabled_plugins.as_ref().filter(|p| !p.is_empty()) {
        lines.push("### Plugins".to_string());
        lines.push(String::new());
        for (plugin, enabled) in plugins {
            let mark = if *enabled { "x" } else { " " };
            lines.push(format!("- [{mark}] {plugin}"));
        }
        lines.push(String::new());
    }

    if !settings.extra.is_empty() {
        lines.push("### Other".to_string());
        lines.push(String::new());
        for (key, value) in &settings.extra {
            let shown = match value {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            };
            lines.push(format!("- `{key}`: `{shown}`"));
        }
        lines.push(String::new());
    }

    lines
}

fn push_list(lines: &mut Vec<String>, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    lines.push(format!("### {heading}"));
    lines.push(String::new());
    lines.extend(items.iter().map(|item| format!("- {item}")));
    lines.push(String::new());
}

fn push_agent(lines: &mut Vec<String>, agent: &AgentRecord) {
    let meta = &agent.metadata;
    lines.push(format!("### {}", agent.display_name()));
    lines.push(String::new());
    if !meta.description.is_empty() {
        lines.push(meta.description.clone());
        lines.push(String::new());
    }
    if let Some(tools) = &meta.tools {
        lines.push(format!("**Tools**: {tools}"));
        lines.push(String::new());
    }
    if let Some(model) = &meta.model {
        lines.push(format!("**Model**: {model}"));
        lines.push(String::new());
    }
    if let Some(skills) = meta.skills.as_ref().filter(|skills| !skills.is_empty()) {
        lines.push(format!("**Skills**: {}", skills.join(", ")));
        lines.push(String::new());
    }
    lines.push(format!("*File: {} ({})*", agent.file.display(), agent.scope));
    lines.push(String::new());
}

fn push_skill(lines: &mut Vec<String>, skill: &SkillRecord) {
    let meta = &skill.metadata;
    lines.push(format!("### {}", skill.display_name()));
    lines.push(String::new());
    if !meta.description.is_empty() {
        lines.push(meta.description.clone());
        lines.push(String::new());
    }
    if let Some(tools) = meta.allowed_tools.as_ref().filter(|tools| !tools.is_empty()) {
        lines.push(format!("**Tools**: {}", tools.join(", ")));
        lines.push(String::new());
    }
    if let Some(agent) = &meta.agent {
        lines.push(format!("**Agent**: {agent}"));
        lines.push(String::new());
    }
    lines.push(format!("*File: {} ({})*", skill.file.display(), skill.scope));
    lines.push(String::new());
}

fn push_rule(lines: &mut Vec<String>, rule: &RuleRecord) {
    lines.push(format!("### {}", rule.file.display()));
    lines.push(String::new());
    if let Some(paths) = rule.metadata.applies_to() {
        lines.push(format!("**Applies to**: {}", paths.join(", ")));
        lines.push(String::new());
    }
    lines.push(format!("*Scope: {}*", rule.scope));
    lines.push(String::new());
}
