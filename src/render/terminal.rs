//! Human-oriented text views of an aggregated configuration.

use crate::claude::types::{
    AgentRecord, ClaudeConfig, ConfigRecord, RuleRecord, ScopeSelector, Settings, SkillRecord,
};
use crate::render::{ALLOW_PREVIEW_LEN, Painter, RenderOptions, is_secret_key, mask_secret};
use colored::Colorize;

/// Full view used by the `show` action.
pub fn render_config(config: &ClaudeConfig, options: &RenderOptions) -> String {
    let p = Painter::new(options);
    let mut lines = vec![String::new(), p.title("📋 Claude Code Configuration"), String::new()];

    if config.is_empty() {
        lines.push(p.dim("  No configuration found"));
        lines.push(String::new());
        return finish(lines);
    }

    if let Some(settings) = &config.global_settings {
        lines.push(p.heading("🌍 Global Settings"));
        lines.extend(render_settings(settings, "  ", options));
        lines.push(String::new());
    }

    if let Some(settings) = &config.project_settings {
        lines.push(p.heading("📁 Project Settings"));
        lines.extend(render_settings(settings, "  ", options));
        lines.push(String::new());
    }

    if !config.agents.is_empty() {
        lines.push(p.heading(&format!("🤖 Agents ({})", config.agents.len())));
        for agent in &config.agents {
            lines.extend(agent_lines(agent, "  ", options));
        }
        lines.push(String::new());
    }

    if !config.skills.is_empty() {
        lines.push(p.heading(&format!("✨ Skills ({})", config.skills.len())));
        for skill in &config.skills {
            lines.extend(skill_lines(skill, "  ", options));
        }
        lines.push(String::new());
    }

    if !config.rules.is_empty() {
        lines.push(p.heading(&format!("📜 Rules ({})", config.rules.len())));
        for rule in &config.rules {
            lines.extend(rule_lines(rule, "  ", options));
        }
        lines.push(String::new());
    }

    finish(lines)
}

/// Settings block, each line prefixed with `indent`.
pub fn render_settings(settings: &Settings, indent: &str, options: &RenderOptions) -> Vec<String> {
    let p = Painter::new(options);
    let mut lines = Vec::new();
    let field = |label: &str, value: &dyn std::fmt::Display| {
        format!("{indent}{} {value}", p.label(&format!("{label}:")))
    };

    if let Some(language) = &settings.language {
        lines.push(field("Language", language));
    }
    if let Some(model) = &settings.model {
        lines.push(field("Model", model));
    }
    if let Some(effort) = &settings.effort_level {
        lines.push(field("Effort Level", effort));
    }
    if let Some(thinking) = settings.always_thinking_enabled {
        lines.push(field("Always Thinking", &thinking));
    }
    if let Some(dir) = &settings.plans_directory {
        lines.push(field("Plans Directory", dir));
    }

    if let Some(permissions) = &settings.permissions {
        lines.push(format!("{indent}{}", p.label("Permissions:")));
        if let Some(mode) = &permissions.default_mode {
            lines.push(format!("{indent}  Default Mode: {mode}"));
        }
        let allow = settings.allow();
        if !allow.is_empty() {
            lines.push(format!("{indent}  Allow ({}):", allow.len()));
            for perm in allow.iter().take(ALLOW_PREVIEW_LEN) {
                lines.push(p.paint(&format!("{indent}    ✓ {perm}"), |s| s.green()));
            }
            if allow.len() > ALLOW_PREVIEW_LEN {
                lines.push(p.dim(&format!(
                    "{indent}    ... and {} more",
                    allow.len() - ALLOW_PREVIEW_LEN
                )));
            }
        }
        let deny = settings.deny();
        if !deny.is_empty() {
            lines.push(format!("{indent}  Deny ({}):", deny.len()));
            for perm in deny {
                lines.push(p.paint(&format!("{indent}    ✗ {perm}"), |s| s.red()));
            }
        }
    }

    if let Some(env) = settings.env.as_ref().filter(|env| !env.is_empty()) {
        lines.push(format!("{indent}{} {} variables", p.label("Env:"), env.len()));
        for (key, value) in env {
            let shown = if is_secret_key(key) {
                mask_secret(value)
            } else {
                value.clone()
            };
            lines.push(format!("{indent}  {key}={shown}"));
        }
    }

    if let Some(hooks) = &settings.hooks {
        lines.push(format!("{indent}{} {} types", p.label("Hooks:"), hooks.len()));
        for (event, groups) in hooks {
            if !groups.is_empty() {
                lines.push(format!("{indent}  {event} ({})", groups.len()));
            }
        }
    }

    if let Some(plugins) = &settings.enabled_plugins {
        let (enabled, total) = settings.plugin_counts();
        lines.push(format!(
            "{indent}{} {enabled}/{total} enabled",
            p.label("Plugins:")
        ));
        for (plugin, on) in plugins {
            let status = if *on {
                p.paint("✓", |s| s.green())
            } else {
                p.dim("○")
            };
            lines.push(format!("{indent}  {status} {plugin}"));
        }
    }

    if let Some(status_line) = &settings.status_line {
        lines.push(field("Status Line", &status_line.command));
    }

    lines
}

/// `agents` action: one block per agent, or `None` when there are none.
pub fn render_agent_list(agents: &[AgentRecord], options: &RenderOptions) -> Option<String> {
    render_list("🤖 Agents", agents, options, |agent| agent_lines(agent, "", options))
}

/// `skills` action: one block per skill, or `None` when there are none.
pub fn render_skill_list(skills: &[SkillRecord], options: &RenderOptions) -> Option<String> {
    render_list("✨ Skills", skills, options, |skill| skill_lines(skill, "", options))
}

/// `rules` action: one block per rule, or `None` when there are none.
pub fn render_rule_list(rules: &[RuleRecord], options: &RenderOptions) -> Option<String> {
    render_list("📜 Rules", rules, options, |rule| rule_lines(rule, "", options))
}

/// `settings` action. A scope that was asked for explicitly but has no settings
/// file gets a "Not found" line.
pub fn render_settings_view(
    config: &ClaudeConfig,
    selector: ScopeSelector,
    options: &RenderOptions,
) -> String {
    let p = Painter::new(options);
    let mut lines = vec![String::new(), p.title("⚙️  Settings"), String::new()];

    let scopes = [
        (ScopeSelector::Global, "🌍 Global Settings", &config.global_settings),
        (ScopeSelector::Project, "📁 Project Settings", &config.project_settings),
    ];
    for (scope, heading, settings) in scopes {
        match settings {
            Some(settings) if selector == scope || selector == ScopeSelector::All => {
                lines.push(p.heading(heading));
                lines.extend(render_settings(settings, "  ", options));
                lines.push(String::new());
            }
            None if selector == scope => {
                lines.push(p.dim(&format!("{heading}: Not found")));
                lines.push(String::new());
            }
            _ => {}
        }
    }

    finish(lines)
}

fn render_list<M>(
    heading: &str,
    records: &[ConfigRecord<M>],
    options: &RenderOptions,
    entry: impl Fn(&ConfigRecord<M>) -> Vec<String>,
) -> Option<String> {
    if records.is_empty() {
        return None;
    }
    let p = Painter::new(options);
    let mut lines = vec![
        String::new(),
        p.heading(&format!("{heading} ({})", records.len())),
        String::new(),
    ];
    for record in records {
        lines.extend(entry(record));
        lines.push(String::new());
    }
    Some(finish(lines))
}

fn bullet<M>(record: &ConfigRecord<M>, name: &str, options: &RenderOptions) -> String {
    let p = Painter::new(options);
    let badge = if options.show_scope {
        format!("{} ", p.dim(&format!("[{}]", record.scope)))
    } else {
        String::new()
    };
    format!("• {badge}{name}")
}

fn agent_lines(agent: &AgentRecord, indent: &str, options: &RenderOptions) -> Vec<String> {
    let p = Painter::new(options);
    let meta = &agent.metadata;
    let mut lines = vec![format!(
        "{indent}{}",
        p.paint(&bullet(agent, &agent.display_name(), options), |s| s.green())
    )];
    if !meta.description.is_empty() {
        lines.push(format!("{indent}  {}", meta.description));
    }
    if let Some(tools) = &meta.tools {
        lines.push(format!("{indent}  Tools: {tools}"));
    }
    if let Some(model) = &meta.model {
        lines.push(format!("{indent}  Model: {model}"));
    }
    if let Some(skills) = meta.skills.as_ref().filter(|skills| !skills.is_empty()) {
        lines.push(format!("{indent}  Skills: {}", skills.join(", ")));
    }
    lines.push(format!(
        "{indent}  {}",
        p.paint(&agent.file.display().to_string(), |s| s.cyan())
    ));
    lines
}

fn skill_lines(skill: &SkillRecord, indent: &str, options: &RenderOptions) -> Vec<String> {
    let p = Painter::new(options);
    let meta = &skill.metadata;
    let mut lines = vec![format!(
        "{indent}{}",
        p.paint(&bullet(skill, &skill.display_name(), options), |s| s.green())
    )];
    if !meta.description.is_empty() {
        lines.push(format!("{indent}  {}", meta.description));
    }
    if let Some(tools) = meta.allowed_tools.as_ref().filter(|tools| !tools.is_empty()) {
        lines.push(format!("{indent}  Tools: {}", tools.join(", ")));
    }
    if let Some(agent) = &meta.agent {
        lines.push(format!("{indent}  Agent: {agent}"));
    }
    if let Some(context) = &meta.context {
        lines.push(format!("{indent}  Context: {context}"));
    }
    lines.push(format!(
        "{indent}  {}",
        p.paint(&skill.file.display().to_string(), |s| s.cyan())
    ));
    lines
}

fn rule_lines(rule: &RuleRecord, indent: &str, options: &RenderOptions) -> Vec<String> {
    let p = Painter::new(options);
    let file = rule.file.display().to_string();
    let mut lines = vec![format!(
        "{indent}{}",
        p.paint(&bullet(rule, &file, options), |s| s.cyan())
    )];
    if let Some(paths) = rule.metadata.applies_to() {
        lines.push(format!("{indent}  Applies to: {}", paths.join(", ")));
    }
    lines
}

fn finish(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claude::types::{
        AgentMetadata, Permissions, RuleMetadata, Scope, SkillMetadata,
    };
    use indexmap::IndexMap;
    use std::path::PathBuf;

    fn plain() -> RenderOptions {
        RenderOptions::default()
    }

    fn agent(name: &str, scope: Scope) -> AgentRecord {
        AgentRecord {
            metadata: AgentMetadata {
                name: name.to_string(),
                description: format!("{name} agent"),
                skills: Some(vec!["lint".to_string(), "test".to_string()]),
                ..AgentMetadata::default()
            },
            file: PathBuf::from(format!(".claude/agents/{name}.md")),
            scope,
        }
    }

    fn allow_settings(count: usize) -> Settings {
        Settings {
            permissions: Some(Permissions {
                allow: Some((1..=count).map(|i| format!("Bash(cmd{i})")).collect()),
                deny: Some(vec!["Read(.env)".to_string()]),
                default_mode: Some("acceptEdits".to_string()),
                ..Permissions::default()
            }),
            ..Settings::default()
        }
    }

    #[test]
    fn test_allow_list_is_truncated() {
        let lines = render_settings(&allow_settings(7), "", &plain()).join("\n");
        assert!(lines.contains("Allow (7):"));
        assert!(lines.contains("✓ Bash(cmd5)"));
        assert!(!lines.contains("Bash(cmd6)"));
        assert!(lines.contains("... and 2 more"));
        assert!(lines.contains("✗ Read(.env)"));
        assert!(lines.contains("Default Mode: acceptEdits"));
    }

    #[test]
    fn test_short_allow_list_is_not_truncated() {
        let lines = render_settings(&allow_settings(5), "", &plain()).join("\n");
        assert!(lines.contains("Bash(cmd5)"));
        assert!(!lines.contains("more"));
    }

    #[test]
    fn test_env_secrets_are_masked() {
        let mut env = IndexMap::new();
        env.insert("ANTHROPIC_API_KEY".to_string(), "sk-ant-abcdefgh1234".to_string());
        env.insert("DISABLE_TELEMETRY".to_string(), "1".to_string());
        let settings = Settings {
            env: Some(env),
            ..Settings::default()
        };
        let lines = render_settings(&settings, "", &plain()).join("\n");
        assert!(lines.contains("Env: 2 variables"));
        assert!(lines.contains("ANTHROPIC_API_KEY=sk-a...1234"));
        assert!(lines.contains("DISABLE_TELEMETRY=1"));
    }

    #[test]
    fn test_plugins_checklist() {
        let mut plugins = IndexMap::new();
        plugins.insert("fmt@tools".to_string(), true);
        plugins.insert("old@tools".to_string(), false);
        let settings = Settings {
            enabled_plugins: Some(plugins),
            ..Settings::default()
        };
        let lines = render_settings(&settings, "  ", &plain());
        assert_eq!(
            lines,
            vec![
                "  Plugins: 1/2 enabled".to_string(),
                "    ✓ fmt@tools".to_string(),
                "    ○ old@tools".to_string(),
            ]
        );
    }

    #[test]
    fn test_render_config_sections_and_counts() {
        let config = ClaudeConfig {
            global_settings: Some(Settings {
                model: Some("opus".to_string()),
                ..Settings::default()
            }),
            agents: vec![agent("foo", Scope::Project)],
            skills: vec![SkillRecord {
                metadata: SkillMetadata {
                    name: "pdf".to_string(),
                    description: "PDF work".to_string(),
                    allowed_tools: Some(vec!["Read".to_string()]),
                    ..SkillMetadata::default()
                },
                file: PathBuf::from(".claude/skills/pdf/SKILL.md"),
                scope: Scope::Global,
            }],
            rules: vec![RuleRecord {
                metadata: RuleMetadata {
                    paths: Some(vec!["src/**".to_string()]),
                    ..RuleMetadata::default()
                },
                file: PathBuf::from(".claude/rules/style.md"),
                scope: Scope::Project,
            }],
            ..ClaudeConfig::default()
        };

        let out = render_config(&config, &plain());
        assert!(out.contains("🌍 Global Settings\n  Model: opus"));
        assert!(!out.contains("Project Settings"));
        assert!(out.contains("🤖 Agents (1)\n  • foo\n    foo agent"));
        assert!(out.contains("    Skills: lint, test"));
        assert!(out.contains("✨ Skills (1)"));
        assert!(out.contains("    Tools: Read"));
        assert!(out.contains("📜 Rules (1)\n  • .claude/rules/style.md\n    Applies to: src/**"));
        let global = out.find("Global Settings").unwrap();
        let agents = out.find("Agents (1)").unwrap();
        let rules = out.find("Rules (1)").unwrap();
        assert!(global < agents && agents < rules);
    }

    #[test]
    fn test_render_empty_config() {
        let out = render_config(&ClaudeConfig::default(), &plain());
        assert!(out.contains("No configuration found"));
    }

    #[test]
    fn test_agent_list_with_scope_badges() {
        let options = RenderOptions {
            show_scope: true,
            ..plain()
        };
        let agents = vec![agent("g", Scope::Global), agent("p", Scope::Project)];
        let out = render_agent_list(&agents, &options).expect("non-empty");
        assert!(out.contains("🤖 Agents (2)"));
        assert!(out.contains("• [global] g"));
        assert!(out.contains("• [project] p"));
        assert!(render_agent_list(&[], &options).is_none());
    }

    #[test]
    fn test_settings_view_not_found() {
        let config = ClaudeConfig {
            global_settings: Some(Settings {
                language: Some("japanese".to_string()),
                ..Settings::default()
            }),
            ..ClaudeConfig::default()
        };

        let project = render_settings_view(&config, ScopeSelector::Project, &plain());
        assert!(project.contains("📁 Project Settings: Not found"));
        assert!(!project.contains("Global Settings"));

        let all = render_settings_view(&config, ScopeSelector::All, &plain());
        assert!(all.contains("Language: japanese"));
        assert!(!all.contains("Not found"));
    }
}
