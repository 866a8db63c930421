use crate::claude::types::{ClaudeConfig, ConfigRecord, ScopeSelector, Section};

/// Reduce `config` to the records and settings belonging to `selector`.
pub fn filter_by_scope(mut config: ClaudeConfig, selector: ScopeSelector) -> ClaudeConfig {
    match selector {
        ScopeSelector::All => return config,
        ScopeSelector::Global => config.project_settings = None,
        ScopeSelector::Project => config.global_settings = None,
    }
    retain_scope(&mut config.agents, selector);
    retain_scope(&mut config.skills, selector);
    retain_scope(&mut config.rules, selector);
    config
}

fn retain_scope<M>(records: &mut Vec<ConfigRecord<M>>, selector: ScopeSelector) {
    records.retain(|record| selector.includes(record.scope));
}

/// Keep only the part of `config` an action reports on.
pub fn select_section(mut config: ClaudeConfig, section: Section) -> ClaudeConfig {
    if section == Section::All {
        return config;
    }
    if section != Section::Settings {
        config.global_settings = None;
        config.project_settings = None;
    }
    if section != Section::Agents {
        config.agents.clear();
    }
    if section != Section::Skills {
        config.skills.clear();
    }
    if section != Section::Rules {
        config.rules.clear();
    }
    config
}
