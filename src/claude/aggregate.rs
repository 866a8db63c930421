use crate::claude::scan::{ScopeRoot, scan_agents, scan_rules, scan_skills};
use crate::claude::settings::load_settings;
use crate::claude::types::{ClaudeConfig, Scope};
use crate::error::Result;
use std::path::PathBuf;
use tracing::{debug, info};

/// The two base directories a scan reads from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRoots {
    pub home: PathBuf,
    pub project: PathBuf,
}

impl ScanRoots {
    pub fn new(home: impl Into<PathBuf>, project: impl Into<PathBuf>) -> Self {
        Self {
            home: home.into(),
            project: project.into(),
        }
    }

    pub fn global(&self) -> ScopeRoot {
        ScopeRoot::new(Scope::Global, &self.home)
    }

    pub fn project(&self) -> ScopeRoot {
        ScopeRoot::new(Scope::Project, &self.project)
    }
}

/// Scan the global scope, then the project scope if its `.claude` directory exists.
///
/// Any read or parse failure aborts the whole scan.
pub fn scan(roots: &ScanRoots) -> Result<ClaudeConfig> {
    let mut config = ClaudeConfig::default();

    let global = roots.global();
    config.global_settings = load_settings(&global.claude_dir())?;
    collect_scope(&global, &mut config)?;

    let project = roots.project();
    if !project.claude_dir().exists() {
        debug!(path = %project.claude_dir().display(), "no project configuration directory");
        return Ok(config);
    }
    config.project_settings = load_settings(&project.claude_dir())?;
    collect_scope(&project, &mut config)?;

    Ok(config)
}

fn collect_scope(root: &ScopeRoot, config: &mut ClaudeConfig) -> Result<()> {
    let agents = scan_agents(root)?;
    let skills = scan_skills(root)?;
    let rules = scan_rules(root)?;
    info!(
        scope = %root.scope,
        agents = agents.len(),
        skills = skills.len(),
        rules = rules.len(),
        "scanned scope"
    );
    config.agents.extend(agents);
    config.skills.extend(skills);
    config.rules.extend(rules);
    Ok(())
}
