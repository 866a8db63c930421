use crate::claude::frontmatter::parse_metadata;
use crate::claude::types::{AgentRecord, ConfigRecord, RuleRecord, Scope, SkillRecord};
use crate::claude::walker::{WalkOptions, list_dirs, list_files};
use crate::config::{AGENTS_DIR, CLAUDE_DIR, DOCUMENT_SUFFIX, RULES_DIR, SKILL_FILE, SKILLS_DIR};
use crate::error::{CcsettingError, Result};
use crate::path_utils::relative_to;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One scope to scan: its kind and the directory that holds its `.claude` folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeRoot {
    pub scope: Scope,
    pub base: PathBuf,
}

impl ScopeRoot {
    pub fn new(scope: Scope, base: impl Into<PathBuf>) -> Self {
        Self {
            scope,
            base: base.into(),
        }
    }

    pub fn claude_dir(&self) -> PathBuf {
        self.base.join(CLAUDE_DIR)
    }
}

/// `<scope>/.claude/agents/*.md`
pub fn scan_agents(root: &ScopeRoot) -> Result<Vec<AgentRecord>> {
    let agents_dir = root.claude_dir().join(AGENTS_DIR);
    list_files(&agents_dir, &WalkOptions::flat().with_suffix(DOCUMENT_SUFFIX))?
        .iter()
        .map(|path| load_record(root, path))
        .collect()
}

/// `<scope>/.claude/skills/<name>/SKILL.md`; directories without the file are skipped.
pub fn scan_skills(root: &ScopeRoot) -> Result<Vec<SkillRecord>> {
    let skills_dir = root.claude_dir().join(SKILLS_DIR);
    let mut records = Vec::new();
    for skill_dir in list_dirs(&skills_dir)? {
        let skill_file = skill_dir.join(SKILL_FILE);
        if !skill_file.is_file() {
            debug!(dir = %skill_dir.display(), "no {SKILL_FILE}, skipping");
            continue;
        }
        records.push(load_record(root, &skill_file)?);
    }
    Ok(records)
}

/// `<scope>/.claude/rules/**/*.md`
pub fn scan_rules(root: &ScopeRoot) -> Result<Vec<RuleRecord>> {
    let rules_dir = root.claude_dir().join(RULES_DIR);
    list_files(&rules_dir, &WalkOptions::recursive().with_suffix(DOCUMENT_SUFFIX))?
        .iter()
        .map(|path| load_record(root, path))
        .collect()
}

fn load_record<M: DeserializeOwned>(root: &ScopeRoot, path: &Path) -> Result<ConfigRecord<M>> {
    let content = fs::read_to_string(path).map_err(|e| CcsettingError::read(path, e))?;
    let metadata = parse_metadata(path, &content)?;
    let file = relative_to(&root.base, path);
    debug!(scope = %root.scope, file = %file.display(), "loaded document");
    Ok(ConfigRecord {
        metadata,
        file,
        scope: root.scope,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::write_file;
    use tempfile::TempDir;

    fn project(temp: &TempDir) -> ScopeRoot {
        ScopeRoot::new(Scope::Project, temp.path())
    }

    #[test]
    fn test_scan_agents() {
        let temp = TempDir::new().expect("temp dir");
        write_file(
            temp.path(),
            ".claude/agents/foo.md",
            "---\nname: Foo\ndescription: Does foo\ntools: Read, Grep\n---\nYou are foo.",
        );
        write_file(temp.path(), ".claude/agents/notes.txt", "ignored");

        let agents = scan_agents(&project(&temp)).unwrap();
        assert_eq!(agents.len(), 1);
        assert_eq!(agents[0].metadata.name, "Foo");
        assert_eq!(agents[0].metadata.tools.as_deref(), Some("Read, Grep"));
        assert_eq!(agents[0].scope, Scope::Project);
        assert_eq!(agents[0].file, Path::new(".claude").join("agents").join("foo.md"));
    }

    #[test]
    fn test_scan_agents_without_front_matter() {
        let temp = TempDir::new().expect("temp dir");
        write_file(temp.path(), ".claude/agents/plain.md", "# Just a body");

        let agents = scan_agents(&project(&temp)).unwrap();
        assert_eq!(agents.len(), 1);
        assert_eq!(agents[0].metadata.name, "");
        assert_eq!(agents[0].display_name(), "plain");
    }

    #[test]
    fn test_scan_skills_skips_dirs_without_skill_file() {
        let temp = TempDir::new().expect("temp dir");
        write_file(
            temp.path(),
            ".claude/skills/pdf/SKILL.md",
            "---\nname: pdf\ndescription: PDF work\n---\n",
        );
        write_file(temp.path(), ".claude/skills/draft/README.md", "not a skill");
        write_file(temp.path(), ".claude/skills/loose.md", "not a skill either");

        let skills = scan_skills(&project(&temp)).unwrap();
        assert_eq!(skills.len(), 1);
        assert_eq!(skills[0].metadata.name, "pdf");
        assert_eq!(
            skills[0].file,
            Path::new(".claude").join("skills").join("pdf").join("SKILL.md")
        );
    }

    #[test]
    fn test_scan_rules_nested_paths_relative_to_base() {
        let temp = TempDir::new().expect("temp dir");
        write_file(temp.path(), ".claude/rules/general.md", "Be concise.");
        write_file(
            temp.path(),
            ".claude/rules/lang/rust.md",
            "---\npaths:\n  - \"**/*.rs\"\n---\nUse clippy.",
        );
        write_file(temp.path(), ".claude/rules/lang/deep/sql.md", "---\n---\n");

        let rules = scan_rules(&project(&temp)).unwrap();
        let mut files: Vec<PathBuf> = rules.iter().map(|r| r.file.clone()).collect();
        files.sort();
        let base = Path::new(".claude").join("rules");
        assert_eq!(
            files,
            vec![
                base.join("general.md"),
                base.join("lang").join("deep").join("sql.md"),
                base.join("lang").join("rust.md"),
            ]
        );
        let rust = rules
            .iter()
            .find(|r| r.file.ends_with("rust.md"))
            .expect("rust rule");
        assert_eq!(rust.metadata.applies_to(), Some(&["**/*.rs".to_string()][..]));
    }

    #[test]
    fn test_missing_category_dirs_are_empty() {
        let temp = TempDir::new().expect("temp dir");
        let root = project(&temp);
        assert!(scan_agents(&root).unwrap().is_empty());
        assert!(scan_skills(&root).unwrap().is_empty());
        assert!(scan_rules(&root).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_document_aborts_category() {
        let temp = TempDir::new().expect("temp dir");
        write_file(temp.path(), ".claude/agents/good.md", "---\nname: good\n---\n");
        write_file(temp.path(), ".claude/agents/bad.md", "---\nname: [oops\n---\n");

        let err = scan_agents(&project(&temp)).unwrap_err();
        let path = err.path().expect("error names a file");
        assert!(path.ends_with("bad.md"));
    }
}
