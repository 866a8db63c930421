pub mod aggregate;
pub mod filter;
pub mod frontmatter;
pub mod scan;
pub mod settings;
pub mod types;
pub mod walker;

pub use aggregate::{ScanRoots, scan};
pub use filter::{filter_by_scope, select_section};
pub use types::{
    AgentMetadata, AgentRecord, ClaudeConfig, ConfigRecord, HookCommand, HookGroup, Permissions,
    RuleMetadata, RuleRecord, Scope, ScopeSelector, Section, Settings, SkillMetadata, SkillRecord,
    StatusLine,
};
