use crate::claude::types::ClaudeConfig;
use crate::render::{Painter, RenderOptions};
use serde::{Deserialize, Serialize};

/// Presence of each settings scope plus per-category counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub global_settings: bool,
    pub project_settings: bool,
    pub agents: usize,
    pub skills: usize,
    pub rules: usize,
}

impl Summary {
    pub fn from_config(config: &ClaudeConfig) -> Self {
        Self {
            global_settings: config.global_settings.is_some(),
            project_settings: config.project_settings.is_some(),
            agents: config.agents.len(),
            skills: config.skills.len(),
            rules: config.rules.len(),
        }
    }

    /// Label/value rows in display order.
    pub fn rows(&self) -> [(&'static str, String); 5] {
        let mark = |present: bool| if present { "✓" } else { "✗" }.to_string();
        [
            ("Global Settings", mark(self.global_settings)),
            ("Project Settings", mark(self.project_settings)),
            ("Agents", self.agents.to_string()),
            ("Skills", self.skills.to_string()),
            ("Rules", self.rules.to_string()),
        ]
    }
}

pub fn render_summary(summary: &Summary, options: &RenderOptions) -> String {
    let p = Painter::new(options);
    let mut out = format!("\n{}\n\n", p.title("📊 Configuration Summary"));
    for (label, value) in summary.rows() {
        out.push_str(&format!("  {} {value}\n", p.label(&format!("{label}:"))));
    }
    out.push('\n');
    out
}
