pub mod json;
pub mod markdown;
pub mod summary;
pub mod terminal;

use clap::ValueEnum;
use colored::{ColoredString, Colorize};

pub use json::export_json;
pub use markdown::export_markdown;
pub use summary::{Summary, render_summary};

/// Number of allow-list entries shown before collapsing into "... and N more".
pub const ALLOW_PREVIEW_LEN: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub color: bool,
    /// Prefix entries with `[global]` / `[project]`.
    pub show_scope: bool,
}

pub fn stdout_is_tty() -> bool {
    use std::io::IsTerminal;
    std::io::stdout().is_terminal()
}

pub fn should_enable_color(color: ColorMode, stdout_is_tty: bool, no_color: bool) -> bool {
    match color {
        ColorMode::Auto => stdout_is_tty && !no_color,
        ColorMode::Always => true,
        ColorMode::Never => false,
    }
}

/// Applies `colored` styles only when color output is enabled.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Painter {
    enabled: bool,
}

impl Painter {
    pub(crate) fn new(options: &RenderOptions) -> Self {
        Self {
            enabled: options.color,
        }
    }

    pub(crate) fn paint(&self, text: &str, style: impl FnOnce(&str) -> ColoredString) -> String {
        if self.enabled {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }

    pub(crate) fn heading(&self, text: &str) -> String {
        self.paint(text, |s| s.bold().yellow())
    }

    pub(crate) fn title(&self, text: &str) -> String {
        self.paint(text, |s| s.bold().cyan())
    }

    pub(crate) fn label(&self, text: &str) -> String {
        self.paint(text, |s| s.blue())
    }

    pub(crate) fn dim(&self, text: &str) -> String {
        self.paint(text, |s| s.dimmed())
    }
}

pub fn mask_secret(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 8 {
        "*".repeat(chars.len())
    } else {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    }
}

pub fn is_secret_key(key: &str) -> bool {
    let key = key.to_ascii_uppercase();
    key.contains("KEY") || key.contains("TOKEN") || key.contains("SECRET")
}
