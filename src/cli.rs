use crate::claude::{
    ClaudeConfig, ScanRoots, ScopeSelector, Section, filter_by_scope, scan, select_section,
};
use crate::config::{resolve_home_dir, resolve_project_root};
use crate::path_utils::safe_parent_for_creation;
use crate::render::terminal::{
    render_agent_list, render_config, render_rule_list, render_settings_view, render_skill_list,
};
use crate::render::{
    ColorMode, RenderOptions, Summary, export_json, export_markdown, render_summary,
    should_enable_color, stdout_is_tty,
};
use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{Args, CommandFactory, Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "ccsetting", author, version, about = "Visualize .claude configuration files", long_about = None)]
#[command(propagate_version = true)]
#[command(subcommand_precedence_over_arg = true)]
pub struct Cli {
    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// When to use colors
    #[arg(long, value_enum, default_value_t = ColorMode::Auto, global = true)]
    pub color: ColorMode,

    #[command(flatten)]
    pub show: ShowArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the full configuration (default)
    Show(ShowArgs),
    /// Show agents only (-a: all, -g: global, -p: project)
    #[command(alias = "agent")]
    Agents(ViewArgs),
    /// Show skills only (-a: all, -g: global, -p: project)
    #[command(alias = "skill")]
    Skills(ViewArgs),
    /// Show rules only (-a: all, -g: global, -p: project)
    #[command(alias = "rule")]
    Rules(ViewArgs),
    /// Show settings only (-a: all, -g: global, -p: project)
    Settings(ViewArgs),
}

#[derive(Args, Debug, Clone, Default)]
#[group(required = false, multiple = false)]
pub struct ScopeArgs {
    /// Restrict to the global scope (~/.claude)
    #[arg(short = 'g', long)]
    pub global: bool,
    /// Restrict to the project scope (<dir>/.claude)
    #[arg(short = 'p', long)]
    pub project: bool,
    /// Include both scopes (default)
    #[arg(short = 'a', long)]
    pub all: bool,
}

impl ScopeArgs {
    /// The selector named on the command line, if any.
    pub fn explicit(&self) -> Option<ScopeSelector> {
        if self.global {
            Some(ScopeSelector::Global)
        } else if self.project {
            Some(ScopeSelector::Project)
        } else if self.all {
            Some(ScopeSelector::All)
        } else {
            None
        }
    }

    pub fn selector(&self) -> ScopeSelector {
        self.explicit().unwrap_or_default()
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct ExportArgs {
    /// Export as JSON to FILE, or to stdout when FILE is omitted
    #[arg(short = 'j', long, value_name = "FILE", num_args = 0..=1)]
    pub json: Option<Option<PathBuf>>,
    /// Export as Markdown to FILE, or to stdout when FILE is omitted
    #[arg(short = 'm', long, value_name = "FILE", num_args = 0..=1, conflicts_with = "json")]
    pub markdown: Option<Option<PathBuf>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Export {
    Json(Option<PathBuf>),
    Markdown(Option<PathBuf>),
}

impl ExportArgs {
    pub fn export(&self) -> Option<Export> {
        if let Some(dest) = &self.json {
            return Some(Export::Json(dest.clone()));
        }
        self.markdown.clone().map(Export::Markdown)
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct ViewArgs {
    /// Target project directory (default: current directory)
    #[arg(short = 'd', long = "dir", value_name = "DIRECTORY")]
    pub dir: Option<PathBuf>,
    #[command(flatten)]
    pub scope: ScopeArgs,
    #[command(flatten)]
    pub export: ExportArgs,
}

impl ViewArgs {
    /// Combine flags given before the subcommand (`before`) with those given after it.
    /// Each flag family may appear on one side only.
    fn merged(&self, before: &ViewArgs) -> std::result::Result<ViewArgs, clap::Error> {
        Ok(ViewArgs {
            dir: pick("--dir", &before.dir, &self.dir, Option::is_some)?,
            scope: pick("--global/--project/--all", &before.scope, &self.scope, |scope| {
                scope.explicit().is_some()
            })?,
            export: pick("--json/--markdown", &before.export, &self.export, |export| {
                export.export().is_some()
            })?,
        })
    }
}

fn pick<T: Clone>(
    flag: &str,
    before: &T,
    after: &T,
    given: impl Fn(&T) -> bool,
) -> std::result::Result<T, clap::Error> {
    match (given(before), given(after)) {
        (true, true) => Err(usage_error(format!(
            "{flag} given both before and after the subcommand"
        ))),
        (true, false) => Ok(before.clone()),
        _ => Ok(after.clone()),
    }
}

fn usage_error(message: impl std::fmt::Display) -> clap::Error {
    Cli::command().error(ErrorKind::ArgumentConflict, message)
}

#[derive(Args, Debug, Clone, Default)]
pub struct ShowArgs {
    #[command(flatten)]
    pub view: ViewArgs,
    /// Show counts only
    #[arg(short = 's', long)]
    pub summary: bool,
}

/// Flags normalized into what an action needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewOptions {
    pub section: Section,
    pub selector: ScopeSelector,
    pub project_dir: Option<PathBuf>,
    pub export: Option<Export>,
    pub summary: bool,
}

impl ViewOptions {
    pub fn from_args(section: Section, args: &ViewArgs, summary: bool) -> Self {
        Self {
            section,
            selector: args.scope.selector(),
            project_dir: args.dir.clone(),
            export: args.export.export(),
            summary,
        }
    }
}

impl Cli {
    /// Resolve the action and its flags, wherever they were placed on the command line.
    pub fn view_options(&self) -> std::result::Result<ViewOptions, clap::Error> {
        let before = &self.show;
        let (section, args, summary) = match &self.command {
            None => {
                return Ok(ViewOptions::from_args(
                    Section::All,
                    &before.view,
                    before.summary,
                ));
            }
            Some(Commands::Show(args)) => (Section::All, &args.view, args.summary),
            Some(Commands::Agents(args)) => (Section::Agents, args, false),
            Some(Commands::Skills(args)) => (Section::Skills, args, false),
            Some(Commands::Rules(args)) => (Section::Rules, args, false),
            Some(Commands::Settings(args)) => (Section::Settings, args, false),
        };
        if before.summary && section != Section::All {
            return Err(usage_error("--summary only applies to the show action"));
        }
        let merged = args.merged(&before.view)?;
        Ok(ViewOptions::from_args(
            section,
            &merged,
            summary || before.summary,
        ))
    }
}

pub fn run(options: &ViewOptions, color: ColorMode) -> Result<()> {
    let color = should_enable_color(
        color,
        stdout_is_tty(),
        std::env::var_os("NO_COLOR").is_some(),
    );
    colored::control::set_override(color);

    let config = load_config(options)?;

    if let Some(export) = &options.export {
        return write_export(&select_section(config, options.section), export);
    }

    let render = RenderOptions {
        color,
        show_scope: options.selector == ScopeSelector::All,
    };
    print!("{}", render_view(&config, options, &render));
    Ok(())
}

/// Scan both scopes and apply the scope selector.
pub fn load_config(options: &ViewOptions) -> Result<ClaudeConfig> {
    let roots = ScanRoots::new(
        resolve_home_dir()?,
        resolve_project_root(options.project_dir.as_deref())?,
    );
    let config = scan(&roots)?;
    Ok(filter_by_scope(config, options.selector))
}

/// Text output for the non-export path.
pub fn render_view(config: &ClaudeConfig, options: &ViewOptions, render: &RenderOptions) -> String {
    match options.section {
        Section::All if options.summary => render_summary(&Summary::from_config(config), render),
        Section::All => render_config(config, render),
        Section::Agents => render_agent_list(&config.agents, render)
            .unwrap_or_else(|| format!("{}\n", t!("messages.no_agents"))),
        Section::Skills => render_skill_list(&config.skills, render)
            .unwrap_or_else(|| format!("{}\n", t!("messages.no_skills"))),
        Section::Rules => render_rule_list(&config.rules, render)
            .unwrap_or_else(|| format!("{}\n", t!("messages.no_rules"))),
        Section::Settings => render_settings_view(config, options.selector, render),
    }
}

fn write_export(config: &ClaudeConfig, export: &Export) -> Result<()> {
    let (content, dest) = match export {
        Export::Json(dest) => {
            let mut json = export_json(config)?;
            json.push('\n');
            (json, dest)
        }
        Export::Markdown(dest) => (export_markdown(config), dest),
    };

    match dest {
        Some(path) => {
            write_file(path, &content)?;
            println!("{}", t!("messages.exported", path = path.display()));
        }
        None => print!("{content}"),
    }
    Ok(())
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = safe_parent_for_creation(path) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, content)
        .with_context(|| format!("Failed to write export file: {}", path.display()))
}
