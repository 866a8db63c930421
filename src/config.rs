use crate::error::{CcsettingError, Result};
use crate::path_utils::validate_path_str;
use std::env;
use std::path::{Path, PathBuf};

pub const ENV_HOME_DIR: &str = "CCSETTING_HOME";
pub const ENV_LANG: &str = "CCSETTING_LANG";
pub const DEFAULT_LOCALE: &str = "en";
pub const SUPPORTED_LOCALES: &[&str] = &["en", "ja"];

pub const CLAUDE_DIR: &str = ".claude";
pub const SETTINGS_FILE: &str = "settings.json";
pub const AGENTS_DIR: &str = "agents";
pub const SKILLS_DIR: &str = "skills";
pub const RULES_DIR: &str = "rules";
pub const SKILL_FILE: &str = "SKILL.md";
pub const DOCUMENT_SUFFIX: &str = ".md";

/// Home directory holding the global `.claude` folder.
pub fn resolve_home_dir() -> Result<PathBuf> {
    let env_override = env::var(ENV_HOME_DIR).ok();
    resolve_home_dir_with(env_override.as_deref(), dirs::home_dir())
}

pub fn resolve_home_dir_with(
    env_override: Option<&str>,
    default_home: Option<PathBuf>,
) -> Result<PathBuf> {
    if let Some(value) = env_override {
        validate_path_str(value).map_err(|e| CcsettingError::Config {
            message: t!("errors.invalid_home_dir_env", env_var = ENV_HOME_DIR, error = e)
                .to_string(),
        })?;
        return Ok(PathBuf::from(value));
    }

    default_home.ok_or_else(|| CcsettingError::Config {
        message: t!("errors.home_dir_not_found", env_var = ENV_HOME_DIR).to_string(),
    })
}

/// Project root: the `--dir` override, else the current working directory.
pub fn resolve_project_root(cli_override: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = cli_override {
        validate_path_str(&path.to_string_lossy()).map_err(|e| CcsettingError::Config {
            message: t!("errors.invalid_project_dir", error = e).to_string(),
        })?;
        return Ok(path.to_path_buf());
    }

    env::current_dir().map_err(|e| CcsettingError::Config {
        message: t!("errors.current_dir_unavailable", error = e.to_string()).to_string(),
    })
}

/// Pick a supported UI locale from a `CCSETTING_LANG`/`LANG` style value.
pub fn resolve_locale(value: Option<&str>) -> &'static str {
    let Some(value) = value else {
        return DEFAULT_LOCALE;
    };
    let lang = value
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    SUPPORTED_LOCALES
        .iter()
        .find(|locale| **locale == lang)
        .copied()
        .unwrap_or(DEFAULT_LOCALE)
}
