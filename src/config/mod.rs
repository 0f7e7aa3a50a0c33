//! Configuration loading from TOML files and environment variables.
//!
//! Config is loaded in this order of precedence (highest wins):
//! 1. Environment variables (`FORKSWEEP_API_BASE_URL`, `FORKSWEEP_WEB_BASE_URL`,
//!    `FORKSWEEP_TOKEN`, `FORKSWEEP_TIMEOUT_SECS`, `NO_COLOR`)
//! 2. TOML file specified via --config CLI flag
//! 3. ./forksweep.toml in the current directory
//! 4. $XDG_CONFIG_HOME/forksweep/forksweep.toml (or ~/.config/forksweep/forksweep.toml)
//! 5. Built-in defaults

use crate::error::ConfigError;
use std::path::{Path, PathBuf};

mod defaults;
mod env;
mod sources;
mod types;

pub use sources::config_root_dir;
pub use types::{Config, DisplayConfig, GitHubConfig};

use defaults::MAX_PAGE_SIZE;
use env::apply_env_overrides;
use sources::locate_config_text;
use types::FileConfig;

/// Load configuration from disk and environment.
///
/// `path_override` is an explicit config file path (from --config flag).
pub fn load_config(path_override: Option<&str>) -> Result<Config, ConfigError> {
    load_config_from_sources(
        path_override,
        |path| std::fs::read_to_string(path),
        |name| std::env::var(name).ok(),
        config_root_dir,
    )
}

fn load_config_from_sources<FRead, FEnv, FRoot>(
    path_override: Option<&str>,
    read_file: FRead,
    env_lookup: FEnv,
    config_root: FRoot,
) -> Result<Config, ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FEnv: Fn(&str) -> Option<String>,
    FRoot: Fn() -> Option<PathBuf>,
{
    let (config_text, origin) = locate_config_text(path_override, &read_file, &config_root)?;
    match origin.path() {
        Some(path) => tracing::debug!("loaded config from {}", path.display()),
        None => tracing::debug!("no config file found; using defaults"),
    }
    let parsed: FileConfig = toml::from_str(&config_text)?;
    let mut config = resolve_file_config(parsed);
    apply_env_overrides(&mut config, &env_lookup)?;
    validate(&config)?;
    Ok(config)
}

fn resolve_file_config(file: FileConfig) -> Config {
    let mut config = Config::default();
    let github = file.github;
    if let Some(url) = github.api_base_url {
        config.github.api_base_url = url;
    }
    if let Some(url) = github.web_base_url {
        config.github.web_base_url = url;
    }
    config.github.token = github
        .token
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty());
    if let Some(timeout) = github.timeout_secs {
        config.github.timeout_secs = timeout.max(1);
    }
    if let Some(page_size) = github.page_size {
        config.github.page_size = page_size;
    }
    if let Some(color) = file.display.color {
        config.display.color = color;
    }
    if let Some(progress) = file.display.progress {
        config.display.progress = progress;
    }
    config
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.github.api_base_url.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "github.api_base_url must not be empty".to_string(),
        ));
    }
    if config.github.web_base_url.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "github.web_base_url must not be empty".to_string(),
        ));
    }
    if !(1..=MAX_PAGE_SIZE).contains(&config.github.page_size) {
        return Err(ConfigError::Invalid(format!(
            "github.page_size must be between 1 and {MAX_PAGE_SIZE}, got {}",
            config.github.page_size
        )));
    }
    Ok(())
}
