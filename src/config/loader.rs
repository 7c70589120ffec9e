//! Configuration loading and discovery for `tokensrc.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::TokensrcConfig;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the config file searched for
pub const CONFIG_FILE: &str = "tokensrc.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse tokensrc.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override pretty printing
    pub pretty: Option<bool>,
    /// Override the export name prefix
    pub export_prefix: Option<String>,
}

/// Find tokensrc.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for tokensrc.toml
/// 2. Check XDG_CONFIG_HOME/tokensrc/tokensrc.toml (or ~/.config/tokensrc/tokensrc.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find tokensrc.toml in the XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("tokensrc").join(CONFIG_FILE);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Find tokensrc.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration.
///
/// If a path is provided, loads from that file (which must exist). Otherwise
/// uses [`find_config`]; when nothing is found the defaults apply.
///
/// # Example
/// ```ignore
/// let config = load_config(None)?;
/// let config = load_config(Some(Path::new("design/tokensrc.toml")))?;
/// ```
pub fn load_config(path: Option<&Path>) -> Result<TokensrcConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => Ok(TokensrcConfig::default()),
    }
}

fn load_config_file(path: &Path) -> Result<TokensrcConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: TokensrcConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(config)
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values.
pub fn merge_cli_overrides(config: &mut TokensrcConfig, overrides: &CliOverrides) {
    if let Some(pretty) = overrides.pretty {
        config.output.pretty = pretty;
    }

    if let Some(ref prefix) = overrides.export_prefix {
        config.codegen.export_prefix = prefix.clone();
    }
}
