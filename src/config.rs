use std::{
    env, fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::menu::MenuSet;
use crate::navigator::DEFAULT_MAX_DEPTH;

pub const CONFIG_ENV: &str = "ROFIMENU_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "menu.yaml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub options: Options,

    #[serde(default, rename = "app")]
    pub menus: MenuSet,
}

/// Application level settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Options {
    /// Print the final selection to stdout.
    #[serde(default)]
    pub stdout: bool,

    #[serde(default = "default_max_depth", rename = "max-depth")]
    pub max_depth: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            stdout: false,
            max_depth: default_max_depth(),
        }
    }
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

/// `--config` wins, then `$ROFIMENU_CONFIG`, then `menu.yaml` in the working
/// directory.
pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }

    if let Ok(p) = env::var(CONFIG_ENV) {
        if !p.trim().is_empty() {
            return PathBuf::from(p);
        }
    }

    PathBuf::from(DEFAULT_CONFIG_FILE)
}

pub fn load(path: &Path) -> Result<Config, ConfigError> {
    if path.is_dir() {
        return Err(ConfigError::IsDirectory(path.to_path_buf()));
    }
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let cfg = parse(path, &text)?;
    if cfg.menus.is_empty() {
        return Err(ConfigError::Empty(path.to_path_buf()));
    }
    Ok(cfg)
}

/// JSON for `.json` files, YAML otherwise.
pub fn parse(path: &Path, text: &str) -> Result<Config, ConfigError> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let parsed: Result<Config, String> = if is_json {
        serde_json::from_str(text).map_err(|e| e.to_string())
    } else {
        serde_yaml_ng::from_str(text).map_err(|e| e.to_string())
    };
    parsed.map_err(|message| ConfigError::Parse {
        path: path.to_path_buf(),
        message,
    })
}
