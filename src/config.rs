use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    pub redmine_urls: Vec<SourceConfig>,
}

/// One Redmine instance to pull issues from.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SourceConfig {
    /// Base URL; `issues.json` is appended to it verbatim, so it should end in `/`.
    pub url: String,
    pub api_key: String,
    pub query_id: i64,
    pub limit: i64,
}

pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(path, &contents)
}

fn parse_config(path: &Path, contents: &str) -> Result<AppConfig, ConfigError> {
    let parse_error = |message: String| ConfigError::Parse {
        path: PathBuf::from(path),
        message,
    };

    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    if is_toml {
        toml::from_str(contents).map_err(|e| parse_error(e.to_string()))
    } else {
        serde_yaml::from_str(contents).map_err(|e| parse_error(e.to_string()))
    }
}
