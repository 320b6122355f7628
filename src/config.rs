//! Layered configuration, highest priority first:
//! 1. CLI flags and environment variables (clap `env`)
//! 2. TOML file (`--config`, else `<config dir>/taskdesk/config.toml`)
//! 3. Compiled defaults
//!
//! A missing default file is fine. A missing explicit `--config` is an error.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::TaskdeskError;
use crate::view::task_list::DEFAULT_PAGE_SIZE;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    base_url: Option<String>,
    page_size: Option<u32>,
    log_level: Option<String>,
    session_file: Option<PathBuf>,
    send_username: Option<bool>,
}

/// Values given on the command line or through the environment.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub config_path: Option<PathBuf>,
    pub base_url: Option<String>,
    pub session_file: Option<PathBuf>,
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub base_url: String,
    pub page_size: u32,
    pub log_level: String,
    pub session_file: PathBuf,
    pub send_username: bool,
}

impl Config {
    pub fn load(overrides: &Overrides) -> Result<Self, TaskdeskError> {
        let file = match &overrides.config_path {
            Some(path) => read_file(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => read_file(&path)?,
                _ => ConfigFile::default(),
            },
        };
        Self::resolve(file, overrides)
    }

    fn resolve(file: ConfigFile, overrides: &Overrides) -> Result<Self, TaskdeskError> {
        let page_size = file.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if page_size == 0 {
            return Err(TaskdeskError::config("page_size must be at least 1"));
        }
        let session_file = match overrides.session_file.clone().or(file.session_file) {
            Some(path) => path,
            None => default_session_path()?,
        };
        Ok(Self {
            base_url: overrides
                .base_url
                .clone()
                .or(file.base_url)
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            page_size,
            log_level: overrides
                .log_level
                .clone()
                .or(file.log_level)
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            session_file,
            send_username: file.send_username.unwrap_or(true),
        })
    }
}

fn read_file(path: &Path) -> Result<ConfigFile, TaskdeskError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        TaskdeskError::config(format!("failed to read config file {}: {e}", path.display()))
    })?;
    Ok(toml::from_str(&content)?)
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("taskdesk").join("config.toml"))
}

fn default_session_path() -> Result<PathBuf, TaskdeskError> {
    dirs::data_local_dir()
        .or_else(dirs::home_dir)
        .map(|dir| dir.join("taskdesk").join("session.json"))
        .ok_or_else(|| {
            TaskdeskError::config("could not determine a data directory; set --session-file")
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn overrides_with_session(dir: &TempDir) -> Overrides {
        Overrides {
            session_file: Some(dir.path().join("session.json")),
            ..Overrides::default()
        }
    }

    #[test]
    fn test_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::resolve(ConfigFile::default(), &overrides_with_session(&dir)).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.page_size, 5);
        assert_eq!(config.log_level, "warn");
        assert!(config.send_username);
    }

    #[test]
    fn test_file_then_overrides() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "base_url = \"http://file/api\"\npage_size = 10\nlog_level = \"debug\"\nsend_username = false\n",
        )
        .unwrap();

        let mut overrides = overrides_with_session(&dir);
        overrides.config_path = Some(path);
        let config = Config::load(&overrides).unwrap();
        assert_eq!(config.base_url, "http://file/api");
        assert_eq!(config.page_size, 10);
        assert!(!config.send_username);

        overrides.base_url = Some("http://flag/api".into());
        overrides.log_level = Some("trace".into());
        let config = Config::load(&overrides).unwrap();
        assert_eq!(config.base_url, "http://flag/api");
        assert_eq!(config.log_level, "trace");
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let mut overrides = overrides_with_session(&dir);
        overrides.config_path = Some(dir.path().join("nope.toml"));
        let e = Config::load(&overrides).unwrap_err();
        assert_eq!(e.code, crate::error::ErrorCode::ConfigError);
    }

    #[test]
    fn test_bad_toml_and_zero_page_size() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let mut overrides = overrides_with_session(&dir);
        overrides.config_path = Some(path.clone());

        std::fs::write(&path, "page_size = \"many\"").unwrap();
        assert!(Config::load(&overrides).is_err());

        std::fs::write(&path, "page_size = 0").unwrap();
        assert!(Config::load(&overrides).is_err());
    }
}
