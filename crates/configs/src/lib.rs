use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_customers_file")]
    pub customers_file: String,
    #[serde(default = "default_movies_file")]
    pub movies_file: String,
    #[serde(default = "default_theaters_file")]
    pub theaters_file: String,
    /// Write to a temp file and rename over the target instead of rewriting in place.
    #[serde(default)]
    pub atomic_writes: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            customers_file: default_customers_file(),
            movies_file: default_movies_file(),
            theaters_file: default_theaters_file(),
            atomic_writes: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), format: LogFormat::Compact }
    }
}

fn default_data_dir() -> String { "data".into() }
fn default_customers_file() -> String { "customers.json".into() }
fn default_movies_file() -> String { "movies.json".into() }
fn default_theaters_file() -> String { "theaters.json".into() }
fn default_log_level() -> String { "warn".into() }

pub fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `config.toml` (or `CONFIG_PATH`), falling back to defaults when the
    /// file does not exist, then apply env overrides and validate.
    pub fn load_and_validate() -> Result<Self> {
        let path = config_path();
        let mut cfg = if Path::new(&path).exists() {
            load_from_file(&path).map_err(|e| anyhow!("cannot load {path}: {e}"))?
        } else {
            AppConfig::default()
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.storage.normalize_from_env();
        self.storage.normalize();
        self.storage.validate()?;
        self.logging.normalize();
        Ok(())
    }
}

impl StorageConfig {
    /// `CINEMA_DATA_DIR` and `CINEMA_ATOMIC_WRITES` win over the file.
    pub fn normalize_from_env(&mut self) {
        if let Ok(dir) = std::env::var("CINEMA_DATA_DIR") {
            if !dir.trim().is_empty() {
                self.data_dir = dir;
            }
        }
        if let Ok(flag) = std::env::var("CINEMA_ATOMIC_WRITES") {
            self.atomic_writes = parse_flag(&flag).unwrap_or(self.atomic_writes);
        }
    }

    fn normalize(&mut self) {
        if self.data_dir.trim().is_empty() {
            self.data_dir = default_data_dir();
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (key, value) in [
            ("storage.customers_file", &self.customers_file),
            ("storage.movies_file", &self.movies_file),
            ("storage.theaters_file", &self.theaters_file),
        ] {
            if value.trim().is_empty() {
                return Err(anyhow!("{key} must not be empty"));
            }
        }
        let names = [&self.customers_file, &self.movies_file, &self.theaters_file];
        if names[0] == names[1] || names[0] == names[2] || names[1] == names[2] {
            return Err(anyhow!("storage file names must be distinct"));
        }
        Ok(())
    }

    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }

    pub fn customers_path(&self) -> PathBuf {
        self.data_dir().join(&self.customers_file)
    }

    pub fn movies_path(&self) -> PathBuf {
        self.data_dir().join(&self.movies_file)
    }

    pub fn theaters_path(&self) -> PathBuf {
        self.data_dir().join(&self.theaters_file)
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.level.trim().is_empty() {
            self.level = default_log_level();
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
