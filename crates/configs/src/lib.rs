use std::{io, path::PathBuf};

use anyhow::anyhow;
use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8080,
            worker_threads: Some(4),
            log_format: default_log_format(),
        }
    }
}

/// Where the service and the catalog tooling read their data from.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_locations_path")]
    pub locations_path: PathBuf,
    /// Record field holding the list of beer identifiers.
    #[serde(default = "default_tag_field")]
    pub tag_field: String,
    #[serde(default = "default_products_path")]
    pub products_path: PathBuf,
    #[serde(default = "default_categories_path")]
    pub categories_path: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            locations_path: default_locations_path(),
            tag_field: default_tag_field(),
            products_path: default_products_path(),
            categories_path: default_categories_path(),
        }
    }
}

fn default_log_format() -> String { "compact".into() }
fn default_locations_path() -> PathBuf { PathBuf::from("data/locations.json") }
fn default_tag_field() -> String { "Beers".into() }
fn default_products_path() -> PathBuf { PathBuf::from("data/products.yaml") }
fn default_categories_path() -> PathBuf { PathBuf::from("data/categories.yaml") }

fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_default() -> Result<AppConfig> {
    load_from_file(&config_path())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Config file if present, otherwise defaults overlaid with environment variables.
    pub fn load_or_env() -> Result<Self> {
        Self::load_or_env_from(&config_path())
    }

    /// Only a missing file falls back to the environment; unreadable or malformed files are errors.
    pub fn load_or_env_from(path: &str) -> Result<Self> {
        let mut cfg = match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).with_context(|| format!("invalid config file {path}"))?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Self::from_env(),
            Err(e) => return Err(e).with_context(|| format!("cannot read config file {path}")),
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Defaults with `SERVER_HOST`, `SERVER_PORT`, `LOCATIONS_PATH` and `TAG_FIELD` applied.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(host) = std::env::var("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            cfg.server.port = port;
        }
        if let Ok(path) = std::env::var("LOCATIONS_PATH") {
            cfg.catalog.locations_path = PathBuf::from(path);
        }
        if let Ok(field) = std::env::var("TAG_FIELD") {
            cfg.catalog.tag_field = field;
        }
        cfg
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.catalog.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        let format = self.log_format.trim().to_lowercase();
        if format != "compact" && format != "json" {
            return Err(anyhow!("server.log_format must be \"compact\" or \"json\", got {:?}", self.log_format));
        }
        self.log_format = format;
        Ok(())
    }
}

impl CatalogConfig {
    pub fn validate(&self) -> Result<()> {
        if self.locations_path.as_os_str().is_empty() {
            return Err(anyhow!("catalog.locations_path is empty"));
        }
        if self.tag_field.trim().is_empty() {
            return Err(anyhow!("catalog.tag_field is empty"));
        }
        Ok(())
    }
}
