//! # Service Configuration
//!
//! Settings are read from a YAML file and then overridden by environment
//! variables. A missing file is not an error; every field has a default.
//!
//! ```yaml
//! bind_addr: "127.0.0.1:3000"
//! data_directory: "/var/lib/middlo"
//! slot_name: "middlo_submissions"
//! cors_origin: "http://localhost:8080"
//! simulated_latency_ms: 500
//! csv_quoting: verbatim
//! export_directory: "/srv/exports"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::domain::export_service::CsvQuoting;
use crate::storage::DEFAULT_SLOT_NAME;

pub const CONFIG_PATH_ENV: &str = "MIDDLO_CONFIG";
pub const BIND_ADDR_ENV: &str = "MIDDLO_BIND_ADDR";
pub const DATA_DIR_ENV: &str = "MIDDLO_DATA_DIR";
pub const CORS_ORIGIN_ENV: &str = "MIDDLO_CORS_ORIGIN";
pub const DEFAULT_CONFIG_FILE: &str = "middlo.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub data_directory: PathBuf,
    pub slot_name: String,
    pub cors_origin: String,
    /// Pause before the confirmation is shown, in milliseconds
    pub simulated_latency_ms: u64,
    pub csv_quoting: CsvQuoting,
    pub export_directory: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            data_directory: default_data_directory(),
            slot_name: DEFAULT_SLOT_NAME.to_string(),
            cors_origin: "http://localhost:8080".to_string(),
            simulated_latency_ms: 500,
            csv_quoting: CsvQuoting::default(),
            export_directory: None,
        }
    }
}

/// `<platform data dir>/Middlo`, or `./data` when the platform has none
fn default_data_directory() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("Middlo"))
        .unwrap_or_else(|| PathBuf::from("data"))
}

impl AppConfig {
    /// Load from `$MIDDLO_CONFIG` (or `middlo.yaml`), then apply env overrides
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));

        let mut config = Self::from_file(&path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.bind_socket_addr()?;
        Ok(config)
    }

    /// Read a YAML config file. A missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let yaml_content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: AppConfig = serde_yaml::from_str(&yaml_content)
            .with_context(|| format!("Invalid config file {:?}", path))?;
        debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Apply overrides from a variable lookup; blank values are ignored
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(addr) = lookup(BIND_ADDR_ENV) {
            self.bind_addr = addr;
        }
        if let Some(dir) = lookup(DATA_DIR_ENV) {
            self.data_directory = PathBuf::from(dir);
        }
        if let Some(origin) = lookup(CORS_ORIGIN_ENV) {
            self.cors_origin = origin;
        }
    }

    pub fn bind_socket_addr(&self) -> Result<SocketAddr> {
        self.bind_addr
            .parse()
            .with_context(|| format!("Invalid bind address '{}'", self.bind_addr))
    }
}
