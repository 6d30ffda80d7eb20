//! TOML configuration file parsing

use crate::error::ConfigError;
use crate::table::selector::AddressSelector;
use serde::Deserialize;

/// TOML configuration structure
#[derive(Debug, Deserialize)]
pub struct TomlConfig {
    pub interfaces: Option<Vec<TomlInterface>>,
    pub routes: Option<Vec<TomlRoute>>,
    pub logging: Option<LoggingConfig>,
}

/// TOML interface declaration
#[derive(Debug, Deserialize)]
pub struct TomlInterface {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub addresses: Vec<TomlInterfaceAddress>,
}

/// TOML interface address declaration
#[derive(Debug, Deserialize)]
pub struct TomlInterfaceAddress {
    pub ip: String,
    pub netmask: String,
    pub broadcast: Option<String>,
    pub gateway: Option<String>,
}

/// TOML route declaration
#[derive(Debug, Deserialize)]
pub struct TomlRoute {
    pub interface: u64,
    pub src: Option<String>,
    pub dst: String,
    #[serde(default)]
    pub priority: u32,
    pub next_hop: Option<String>,
    pub selector: Option<AddressSelector>,
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
}

/// Load configuration from TOML file
pub fn load_toml_config(path: &str) -> Result<TomlConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_string(),
    })?;

    toml::from_str(&content).map_err(|e| ConfigError::InvalidFormat(e.to_string()))
}
