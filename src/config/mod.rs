//! Configuration loading and management
//!
//! Values come from, in increasing priority:
//! 1. built-in defaults
//! 2. an optional YAML file named by `MENU_CONFIG`
//! 3. environment variables (`JSON_SERVER_ORIGIN`, `MENU_*`)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_STORE_ORIGIN: &str = "http://localhost:3001";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_MOUNT_PATH: &str = "/items";

/// Environment variable naming the YAML config file
pub const CONFIG_PATH_ENV: &str = "MENU_CONFIG";

/// Errors raised while loading or checking configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },
}

/// Which record shape a deployment serves
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemVariant {
    /// [`MenuItem`](crate::entities::MenuItem)
    #[default]
    Menu,
    /// [`FoodItem`](crate::entities::FoodItem)
    Food,
}

impl fmt::Display for ItemVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemVariant::Menu => f.write_str("menu"),
            ItemVariant::Food => f.write_str("food"),
        }
    }
}

impl FromStr for ItemVariant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "menu" => Ok(ItemVariant::Menu),
            "food" => Ok(ItemVariant::Food),
            other => Err(ConfigError::InvalidValue {
                key: "variant".to_string(),
                reason: format!("expected 'menu' or 'food', got '{}'", other),
            }),
        }
    }
}

/// Proxy configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Base URL of the record store
    pub store_origin: String,

    /// Collection name; the entity's own name when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_resource: Option<String>,

    pub bind_addr: String,

    /// Where the item routes are mounted
    pub mount_path: String,

    pub variant: ItemVariant,

    /// Allow cross-origin requests from any origin
    pub cors_allow_any: bool,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            store_origin: DEFAULT_STORE_ORIGIN.to_string(),
            store_resource: None,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            mount_path: DEFAULT_MOUNT_PATH.to_string(),
            variant: ItemVariant::default(),
            cors_allow_any: false,
        }
    }
}

impl ProxyConfig {
    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Defaults overridden by the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_overrides_from(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// YAML file from `MENU_CONFIG` if set, then environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_yaml_file(path)?,
            Err(_) => Self::default(),
        };
        config.apply_overrides_from(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from any key lookup (the environment in production)
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(origin) = lookup("JSON_SERVER_ORIGIN") {
            self.store_origin = origin;
        }
        if let Some(resource) = lookup("MENU_STORE_RESOURCE") {
            self.store_resource = Some(resource);
        }
        if let Some(addr) = lookup("MENU_BIND_ADDR") {
            self.bind_addr = addr;
        }
        if let Some(path) = lookup("MENU_MOUNT_PATH") {
            self.mount_path = path;
        }
        if let Some(variant) = lookup("MENU_VARIANT") {
            self.variant = variant.parse()?;
        }
        if let Some(cors) = lookup("MENU_CORS_ALLOW_ANY") {
            self.cors_allow_any = matches!(cors.trim(), "1" | "true" | "yes");
        }
        Ok(())
    }

    /// Check values that would only fail later at request time
    pub fn validate(&self) -> Result<(), ConfigError> {
        match reqwest::Url::parse(&self.store_origin) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => {
                return Err(ConfigError::InvalidValue {
                    key: "store_origin".to_string(),
                    reason: format!("'{}' is not an http(s) URL", self.store_origin),
                });
            }
        }

        if !self.mount_path.starts_with('/') {
            return Err(ConfigError::InvalidValue {
                key: "mount_path".to_string(),
                reason: format!("'{}' must start with '/'", self.mount_path),
            });
        }

        if matches!(self.store_resource.as_deref(), Some(r) if r.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                key: "store_resource".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
