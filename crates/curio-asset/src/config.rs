//! Layered session configuration
//!
//! Config is loaded with three layers of precedence (highest wins):
//! 1. Environment variables: `CURIO_AUTHOR`, `CURIO_CATALOG`
//! 2. Project-local: `.curio/config.toml`
//! 3. Global: `~/.curio/config.toml`

use curio_core::{CurioError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Values applied to a content item when it is marked as an asset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetDefaults {
    #[serde(default)]
    pub default_author: Option<String>,
    #[serde(default)]
    pub default_catalog: Option<String>,
}

/// Top-level config file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SessionConfigFile {
    #[serde(default)]
    asset: AssetDefaults,
}

/// Resolved configuration with environment variable overrides applied
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionConfig {
    pub asset: AssetDefaults,
}

impl SessionConfig {
    /// Load config with layered precedence: global < project < env vars
    pub fn load() -> Result<Self> {
        let mut config = SessionConfigFile::default();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global = Self::load_file(&global_path)?;
                Self::merge_into(&mut config, global);
            }
        }

        let local_path = PathBuf::from(".curio/config.toml");
        if local_path.exists() {
            let local = Self::load_file(&local_path)?;
            Self::merge_into(&mut config, local);
        }

        Self::apply_env_overrides(&mut config);

        Ok(SessionConfig {
            asset: config.asset,
        })
    }

    /// Load config from a specific file path only
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let mut config = Self::load_file(path)?;
        Self::apply_env_overrides(&mut config);
        Ok(SessionConfig {
            asset: config.asset,
        })
    }

    pub fn default_author(&self) -> Option<&str> {
        self.asset.default_author.as_deref()
    }

    pub fn default_catalog(&self) -> Option<&str> {
        self.asset.default_catalog.as_deref()
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".curio").join("config.toml"))
    }

    fn load_file(path: &Path) -> Result<SessionConfigFile> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
            .map_err(|e| CurioError::ConfigError(format!("{}: {}", path.display(), e)))
    }

    fn parse(content: &str) -> std::result::Result<SessionConfigFile, toml::de::Error> {
        toml::from_str(content)
    }

    fn merge_into(base: &mut SessionConfigFile, overlay: SessionConfigFile) {
        if overlay.asset.default_author.is_some() {
            base.asset.default_author = overlay.asset.default_author;
        }
        if overlay.asset.default_catalog.is_some() {
            base.asset.default_catalog = overlay.asset.default_catalog;
        }
    }

    fn apply_env_overrides(config: &mut SessionConfigFile) {
        if let Ok(author) = std::env::var("CURIO_AUTHOR") {
            config.asset.default_author = Some(author);
        }
        if let Ok(catalog) = std::env::var("CURIO_CATALOG") {
            config.asset.default_catalog = Some(catalog);
        }
    }
}
