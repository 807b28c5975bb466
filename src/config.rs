//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars.
//!
//! Config lives at `~/.atlas/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//! The theme preference is the one setting written back at runtime.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AtlasConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DisplayConfig {
    pub theme: Option<Theme>,
}

/// Display theme, persisted across runs.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn label(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub theme: Theme,
}

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Serialize(toml::ser::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
            ConfigError::Serialize(e) => write!(f, "config serialize error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.atlas/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".atlas").join("config.toml"))
}

/// Load config from `~/.atlas/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `AtlasConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<AtlasConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(AtlasConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(AtlasConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: AtlasConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Atlas Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars.

# [api]
# base_url = "https://restcountries.com/v3.1"
# timeout_secs = 10

# [display]
# theme = "light"                    # "light" or "dark"
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars.
pub fn resolve(config: &AtlasConfig) -> ResolvedConfig {
    // Base URL: env → config → default
    let base_url = std::env::var("ATLAS_BASE_URL")
        .ok()
        .or_else(|| config.api.base_url.clone())
        .unwrap_or_else(|| crate::countries::repository::DEFAULT_BASE_URL.to_string());

    // Timeout: env → config → default
    let timeout_secs = std::env::var("ATLAS_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .or(config.api.timeout_secs)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);

    ResolvedConfig {
        base_url,
        timeout: Duration::from_secs(timeout_secs),
        theme: config.display.theme.unwrap_or_default(),
    }
}

/// Persists the theme preference, keeping the rest of the config intact.
pub fn store_theme(theme: Theme) -> Result<(), ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, theme not persisted");
            return Ok(());
        }
    };

    let mut config = if path.exists() {
        let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
        toml::from_str(&contents).map_err(ConfigError::Parse)?
    } else {
        AtlasConfig::default()
    };
    config.display.theme = Some(theme);

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(ConfigError::Io)?;
    }
    let contents = toml::to_string_pretty(&config).map_err(ConfigError::Serialize)?;
    fs::write(&path, contents).map_err(ConfigError::Io)?;
    info!("Stored theme preference: {}", theme.label());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = AtlasConfig::default();
        assert!(config.api.base_url.is_none());
        assert!(config.display.theme.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = AtlasConfig::default();
        let resolved = resolve(&config);
        assert_eq!(resolved.base_url, "https://restcountries.com/v3.1");
        assert_eq!(resolved.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(resolved.theme, Theme::Light);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = AtlasConfig {
            api: ApiConfig {
                base_url: Some("http://localhost:8080/v3.1".to_string()),
                timeout_secs: Some(3),
            },
            display: DisplayConfig {
                theme: Some(Theme::Dark),
            },
        };
        let resolved = resolve(&config);
        assert_eq!(resolved.base_url, "http://localhost:8080/v3.1");
        assert_eq!(resolved.timeout, Duration::from_secs(3));
        assert_eq!(resolved.theme, Theme::Dark);
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[api]
base_url = "http://localhost:9000/v3.1"
timeout_secs = 5

[display]
theme = "dark"
"#;
        let config: AtlasConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.api.base_url.as_deref(),
            Some("http://localhost:9000/v3.1")
        );
        assert_eq!(config.api.timeout_secs, Some(5));
        assert_eq!(config.display.theme, Some(Theme::Dark));

        let rendered = toml::to_string_pretty(&config).unwrap();
        let reparsed: AtlasConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(reparsed.display.theme, Some(Theme::Dark));
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing — everything else stays default
        let toml_str = r#"
[api]
timeout_secs = 30
"#;
        let config: AtlasConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api.timeout_secs, Some(30));
        assert!(config.api.base_url.is_none());
        assert!(config.display.theme.is_none());
    }

    #[test]
    fn test_theme_labels() {
        assert_eq!(Theme::Light.label(), "light");
        assert_eq!(Theme::Dark.label(), "dark");
    }
}
