//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.mindmate/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct MindmateConfig {
    #[serde(default)]
    pub service: ServiceConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ServiceConfig {
    pub base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub request_timeout: Duration,
}

/// Values that can come from the environment. Read once in `main` so
/// resolution itself stays a pure function.
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    pub base_url: Option<String>,
    pub request_timeout_secs: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("MINDMATE_API_URL").ok(),
            request_timeout_secs: std::env::var("MINDMATE_TIMEOUT_SECS").ok(),
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.mindmate/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".mindmate").join("config.toml"))
}

/// Load config from `~/.mindmate/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `MindmateConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<MindmateConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(MindmateConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(MindmateConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config = parse_config(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

pub fn parse_config(contents: &str) -> Result<MindmateConfig, ConfigError> {
    toml::from_str(contents).map_err(ConfigError::Parse)
}

fn generate_default_config(path: &Path) {
    let default_content = r#"# MindMate Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [service]
# base_url = "http://localhost:8000"   # Or set MINDMATE_API_URL, or pass --api-url
# request_timeout_secs = 30            # Or set MINDMATE_TIMEOUT_SECS
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_base_url` is from the `--api-url` flag (None = not specified).
pub fn resolve(
    config: &MindmateConfig,
    env: &EnvOverrides,
    cli_base_url: Option<&str>,
) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli_base_url
        .map(|s| s.to_string())
        .or_else(|| env.base_url.clone())
        .or_else(|| config.service.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Timeout: env → config → default. Unparseable or zero env values are ignored.
    let env_timeout = env.request_timeout_secs.as_deref().and_then(|raw| {
        match raw.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Some(secs),
            _ => {
                warn!("Ignoring invalid MINDMATE_TIMEOUT_SECS value: {:?}", raw);
                None
            }
        }
    });
    let timeout_secs = env_timeout
        .or(config.service.request_timeout_secs.filter(|secs| *secs > 0))
        .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

    ResolvedConfig {
        base_url,
        request_timeout: Duration::from_secs(timeout_secs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_empty() {
        let config = MindmateConfig::default();
        assert!(config.service.base_url.is_none());
        assert!(config.service.request_timeout_secs.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve(&MindmateConfig::default(), &EnvOverrides::default(), None);
        assert_eq!(resolved.base_url, DEFAULT_BASE_URL);
        assert_eq!(
            resolved.request_timeout,
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)
        );
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = MindmateConfig {
            service: ServiceConfig {
                base_url: Some("http://10.0.0.5:9000".to_string()),
                request_timeout_secs: Some(5),
            },
        };
        let resolved = resolve(&config, &EnvOverrides::default(), None);
        assert_eq!(resolved.base_url, "http://10.0.0.5:9000");
        assert_eq!(resolved.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_env_overrides_config() {
        let config = MindmateConfig {
            service: ServiceConfig {
                base_url: Some("http://from-file".to_string()),
                request_timeout_secs: Some(5),
            },
        };
        let env = EnvOverrides {
            base_url: Some("http://from-env".to_string()),
            request_timeout_secs: Some("12".to_string()),
        };
        let resolved = resolve(&config, &env, None);
        assert_eq!(resolved.base_url, "http://from-env");
        assert_eq!(resolved.request_timeout, Duration::from_secs(12));
    }

    #[test]
    fn test_cli_url_wins() {
        let env = EnvOverrides {
            base_url: Some("http://from-env".to_string()),
            ..Default::default()
        };
        let resolved = resolve(&MindmateConfig::default(), &env, Some("http://from-cli"));
        assert_eq!(resolved.base_url, "http://from-cli");
    }

    #[test]
    fn test_invalid_env_timeout_falls_through() {
        let config = MindmateConfig {
            service: ServiceConfig {
                base_url: None,
                request_timeout_secs: Some(7),
            },
        };
        let env = EnvOverrides {
            base_url: None,
            request_timeout_secs: Some("soon".to_string()),
        };
        assert_eq!(resolve(&config, &env, None).request_timeout, Duration::from_secs(7));
    }

    #[test]
    fn test_zero_timeout_uses_default() {
        let config = MindmateConfig {
            service: ServiceConfig {
                base_url: None,
                request_timeout_secs: Some(0),
            },
        };
        assert_eq!(
            resolve(&config, &EnvOverrides::default(), None).request_timeout,
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)
        );
    }

    #[test]
    fn test_toml_parses() {
        let toml_str = r#"
[service]
base_url = "http://192.168.1.100:8000"
request_timeout_secs = 10
"#;
        let config = parse_config(toml_str).unwrap();
        assert_eq!(
            config.service.base_url.as_deref(),
            Some("http://192.168.1.100:8000")
        );
        assert_eq!(config.service.request_timeout_secs, Some(10));
    }

    #[test]
    fn test_sparse_toml_parses() {
        let config = parse_config("").unwrap();
        assert!(config.service.base_url.is_none());
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let err = parse_config("[service\nbase_url = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("config parse error"));
    }
}
