//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.monitora/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//!
//! Loading runs before the file logger exists (the log file itself is a
//! config value), so messages are collected as `ConfigNote`s and written
//! out by `main` once logging is initialized.

use log::Level;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::StartScreen;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct MonitoraConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub backend: BackendConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub start_screen: Option<StartScreen>,
    pub log_level: Option<String>,
    pub log_file: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BackendConfig {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "http://localhost:8081";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_LOG_FILE: &str = "monitora.log";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub start_screen: StartScreen,
    pub log_level: log::LevelFilter,
    pub log_file: String,
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
// Notes (deferred log records)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigNote {
    pub level: Level,
    pub message: String,
}

impl ConfigNote {
    fn push(notes: &mut Vec<ConfigNote>, level: Level, message: String) {
        notes.push(ConfigNote { level, message });
    }

    /// Emits the note through the installed logger.
    pub fn log(&self) {
        log::log!(self.level, "{}", self.message);
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.monitora/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".monitora").join("config.toml"))
}

/// Load config from `~/.monitora/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `MonitoraConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config(notes: &mut Vec<ConfigNote>) -> Result<MonitoraConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            ConfigNote::push(
                notes,
                Level::Warn,
                "Could not determine home directory, using default config".to_string(),
            );
            return Ok(MonitoraConfig::default());
        }
    };

    if !path.exists() {
        ConfigNote::push(
            notes,
            Level::Info,
            format!("No config file found, generating default at {}", path.display()),
        );
        generate_default_config(&path, notes);
        return Ok(MonitoraConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config = parse_config(&contents)?;
    ConfigNote::push(notes, Level::Info, format!("Loaded config from {}", path.display()));
    ConfigNote::push(notes, Level::Debug, format!("Config: {:?}", config));
    Ok(config)
}

pub fn parse_config(contents: &str) -> Result<MonitoraConfig, ConfigError> {
    toml::from_str(contents).map_err(ConfigError::Parse)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf, notes: &mut Vec<ConfigNote>) {
    let default_content = r#"# Monitora Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# start_screen = "home"              # home, equipment-classes, equipment, monitoring, clients, locations
# log_level = "debug"                # error, warn, info, debug, trace, off
# log_file = "monitora.log"

# [backend]
# base_url = "http://localhost:8081" # Or set MONITORA_BASE_URL env var
# timeout_secs = 10                  # Or set MONITORA_TIMEOUT_SECS env var
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            ConfigNote::push(notes, Level::Warn, format!("Failed to create config directory: {}", e));
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        ConfigNote::push(notes, Level::Warn, format!("Failed to write default config: {}", e));
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Values given on the command line (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub base_url: Option<String>,
    pub start_screen: Option<StartScreen>,
}

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(
    config: &MonitoraConfig,
    cli: &CliOverrides,
    notes: &mut Vec<ConfigNote>,
) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok(), notes)
}

/// Same as [`resolve`], reading environment variables through `env`.
pub fn resolve_with_env<F>(
    config: &MonitoraConfig,
    cli: &CliOverrides,
    env: F,
    notes: &mut Vec<ConfigNote>,
) -> ResolvedConfig
where
    F: Fn(&str) -> Option<String>,
{
    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .clone()
        .or_else(|| env("MONITORA_BASE_URL"))
        .or_else(|| config.backend.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Timeout: env → config → default
    let timeout_secs = env("MONITORA_TIMEOUT_SECS")
        .and_then(|s| match s.trim().parse::<u64>() {
            Ok(v) => Some(v),
            Err(_) => {
                ConfigNote::push(
                    notes,
                    Level::Warn,
                    format!("Ignoring invalid MONITORA_TIMEOUT_SECS: {}", s),
                );
                None
            }
        })
        .or(config.backend.timeout_secs)
        .filter(|secs| {
            if *secs == 0 {
                ConfigNote::push(notes, Level::Warn, "Ignoring zero request timeout".to_string());
            }
            *secs > 0
        })
        .unwrap_or(DEFAULT_TIMEOUT_SECS);

    let start_screen = cli
        .start_screen
        .or(config.general.start_screen)
        .unwrap_or_default();

    let log_level = config
        .general
        .log_level
        .as_deref()
        .and_then(|level| match level.parse::<log::LevelFilter>() {
            Ok(l) => Some(l),
            Err(_) => {
                ConfigNote::push(notes, Level::Warn, format!("Ignoring invalid log_level: {}", level));
                None
            }
        })
        .unwrap_or(log::LevelFilter::Debug);

    ResolvedConfig {
        base_url,
        timeout: Duration::from_secs(timeout_secs),
        start_screen,
        log_level,
        log_file: config
            .general
            .log_file
            .clone()
            .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = MonitoraConfig::default();
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env, &mut Vec::new());
        assert_eq!(resolved.base_url, DEFAULT_BASE_URL);
        assert_eq!(resolved.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(resolved.start_screen, StartScreen::Home);
        assert_eq!(resolved.log_level, log::LevelFilter::Debug);
        assert_eq!(resolved.log_file, DEFAULT_LOG_FILE);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = MonitoraConfig {
            general: GeneralConfig {
                start_screen: Some(StartScreen::Clients),
                log_level: Some("warn".to_string()),
                log_file: Some("/tmp/m.log".to_string()),
            },
            backend: BackendConfig {
                base_url: Some("http://10.0.0.5:8000".to_string()),
                timeout_secs: Some(3),
            },
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env, &mut Vec::new());
        assert_eq!(resolved.base_url, "http://10.0.0.5:8000");
        assert_eq!(resolved.timeout, Duration::from_secs(3));
        assert_eq!(resolved.start_screen, StartScreen::Clients);
        assert_eq!(resolved.log_level, log::LevelFilter::Warn);
        assert_eq!(resolved.log_file, "/tmp/m.log");
    }

    #[test]
    fn test_env_beats_config_and_cli_beats_env() {
        let config = MonitoraConfig {
            backend: BackendConfig {
                base_url: Some("http://config:1".to_string()),
                timeout_secs: Some(3),
            },
            ..Default::default()
        };
        let env = |key: &str| match key {
            "MONITORA_BASE_URL" => Some("http://env:2".to_string()),
            "MONITORA_TIMEOUT_SECS" => Some("7".to_string()),
            _ => None,
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), env, &mut Vec::new());
        assert_eq!(resolved.base_url, "http://env:2");
        assert_eq!(resolved.timeout, Duration::from_secs(7));

        let cli = CliOverrides {
            base_url: Some("http://cli:3".to_string()),
            start_screen: Some(StartScreen::Locations),
        };
        let resolved = resolve_with_env(&config, &cli, env, &mut Vec::new());
        assert_eq!(resolved.base_url, "http://cli:3");
        assert_eq!(resolved.start_screen, StartScreen::Locations);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = MonitoraConfig {
            general: GeneralConfig {
                log_level: Some("loud".to_string()),
                ..Default::default()
            },
            backend: BackendConfig {
                timeout_secs: Some(0),
                ..Default::default()
            },
        };
        let env = |key: &str| (key == "MONITORA_TIMEOUT_SECS").then(|| "soon".to_string());
        let mut notes = Vec::new();
        let resolved = resolve_with_env(&config, &CliOverrides::default(), env, &mut notes);
        assert_eq!(resolved.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(resolved.log_level, log::LevelFilter::Debug);

        // Every fallback leaves a warning to be logged after startup
        let messages: Vec<&str> = notes.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Ignoring invalid MONITORA_TIMEOUT_SECS: soon",
                "Ignoring zero request timeout",
                "Ignoring invalid log_level: loud",
            ]
        );
        assert!(notes.iter().all(|n| n.level == Level::Warn));
    }

    #[test]
    fn test_valid_config_leaves_no_warnings() {
        let config = MonitoraConfig::default();
        let mut notes = Vec::new();
        resolve_with_env(&config, &CliOverrides::default(), no_env, &mut notes);
        assert!(notes.is_empty());
    }

    #[test]
    fn test_toml_parses() {
        let toml_str = r#"
[general]
start_screen = "equipment-classes"
log_level = "info"

[backend]
base_url = "http://192.168.1.100:8081"
timeout_secs = 5
"#;
        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.general.start_screen, Some(StartScreen::EquipmentClasses));
        assert_eq!(config.general.log_level.as_deref(), Some("info"));
        assert_eq!(
            config.backend.base_url.as_deref(),
            Some("http://192.168.1.100:8081")
        );
        assert_eq!(config.backend.timeout_secs, Some(5));
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing; everything else stays default
        let toml_str = r#"
[backend]
base_url = "http://example.test"
"#;
        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.backend.base_url.as_deref(), Some("http://example.test"));
        assert!(config.backend.timeout_secs.is_none());
        assert!(config.general.start_screen.is_none());
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let result = parse_config("[backend\nbase_url = 1");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
