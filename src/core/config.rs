//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.concierge/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{Level, LevelFilter};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::api::DEFAULT_BASE_URL;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ConciergeConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub file: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;
pub const DEFAULT_LOG_FILE: &str = "concierge.log";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
}

/// Values given on the command line. `None` = flag not passed.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub base_url: Option<String>,
    pub log_level: Option<LevelFilter>,
    pub log_file: Option<PathBuf>,
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
// Startup Notes
// ============================================================================

/// A message produced while loading config.
///
/// Config is read before the logger exists (the log file is itself a config
/// value), so `load_config` and `resolve` collect notes instead of logging.
/// `main` replays them once the logger is installed.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigNote {
    pub level: Level,
    pub message: String,
}

impl ConfigNote {
    fn info(message: String) -> Self {
        Self {
            level: Level::Info,
            message,
        }
    }

    fn warn(message: String) -> Self {
        Self {
            level: Level::Warn,
            message,
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.concierge/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".concierge").join("config.toml"))
}

/// Load config from `~/.concierge/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `ConciergeConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config(notes: &mut Vec<ConfigNote>) -> Result<ConciergeConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            notes.push(ConfigNote::warn(
                "Could not determine home directory, using default config".to_string(),
            ));
            return Ok(ConciergeConfig::default());
        }
    };

    if !path.exists() {
        notes.push(ConfigNote::info(format!(
            "No config file found, generating default at {}",
            path.display()
        )));
        if let Err(e) = generate_default_config(&path) {
            notes.push(ConfigNote::warn(format!("Failed to write default config: {e}")));
        }
        return Ok(ConciergeConfig::default());
    }

    let config = load_config_from(&path)?;
    notes.push(ConfigNote::info(format!("Loaded config from {}", path.display())));
    Ok(config)
}

/// Load config from an explicit path. The file must exist.
pub fn load_config_from(path: &Path) -> Result<ConciergeConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    toml::from_str(&contents).map_err(ConfigError::Parse)
}

fn generate_default_config(path: &Path) -> std::io::Result<()> {
    let default_content = r#"# Concierge Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [api]
# base_url = "http://127.0.0.1:8000"   # Or set CONCIERGE_BASE_URL env var

# [logging]
# level = "debug"                      # off, error, warn, info, debug, trace
# file = "concierge.log"               # Relative to the working directory
"#;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, default_content)
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(
    config: &ConciergeConfig,
    cli: &CliOverrides,
    notes: &mut Vec<ConfigNote>,
) -> ResolvedConfig {
    resolve_with(config, cli, |key| std::env::var(key).ok(), notes)
}

/// `resolve` with the environment lookup supplied by the caller.
pub fn resolve_with(
    config: &ConciergeConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
    notes: &mut Vec<ConfigNote>,
) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .clone()
        .or_else(|| env("CONCIERGE_BASE_URL"))
        .or_else(|| config.api.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Log level: CLI → env → config → default. Unparseable values fall through.
    let log_level = match cli.log_level {
        Some(level) => level,
        None => parse_level(env("CONCIERGE_LOG_LEVEL").as_deref(), "CONCIERGE_LOG_LEVEL", notes)
            .or_else(|| parse_level(config.logging.level.as_deref(), "logging.level", notes))
            .unwrap_or(DEFAULT_LOG_LEVEL),
    };

    let log_file = cli
        .log_file
        .clone()
        .or_else(|| env("CONCIERGE_LOG_FILE").map(PathBuf::from))
        .or_else(|| config.logging.file.clone().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

    ResolvedConfig {
        base_url,
        log_level,
        log_file,
    }
}

fn parse_level(
    value: Option<&str>,
    source: &str,
    notes: &mut Vec<ConfigNote>,
) -> Option<LevelFilter> {
    let value = value?;
    match value.parse() {
        Ok(level) => Some(level),
        Err(_) => {
            notes.push(ConfigNote::warn(format!(
                "Ignoring unknown log level {value:?} from {source}"
            )));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_empty() {
        let config = ConciergeConfig::default();
        assert!(config.api.base_url.is_none());
        assert!(config.logging.level.is_none());
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_resolve_config_file_over_defaults() {
        let config = ConciergeConfig {
            api: ApiConfig {
                base_url: Some("http://from-file:8000".to_string()),
            },
            ..Default::default()
        };
        let mut notes = Vec::new();
        let resolved = resolve_with(&config, &CliOverrides::default(), no_env, &mut notes);

        assert_eq!(resolved.base_url, "http://from-file:8000");
        assert_eq!(resolved.log_level, DEFAULT_LOG_LEVEL);
        assert_eq!(resolved.log_file, PathBuf::from(DEFAULT_LOG_FILE));
        assert!(notes.is_empty());
    }

    #[test]
    fn test_resolve_env_over_file() {
        let config = ConciergeConfig {
            api: ApiConfig {
                base_url: Some("http://from-file:8000".to_string()),
            },
            logging: LoggingConfig {
                level: Some("warn".to_string()),
                file: Some("file.log".to_string()),
            },
        };
        let env = |key: &str| match key {
            "CONCIERGE_BASE_URL" => Some("http://from-env:8000".to_string()),
            "CONCIERGE_LOG_LEVEL" => Some("error".to_string()),
            _ => None,
        };
        let mut notes = Vec::new();
        let resolved = resolve_with(&config, &CliOverrides::default(), env, &mut notes);

        assert_eq!(resolved.base_url, "http://from-env:8000");
        assert_eq!(resolved.log_level, LevelFilter::Error);
        assert_eq!(resolved.log_file, PathBuf::from("file.log"));
    }

    #[test]
    fn test_resolve_cli_wins() {
        let config = ConciergeConfig {
            api: ApiConfig {
                base_url: Some("http://from-file:8000".to_string()),
            },
            logging: LoggingConfig {
                level: Some("warn".to_string()),
                file: Some("file.log".to_string()),
            },
        };
        let cli = CliOverrides {
            base_url: Some("http://from-cli:9000".to_string()),
            log_level: Some(LevelFilter::Trace),
            log_file: Some(PathBuf::from("cli.log")),
        };
        let env = |_: &str| Some("loud".to_string());
        let mut notes = Vec::new();
        let resolved = resolve_with(&config, &cli, env, &mut notes);

        assert_eq!(resolved.base_url, "http://from-cli:9000");
        assert_eq!(resolved.log_level, LevelFilter::Trace);
        assert_eq!(resolved.log_file, PathBuf::from("cli.log"));
        // The env level is never consulted, so it is not reported either
        assert!(notes.is_empty());
    }

    #[test]
    fn test_unknown_env_level_is_reported() {
        let config = ConciergeConfig {
            logging: LoggingConfig {
                level: Some("info".to_string()),
                file: None,
            },
            ..Default::default()
        };
        let env = |key: &str| (key == "CONCIERGE_LOG_LEVEL").then(|| "loud".to_string());
        let mut notes = Vec::new();
        let resolved = resolve_with(&config, &CliOverrides::default(), env, &mut notes);

        assert_eq!(resolved.log_level, LevelFilter::Info);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].level, Level::Warn);
        assert!(notes[0].message.contains("\"loud\""));
        assert!(notes[0].message.contains("CONCIERGE_LOG_LEVEL"));
    }

    #[test]
    fn test_parse_level() {
        let mut notes = Vec::new();
        assert_eq!(parse_level(Some("info"), "test", &mut notes), Some(LevelFilter::Info));
        assert_eq!(parse_level(Some("OFF"), "test", &mut notes), Some(LevelFilter::Off));
        assert_eq!(parse_level(None, "test", &mut notes), None);
        assert!(notes.is_empty());

        assert_eq!(parse_level(Some("loud"), "test", &mut notes), None);
        assert_eq!(notes.len(), 1);
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[api]
base_url = "http://10.0.0.5:8000"

[logging]
level = "info"
file = "/tmp/concierge.log"
"#;
        let config: ConciergeConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api.base_url.as_deref(), Some("http://10.0.0.5:8000"));
        assert_eq!(config.logging.level.as_deref(), Some("info"));
        assert_eq!(config.logging.file.as_deref(), Some("/tmp/concierge.log"));
    }

    #[test]
    fn test_sparse_toml_parses() {
        let toml_str = r#"
[api]
base_url = "http://localhost:8000"
"#;
        let config: ConciergeConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api.base_url.as_deref(), Some("http://localhost:8000"));
        assert!(config.logging.level.is_none());
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let dir = std::env::temp_dir().join(format!("concierge-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, "[api\nbase_url = ").unwrap();

        let result = load_config_from(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("concierge-does-not-exist/config.toml");
        assert!(matches!(load_config_from(&path), Err(ConfigError::Io(_))));
    }
}
