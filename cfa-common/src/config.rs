//! Bootstrap configuration loading
//!
//! All settings come from a single optional TOML file. The file is located
//! using this priority order:
//! 1. Command-line argument (highest priority)
//! 2. `CFA_CONFIG` environment variable
//! 3. `<user config dir>/cfa/config.toml`
//! 4. Compiled defaults (fallback)
//!
//! A missing file never stops startup; callers get the defaults back along
//! with a [`ConfigSource`] describing what happened so they can log it.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming the config file
pub const CONFIG_ENV_VAR: &str = "CFA_CONFIG";

/// Environment variable overriding `firm_name`
pub const FIRM_NAME_ENV_VAR: &str = "CFA_FIRM_NAME";

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Bootstrap configuration loaded from TOML file
///
/// Every field has a built-in default, so an empty file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    /// Firm name printed on generated reports
    pub firm_name: String,

    pub logging: LoggingConfig,

    pub tiers: TierConfig,

    pub ingest: IngestConfig,

    pub report: ReportConfig,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            firm_name: default_firm_name(),
            logging: LoggingConfig::default(),
            tiers: TierConfig::default(),
            ingest: IngestConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Access-tier limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierConfig {
    /// Most recent reviews analyzed for a free-trial account
    pub trial_analysis_cap: usize,

    /// Reports a free-trial account may generate
    pub free_trial_limit: u32,
}

impl Default for TierConfig {
    fn default() -> Self {
        Self {
            trial_analysis_cap: 50,
            free_trial_limit: 3,
        }
    }
}

/// CSV ingestion limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Largest accepted upload in bytes
    pub max_upload_bytes: u64,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Report rendering settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Excerpt length in characters before truncation
    pub excerpt_chars: usize,

    /// Praise/complaint excerpts shown per section
    pub excerpts_per_section: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            excerpt_chars: 300,
            excerpts_per_section: 5,
        }
    }
}

fn default_firm_name() -> String {
    "Law Firm".to_string()
}

impl TomlConfig {
    /// Parse and validate configuration text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a configuration file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn validate(&self) -> Result<()> {
        let level = self.logging.level.to_ascii_lowercase();
        if !VALID_LOG_LEVELS.contains(&level.as_str()) {
            return Err(Error::Config(format!(
                "Invalid log level '{}' (expected one of: {})",
                self.logging.level,
                VALID_LOG_LEVELS.join(", ")
            )));
        }

        if self.ingest.max_upload_bytes == 0 {
            return Err(Error::Config(
                "ingest.max_upload_bytes must be greater than zero".to_string(),
            ));
        }

        if self.report.excerpt_chars == 0 {
            return Err(Error::Config(
                "report.excerpt_chars must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Apply environment variable overrides on top of file values
    pub fn apply_env_overrides(&mut self) {
        if let Ok(name) = std::env::var(FIRM_NAME_ENV_VAR) {
            let name = name.trim();
            if !name.is_empty() {
                self.firm_name = name.to_string();
            }
        }
    }
}

/// Where the loaded configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Parsed from this file
    File(PathBuf),
    /// File was requested explicitly but does not exist; defaults used
    Missing(PathBuf),
    /// No file requested or found; defaults used
    Defaults,
}

/// Configuration plus its provenance
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: TomlConfig,
    pub source: ConfigSource,
}

/// Config file resolution following the priority order in the module docs
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
    cli_path: Option<PathBuf>,
}

impl ConfigResolver {
    pub fn new(cli_path: Option<PathBuf>) -> Self {
        Self { cli_path }
    }

    /// Explicitly requested path (CLI, then environment), if any
    fn explicit_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.cli_path {
            return Some(path.clone());
        }

        std::env::var(CONFIG_ENV_VAR)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
    }

    /// Resolve the config file path without reading it
    ///
    /// Explicit paths are returned even if they do not exist; the
    /// per-user default is only returned when present on disk.
    pub fn resolve_path(&self) -> Option<PathBuf> {
        self.explicit_path()
            .or_else(|| default_config_path().filter(|p| p.exists()))
    }

    /// Load configuration, falling back to defaults when no file exists
    ///
    /// Parse and validation errors in an existing file are returned.
    pub fn load(&self) -> Result<LoadedConfig> {
        let (mut config, source) = match self.resolve_path() {
            Some(path) if path.exists() => (TomlConfig::load_from(&path)?, ConfigSource::File(path)),
            Some(path) => (TomlConfig::default(), ConfigSource::Missing(path)),
            None => (TomlConfig::default(), ConfigSource::Defaults),
        };

        config.apply_env_overrides();
        Ok(LoadedConfig { config, source })
    }
}

/// Per-user config file location for the platform
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("cfa").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TomlConfig::default();
        assert_eq!(config.firm_name, "Law Firm");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.tiers.trial_analysis_cap, 50);
        assert_eq!(config.tiers.free_trial_limit, 3);
        assert_eq!(config.ingest.max_upload_bytes, 10 * 1024 * 1024);
        assert_eq!(config.report.excerpt_chars, 300);
        assert_eq!(config.report.excerpts_per_section, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config, TomlConfig::default());
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = TomlConfig::from_toml_str("[tiers]\ntrial_analysis_cap = 25\n").unwrap();
        assert_eq!(config.tiers.trial_analysis_cap, 25);
        assert_eq!(config.tiers.free_trial_limit, 3);
        assert_eq!(config.report, ReportConfig::default());
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let err = TomlConfig::from_toml_str("[logging]\nlevel = \"loud\"\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_log_level_case_insensitive() {
        assert!(TomlConfig::from_toml_str("[logging]\nlevel = \"DEBUG\"\n").is_ok());
    }

    #[test]
    fn test_zero_limits_rejected() {
        assert!(TomlConfig::from_toml_str("[ingest]\nmax_upload_bytes = 0\n").is_err());
        assert!(TomlConfig::from_toml_str("[report]\nexcerpt_chars = 0\n").is_err());
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let err = TomlConfig::from_toml_str("firm_name = ").unwrap_err();
        assert!(matches!(err, Error::TomlParse(_)));
    }
}
