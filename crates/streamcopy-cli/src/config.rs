//! Configuration system for the streamcopy CLI.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use streamcopy_files::{CopyOptions, DestinationPolicy, LineTerminalPolicy, Strategy};

/// streamcopy configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Copy configuration
    #[serde(default)]
    pub copy: CopyConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Copy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopyConfig {
    /// Strategy used when `copy` is run without `--strategy`
    #[serde(default = "default_strategy")]
    pub default_strategy: String,
    /// Copy policies passed to every strategy
    #[serde(flatten)]
    pub options: CopyOptions,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default values

fn default_strategy() -> String {
    Strategy::Block.name().to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for CopyConfig {
    fn default() -> Self {
        Self {
            default_strategy: default_strategy(),
            options: CopyOptions::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let contents = toml::to_string_pretty(self)?;

        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, contents)?;
        Ok(())
    }

    /// Get default config path
    #[must_use]
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp"))
            .join("streamcopy/config.toml")
    }

    /// Load config from default path, or fall back to defaults if it doesn't exist
    ///
    /// Unlike [`Config::save`], this never writes to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing config file cannot be read.
    pub fn load_or_default() -> anyhow::Result<Self> {
        let path = Self::default_path();

        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse the configured default strategy
    ///
    /// # Errors
    ///
    /// Returns an error if the name is not a known strategy.
    pub fn default_strategy(&self) -> anyhow::Result<Strategy> {
        Ok(self.copy.default_strategy.parse::<Strategy>()?)
    }

    /// Copy options with command-line overrides applied
    #[must_use]
    pub fn copy_options(&self, create_destination: bool, skip_line_marker: bool) -> CopyOptions {
        let mut options = self.copy.options;
        if create_destination {
            options.destination = DestinationPolicy::CreateIfMissing;
        }
        if skip_line_marker {
            options.line_terminal = LineTerminalPolicy::SkipMarker;
        }
        options
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is invalid.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.default_strategy()?;

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            anyhow::bail!(
                "Invalid log level: {}. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            );
        }

        Ok(())
    }
}
