//! CLI configuration management
//!
//! Resolves where credentials come from and how output is rendered.

use aa_core::edgerc::{default_edgerc_path, DEFAULT_SECTION};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming the edgerc file
pub const ENV_EDGERC: &str = "AKAMAI_EDGERC";
/// Environment variable naming the edgerc section
pub const ENV_SECTION: &str = "AKAMAI_EDGERC_SECTION";
/// Environment variable selecting the output format
pub const ENV_FORMAT: &str = "AKAMAI_AA_FORMAT";
/// Environment variable setting the request timeout in seconds
pub const ENV_TIMEOUT: &str = "AKAMAI_AA_TIMEOUT";

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CliConfig {
    /// Path to the EdgeGrid credentials file
    pub edgerc: PathBuf,

    /// Credentials section inside the edgerc file
    pub section: String,

    /// Default output format
    pub output_format: String,

    /// Enable debug logging by default
    pub debug: bool,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            edgerc: default_edgerc_path(),
            section: DEFAULT_SECTION.to_string(),
            output_format: "json".to_string(),
            debug: false,
            timeout: 30,
        }
    }
}

impl CliConfig {
    /// Load configuration from `path`. A missing file yields `Ok(None)`.
    pub fn load_from(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read CLI config file {}", path.display()))?;

        toml::from_str(&content)
            .map(Some)
            .with_context(|| format!("Failed to parse CLI config file {}", path.display()))
    }

    /// Get the default configuration file path
    pub fn default_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("akamai-aa").join("cli.toml"))
            .ok_or_else(|| anyhow::anyhow!("Cannot determine config directory"))
    }

    /// Create a new builder for constructing configuration
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }
}

/// Builder for CLI configuration with validation and priority chain support
///
/// Priority chain (lowest to highest):
/// 1. Defaults
/// 2. Config file
/// 3. Environment variables
/// 4. CLI arguments
///
/// Setters run in ascending priority, so each layer overwrites the one
/// before it.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    edgerc: Option<PathBuf>,
    section: Option<String>,
    output_format: Option<String>,
    debug: Option<bool>,
    timeout: Option<u64>,
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set edgerc path
    pub fn with_edgerc(mut self, path: impl Into<PathBuf>) -> Self {
        self.edgerc = Some(path.into());
        self
    }

    /// Set edgerc section (with validation)
    pub fn with_section(mut self, section: impl Into<String>) -> Result<Self> {
        let section = section.into();
        Self::validate_section(&section)?;
        self.section = Some(section);
        Ok(self)
    }

    /// Set output format (with validation)
    pub fn with_output_format(mut self, format: impl Into<String>) -> Result<Self> {
        let format = format.into();
        Self::validate_output_format(&format)?;
        self.output_format = Some(format);
        Ok(self)
    }

    /// Set debug flag
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = Some(debug);
        self
    }

    /// Set timeout (with validation)
    pub fn with_timeout(mut self, timeout: u64) -> Result<Self> {
        Self::validate_timeout(timeout)?;
        self.timeout = Some(timeout);
        Ok(self)
    }

    /// Layer values from a config file.
    ///
    /// A missing file leaves the builder unchanged; an unreadable or
    /// malformed one is an error.
    pub fn with_config_file(self, path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match CliConfig::default_path() {
                Ok(path) => path,
                Err(_) => return Ok(self),
            },
        };

        match CliConfig::load_from(&path)? {
            Some(config) => Ok(self.with_file_values(config)),
            None => Ok(self),
        }
    }

    fn with_file_values(self, config: CliConfig) -> Self {
        Self {
            edgerc: Some(config.edgerc),
            section: Some(config.section),
            output_format: Some(config.output_format),
            debug: Some(config.debug),
            timeout: Some(config.timeout),
        }
    }

    /// Apply environment variable overrides
    pub fn with_env_overrides(self) -> Self {
        self.with_env_lookup(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`; invalid values are ignored.
    pub fn with_env_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(edgerc) = lookup(ENV_EDGERC).filter(|v| !v.is_empty()) {
            self.edgerc = Some(PathBuf::from(edgerc));
        }

        if let Some(section) = lookup(ENV_SECTION) {
            if Self::validate_section(&section).is_ok() {
                self.section = Some(section);
            }
        }

        if let Some(format) = lookup(ENV_FORMAT) {
            if Self::validate_output_format(&format).is_ok() {
                self.output_format = Some(format);
            }
        }

        if let Some(timeout) = lookup(ENV_TIMEOUT).and_then(|t| t.parse().ok()) {
            if Self::validate_timeout(timeout).is_ok() {
                self.timeout = Some(timeout);
            }
        }

        self
    }

    /// Build the final configuration with validation
    pub fn build(self) -> Result<CliConfig> {
        let defaults = CliConfig::default();

        let section = self.section.unwrap_or(defaults.section);
        let output_format = self.output_format.unwrap_or(defaults.output_format);
        let timeout = self.timeout.unwrap_or(defaults.timeout);

        // Validate final values
        Self::validate_section(&section)?;
        Self::validate_output_format(&output_format)?;
        Self::validate_timeout(timeout)?;

        Ok(CliConfig {
            edgerc: self.edgerc.unwrap_or(defaults.edgerc),
            section,
            output_format,
            debug: self.debug.unwrap_or(defaults.debug),
            timeout,
        })
    }

    /// Validate section name
    fn validate_section(section: &str) -> Result<()> {
        if section.trim().is_empty() {
            return Err(anyhow::anyhow!("Edgerc section cannot be empty"));
        }
        Ok(())
    }

    /// Validate output format
    fn validate_output_format(format: &str) -> Result<()> {
        match format {
            "table" | "json" => Ok(()),
            _ => Err(anyhow::anyhow!(
                "Invalid output format '{}'. Must be 'table' or 'json'",
                format
            )),
        }
    }

    /// Validate timeout value
    fn validate_timeout(timeout: u64) -> Result<()> {
        if timeout == 0 {
            return Err(anyhow::anyhow!("Timeout must be greater than 0"));
        }

        if timeout > 300 {
            return Err(anyhow::anyhow!(
                "Timeout must be less than or equal to 300 seconds"
            ));
        }

        Ok(())
    }
}
