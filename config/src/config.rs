//! File-declared option tables.
//!
//! A [`UsageConfig`] carries the same declarations a program would otherwise
//! build in code: program metadata and an ordered option table.
//!
//! # Example YAML
//!
//! ```yaml
//! info:
//!   name: usage_demo
//!   version: 1.4.0
//!   author: Jane Doe
//! options:
//!   name:
//!     key: n
//!     word: name
//!     arity: required
//!     arg_name: name
//!     description: user's name
//!   age:
//!     key: a
//!     word: age
//!     arity: required
//!     type: int
//!   sudo:
//!     key: s
//!     word: sudo
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;
use usage_core::{Args, OptionTable, ProgramInfo, Usage, check_table};

use crate::error::{ConfigError, Result};

/// On-disk serialization format, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.yml` / `.yaml`
    Yaml,
    /// `.json`
    Json,
}

impl ConfigFormat {
    /// Picks the format from the extension of `path`.
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedFormat`](ConfigError::UnsupportedFormat) for any
    /// other (or a missing) extension.
    ///
    /// # Examples
    ///
    /// ```
    /// use usage_config::ConfigFormat;
    ///
    /// assert_eq!(ConfigFormat::from_path("opts.YAML").unwrap(), ConfigFormat::Yaml);
    /// assert_eq!(ConfigFormat::from_path("opts.json").unwrap(), ConfigFormat::Json);
    /// assert!(ConfigFormat::from_path("opts.toml").is_err());
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let extension = path
            .as_ref()
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "yml" | "yaml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::UnsupportedFormat(
                path.as_ref().display().to_string(),
            )),
        }
    }
}

/// Program metadata plus option table, as declared in a file.
///
/// # Examples
///
/// ```
/// use usage_config::UsageConfig;
///
/// let config = UsageConfig::from_yaml_str(r#"
/// info: { name: demo, version: "1.0" }
/// options:
///   verbose: { key: v, word: verbose }
/// "#).unwrap();
///
/// assert_eq!(config.info.name, "demo");
/// assert!(config.options.find("verbose").is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UsageConfig {
    /// Program metadata for help rendering.
    pub info: ProgramInfo,
    /// Declared options in order.
    pub options: OptionTable,
}

impl UsageConfig {
    /// Loads a configuration from a YAML or JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedFormat`](ConfigError::UnsupportedFormat) for an
    /// unknown extension, [`IoError`](ConfigError::IoError) if the file
    /// cannot be read, a format error if parsing fails, or
    /// [`InvalidTable`](ConfigError::InvalidTable) if the option table is
    /// malformed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config: Self = match format {
            ConfigFormat::Yaml => serde_yaml::from_reader(reader)?,
            ConfigFormat::Json => serde_json::from_reader(reader)?,
        };
        config.validate()?;

        debug!(
            path = %path.display(),
            options = config.options.len(),
            "loaded usage config"
        );
        Ok(config)
    }

    /// Parses and validates a YAML document.
    ///
    /// # Errors
    ///
    /// Returns [`YamlError`](ConfigError::YamlError) or
    /// [`InvalidTable`](ConfigError::InvalidTable).
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`JsonError`](ConfigError::JsonError) or
    /// [`InvalidTable`](ConfigError::InvalidTable).
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves the configuration, in the format named by the extension.
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedFormat`](ConfigError::UnsupportedFormat),
    /// [`IoError`](ConfigError::IoError) or a serialization error.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        match format {
            ConfigFormat::Yaml => serde_yaml::to_writer(writer, self)?,
            ConfigFormat::Json => serde_json::to_writer_pretty(writer, self)?,
        }
        Ok(())
    }

    /// Runs the option table checks.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTable`](ConfigError::InvalidTable) listing every
    /// problem found.
    pub fn validate(&self) -> Result<()> {
        let errors = check_table(&self.options);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::InvalidTable(errors))
        }
    }

    /// Scans `args` against the declared table.
    pub fn into_usage(self, args: Args) -> Usage {
        Usage::new(self.info, self.options, args)
    }
}
