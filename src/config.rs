//! # Configuration Module
//!
//! This module loads and validates the headstamp configuration file, which
//! tells the tool which files to select and what header to stamp onto them.
//!
//! The file is TOML with two sections: `[files]` holds whitespace-separated
//! `include_patterns` and `exclude_patterns` glob lists, and `[header]` holds
//! the project identity (`name`, `url`), the `license` text, the
//! comma-separated `copyright_holders` list, the `max_width` for line
//! wrapping, the comment `prefix`, and the contributor-listing flag.
//!
//! Raw sections are deserialized with serde and converted into one immutable
//! [`Config`] in a single validation pass, so every downstream component can
//! rely on the required fields being present and non-empty.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::verbose_log;

/// Default maximum header line width, in characters.
pub const DEFAULT_MAX_WIDTH: usize = 78;

/// Default comment prefix for header lines.
pub const DEFAULT_PREFIX: &str = "#";

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Failed to read config file '{path}': {source}")]
  Read { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML or is missing required keys.
  #[error("Failed to parse config file '{path}': {source}")]
  Parse { path: PathBuf, source: toml::de::Error },

  /// A configuration value failed validation.
  #[error("Invalid configuration: {message}")]
  Invalid { message: String },
}

/// The `[files]` section as it appears on disk.
#[derive(Debug, Deserialize)]
struct FilesSection {
  /// Whitespace-separated glob patterns selecting files to process.
  include_patterns: String,

  /// Whitespace-separated glob patterns excluding files from processing.
  /// May be empty.
  exclude_patterns: String,
}

/// The `[header]` section as it appears on disk.
#[derive(Debug, Deserialize)]
struct HeaderSection {
  /// Project name, shown on the identity line.
  name: String,

  /// License text, shown on the license line.
  license: String,

  /// Optional project URL for the identity line.
  #[serde(default)]
  url: Option<String>,

  /// Maximum header line width in characters.
  #[serde(default = "default_max_width")]
  max_width: usize,

  /// Comma-separated list of copyright holder names.
  copyright_holders: String,

  /// Whether to list contributors from file history. The historical key
  /// spelling `list_contributers` is accepted alongside the corrected one.
  #[serde(default, rename = "list_contributers", alias = "list_contributors")]
  list_contributors: bool,

  /// Comment prefix for every header line.
  #[serde(default = "default_prefix")]
  prefix: String,
}

fn default_max_width() -> usize {
  DEFAULT_MAX_WIDTH
}

fn default_prefix() -> String {
  DEFAULT_PREFIX.to_string()
}

/// Raw on-disk configuration shape.
#[derive(Debug, Deserialize)]
struct RawConfig {
  files: FilesSection,
  header: HeaderSection,
}

/// Validated headstamp configuration.
///
/// Constructed once per run via [`Config::load`]; all fields are resolved
/// and validated up front so processing never has to re-check presence.
#[derive(Debug, Clone)]
pub struct Config {
  /// Glob patterns selecting files to process.
  pub include_patterns: Vec<String>,

  /// Glob patterns excluding files from processing.
  pub exclude_patterns: Vec<String>,

  /// Project name, shown on the identity line.
  pub project_name: String,

  /// License text, shown on the license line.
  pub license: String,

  /// Optional project URL for the identity line.
  pub url: Option<String>,

  /// Maximum header line width in characters. Advisory: a single name longer
  /// than this is never truncated.
  pub max_width: usize,

  /// Comment prefix for every header line.
  pub prefix: String,

  /// Ordered list of copyright holder names. Never empty.
  pub copyright_holders: Vec<String>,

  /// Whether to list contributors from file history.
  pub list_contributors: bool,
}

impl Config {
  /// Load and validate configuration from a TOML file.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read, is not valid TOML, is
  /// missing a required key, or fails validation (empty project name,
  /// license, copyright holder list, include pattern list, or prefix).
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    verbose_log!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
      path: path.to_path_buf(),
      source: e,
    })?;

    let raw: RawConfig = toml::from_str(&content).map_err(|e| ConfigError::Parse {
      path: path.to_path_buf(),
      source: e,
    })?;

    let config = Self::from_raw(raw)?;

    verbose_log!(
      "Loaded config: {} include pattern(s), {} exclude pattern(s), {} holder(s)",
      config.include_patterns.len(),
      config.exclude_patterns.len(),
      config.copyright_holders.len()
    );

    Ok(config)
  }

  /// Convert the raw on-disk shape into a validated [`Config`].
  fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
    let project_name = raw.header.name.trim().to_string();
    if project_name.is_empty() {
      return Err(invalid("project name must not be empty"));
    }

    let license = raw.header.license.trim().to_string();
    if license.is_empty() {
      return Err(invalid("license must not be empty"));
    }

    let prefix = raw.header.prefix.trim().to_string();
    if prefix.is_empty() {
      return Err(invalid("comment prefix must not be empty"));
    }

    // An empty URL value is treated the same as an absent key.
    let url = raw
      .header
      .url
      .map(|u| u.trim().to_string())
      .filter(|u| !u.is_empty());

    let copyright_holders: Vec<String> = raw
      .header
      .copyright_holders
      .split(',')
      .map(|name| name.trim().to_string())
      .filter(|name| !name.is_empty())
      .collect();
    if copyright_holders.is_empty() {
      return Err(invalid("no copyright holders given"));
    }

    let include_patterns = split_patterns(&raw.files.include_patterns);
    if include_patterns.is_empty() {
      return Err(invalid("no include patterns given"));
    }

    let exclude_patterns = split_patterns(&raw.files.exclude_patterns);

    Ok(Self {
      include_patterns,
      exclude_patterns,
      project_name,
      license,
      url,
      max_width: raw.header.max_width,
      prefix,
      copyright_holders,
      list_contributors: raw.header.list_contributors,
    })
  }
}

/// Split a whitespace-separated pattern list into individual patterns.
fn split_patterns(patterns: &str) -> Vec<String> {
  patterns.split_whitespace().map(str::to_string).collect()
}

fn invalid(message: &str) -> ConfigError {
  ConfigError::Invalid {
    message: message.to_string(),
  }
}
