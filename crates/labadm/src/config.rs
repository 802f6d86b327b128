//! Conversion settings, loadable from a TOML file.
//!
//! ```toml
//! # labadm.toml
//! [parser]
//! delimiter = ","
//! max_rows = 1000
//!
//! [mapping]
//! default_analyst = "unknown"
//! rounding = "half_even"
//! row_policy = "skip_malformed"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AdmError, Result};
use crate::input::ParserConfig;
use crate::mapping::{RoundingPolicy, RowPolicy};

/// Settings shared by all instrument adapters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingConfig {
    /// Analyst recorded when the export leaves it blank (None = adapter default).
    pub default_analyst: Option<String>,
    /// Rounding applied to cell counts.
    pub rounding: RoundingPolicy,
    /// Row failure handling (None = adapter default).
    pub row_policy: Option<RowPolicy>,
}

impl MappingConfig {
    /// Create a config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fallback analyst name.
    pub fn with_default_analyst(mut self, analyst: impl Into<String>) -> Self {
        self.default_analyst = Some(analyst.into());
        self
    }

    /// Set the rounding policy for counts.
    pub fn with_rounding(mut self, rounding: RoundingPolicy) -> Self {
        self.rounding = rounding;
        self
    }

    /// Set the row failure policy.
    pub fn with_row_policy(mut self, policy: RowPolicy) -> Self {
        self.row_policy = Some(policy);
        self
    }
}

/// Configuration for a conversion run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Field mapping configuration.
    pub mapping: MappingConfig,
}

impl ConvertConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| AdmError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| AdmError::Config(format!("Failed to parse TOML configuration: {}", e)))
    }
}
