//! Configuration for the explevel library.
//!
//! Maps directly to an `explevel.toml` file. Every field has a default, so an
//! empty document is a valid configuration:
//!
//! ```toml
//! [formula]
//! kind = "power"
//! constant = 0.1
//!
//! [persistence]
//! file_name = "entityDB.json"
//! pretty = false
//! ```

use serde::{Deserialize, Serialize};

use crate::formula::Formula;

/// File a store is saved to when no path is given.
pub const DEFAULT_STORE_FILE: &str = "entityDB.json";

/// Top-level configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpConfig {
    /// Formula handed to newly spawned entities.
    #[serde(default)]
    pub formula: FormulaConfig,
    /// Save / load settings.
    #[serde(default)]
    pub persistence: PersistenceConfig,
}

impl ExpConfig {
    /// Load configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `ExpError::Config` if the TOML is invalid.
    pub fn from_toml(toml_str: &str) -> crate::error::Result<Self> {
        toml::from_str(toml_str).map_err(|e| crate::ExpError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// The configured default formula.
    #[must_use]
    pub fn default_formula(&self) -> Formula {
        self.formula.to_formula()
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// Which formula family to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormulaKind {
    /// [`Formula::Linear`].
    #[default]
    Linear,
    /// [`Formula::Power`].
    Power,
}

/// Default formula settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormulaConfig {
    /// Formula family.
    #[serde(default)]
    pub kind: FormulaKind,
    /// Scale constant, only read for `kind = "power"`.
    #[serde(default = "default_power_constant")]
    pub constant: f64,
}

impl FormulaConfig {
    /// Build the formula this section describes.
    #[must_use]
    pub fn to_formula(&self) -> Formula {
        match self.kind {
            FormulaKind::Linear => Formula::Linear,
            FormulaKind::Power => Formula::power(self.constant),
        }
    }
}

impl Default for FormulaConfig {
    fn default() -> Self {
        Self {
            kind: FormulaKind::Linear,
            constant: Formula::DEFAULT_POWER_CONSTANT,
        }
    }
}

/// Persistence / save configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistenceConfig {
    /// File used by `save()` / `load()`, relative to the working directory.
    #[serde(default = "default_file_name")]
    pub file_name: String,
    /// Write indented JSON instead of a single line.
    #[serde(default)]
    pub pretty: bool,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_STORE_FILE.to_string(),
            pretty: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Serde default helpers
// ---------------------------------------------------------------------------

fn default_power_constant() -> f64 { Formula::DEFAULT_POWER_CONSTANT }
fn default_file_name() -> String { DEFAULT_STORE_FILE.to_string() }
