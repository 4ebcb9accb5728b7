// SPDX-License-Identifier: AGPL-3.0-or-later
//! `papaja.toml` configuration
//!
//! ```toml
//! [anova]
//! es = ["pes"]
//! mse = false
//!
//! [htest]
//! estimate_digits = 3
//!
//! [render]
//! caption = "ANOVA results"
//! booktabs = true
//! ```

use crate::anova::AnovaOptions;
use crate::htest::HtestOptions;
use crate::traits::RenderConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default configuration file name
pub const CONFIG_FILE: &str = "papaja.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PapajaConfig {
    pub anova: AnovaOptions,
    pub htest: HtestOptions,
    pub render: RenderConfig,
}

impl PapajaConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Load `papaja.toml` from `dir` if present, defaults otherwise
    pub fn discover(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = dir.as_ref().join(CONFIG_FILE);
        if path.is_file() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}
