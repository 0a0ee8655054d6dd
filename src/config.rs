//! File-based configuration
//!
//! An optional TOML file supplies input paths and trial settings; command-line
//! flags override anything set here.
//!
//! ```toml
//! [inputs]
//! kills = "data/kills.txt"
//! cheaters = "data/cheaters.txt"
//! teams = "data/teams.txt"
//! strict = false
//!
//! [trials]
//! num_trials = 1000
//! seed = 42
//! parallel = true
//! ```

use crate::loader::LoadPolicy;
use crate::montecarlo::TrialConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Locations of the input files
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputConfig {
    pub kills: Option<PathBuf>,
    pub cheaters: Option<PathBuf>,
    pub teams: Option<PathBuf>,
    /// Fail on malformed lines instead of skipping them
    pub strict: bool,
}

impl InputConfig {
    pub fn policy(&self) -> LoadPolicy {
        if self.strict {
            LoadPolicy::Strict
        } else {
            LoadPolicy::Lenient
        }
    }
}

/// Complete run configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    pub inputs: InputConfig,
    pub trials: TrialConfig,
}

impl AnalysisConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Load configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML")
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        self.trials.validate()
    }
}
