//! Configuration management for CodeSense
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (CODESENSE_*)
//! 3. Config file (~/.config/codesense/config.toml)
//! 4. Default values

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Analyzer-related configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Program used to launch the analysis script
    pub command: String,

    /// Path to the analysis script
    pub script: PathBuf,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            command: "python3".to_string(),
            script: PathBuf::from("scripts/review_code.py"),
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Analyzer configuration
    pub analyzer: AnalyzerConfig,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();

        if let Some(path) = config_path {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &PathBuf) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/codesense/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("codesense").join("config.toml"))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - CODESENSE_ANALYZER_CMD: Program used to launch the analysis script
    /// - CODESENSE_ANALYZER_SCRIPT: Path to the analysis script
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(command) = std::env::var("CODESENSE_ANALYZER_CMD") {
            self.analyzer.command = command;
        }

        if let Ok(script) = std::env::var("CODESENSE_ANALYZER_SCRIPT") {
            self.analyzer.script = PathBuf::from(script);
        }

        self
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(
        mut self,
        command: Option<String>,
        script: Option<PathBuf>,
    ) -> Self {
        if let Some(cmd) = command {
            self.analyzer.command = cmd;
        }

        if let Some(s) = script {
            self.analyzer.script = s;
        }

        self
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults
    pub fn load_with_overrides(command: Option<String>, script: Option<PathBuf>) -> Result<Self> {
        Ok(Self::load()?
            .with_env_overrides()
            .with_cli_overrides(command, script))
    }
}
