//! Secrets management for CodeSense
//!
//! Secrets are stored separately from configuration to avoid accidental sharing.
//! The secrets file is located at `~/.config/codesense/secrets.toml` and must
//! have restrictive permissions (0600 on Unix).
//!
//! Loading priority:
//! 1. Environment variables (EMERGENT_LLM_KEY)
//! 2. Secrets file (~/.config/codesense/secrets.toml)

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Error, Result};

/// Secrets structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Secrets {
    /// Analyzer credentials
    pub analyzer: AnalyzerSecrets,
}

/// Analysis-service secrets
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalyzerSecrets {
    /// API key for the external analysis service
    pub api_key: Option<String>,
}

impl Secrets {
    /// Load secrets from the default location
    ///
    /// Returns default (empty) secrets if file doesn't exist
    pub fn load() -> Result<Self> {
        let secrets_path = Self::default_secrets_path();

        if let Some(path) = secrets_path {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load secrets from a specific file with permission checking
    pub fn load_from_file(path: &PathBuf) -> Result<Self> {
        // Check file permissions on Unix
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            let metadata = std::fs::metadata(path).map_err(Error::Io)?;
            let mode = metadata.permissions().mode();

            // Check if file is readable by group or others (mode & 0o077)
            if mode & 0o077 != 0 {
                return Err(Error::Config(format!(
                    "Secrets file {} has insecure permissions {:o}. \
                     Please run: chmod 600 {}",
                    path.display(),
                    mode & 0o777,
                    path.display()
                )));
            }

            debug!(path = %path.display(), mode = format!("{:o}", mode & 0o777), "Secrets file permissions OK");
        }

        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        let mut secrets: Secrets = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse secrets: {}", e)))?;

        // Trim whitespace from the key
        if let Some(ref mut key) = secrets.analyzer.api_key {
            *key = key.trim().to_string();
        }

        Ok(secrets)
    }

    /// Get the default secrets file path
    ///
    /// Returns `~/.config/codesense/secrets.toml` on Unix
    pub fn default_secrets_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("codesense").join("secrets.toml"))
    }

    /// Get the analysis-service API key with environment variable override
    ///
    /// Priority: EMERGENT_LLM_KEY env var > secrets file
    pub fn api_key(&self) -> Option<String> {
        // Check environment variable first
        if let Ok(key) = std::env::var("EMERGENT_LLM_KEY") {
            let key = key.trim().to_string();
            if !key.is_empty() {
                debug!("Using analysis API key from EMERGENT_LLM_KEY environment variable");
                return Some(key);
            }
        }

        // Fall back to secrets file
        if let Some(ref key) = self.analyzer.api_key {
            if !key.is_empty() {
                debug!("Using analysis API key from secrets file");
                return Some(key.clone());
            }
        }

        None
    }
}
