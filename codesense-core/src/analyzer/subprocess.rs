//! Subprocess-backed analysis engine
//!
//! Each review launches one external process, writes the request as a single
//! JSON object to its stdin, closes stdin to signal end-of-input, and
//! accumulates stdout and stderr in full until the process exits. Stdout
//! carries the result; stderr is advisory and only surfaces in error
//! messages. There is no timeout, no retry, and no bound on how many
//! processes run at once.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::config::AnalyzerConfig;
use crate::review::{ReviewRequest, ReviewResult};
use crate::{Error, Result};

use super::Analyzer;

/// Analyzer that delegates each review to an external analysis process
#[derive(Debug, Clone)]
pub struct SubprocessAnalyzer {
    /// Program used to launch the analysis script
    command: String,

    /// Path to the analysis script handed to the program
    script: PathBuf,

    /// Credential forwarded to the process environment
    api_key: Option<String>,
}

impl SubprocessAnalyzer {
    /// Create an analyzer launching `command script`
    pub fn new(command: impl Into<String>, script: impl AsRef<Path>) -> Self {
        Self {
            command: command.into(),
            script: script.as_ref().to_path_buf(),
            api_key: None,
        }
    }

    /// Create an analyzer from configuration
    pub fn from_config(config: &AnalyzerConfig) -> Self {
        Self::new(&config.command, &config.script)
    }

    /// Set the credential passed to the process as EMERGENT_LLM_KEY
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.command);
        cmd.arg(&self.script)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        // The credential travels via the environment, never via stdin
        if let Some(ref key) = self.api_key {
            cmd.env("EMERGENT_LLM_KEY", key);
        }

        cmd
    }
}

#[async_trait]
impl Analyzer for SubprocessAnalyzer {
    async fn review(&self, request: &ReviewRequest) -> Result<ReviewResult> {
        let payload = serde_json::to_string(request)?;

        let mut child = self.build_command().spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Process(format!(
                    "Analysis command not found at '{}'. Is it installed?",
                    self.command
                ))
            } else {
                Error::Io(e)
            }
        })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| Error::Process("Failed to open analysis process stdin".to_string()))?;

        debug!(
            language = %request.language,
            code_len = request.code.len(),
            "invoking analysis process"
        );

        // Feed stdin while collecting output: a child that emits output
        // before draining its input must not deadlock against a full pipe.
        let write = async {
            stdin.write_all(payload.as_bytes()).await?;
            stdin.shutdown().await?;
            drop(stdin);
            Ok::<(), std::io::Error>(())
        };
        let (written, output) = tokio::join!(write, child.wait_with_output());
        let output = output.map_err(Error::Io)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let diagnostic = stderr.trim();
            let diagnostic = if diagnostic.is_empty() {
                "Unknown error"
            } else {
                diagnostic
            };
            return Err(Error::Process(format!(
                "Analysis process failed: {}",
                diagnostic
            )));
        }

        // A clean exit stands on its own: the process may legitimately
        // answer without consuming all of its input.
        if let Err(e) = written {
            warn!(error = %e, "analysis process exited before reading the full payload");
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        ReviewResult::from_output(stdout.trim())
    }
}
