//! Unmask command implementation
//!
//! Masking is deterministic for a given policy and input order, so the
//! session is rebuilt by re-masking the source documents. No token map is
//! ever written to disk.

use super::{
    read_input, source_name, write_output, EXIT_CONFIG_ERROR, EXIT_FATAL, EXIT_POLICY_VIOLATION,
    EXIT_SUCCESS,
};
use crate::config::ErmaskConfig;
use crate::domain::serialize_json;
use crate::masking::MaskingEngine;
use clap::Args;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Arguments for the unmask command
#[derive(Args, Debug)]
pub struct UnmaskArgs {
    /// Source JSON documents of one masking session, in the order they were masked
    #[arg(short, long = "source", value_name = "JSON", required = true)]
    pub sources: Vec<PathBuf>,

    /// The sources were masked together with `mask --shared-session`
    #[arg(long)]
    pub shared_session: bool,

    /// Text to unmask (stdin when absent or `-`)
    #[arg(short, long, value_name = "FILE")]
    pub text: Option<PathBuf>,

    /// Parse the input as JSON and restore tokens in its string values
    #[arg(long)]
    pub json: bool,

    /// Write the result to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl UnmaskArgs {
    /// Execute the unmask command
    pub async fn execute(&self, config: &ErmaskConfig) -> anyhow::Result<i32> {
        tracing::info!(sources = self.sources.len(), "Starting unmask command");

        if let Err(message) = self.check_sources() {
            eprintln!("{message}");
            return Ok(EXIT_CONFIG_ERROR);
        }

        let policy = match config.policy.to_policy() {
            Ok(policy) => Arc::new(policy),
            Err(e) => {
                eprintln!("Invalid masking policy: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        let mut engine = MaskingEngine::new(policy);
        for source in &self.sources {
            let text = read_input(source).await?;
            if let Err(e) = engine.mask_json_str(&text) {
                let name = source_name(source);
                tracing::error!(source = %name, error = %e, "Failed to rebuild session");
                eprintln!("Failed to rebuild session from {name}: {e}");
                return Ok(if e.is_policy_violation() {
                    EXIT_POLICY_VIOLATION
                } else {
                    EXIT_FATAL
                });
            }
        }
        tracing::debug!(
            session_id = %engine.session_id(),
            tokens = engine.tokens().len(),
            "Session rebuilt"
        );

        let input_path = self.text.as_deref().unwrap_or(Path::new("-"));
        let input = read_input(input_path).await?;

        let output = if self.json {
            let value: serde_json::Value = match serde_json::from_str(&input) {
                Ok(value) => value,
                Err(e) => {
                    eprintln!("Input is not valid JSON: {e}");
                    return Ok(EXIT_FATAL);
                }
            };
            serialize_json(&engine.unmask_value(&value), config.output.pretty)?
        } else {
            engine.unmask_text(&input)
        };

        write_output(self.output.as_deref(), &output).await?;
        Ok(EXIT_SUCCESS)
    }

    /// Separately masked inputs each restart token numbering, so only a
    /// shared session can be rebuilt from several sources
    fn check_sources(&self) -> Result<(), String> {
        if self.sources.len() > 1 && !self.shared_session {
            return Err(
                "Multiple sources require --shared-session; unmask each separately masked input with its own source"
                    .to_string(),
            );
        }
        Ok(())
    }
}
