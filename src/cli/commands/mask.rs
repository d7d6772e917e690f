//! Mask command implementation
//!
//! This module implements the `mask` command, which replaces PII in JSON
//! documents with reversible tokens.

use super::{
    read_input, source_name, write_output, EXIT_CONFIG_ERROR, EXIT_FATAL, EXIT_POLICY_VIOLATION,
    EXIT_SUCCESS,
};
use crate::config::ErmaskConfig;
use crate::domain::{serialize_json, MaskError};
use crate::log_session_complete;
use crate::masking::audit::AuditLogger;
use crate::masking::{FieldPolicy, MaskingEngine, MaskingReport};
use anyhow::Context;
use clap::Args;
use serde_json::Value;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Arguments for the mask command
#[derive(Args, Debug)]
pub struct MaskArgs {
    /// JSON documents to mask (`-` reads stdin)
    #[arg(required = true, value_name = "INPUT")]
    pub inputs: Vec<PathBuf>,

    /// Write the masked document to FILE instead of stdout (single input)
    #[arg(short, long, value_name = "FILE", conflicts_with = "output_dir")]
    pub output: Option<PathBuf>,

    /// Write each masked document to DIR/<stem>.masked.json
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Mask all inputs in one session so equal values share tokens
    #[arg(long)]
    pub shared_session: bool,

    /// Write compact JSON instead of pretty-printed
    #[arg(long)]
    pub compact: bool,

    /// Print a masking report to stderr
    #[arg(long)]
    pub summary: bool,

    /// Write masking reports as JSON to FILE
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,
}

struct MaskedDocument {
    input: PathBuf,
    document: Value,
}

struct SessionOutcome {
    engine: MaskingEngine,
    sources: Vec<String>,
    documents: Vec<MaskedDocument>,
    elapsed: Duration,
}

struct SessionFailure {
    source: String,
    error: MaskError,
}

impl MaskArgs {
    /// Execute the mask command
    pub async fn execute(&self, config: &ErmaskConfig) -> anyhow::Result<i32> {
        tracing::info!(inputs = self.inputs.len(), "Starting mask command");

        if let Err(message) = self.check_outputs() {
            eprintln!("{message}");
            return Ok(EXIT_CONFIG_ERROR);
        }

        let policy = match config.policy.to_policy() {
            Ok(policy) => Arc::new(policy),
            Err(e) => {
                tracing::error!(error = %e, "Invalid masking policy");
                eprintln!("Invalid masking policy: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        let audit = match AuditLogger::from_config(&config.audit) {
            Ok(audit) => audit,
            Err(e) => {
                tracing::error!(error = %e, "Failed to initialize audit logging");
                eprintln!("Failed to initialize audit logging: {e}");
                return Ok(EXIT_FATAL);
            }
        };

        let mut inputs = Vec::with_capacity(self.inputs.len());
        for input in &self.inputs {
            inputs.push((input.clone(), read_input(input).await?));
        }

        let outcomes = if self.shared_session || inputs.len() == 1 {
            let policy = Arc::clone(&policy);
            let outcome = tokio::task::spawn_blocking(move || mask_session(policy, inputs))
                .await
                .context("Masking task failed")?;
            vec![outcome]
        } else {
            let handles: Vec<_> = inputs
                .into_iter()
                .map(|input| {
                    let policy = Arc::clone(&policy);
                    tokio::task::spawn_blocking(move || mask_session(policy, vec![input]))
                })
                .collect();

            let mut outcomes = Vec::with_capacity(handles.len());
            for joined in futures::future::join_all(handles).await {
                outcomes.push(joined.context("Masking task failed")?);
            }
            outcomes
        };

        // Nothing is written unless every session succeeded
        let mut sessions = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            match outcome {
                Ok(session) => sessions.push(session),
                Err(failure) => return Ok(report_failure(&failure)),
            }
        }

        if let Some(audit) = &audit {
            for session in &sessions {
                if let Err(e) = audit.log_session(&session.sources.join(","), &session.engine) {
                    tracing::error!(error = %e, "Failed to write audit log");
                    eprintln!("Failed to write audit log: {e}");
                    return Ok(EXIT_FATAL);
                }
            }
        }

        let pretty = config.output.pretty && !self.compact;
        for session in &sessions {
            for masked in &session.documents {
                let text = serialize_json(&masked.document, pretty)?;
                let destination = self.destination(&masked.input);
                write_output(destination.as_deref(), &text).await?;
            }
        }

        let reports: Vec<MaskingReport> = sessions
            .iter()
            .map(|session| {
                log_session_complete!(
                    session.sources.join(","),
                    session.documents.len(),
                    session.engine.tokens().len(),
                    session.elapsed
                );
                MaskingReport::from_engine(
                    &session.engine,
                    session.sources.clone(),
                    session.elapsed.as_millis() as u64,
                )
            })
            .collect();

        if self.summary {
            for report in &reports {
                eprint!("{}", report.format_console());
            }
        }

        if let Some(path) = &self.report {
            let mut json = serde_json::to_string_pretty(&reports)?;
            json.push('\n');
            write_output(Some(path.as_path()), &json).await?;
            tracing::info!(path = %path.display(), "Masking report written");
        }

        Ok(EXIT_SUCCESS)
    }

    fn check_outputs(&self) -> Result<(), String> {
        if self.inputs.len() > 1 && self.output_dir.is_none() {
            return Err("Multiple inputs require --output-dir".to_string());
        }

        let mut seen = HashSet::with_capacity(self.inputs.len());
        for input in &self.inputs {
            if let Some(destination) = self.destination(input) {
                if !seen.insert(destination.clone()) {
                    return Err(format!(
                        "Inputs would overwrite each other at {}",
                        destination.display()
                    ));
                }
            }
        }
        Ok(())
    }

    /// Output path for a masked input; `None` means stdout
    fn destination(&self, input: &Path) -> Option<PathBuf> {
        if let Some(dir) = &self.output_dir {
            let stem = if input == Path::new("-") {
                "stdin".to_string()
            } else {
                input
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "document".to_string())
            };
            return Some(dir.join(format!("{stem}.masked.json")));
        }
        self.output.clone()
    }
}

/// Mask `inputs` in order within one fresh session
fn mask_session(
    policy: Arc<FieldPolicy>,
    inputs: Vec<(PathBuf, String)>,
) -> Result<SessionOutcome, SessionFailure> {
    let started = Instant::now();
    let mut engine = MaskingEngine::new(policy);
    let mut sources = Vec::with_capacity(inputs.len());
    let mut documents = Vec::with_capacity(inputs.len());

    for (input, text) in inputs {
        let source = source_name(&input);
        let document = engine
            .mask_json_str(&text)
            .map_err(|error| SessionFailure {
                source: source.clone(),
                error,
            })?;
        sources.push(source);
        documents.push(MaskedDocument { input, document });
    }

    Ok(SessionOutcome {
        engine,
        sources,
        documents,
        elapsed: started.elapsed(),
    })
}

fn report_failure(failure: &SessionFailure) -> i32 {
    tracing::error!(source = %failure.source, error = %failure.error, "Masking failed");
    eprintln!("Failed to mask {}: {}", failure.source, failure.error);
    if failure.error.is_policy_violation() {
        EXIT_POLICY_VIOLATION
    } else {
        EXIT_FATAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(inputs: &[&str]) -> MaskArgs {
        MaskArgs {
            inputs: inputs.iter().map(PathBuf::from).collect(),
            output: None,
            output_dir: None,
            shared_session: false,
            compact: false,
            summary: false,
            report: None,
        }
    }

    #[test]
    fn test_multiple_inputs_require_output_dir() {
        let mut args = args(&["a.json", "b.json"]);
        assert!(args.check_outputs().is_err());

        args.output_dir = Some(PathBuf::from("out"));
        assert!(args.check_outputs().is_ok());
    }

    #[test]
    fn test_same_stem_inputs_are_rejected() {
        let mut args = args(&["a/x.json", "b/x.json"]);
        args.output_dir = Some(PathBuf::from("out"));

        let message = args.check_outputs().unwrap_err();
        assert!(message.contains("x.masked.json"));

        args.inputs[1] = PathBuf::from("b/y.json");
        assert!(args.check_outputs().is_ok());
    }

    #[test]
    fn test_destination_defaults_to_stdout() {
        let args = args(&["a.json"]);
        assert_eq!(args.destination(Path::new("a.json")), None);
    }

    #[test]
    fn test_destination_in_output_dir() {
        let mut args = args(&["data/entity.json", "-"]);
        args.output_dir = Some(PathBuf::from("out"));

        assert_eq!(
            args.destination(Path::new("data/entity.json")),
            Some(PathBuf::from("out/entity.masked.json"))
        );
        assert_eq!(
            args.destination(Path::new("-")),
            Some(PathBuf::from("out/stdin.masked.json"))
        );
    }

    #[test]
    fn test_mask_session_shares_tokens() {
        let policy = Arc::new(FieldPolicy::default());
        let outcome = mask_session(
            policy,
            vec![
                (PathBuf::from("a.json"), r#"{"EMAIL": "a@b.com"}"#.to_string()),
                (PathBuf::from("b.json"), r#"{"EMAIL": "a@b.com"}"#.to_string()),
            ],
        )
        .ok()
        .unwrap();

        assert_eq!(outcome.sources, vec!["a.json", "b.json"]);
        assert_eq!(outcome.documents[1].document["EMAIL"], "EMAIL_1");
        assert_eq!(outcome.engine.tokens().len(), 1);
    }

    #[test]
    fn test_mask_session_failure_names_source() {
        let policy = Arc::new(FieldPolicy::default());
        let failure = mask_session(
            policy,
            vec![(PathBuf::from("bad.json"), r#"{"SCORE": 0.5}"#.to_string())],
        )
        .err()
        .unwrap();

        assert_eq!(failure.source, "bad.json");
        assert!(failure.error.is_policy_violation());
        assert_eq!(report_failure(&failure), EXIT_POLICY_VIOLATION);
    }
}
