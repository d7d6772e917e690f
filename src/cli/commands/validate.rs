//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the ermask configuration file.

use super::{EXIT_CONFIG_ERROR, EXIT_SUCCESS};
use crate::config::load_config_or_default;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        let shown_path = config_path.unwrap_or("<defaults>");
        tracing::info!(config_path = %shown_path, "Validating configuration");

        println!("🔍 Validating configuration: {shown_path}");
        println!();

        let config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);

        let masked: Vec<&String> = config
            .policy
            .masked_keys
            .iter()
            .chain(&config.policy.extra_masked_keys)
            .collect();
        let known: Vec<&String> = config
            .policy
            .known_keys
            .iter()
            .chain(&config.policy.extra_known_keys)
            .collect();
        println!("  Masked Keys ({}): {:?}", masked.len(), masked);
        println!("  Known Keys ({}): {:?}", known.len(), known);
        println!("  Pretty Output: {}", config.output.pretty);
        println!(
            "  Audit: {}",
            if config.audit.enabled {
                config.audit.log_path.display().to_string()
            } else {
                "disabled".to_string()
            }
        );
        println!(
            "  File Logging: {}",
            if config.logging.local_enabled {
                format!(
                    "{} ({})",
                    config.logging.local_path, config.logging.local_rotation
                )
            } else {
                "disabled".to_string()
            }
        );
        println!();

        Ok(EXIT_SUCCESS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_validate_missing_file() {
        let args = ValidateArgs {};
        let code = args.execute(Some("/nonexistent/ermask.toml")).await.unwrap();
        assert_eq!(code, EXIT_CONFIG_ERROR);
    }

    #[tokio::test]
    async fn test_validate_overlapping_keys() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[policy]\nextra_known_keys = [\"DOB\"]").unwrap();

        let args = ValidateArgs {};
        let code = args
            .execute(Some(file.path().to_str().unwrap()))
            .await
            .unwrap();
        assert_eq!(code, EXIT_CONFIG_ERROR);
    }
}
