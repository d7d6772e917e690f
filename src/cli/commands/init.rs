//! Init command implementation
//!
//! This module implements the `init` command for generating a starter
//! configuration file with the built-in policy key sets.

use super::{EXIT_CONFIG_ERROR, EXIT_FATAL, EXIT_SUCCESS};
use crate::masking::policy::{DEFAULT_KNOWN_KEYS, DEFAULT_MASKED_KEYS};
use clap::Args;
use std::fmt::Write as _;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "ermask.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing ermask configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG_ERROR);
        }

        match tokio::fs::write(&self.output, Self::generate_config()).await {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Review the masked and known key lists in {}", self.output);
                println!("  2. Validate configuration: ermask --config {} validate-config", self.output);
                println!("  3. Mask a document: ermask --config {} mask entity.json", self.output);
                println!();
                Ok(EXIT_SUCCESS)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(EXIT_FATAL)
            }
        }
    }

    /// Generate a starter configuration
    fn generate_config() -> String {
        let mut config = String::from(
            r#"# ermask Configuration File
# Reversible PII masking for entity-resolution JSON

[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

[policy]
# Values under these keys are replaced by tokens such as ENTITY_NAME_1
"#,
        );

        config.push_str(&key_list("masked_keys", DEFAULT_MASKED_KEYS));
        config.push_str("\n# Values under these keys pass through unchanged\n");
        config.push_str(&key_list("known_keys", DEFAULT_KNOWN_KEYS));
        config.push_str(
            r#"
# Appended to the lists above
extra_masked_keys = []
extra_known_keys = []

[output]
# Two-space indented JSON; set false for compact output
pretty = true

[audit]
# Audit entries record token keys and SHA-256 value hashes, never values
enabled = false
log_path = "./audit/ermask.log"
json_format = true

[logging]
local_enabled = false
local_path = "./logs"
# daily | hourly | never
local_rotation = "daily"
"#,
        );
        config
    }
}

fn key_list(name: &str, keys: &[&str]) -> String {
    let mut out = format!("{name} = [\n");
    for key in keys {
        let _ = writeln!(out, "    \"{key}\",");
    }
    out.push_str("]\n");
    out
}
