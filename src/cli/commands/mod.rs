//! CLI command implementations
//!
//! This module contains all CLI command implementations and the small I/O
//! helpers they share.

pub mod init;
pub mod mask;
pub mod unmask;
pub mod validate;

use anyhow::Context;
use std::path::Path;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// Exit code for success
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code for configuration and usage errors
pub const EXIT_CONFIG_ERROR: i32 = 2;
/// Exit code for masking policy violations
pub const EXIT_POLICY_VIOLATION: i32 = 3;
/// Exit code for fatal errors
pub const EXIT_FATAL: i32 = 5;

/// Read a whole input; `-` means stdin
pub(crate) async fn read_input(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buf)
            .await
            .context("Failed to read stdin")?;
        return Ok(buf);
    }

    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}

/// Write output to `path`, or stdout when `path` is `None`
pub(crate) async fn write_output(path: Option<&Path>, contents: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            tokio::fs::write(path, contents)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))
        }
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(contents.as_bytes()).await?;
            stdout.flush().await?;
            Ok(())
        }
    }
}

/// Display name for an input path
pub(crate) fn source_name(path: &Path) -> String {
    if path == Path::new("-") {
        "<stdin>".to_string()
    } else {
        path.display().to_string()
    }
}
