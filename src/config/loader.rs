//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::ErmaskConfig;
use crate::domain::errors::MaskError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into ErmaskConfig
/// 4. Applies environment variable overrides (ERMASK_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`MaskError::Configuration`] if the file cannot be read or parsed,
/// a referenced environment variable is missing, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use ermask::config::loader::load_config;
///
/// let config = load_config("ermask.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<ErmaskConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(MaskError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        MaskError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: ErmaskConfig = toml::from_str(&contents)
        .map_err(|e| MaskError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    finish(&mut config)?;
    Ok(config)
}

/// Loads configuration from `path`, or built-in defaults when `path` is `None`
///
/// Environment overrides and validation apply in both cases.
pub fn load_config_or_default(path: Option<&str>) -> Result<ErmaskConfig> {
    match path {
        Some(path) => load_config(path),
        None => {
            let mut config = ErmaskConfig::default();
            finish(&mut config)?;
            Ok(config)
        }
    }
}

fn finish(config: &mut ErmaskConfig) -> Result<()> {
    apply_env_overrides(config)?;

    config.validate().map_err(|e| {
        MaskError::Configuration(format!("Configuration validation failed: {}", e))
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("env var pattern is valid");
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(MaskError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using ERMASK_* prefix
///
/// Environment variables follow the pattern: ERMASK_<SECTION>_<KEY>
fn apply_env_overrides(config: &mut ErmaskConfig) -> Result<()> {
    if let Ok(val) = std::env::var("ERMASK_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    config.policy.apply_env_overrides();

    if let Ok(val) = std::env::var("ERMASK_OUTPUT_PRETTY") {
        config.output.pretty = val.parse().unwrap_or(true);
    }

    config.audit.apply_env_overrides()?;

    if let Ok(val) = std::env::var("ERMASK_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("ERMASK_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}
