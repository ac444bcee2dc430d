//! YAML policy output writer.
//!
//! Writes RuleSet structs to YAML files with a generation header.

use crate::rules::schema::RuleSet;
use crate::utils::error::OutputError;
use chrono::{SecondsFormat, Utc};
use log::{debug, info};
use std::fs;
use std::path::Path;

/// Write a rule set to a YAML file
///
/// **Public** - main entry point for policy output
///
/// # Arguments
/// * `rule_set` - Policy to write
/// * `output_path` - Path to output YAML file
///
/// # Returns
/// Ok if file written successfully
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - YAML serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
///
/// # Example
/// ```ignore
/// let consolidation = consolidate(&groups, &sources);
/// write_rule_set(&consolidation.rule_set, "policy.yml")?;
/// ```
pub fn write_rule_set(rule_set: &RuleSet, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing firewall policy to: {}", output_path.display());

    validate_path(output_path)?;

    // Create parent directories if needed
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let document = rule_set_to_string(rule_set)?;
    fs::write(output_path, document)?;

    info!(
        "Policy written successfully ({} rules, {} bytes)",
        rule_set.len(),
        calculate_file_size(output_path)
    );

    Ok(())
}

/// Render a rule set as the full file contents
///
/// **Public** - useful for tests and dry runs
pub fn rule_set_to_string(rule_set: &RuleSet) -> Result<String, OutputError> {
    let yaml = serde_yml::to_string(rule_set)?;
    let body = yaml.strip_prefix("---\n").unwrap_or(&yaml);

    Ok(format!(
        "# Generated by virgil {} at {}\n---\n{}",
        env!("CARGO_PKG_VERSION"),
        Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        body
    ))
}

/// Validate that output path is writable
///
/// **Public** - can be called before fetching anything upstream
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    // Check if we're trying to overwrite a directory
    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Calculate file size in bytes
///
/// **Private** - internal utility
fn calculate_file_size(path: &Path) -> u64 {
    fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

/// Read a rule set from a YAML file
///
/// **Public** - used by the validate command
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (I/O errors share one variant)
/// * `OutputError::SerializationFailed` - YAML parse error
pub fn read_rule_set(input_path: impl AsRef<Path>) -> Result<RuleSet, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading policy from: {}", input_path.display());

    let contents = fs::read_to_string(input_path)?;
    let rule_set: RuleSet = serde_yml::from_str(&contents)?;

    debug!(
        "Policy loaded: schema {}, {} rules",
        rule_set.schema_version,
        rule_set.len()
    );

    Ok(rule_set)
}
