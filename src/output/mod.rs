//! Output writers for the firewall policy.
//!
//! The policy is written as a single YAML document.

pub mod yaml;

// Re-export main functions
pub use yaml::{read_rule_set, rule_set_to_string, validate_path, write_rule_set};
