//! Virgil
//!
//! Generates a minimal, deterministic firewall policy from
//! Cloud Foundry security groups.
//!
//! This crate provides the core implementation for the
//! `virgil` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! cargo install virgil
//! virgil generate --help
//! ```
//!
//! The rule engine can also be used on its own:
//!
//! ```ignore
//! use virgil::groups::SecurityGroup;
//! use virgil::rules::consolidate;
//!
//! let policy = consolidate(&groups, &sources).rule_set;
//! ```

pub mod bosh;
pub mod cf;
pub mod commands;
pub mod groups;
pub mod output;
pub mod rules;
pub mod utils;
