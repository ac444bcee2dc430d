//! Cloud Foundry API client for fetching security groups.

pub mod client;
pub mod types;

pub use client::{CfApiVersion, CfClient, CfConfig};
