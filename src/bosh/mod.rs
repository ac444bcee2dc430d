//! BOSH director access for locating runtime VM addresses.
//!
//! The IPs of the DEA/Diego cell VMs are the sources of every
//! generated firewall rule.

pub mod client;
pub mod select;
pub mod types;

pub use client::{BoshClient, BoshConfig};
pub use select::{collect_ips, find_deployment, find_vms};
pub use types::{Deployment, Vm};
