//! Types returned by the BOSH director API.

use serde::Deserialize;

/// Entry of `GET /deployments`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Deployment {
    pub name: String,
}

/// Entry of `GET /deployments/<name>/vms`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Vm {
    /// Instance group (job) name, e.g. `diego_cell`
    pub job: String,

    #[serde(default)]
    pub index: Option<u32>,

    #[serde(default)]
    pub ips: Vec<String>,
}
