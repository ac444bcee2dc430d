//! Normalized security group.

use crate::rules::schema::RawRule;
use serde::Deserialize;

/// A security group, independent of the CF API version it came from
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SecurityGroup {
    pub name: String,

    /// Globally applied to running applications
    pub running: bool,

    /// Globally applied to staging applications
    pub staging: bool,

    /// Number of explicit space bindings
    pub bindings: usize,

    pub rules: Vec<RawRule>,
}

impl SecurityGroup {
    /// Whether the group can affect any application
    pub fn is_in_effect(&self) -> bool {
        self.running || self.staging || self.bindings > 0
    }
}

/// Rule entry as both CF API versions return it
///
/// ICMP `type`/`code`, `log` and `description` are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamRule {
    pub protocol: String,

    #[serde(default)]
    pub ports: Option<String>,

    pub destination: String,
}

impl From<UpstreamRule> for RawRule {
    fn from(rule: UpstreamRule) -> Self {
        RawRule {
            protocol: rule.protocol.to_lowercase(),
            ports: rule.ports,
            destination: rule.destination,
        }
    }
}
