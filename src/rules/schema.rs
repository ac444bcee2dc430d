//! Policy schema definitions.
//!
//! `RuleSet` is the document handed to the output writer.
//! Schema is versioned to allow future evolution.

use crate::utils::config::SCHEMA_VERSION;
use serde::{Deserialize, Serialize};

/// A single upstream rule, normalized from any security-group API shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRule {
    /// Protocol token as given upstream (`tcp`, `udp`, `icmp`, `all`)
    pub protocol: String,

    /// Port expression such as `"80,8080-8090"`; `None` when the protocol has no ports
    pub ports: Option<String>,

    /// Destination address, CIDR or IP range
    pub destination: String,
}

impl RawRule {
    pub fn new(protocol: impl Into<String>, ports: Option<&str>, destination: impl Into<String>) -> Self {
        Self {
            protocol: protocol.into(),
            ports: ports.map(str::to_string),
            destination: destination.into(),
        }
    }
}

/// A consolidated firewall rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirewallRule {
    /// Single port, `"start-end"` range, or empty when the protocol has no ports
    pub port: String,

    /// Lowercase protocol token
    pub protocol: String,

    /// Destinations in first-seen order, without duplicates
    pub destination: Vec<String>,

    /// Originating addresses, identical for every rule
    pub source: Vec<String>,
}

impl FirewallRule {
    /// Create a rule with a single destination
    pub fn new(
        port: impl Into<String>,
        protocol: impl Into<String>,
        destination: impl Into<String>,
        source: &[String],
    ) -> Self {
        Self {
            port: port.into(),
            protocol: protocol.into(),
            destination: vec![destination.into()],
            source: source.to_vec(),
        }
    }

    /// Append a destination unless it is already present
    pub fn add_destination(&mut self, destination: &str) {
        if !self.destination.iter().any(|d| d == destination) {
            self.destination.push(destination.to_string());
        }
    }

    /// Numeric port when `port` is a single number
    pub fn single_port(&self) -> Option<u16> {
        self.port.parse().ok()
    }

    /// First port covered by this rule; `None` for the empty-port sentinel
    pub fn port_start(&self) -> Option<u32> {
        let start = self.port.split('-').next()?.trim();
        start.parse().ok()
    }
}

/// Key of the aggregation map
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleKey {
    pub port: String,
    pub protocol: String,
}

impl RuleKey {
    pub fn new(port: impl Into<String>, protocol: impl Into<String>) -> Self {
        Self {
            port: port.into(),
            protocol: protocol.into(),
        }
    }
}

/// The released firewall policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Ordered firewall rules
    pub firewall_rules: Vec<FirewallRule>,
}

impl RuleSet {
    pub fn new(firewall_rules: Vec<FirewallRule>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            firewall_rules,
        }
    }

    pub fn len(&self) -> usize {
        self.firewall_rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.firewall_rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_destination_keeps_first_seen_order() {
        let mut rule = FirewallRule::new("80", "tcp", "2.2.2.2", &[]);
        rule.add_destination("1.1.1.1");
        rule.add_destination("2.2.2.2");

        assert_eq!(rule.destination, vec!["2.2.2.2", "1.1.1.1"]);
    }

    #[test]
    fn test_port_start() {
        let single = FirewallRule::new("443", "tcp", "d", &[]);
        let range = FirewallRule::new("110-115", "tcp", "d", &[]);
        let none = FirewallRule::new("", "all", "d", &[]);

        assert_eq!(single.port_start(), Some(443));
        assert_eq!(range.port_start(), Some(110));
        assert_eq!(none.port_start(), None);
        assert_eq!(range.single_port(), None);
    }

    #[test]
    fn test_rule_set_version() {
        let rule_set = RuleSet::new(vec![]);
        assert_eq!(rule_set.schema_version, "1");
        assert!(rule_set.is_empty());
    }
}
