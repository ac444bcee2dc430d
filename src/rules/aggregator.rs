//! Fold raw rules into one record per (port, protocol).
//!
//! Every port named by a rule gets its own record. A port seen again
//! for the same protocol extends that record's destination list, so the
//! order rules are fed in decides the order of destinations.

use super::ports::expand_ports;
use super::schema::{FirewallRule, RawRule, RuleKey};
use crate::utils::error::PortError;
use log::{debug, warn};
use std::collections::HashMap;

/// Un-compressed aggregation result
pub type RuleMap = HashMap<RuleKey, FirewallRule>;

/// A raw rule dropped because its port expression did not expand
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRule {
    pub rule: RawRule,
    pub error: PortError,
}

/// Accumulates firewall records for a fixed source list
///
/// **Public** - the only owner of the in-progress record map
#[derive(Debug, Clone)]
pub struct RuleAggregator {
    source: Vec<String>,
    records: RuleMap,
    skipped: Vec<SkippedRule>,
}

impl RuleAggregator {
    /// Create an empty aggregator
    ///
    /// # Arguments
    /// * `source` - Originating addresses copied into every record
    pub fn new(source: &[String]) -> Self {
        Self {
            source: source.to_vec(),
            records: HashMap::new(),
            skipped: Vec::new(),
        }
    }

    /// Fold one raw rule into the record map
    ///
    /// A rule without a port expression contributes the empty-port record.
    /// When expansion fails nothing is recorded for this rule and the
    /// existing records are left as they were.
    ///
    /// # Returns
    /// Number of ports the rule contributed to
    pub fn add(&mut self, rule: &RawRule) -> Result<usize, PortError> {
        let ports = match rule.ports.as_deref().map(str::trim) {
            None | Some("") => vec![String::new()],
            Some(expression) => expand_ports(expression)?,
        };

        for port in &ports {
            let key = RuleKey::new(port.as_str(), rule.protocol.as_str());
            match self.records.get_mut(&key) {
                Some(record) => record.add_destination(&rule.destination),
                None => {
                    let record = FirewallRule::new(
                        port.as_str(),
                        rule.protocol.as_str(),
                        rule.destination.as_str(),
                        &self.source,
                    );
                    self.records.insert(key, record);
                }
            }
        }

        Ok(ports.len())
    }

    /// Fold a sequence of rules, skipping the ones that fail to expand
    pub fn add_all<'a>(&mut self, rules: impl IntoIterator<Item = &'a RawRule>) {
        for rule in rules {
            if let Err(error) = self.add(rule) {
                warn!(
                    "Skipping {} rule to {}: {}",
                    rule.protocol, rule.destination, error
                );
                self.skipped.push(SkippedRule {
                    rule: rule.clone(),
                    error,
                });
            }
        }
    }

    /// Number of (port, protocol) records so far
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rules skipped by `add_all`
    pub fn skipped(&self) -> &[SkippedRule] {
        &self.skipped
    }

    /// Look up the record for a port and protocol
    pub fn get(&self, port: &str, protocol: &str) -> Option<&FirewallRule> {
        self.records.get(&RuleKey::new(port, protocol))
    }

    /// Consume the aggregator
    ///
    /// # Returns
    /// The record map and the skipped rules
    pub fn finish(self) -> (RuleMap, Vec<SkippedRule>) {
        debug!(
            "Aggregated {} port records, skipped {} rules",
            self.records.len(),
            self.skipped.len()
        );
        (self.records, self.skipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn source() -> Vec<String> {
        vec!["1.2.3.4".to_string(), "2.3.4.5".to_string()]
    }

    #[test]
    fn test_expands_every_port() {
        let mut aggregator = RuleAggregator::new(&source());
        let added = aggregator
            .add(&RawRule::new("tcp", Some("12,15-20"), "1.1.1.1"))
            .unwrap();

        assert_eq!(added, 7);
        assert_eq!(aggregator.len(), 7);
        for port in ["12", "15", "16", "17", "18", "19", "20"] {
            let record = aggregator.get(port, "tcp").unwrap();
            assert_eq!(record.destination, vec!["1.1.1.1"]);
            assert_eq!(record.source, source());
        }
        assert!(aggregator.get("21", "tcp").is_none());
    }

    #[test]
    fn test_merges_destinations_in_order() {
        let mut aggregator = RuleAggregator::new(&source());
        aggregator.add(&RawRule::new("tcp", Some("12,15-20"), "1.1.1.1")).unwrap();
        aggregator.add(&RawRule::new("tcp", Some("12,18-21"), "2.2.2.2")).unwrap();

        assert_eq!(aggregator.len(), 8);
        assert_eq!(aggregator.get("12", "tcp").unwrap().destination, vec!["1.1.1.1", "2.2.2.2"]);
        assert_eq!(aggregator.get("15", "tcp").unwrap().destination, vec!["1.1.1.1"]);
        assert_eq!(aggregator.get("18", "tcp").unwrap().destination, vec!["1.1.1.1", "2.2.2.2"]);
        assert_eq!(aggregator.get("21", "tcp").unwrap().destination, vec!["2.2.2.2"]);
    }

    #[test]
    fn test_duplicate_destination_is_dropped() {
        let mut aggregator = RuleAggregator::new(&source());
        aggregator.add(&RawRule::new("udp", Some("53"), "8.8.8.8")).unwrap();
        aggregator.add(&RawRule::new("udp", Some("53"), "8.8.4.4")).unwrap();
        aggregator.add(&RawRule::new("udp", Some("53"), "8.8.8.8")).unwrap();

        assert_eq!(aggregator.get("53", "udp").unwrap().destination, vec!["8.8.8.8", "8.8.4.4"]);
    }

    #[test]
    fn test_protocols_are_kept_apart() {
        let mut aggregator = RuleAggregator::new(&source());
        aggregator.add(&RawRule::new("tcp", Some("53"), "1.1.1.1")).unwrap();
        aggregator.add(&RawRule::new("udp", Some("53"), "2.2.2.2")).unwrap();

        assert_eq!(aggregator.len(), 2);
        assert_eq!(aggregator.get("53", "tcp").unwrap().destination, vec!["1.1.1.1"]);
    }

    #[test]
    fn test_portless_rules_use_empty_port() {
        let mut aggregator = RuleAggregator::new(&source());
        aggregator.add(&RawRule::new("all", None, "9.9.9.9")).unwrap();
        aggregator.add(&RawRule::new("all", Some("  "), "10.0.0.0/8")).unwrap();

        let record = aggregator.get("", "all").unwrap();
        assert_eq!(record.destination, vec!["9.9.9.9", "10.0.0.0/8"]);
    }

    #[test]
    fn test_failed_rule_leaves_records_untouched() {
        let mut aggregator = RuleAggregator::new(&source());
        aggregator.add(&RawRule::new("tcp", Some("12"), "1.1.1.1")).unwrap();

        let err = aggregator
            .add(&RawRule::new("tcp", Some("12,21-20"), "2.2.2.2"))
            .unwrap_err();

        assert_eq!(err.to_string(), "Port range 21-20 was invalid");
        assert_eq!(aggregator.len(), 1);
        assert_eq!(aggregator.get("12", "tcp").unwrap().destination, vec!["1.1.1.1"]);
    }

    #[test]
    fn test_add_all_skips_and_continues() {
        let rules = vec![
            RawRule::new("tcp", Some("80"), "1.1.1.1"),
            RawRule::new("tcp", Some("not_valid_ports"), "2.2.2.2"),
            RawRule::new("tcp", Some("443"), "3.3.3.3"),
        ];
        let mut aggregator = RuleAggregator::new(&source());
        aggregator.add_all(&rules);

        let (records, skipped) = aggregator.finish();
        assert_eq!(records.len(), 2);
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].rule, rules[1]);
        assert_eq!(
            skipped[0].error,
            PortError::InvalidPort { port: "not_valid_ports".to_string() }
        );
    }
}
