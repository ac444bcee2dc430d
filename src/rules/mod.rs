//! Rule consolidation engine.
//!
//! This module turns security-group rules into a firewall policy:
//! - Port expression expansion
//! - Aggregation per (port, protocol)
//! - Range compression
//! - Stable ordering

pub mod aggregator;
pub mod compressor;
pub mod ordering;
pub mod ports;
pub mod schema;

// Re-export main types and functions
pub use aggregator::{RuleAggregator, RuleMap, SkippedRule};
pub use compressor::compress_ranges;
pub use ordering::{compare_rules, sort_rules};
pub use ports::expand_ports;
pub use schema::{FirewallRule, RawRule, RuleKey, RuleSet};

use crate::groups::{select_in_effect, SecurityGroup};
use log::{debug, info};

/// Result of a consolidation run
#[derive(Debug, Clone)]
pub struct Consolidation {
    /// The released policy
    pub rule_set: RuleSet,

    /// Raw rules whose port expression could not be expanded
    pub skipped: Vec<SkippedRule>,
}

/// Build the firewall policy for a set of security groups
///
/// **Public** - main entry point for the engine
///
/// # Arguments
/// * `groups` - All security groups, in upstream order
/// * `source` - Originating addresses (already unique)
///
/// # Returns
/// The ordered rule set, plus any rules that were skipped. A malformed
/// rule never affects the rules derived from the others.
pub fn consolidate(groups: &[SecurityGroup], source: &[String]) -> Consolidation {
    let in_effect = select_in_effect(groups);
    info!(
        "{} of {} security groups are in effect",
        in_effect.len(),
        groups.len()
    );

    let mut aggregator = RuleAggregator::new(source);
    for group in &in_effect {
        debug!("Aggregating {} rules from {}", group.rules.len(), group.name);
        aggregator.add_all(&group.rules);
    }

    let (records, skipped) = aggregator.finish();
    let mut rules = compress_ranges(records.into_values());
    sort_rules(&mut rules);

    debug!("Consolidated into {} firewall rules", rules.len());

    Consolidation {
        rule_set: RuleSet::new(rules),
        skipped,
    }
}
