//! Compress runs of adjacent single-port rules into port ranges.
//!
//! Ports 110..=115 all reaching the same destinations become one
//! `110-115` rule. Two ports are only joined when they are consecutive
//! integers AND their destination sets are equal.

use super::schema::FirewallRule;
use log::debug;
use std::collections::{BTreeMap, BTreeSet};

/// Merge contiguous single-port rules with identical destination sets
///
/// **Public** - main entry point for range compression
///
/// # Arguments
/// * `rules` - Aggregated rules; only single numeric ports take part
///
/// # Returns
/// Compressed rules. Rules without a port, and rules that already carry a
/// range, are passed through unchanged, so running this on its own output
/// returns the same set. Output order is unspecified; use `sort_rules`.
pub fn compress_ranges(rules: impl IntoIterator<Item = FirewallRule>) -> Vec<FirewallRule> {
    let mut by_protocol: BTreeMap<String, Vec<(u16, FirewallRule)>> = BTreeMap::new();
    let mut compressed = Vec::new();

    for rule in rules {
        match rule.single_port() {
            Some(port) => by_protocol
                .entry(rule.protocol.clone())
                .or_default()
                .push((port, rule)),
            None => compressed.push(rule),
        }
    }

    for (protocol, mut candidates) in by_protocol {
        candidates.sort_by_key(|(port, _)| *port);
        let before = candidates.len();
        let runs = split_runs(candidates);
        debug!("{}: {} ports compressed into {} rules", protocol, before, runs.len());
        compressed.extend(runs.into_iter().map(collapse_run));
    }

    compressed
}

/// Split sorted candidates into maximal mergeable runs
///
/// **Private** - a run continues while the next port is exactly one higher
/// and reaches the same destinations
fn split_runs(candidates: Vec<(u16, FirewallRule)>) -> Vec<Vec<(u16, FirewallRule)>> {
    let mut runs: Vec<Vec<(u16, FirewallRule)>> = Vec::new();

    for (port, rule) in candidates {
        let extends = runs
            .last()
            .and_then(|run| run.last())
            .is_some_and(|(prev_port, prev_rule)| {
                u32::from(port) == u32::from(*prev_port) + 1
                    && same_destinations(prev_rule, &rule)
            });

        if extends {
            if let Some(run) = runs.last_mut() {
                run.push((port, rule));
            }
        } else {
            runs.push(vec![(port, rule)]);
        }
    }

    runs
}

/// Turn a run into one rule
///
/// **Private** - a run of one is returned as it was
fn collapse_run(mut run: Vec<(u16, FirewallRule)>) -> FirewallRule {
    let end = run.last().map(|(port, _)| *port);
    let (start, mut rule) = run.swap_remove(0);

    if let Some(end) = end.filter(|end| *end != start) {
        rule.port = format!("{}-{}", start, end);
    }

    rule
}

fn same_destinations(a: &FirewallRule, b: &FirewallRule) -> bool {
    let a: BTreeSet<&str> = a.destination.iter().map(String::as_str).collect();
    let b: BTreeSet<&str> = b.destination.iter().map(String::as_str).collect();
    a == b
}
