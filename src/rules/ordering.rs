//! Stable output ordering for firewall rules.

use super::schema::FirewallRule;
use std::cmp::Ordering;

/// Sort rules by protocol, then by the first port they cover
///
/// Rules without a port sort ahead of numeric ports of the same protocol.
pub fn sort_rules(rules: &mut [FirewallRule]) {
    rules.sort_by(compare_rules);
}

/// Total order used by `sort_rules`
pub fn compare_rules(a: &FirewallRule, b: &FirewallRule) -> Ordering {
    a.protocol
        .cmp(&b.protocol)
        .then_with(|| a.port_start().cmp(&b.port_start()))
        .then_with(|| a.port.cmp(&b.port))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rule(port: &str, protocol: &str) -> FirewallRule {
        FirewallRule::new(port, protocol, "0.0.0.0/0", &[])
    }

    fn keys(rules: &[FirewallRule]) -> Vec<(&str, &str)> {
        rules
            .iter()
            .map(|r| (r.protocol.as_str(), r.port.as_str()))
            .collect()
    }

    #[test]
    fn test_sorts_by_protocol_then_port() {
        let mut rules = vec![
            rule("5", "udp"),
            rule("1", "tcp"),
            rule("5", "tcp"),
            rule("1", "udp"),
            rule("3", "tcp"),
            rule("9", "udp"),
            rule("9", "tcp"),
            rule("2", "tcp"),
            rule("2", "udp"),
            rule("3", "udp"),
        ];

        sort_rules(&mut rules);

        assert_eq!(
            keys(&rules),
            vec![
                ("tcp", "1"),
                ("tcp", "2"),
                ("tcp", "3"),
                ("tcp", "5"),
                ("tcp", "9"),
                ("udp", "1"),
                ("udp", "2"),
                ("udp", "3"),
                ("udp", "5"),
                ("udp", "9"),
            ]
        );
    }

    #[test]
    fn test_numeric_not_lexicographic() {
        let mut rules = vec![rule("100", "tcp"), rule("99", "tcp"), rule("110-115", "tcp"), rule("8", "tcp")];

        sort_rules(&mut rules);

        assert_eq!(
            keys(&rules),
            vec![("tcp", "8"), ("tcp", "99"), ("tcp", "100"), ("tcp", "110-115")]
        );
    }

    #[test]
    fn test_empty_port_sorts_first() {
        let mut rules = vec![rule("1", "all"), rule("", "all"), rule("", "icmp")];

        sort_rules(&mut rules);

        assert_eq!(keys(&rules), vec![("all", ""), ("all", "1"), ("icmp", "")]);
    }
}
