use crate::output::read_rule_set;
use crate::utils::config::SCHEMA_VERSION;
use anyhow::Result;
use std::collections::BTreeMap;
use std::path::Path;

/// Validate a policy YAML file
pub fn validate_policy_file(file_path: &Path) -> Result<()> {
    println!("Validating policy: {}", file_path.display());

    let rule_set = read_rule_set(file_path)?;

    if rule_set.schema_version != SCHEMA_VERSION {
        anyhow::bail!(
            "Unsupported schema version {} (expected {})",
            rule_set.schema_version,
            SCHEMA_VERSION
        );
    }

    let mut by_protocol: BTreeMap<&str, usize> = BTreeMap::new();
    for rule in &rule_set.firewall_rules {
        *by_protocol.entry(rule.protocol.as_str()).or_default() += 1;
    }

    println!("✓ Valid firewall policy");
    println!("  Schema Version: {}", rule_set.schema_version);
    println!("  Rules: {}", rule_set.len());
    for (protocol, count) in by_protocol {
        println!("    {}: {}", protocol, count);
    }

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Virgil Firewall Policy Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  schema_version: string   - Schema version (currently '1')");
        println!("  firewall_rules: array    - Rules ordered by protocol, then port");
        println!("    port: string           - Single port, 'start-end' range, or '' for no port");
        println!("    protocol: string       - tcp, udp, icmp or all");
        println!("    destination: array     - Destination addresses or CIDRs");
        println!("    source: array          - Runtime VM IPs the traffic originates from");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Virgil v{}", env!("CARGO_PKG_VERSION"));
    println!("Policy Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Generates firewall rules from Cloud Foundry security groups.");
}
