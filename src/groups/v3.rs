//! Cloud Foundry v3 security group shape.

use super::model::{SecurityGroup, UpstreamRule};
use serde::Deserialize;

/// One page of `/v3/security_groups`
#[derive(Debug, Deserialize)]
pub struct SecurityGroupPage {
    pub pagination: Pagination,

    #[serde(default)]
    pub resources: Vec<SecurityGroupResource>,
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub next: Option<Link>,
}

#[derive(Debug, Deserialize)]
pub struct Link {
    pub href: String,
}

#[derive(Debug, Deserialize)]
pub struct SecurityGroupResource {
    pub guid: String,
    pub name: String,

    #[serde(default)]
    pub globally_enabled: GloballyEnabled,

    #[serde(default)]
    pub rules: Vec<UpstreamRule>,

    #[serde(default)]
    pub relationships: Relationships,
}

#[derive(Debug, Default, Deserialize)]
pub struct GloballyEnabled {
    #[serde(default)]
    pub running: bool,

    #[serde(default)]
    pub staging: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct Relationships {
    #[serde(default)]
    pub running_spaces: ToMany,

    #[serde(default)]
    pub staging_spaces: ToMany,
}

#[derive(Debug, Default, Deserialize)]
pub struct ToMany {
    #[serde(default)]
    pub data: Vec<serde_json::Value>,
}

impl From<SecurityGroupResource> for SecurityGroup {
    fn from(resource: SecurityGroupResource) -> Self {
        let relationships = resource.relationships;
        SecurityGroup {
            name: resource.name,
            running: resource.globally_enabled.running,
            staging: resource.globally_enabled.staging,
            bindings: relationships.running_spaces.data.len()
                + relationships.staging_spaces.data.len(),
            rules: resource.rules.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::schema::RawRule;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_v3_page_normalizes() {
        let page: SecurityGroupPage = serde_json::from_value(serde_json::json!({
            "pagination": { "total_results": 2, "next": null },
            "resources": [
                {
                    "guid": "b85a788e",
                    "name": "public_networks",
                    "globally_enabled": { "running": true, "staging": false },
                    "rules": [
                        { "protocol": "all", "destination": "0.0.0.0-9.255.255.255" },
                        { "protocol": "tcp", "destination": "10.10.10.0/24", "ports": "443,80,8080" }
                    ],
                    "relationships": {
                        "staging_spaces": { "data": [] },
                        "running_spaces": { "data": [] }
                    }
                },
                {
                    "guid": "c0ffee",
                    "name": "bound_only",
                    "globally_enabled": { "running": false, "staging": false },
                    "rules": [],
                    "relationships": {
                        "staging_spaces": { "data": [{ "guid": "space-1" }] },
                        "running_spaces": { "data": [{ "guid": "space-1" }, { "guid": "space-2" }] }
                    }
                }
            ]
        }))
        .unwrap();

        assert!(page.pagination.next.is_none());

        let groups: Vec<SecurityGroup> = page.resources.into_iter().map(Into::into).collect();
        assert!(groups[0].running);
        assert_eq!(groups[0].bindings, 0);
        assert_eq!(
            groups[0].rules,
            vec![
                RawRule::new("all", None, "0.0.0.0-9.255.255.255"),
                RawRule::new("tcp", Some("443,80,8080"), "10.10.10.0/24"),
            ]
        );
        assert_eq!(groups[1].bindings, 3);
        assert!(groups[1].is_in_effect());
    }
}
