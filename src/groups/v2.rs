//! Cloud Foundry v2 security group shape.
//!
//! `GET /v2/security_groups?inline-relations-depth=1` returns resources
//! split into `metadata` and `entity`, with space bindings inlined.

use super::model::{SecurityGroup, UpstreamRule};
use serde::Deserialize;

/// One page of `/v2/security_groups`
#[derive(Debug, Deserialize)]
pub struct SecurityGroupPage {
    /// Relative URL of the next page, `null` on the last one
    #[serde(default)]
    pub next_url: Option<String>,

    #[serde(default)]
    pub resources: Vec<SecurityGroupResource>,
}

#[derive(Debug, Deserialize)]
pub struct SecurityGroupResource {
    pub metadata: Metadata,
    pub entity: SecurityGroupEntity,
}

#[derive(Debug, Deserialize)]
pub struct Metadata {
    pub guid: String,
}

#[derive(Debug, Deserialize)]
pub struct SecurityGroupEntity {
    pub name: String,

    #[serde(default)]
    pub rules: Vec<UpstreamRule>,

    #[serde(default)]
    pub running_default: bool,

    #[serde(default)]
    pub staging_default: bool,

    /// Only present with inline relations
    #[serde(default)]
    pub spaces: Vec<serde_json::Value>,

    #[serde(default)]
    pub staging_spaces: Vec<serde_json::Value>,
}

impl From<SecurityGroupResource> for SecurityGroup {
    fn from(resource: SecurityGroupResource) -> Self {
        let entity = resource.entity;
        SecurityGroup {
            name: entity.name,
            running: entity.running_default,
            staging: entity.staging_default,
            bindings: entity.spaces.len() + entity.staging_spaces.len(),
            rules: entity.rules.into_iter().map(Into::into).collect(),
        }
    }
}
