//! Select the security groups that are in effect.

use super::model::SecurityGroup;
use log::debug;

/// Keep only groups that are globally applied or bound to a space
///
/// **Public** - pure filter, input order is preserved
pub fn select_in_effect(groups: &[SecurityGroup]) -> Vec<&SecurityGroup> {
    groups
        .iter()
        .filter(|group| {
            let keep = group.is_in_effect();
            if !keep {
                debug!("Ignoring unused security group: {}", group.name);
            }
            keep
        })
        .collect()
}
