//! Pick the CF deployment, its runtime VMs and their addresses.

use super::types::{Deployment, Vm};
use log::debug;
use regex::Regex;

/// Name of the first deployment matching `pattern`
pub fn find_deployment<'a>(deployments: &'a [Deployment], pattern: &Regex) -> Option<&'a str> {
    deployments
        .iter()
        .find(|deployment| pattern.is_match(&deployment.name))
        .map(|deployment| deployment.name.as_str())
}

/// Every VM whose job name matches `pattern`
pub fn find_vms<'a>(vms: &'a [Vm], pattern: &Regex) -> Vec<&'a Vm> {
    let matched: Vec<&Vm> = vms.iter().filter(|vm| pattern.is_match(&vm.job)).collect();
    debug!("{} of {} VMs match {}", matched.len(), vms.len(), pattern);
    matched
}

/// All IPs of the given VMs, first-seen order, without duplicates
pub fn collect_ips<'a>(vms: impl IntoIterator<Item = &'a Vm>) -> Vec<String> {
    let mut ips: Vec<String> = Vec::new();
    for ip in vms.into_iter().flat_map(|vm| vm.ips.iter()) {
        if !ips.contains(ip) {
            ips.push(ip.clone());
        }
    }
    ips
}
