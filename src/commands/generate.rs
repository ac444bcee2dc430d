//! Generate command implementation.
//!
//! The generate command:
//! 1. Finds the CF deployment on the BOSH director
//! 2. Collects the runtime VM IPs (rule sources)
//! 3. Fetches security groups from the CF API
//! 4. Consolidates the rules
//! 5. Writes the YAML policy

use crate::bosh::{collect_ips, find_deployment, find_vms, BoshClient, BoshConfig};
use crate::cf::{CfApiVersion, CfClient, CfConfig};
use crate::output::{validate_path, write_rule_set};
use crate::rules::{consolidate, Consolidation};
use crate::utils::config::{DEFAULT_BOSH_PORT, DEFAULT_DEPLOYMENT_PATTERN, DEFAULT_RUNTIME_JOB_PATTERN};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use regex::Regex;
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the generate command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct GenerateArgs {
    /// CF system domain; the API lives at `api.<domain>`
    pub cf_system_domain: String,

    pub cf_user: String,

    pub cf_password: String,

    /// Security group endpoint version
    pub cf_api_version: CfApiVersion,

    pub bosh_user: String,

    pub bosh_password: String,

    /// Director URI including scheme
    pub bosh_uri: String,

    pub bosh_port: String,

    /// Regex selecting the CF deployment
    pub deployment_pattern: String,

    /// Regex selecting runtime VM jobs
    pub job_pattern: String,

    pub skip_ssl_validation: bool,

    /// Path of the YAML policy to write
    pub output: PathBuf,
}

impl Default for GenerateArgs {
    fn default() -> Self {
        Self {
            cf_system_domain: String::new(),
            cf_user: String::new(),
            cf_password: String::new(),
            cf_api_version: CfApiVersion::default(),
            bosh_user: String::new(),
            bosh_password: String::new(),
            bosh_uri: String::new(),
            bosh_port: DEFAULT_BOSH_PORT.to_string(),
            deployment_pattern: DEFAULT_DEPLOYMENT_PATTERN.to_string(),
            job_pattern: DEFAULT_RUNTIME_JOB_PATTERN.to_string(),
            skip_ssl_validation: false,
            output: PathBuf::from("firewall-policy.yml"),
        }
    }
}

impl GenerateArgs {
    pub fn cf_config(&self) -> CfConfig {
        CfConfig {
            api_url: format!("https://api.{}", self.cf_system_domain),
            username: self.cf_user.clone(),
            password: self.cf_password.clone(),
            api_version: self.cf_api_version,
            skip_ssl_validation: self.skip_ssl_validation,
        }
    }

    pub fn bosh_config(&self) -> BoshConfig {
        BoshConfig {
            uri: self.bosh_uri.clone(),
            port: self.bosh_port.clone(),
            username: self.bosh_user.clone(),
            password: self.bosh_password.clone(),
            skip_ssl_validation: self.skip_ssl_validation,
        }
    }
}

/// Execute the generate command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Missing CF deployment or runtime VMs
/// * CF or BOSH connection and authentication failures
/// * File write errors
///
/// Rules with malformed port expressions are skipped with a warning and
/// do not fail the command.
pub fn execute_generate(args: GenerateArgs) -> Result<Consolidation> {
    let start_time = Instant::now();
    let bosh = BoshClient::new(&args.bosh_config()).context("Failed to create BOSH client")?;
    let cf = CfClient::connect(&args.cf_config()).context("Failed to log in to Cloud Foundry")?;
    run_generate(&args, &bosh, &cf, start_time)
}

/// Generate with already connected clients
///
/// **Public** - lets tests point the clients at mock endpoints
pub fn run_generate(
    args: &GenerateArgs,
    bosh: &BoshClient,
    cf: &CfClient,
    start_time: Instant,
) -> Result<Consolidation> {
    let deployment_pattern = Regex::new(&args.deployment_pattern)
        .context("Invalid deployment pattern")?;
    let job_pattern = Regex::new(&args.job_pattern).context("Invalid job pattern")?;

    // Step 1: Find the CF deployment
    info!("Step 1/5: Finding CF deployment...");
    let deployments = bosh.deployments().context("Failed to list BOSH deployments")?;
    let deployment = find_deployment(&deployments, &deployment_pattern)
        .with_context(|| format!("No deployment matches {}", args.deployment_pattern))?;
    debug!("Using deployment {}", deployment);

    // Step 2: Collect runtime VM IPs
    info!("Step 2/5: Fetching runtime VM IPs...");
    let vms = bosh
        .vms(deployment)
        .with_context(|| format!("Failed to list VMs of {}", deployment))?;
    let sources = collect_ips(find_vms(&vms, &job_pattern));
    if sources.is_empty() {
        anyhow::bail!(
            "No runtime VM IPs found in {} for jobs matching {}",
            deployment,
            args.job_pattern
        );
    }
    debug!("Found {} source IPs", sources.len());

    // Step 3: Fetch security groups
    info!("Step 3/5: Fetching security groups...");
    let groups = cf
        .list_security_groups()
        .context("Failed to fetch security groups")?;

    // Step 4: Consolidate
    info!("Step 4/5: Generating firewall rules...");
    let consolidation = consolidate(&groups, &sources);
    for skipped in &consolidation.skipped {
        warn!(
            "Ignored {} rule to {}: {}",
            skipped.rule.protocol, skipped.rule.destination, skipped.error
        );
    }

    // Step 5: Write output
    info!("Step 5/5: Writing firewall policy...");
    write_rule_set(&consolidation.rule_set, &args.output)
        .context("Failed to write firewall policy")?;

    info!(
        "✓ {} firewall rules written to: {}",
        consolidation.rule_set.len(),
        args.output.display()
    );
    info!("Generate completed in {:.2}s", start_time.elapsed().as_secs_f64());

    Ok(consolidation)
}

/// Validate generate arguments
///
/// **Public** - can be called before execute_generate for early validation
pub fn validate_args(args: &GenerateArgs) -> Result<()> {
    if args.cf_system_domain.is_empty() || args.cf_user.is_empty() || args.cf_password.is_empty() {
        anyhow::bail!("cf-sys-domain, cf-user and cf-password must all be set");
    }

    if args.bosh_user.is_empty()
        || args.bosh_password.is_empty()
        || args.bosh_uri.is_empty()
        || args.bosh_port.is_empty()
    {
        anyhow::bail!("BOSH user, password, URI and port must all be set");
    }

    if !args.bosh_uri.starts_with("http://") && !args.bosh_uri.starts_with("https://") {
        anyhow::bail!("BOSH URI must start with http:// or https://");
    }

    match args.bosh_port.parse::<u16>() {
        Ok(port) if port > 0 => {}
        _ => anyhow::bail!("BOSH port must be a number between 1 and 65535"),
    }

    Regex::new(&args.deployment_pattern).context("Invalid deployment pattern")?;
    Regex::new(&args.job_pattern).context("Invalid job pattern")?;

    validate_path(&args.output).context("Invalid output file")?;

    Ok(())
}
