//! Virgil CLI
//!
//! Returns a list of firewall rules based on Cloud Foundry security groups,
//! sourced from the runtime VMs of the CF deployment.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use virgil::cf::CfApiVersion;
use virgil::commands::{
    display_schema, display_version, execute_generate, validate_args, validate_policy_file,
    GenerateArgs,
};
use virgil::utils::config::{DEFAULT_BOSH_PORT, DEFAULT_DEPLOYMENT_PATTERN, DEFAULT_RUNTIME_JOB_PATTERN};

/// Virgil - firewall rules from Cloud Foundry security groups
#[derive(Parser, Debug)]
#[command(name = "virgil")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate the firewall policy and write it as YAML
    Generate {
        /// Cloud Foundry system domain
        #[arg(long = "cf-sys-domain", visible_alias = "csd", env = "CF_SYS_DOMAIN")]
        cf_sys_domain: String,

        /// Cloud Foundry admin user
        #[arg(long = "cf-user", visible_alias = "cu", env = "CF_USER")]
        cf_user: String,

        /// Cloud Foundry admin password
        #[arg(long = "cf-password", visible_alias = "cp", env = "CF_PASSWORD", hide_env_values = true)]
        cf_password: String,

        /// Security group API version
        #[arg(long, value_enum, default_value_t = CfApiVersion::V3)]
        cf_api_version: CfApiVersion,

        /// BOSH user
        #[arg(long = "bosh-user", visible_alias = "bu", env = "BOSH_USER")]
        bosh_user: String,

        /// BOSH password
        #[arg(long = "bosh-password", visible_alias = "bp", env = "BOSH_PASSWORD", hide_env_values = true)]
        bosh_password: String,

        /// BOSH director URI, e.g. https://10.0.0.6
        #[arg(long = "bosh-uri", visible_alias = "buri", env = "BOSH_URI")]
        bosh_uri: String,

        /// BOSH director port
        #[arg(long = "bosh-port", visible_alias = "bport", env = "BOSH_PORT", default_value = DEFAULT_BOSH_PORT)]
        bosh_port: String,

        /// Regex selecting the CF deployment
        #[arg(long, default_value = DEFAULT_DEPLOYMENT_PATTERN)]
        deployment_pattern: String,

        /// Regex selecting runtime VM jobs
        #[arg(long, default_value = DEFAULT_RUNTIME_JOB_PATTERN)]
        job_pattern: String,

        /// Skip SSL validation
        #[arg(long, visible_alias = "skip-ssl")]
        skip_ssl_validation: bool,

        /// Output path for the YAML policy
        output_file: PathBuf,
    },

    /// Validate a policy YAML file
    Validate {
        /// Path to policy YAML file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Generate {
            cf_sys_domain,
            cf_user,
            cf_password,
            cf_api_version,
            bosh_user,
            bosh_password,
            bosh_uri,
            bosh_port,
            deployment_pattern,
            job_pattern,
            skip_ssl_validation,
            output_file,
        } => {
            let args = GenerateArgs {
                cf_system_domain: cf_sys_domain,
                cf_user,
                cf_password,
                cf_api_version,
                bosh_user,
                bosh_password,
                bosh_uri,
                bosh_port,
                deployment_pattern,
                job_pattern,
                skip_ssl_validation,
                output: output_file,
            };

            // Validate args first
            validate_args(&args)?;

            execute_generate(args)?;
        }

        Commands::Validate { file } => {
            validate_policy_file(&file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
