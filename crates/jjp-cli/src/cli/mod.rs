//! CLI for the JJP Jenkins job provisioner.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use jjp_core::config;
use std::path::PathBuf;

use commands::{run_apply, run_render};

/// Top-level CLI for the JJP Jenkins job provisioner.
#[derive(Debug, Parser)]
#[command(name = "jjp")]
#[command(about = "JJP: idempotent Jenkins folder and pipeline-job provisioner", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Provision the job described by a spec file (create or update).
    Apply {
        /// Path to the TOML job spec.
        #[arg(long)]
        config: PathBuf,

        /// Base Jenkins URL (defaults to the JENKINS_URL env var).
        #[arg(long)]
        url: Option<String>,

        /// Jenkins username (defaults to the JENKINS_USER env var).
        #[arg(long)]
        user: Option<String>,

        /// Jenkins API token or password (defaults to the JENKINS_TOKEN env var).
        #[arg(long)]
        token: Option<String>,
    },

    /// Render the job XML that `apply` would post, without contacting the server.
    Render {
        /// Path to the TOML job spec.
        #[arg(long)]
        config: PathBuf,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Apply {
                config,
                url,
                user,
                token,
            } => run_apply(&cfg, &config, url, user, token)?,
            CliCommand::Render { config } => run_render(&config)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
