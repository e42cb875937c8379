//! CLI for the vxpool VNI allocation pool.

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use vxpool_core::alloc_db::AllocDb;
use vxpool_core::config::{self, VxpoolConfig};
use vxpool_core::driver::VxlanTypeDriver;

use commands::{run_allocate, run_completions, run_list, run_release, run_status, run_sync};

/// Top-level CLI for the vxpool allocation pool.
#[derive(Debug, Parser)]
#[command(name = "vxpool")]
#[command(about = "vxpool: VXLAN VNI allocation pool", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/vxpool/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Validate vni_ranges and reconcile the allocation table with them.
    Sync,

    /// Allocate a VNI: the given one, or the lowest free one.
    Allocate {
        /// Specific VNI to allocate.
        #[arg(long)]
        vni: Option<i64>,
        /// Print the allocated segment as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Release a VNI back to the pool.
    Release {
        /// VNI to release.
        vni: i64,
    },

    /// Show pool counts and configured ranges.
    Status,

    /// List tracked VNIs.
    List {
        /// Only show allocated VNIs.
        #[arg(long)]
        allocated: bool,
    },

    /// Print shell completions to stdout.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<VxpoolConfig> {
    match path {
        Some(p) => config::load_from_path(p),
        None => config::load_or_init(),
    }
}

/// Open the store and run validation plus reconciliation. Every command that
/// touches the pool goes through this, so a bad configuration never serves.
async fn init_driver(cfg: &VxpoolConfig) -> Result<VxlanTypeDriver> {
    let db = match &cfg.database_path {
        Some(path) => AllocDb::open_at(path).await?,
        None => AllocDb::open_default().await?,
    };
    VxlanTypeDriver::initialize(db, cfg)
        .await
        .context("VXLAN type driver initialization failed")
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        if let CliCommand::Completions { shell } = cli.command {
            run_completions(shell);
            return Ok(());
        }

        let cfg = load_config(cli.config.as_ref())?;
        tracing::debug!("loaded config: {:?}", cfg);
        let driver = init_driver(&cfg).await?;

        match cli.command {
            CliCommand::Sync => run_sync(&driver),
            CliCommand::Allocate { vni, json } => run_allocate(&driver, vni, json).await?,
            CliCommand::Release { vni } => run_release(&driver, vni).await?,
            CliCommand::Status => run_status(&driver).await?,
            CliCommand::List { allocated } => run_list(&driver, allocated).await?,
            CliCommand::Completions { .. } => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
