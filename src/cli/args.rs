//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `list`: List the distinct container images referenced by pods
//! - `init`: Initialize a kimages configuration file

use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::core::Strategy;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::List(cmd)) => cmd.args.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// A JSON array on one line
    #[default]
    Json,
    /// One image per line
    Raw,
}

#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    /// Collection strategy (overrides config file)
    #[arg(short, long, value_enum)]
    pub strategy: Option<Strategy>,

    /// Output format (overrides config file)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Print repository and tag separately instead of raw image strings
    #[arg(long)]
    pub parsed: bool,

    /// Time budget in seconds (overrides config file)
    #[arg(long, value_name = "SECONDS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Pods per page for the streaming strategy (overrides config file)
    #[arg(long)]
    pub page_size: Option<NonZeroUsize>,

    /// Worker count for the fan-out strategy (overrides config file)
    #[arg(long)]
    pub concurrency: Option<NonZeroUsize>,

    /// Only list pods in this namespace (default: all namespaces)
    #[arg(short, long)]
    pub namespace: Option<String>,

    /// Read pods from a saved `kubectl get pods -A -o json` file
    #[arg(long, value_name = "PATH")]
    pub from_file: Option<PathBuf>,

    /// Kubeconfig path or alias from the config file
    #[arg(long, env = "KUBE_CONFIG", value_name = "PATH")]
    pub kubeconfig: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct ListCommand {
    #[command(flatten)]
    pub args: ListArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the distinct container images referenced by pods
    List(ListCommand),
    /// Initialize a new .kimagesrc.json configuration file
    Init,
}
