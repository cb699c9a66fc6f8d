//! Command-line interface for taskdash
//!
//! This module defines the CLI structure using clap derive macros.
//! Command implementations live in the `dashboard` submodule.

use clap::{Parser, Subcommand};

use crate::error::Result;

mod dashboard;

/// taskdash - task dashboard client
///
/// Keeps a local task collection in sync with a remote task service and
/// derives daily status and priority aggregates from it.
#[derive(Parser, Debug)]
#[command(name = "taskdash")]
#[command(author, version, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Base URL of the task service (overrides the config file)
    #[arg(long, global = true, env = "TASKDASH_URL")]
    pub base_url: Option<String>,

    /// Path to a config file (defaults to ./.taskdash.toml)
    #[arg(long, global = true, env = "TASKDASH_CONFIG")]
    pub config: Option<std::path::PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the full task collection
    List,

    /// Create a task
    New {
        /// Task title
        #[arg(long)]
        title: String,

        /// Task description
        #[arg(long, default_value = "")]
        description: String,

        /// Priority: Low, Medium, High
        #[arg(long, default_value = "Low")]
        priority: String,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: String,

        /// Initial status: To-Do, In Progress, Completed
        #[arg(long, default_value = "To-Do")]
        status: String,
    },

    /// Transition a task's status
    Status {
        /// Task id
        id: u64,

        /// New status: To-Do, In Progress, Completed
        status: String,
    },

    /// Look up a single task by id
    Show {
        /// Task id
        id: u64,
    },

    /// Print the daily status and priority aggregates
    Stats,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let connect = dashboard::ConnectOptions {
            base_url: self.base_url,
            config: self.config,
        };
        let output = crate::output::OutputOptions {
            json: self.json,
            quiet: self.quiet,
        };

        match self.command {
            Commands::List => dashboard::list(connect, output).await,
            Commands::New {
                title,
                description,
                priority,
                due,
                status,
            } => {
                dashboard::new_task(
                    dashboard::NewOptions {
                        title,
                        description,
                        priority,
                        due,
                        status,
                    },
                    connect,
                    output,
                )
                .await
            }
            Commands::Status { id, status } => {
                dashboard::set_status(id, &status, connect, output).await
            }
            Commands::Show { id } => dashboard::show(id, connect, output).await,
            Commands::Stats => dashboard::stats(connect, output).await,
        }
    }
}
