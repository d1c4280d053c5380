//! CLI commands and argument parsing

use crate::output::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Google Analytics Admin and Data API samples
#[derive(Parser, Debug)]
#[command(name = "analytics-samples")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Settings file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Credentials file (service account or authorized user JSON)
    #[arg(long, global = true)]
    pub credentials: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Pretty)]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all accounts
    Accounts,

    /// List the properties of an account, including trashed ones
    Properties {
        /// Account id (defaults to GA_ACCOUNT_ID or the settings file)
        #[arg(long)]
        account_id: Option<String>,
    },

    /// Run a report filtered on the first_open event
    Report {
        /// Property id (defaults to GA_PROPERTY_ID or the settings file)
        #[arg(long)]
        property_id: Option<String>,
    },

    /// Run a report page by page until every row is received
    Paginate {
        /// Property id (defaults to GA_PROPERTY_ID or the settings file)
        #[arg(long)]
        property_id: Option<String>,

        /// Rows per page
        #[arg(long)]
        limit: Option<i64>,

        /// Keep the row count of the first page instead of re-reading it
        #[arg(long)]
        snapshot_total: bool,
    },

    /// Run the sample funnel report
    Funnel {
        /// Property id (defaults to GA_PROPERTY_ID or the settings file)
        #[arg(long)]
        property_id: Option<String>,
    },
}
