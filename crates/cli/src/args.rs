use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use core_types::MetricType;
use core_types::config::BASE_URL_ENV;

/// Terminal client for the vector-store service.
#[derive(Parser, Debug)]
#[command(name = "vectordesk", version, about = "Search, insert and manage collections on a vector-store service")]
pub struct Cli {
    /// Config file (default: $VECTORDESK_CONFIG or ./vectordesk.toml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend base address, overriding the config file.
    #[arg(long, global = true, env = BASE_URL_ENV)]
    pub base_url: Option<String>,

    /// More log output (-v debug, -vv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Less log output (-q warn, -qq error).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub quiet: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Net verbosity change relative to the configured level.
    pub fn verbosity(&self) -> i8 {
        let up = i8::try_from(self.verbose).unwrap_or(i8::MAX);
        let down = i8::try_from(self.quiet).unwrap_or(i8::MAX);
        up.saturating_sub(down)
    }
}

/// Fields shared by the actions that address a node.
#[derive(Args, Debug, Clone, Default)]
pub struct Target {
    /// Numeric id sent with the request.
    #[arg(long)]
    pub id: Option<i64>,
    /// PC address sent with the request.
    #[arg(long)]
    pub pc: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search a collection by embedding.
    Search {
        #[command(flatten)]
        target: Target,
        /// Collection to search.
        #[arg(short, long)]
        collection: String,
        /// Name of the vector column.
        #[arg(long)]
        vector_field: String,
        /// Comma-separated embedding components.
        #[arg(short, long, allow_hyphen_values = true)]
        embeddings: String,
        /// Similarity metric.
        #[arg(short, long)]
        metric: Option<MetricType>,
        /// Maximum number of results.
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// Insert rows given as a JSON array of objects.
    Insert {
        #[command(flatten)]
        target: Target,
        #[arg(short, long)]
        collection: String,
        /// Rows, e.g. '[{"name": "lamp", ...}]'.
        #[arg(short, long)]
        data: String,
    },
    /// Delete rows matching a JSON object of column = value conditions.
    Delete {
        #[command(flatten)]
        target: Target,
        #[arg(short, long)]
        collection: String,
        /// Conditions, e.g. '{"id": 3}'.
        #[arg(long)]
        conditions: String,
    },
    /// Create a collection with the product schema.
    CreateCollection {
        #[command(flatten)]
        target: Target,
        /// Collection name.
        name: String,
    },
    /// Delete a collection.
    DeleteCollection {
        #[command(flatten)]
        target: Target,
        /// Collection name.
        name: String,
    },
    /// Retrieve file details for comma-separated CIDs.
    Details {
        /// CIDs, e.g. 'Qm1,Qm2'.
        cids: String,
    },
    /// Retrieve resources, optionally filtered by id and address.
    Resources {
        #[command(flatten)]
        target: Target,
    },
    /// Interactive form session.
    Shell,
    /// Inspect or create the config file.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone, Copy)]
pub enum ConfigAction {
    /// Print the effective configuration.
    Show,
    /// Write a default config file if none exists.
    Init,
}
