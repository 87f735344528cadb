//! Command implementations for the REB CLI.
//!
//! Provides subcommands for browsing weekly price-change reports from a
//! fixture directory or a hosted statistics endpoint, and for serving the
//! dashboard over HTTP.

use clap::{Args, Subcommand};
use std::path::PathBuf;

pub mod report;
pub mod store;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List report dates, newest first
    Dates {
        /// Maximum number of dates to list
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Find the report date closest to N months before a reference date
    Nearest {
        /// Months to go back
        #[arg(short = 'm', long)]
        months: u32,

        /// Reference date (YYYY-MM-DD or YYYYMMDD); latest report when omitted
        #[arg(short = 'd', long)]
        date: Option<String>,
    },

    /// Print the dashboard view for one scope
    View {
        /// `national`, `capital`, a view-group name, or `group:<name>`
        #[arg(short = 's', long, default_value = "national")]
        scope: String,

        /// Anchor date (YYYY-MM-DD or YYYYMMDD); latest report when omitted
        #[arg(short = 'd', long)]
        date: Option<String>,

        /// Emit the view as JSON instead of text tables
        #[arg(long)]
        json: bool,
    },

    /// List view-group names in display order
    Groups,

    /// Serve the dashboard pages and JSON API
    Serve {
        /// Address to bind
        #[arg(short = 'a', long, default_value = "127.0.0.1:8080")]
        addr: String,
    },
}

/// Where statistics come from and how long report dates are cached.
#[derive(Args, Debug, Clone)]
pub struct StoreOptions {
    /// Directory holding regions.csv and weekly_stats.csv (plain or .gz)
    #[arg(long, global = true, default_value = "fixtures")]
    pub fixtures: PathBuf,

    /// Base URL of a PostgREST-compatible endpoint; overrides --fixtures
    #[arg(long, global = true, env = "REB_STORE_URL")]
    pub store_url: Option<String>,

    /// API key sent with every request to --store-url
    #[arg(long, global = true, env = "REB_STORE_KEY", hide_env_values = true)]
    pub store_key: Option<String>,

    /// Report-date cache lifetime in seconds; 0 disables caching
    #[arg(long, global = true, env = "REB_CACHE_TTL_SECS", default_value_t = 300)]
    pub cache_ttl_secs: u64,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            fixtures: PathBuf::from("fixtures"),
            store_url: None,
            store_key: None,
            cache_ttl_secs: 300,
        }
    }
}

pub async fn run(options: StoreOptions, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Serve { addr } => {
            let dashboard =
                tokio::task::spawn_blocking(move || store::build_dashboard(&options, None)).await??;
            reb_web::serve(&addr, dashboard).await
        }
        other => {
            let output = tokio::task::spawn_blocking(move || report::execute(&options, other)).await??;
            print!("{}", output);
            Ok(())
        }
    }
}
