use crate::core::directory::SortKey;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "gtm-directory")]
#[command(about = "Browse GTM partners and submit lead-capture forms")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, env = "SUPABASE_URL", global = true)]
    pub backend_url: Option<String>,

    #[arg(long, env = "SUPABASE_ANON_KEY", hide_env_values = true, global = true)]
    pub anon_key: Option<String>,

    /// Partners per directory page
    #[arg(long, global = true)]
    pub page_size: Option<usize>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List one page of the partner directory
    Partners {
        /// Market tag to filter by; repeat or comma-separate for several
        #[arg(short, long = "market", value_delimiter = ',')]
        markets: Vec<String>,

        #[arg(short, long, value_enum)]
        sort: Option<SortKey>,

        #[arg(short, long, default_value_t = 1)]
        page: usize,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Only partners charging at least this hourly rate
        #[arg(long)]
        min_rate: Option<f64>,

        /// Only partners charging at most this hourly rate
        #[arg(long)]
        max_rate: Option<f64>,
    },

    /// Show the region catalog, or the result of toggling regions in order
    Regions {
        #[arg(long = "toggle", value_delimiter = ',')]
        toggles: Vec<String>,
    },

    /// Request an introduction to a partner
    Contact {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        company: String,
        #[arg(long)]
        email: String,
        /// Region identifiers, toggled in order
        #[arg(long = "region", value_delimiter = ',', required = true)]
        regions: Vec<String>,
        #[arg(long)]
        partner_id: Option<String>,
        #[arg(long)]
        partner_name: Option<String>,
    },

    /// Apply to be listed as a partner
    Apply {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        linkedin: String,
        /// Region identifiers covered, toggled in order
        #[arg(long = "country", value_delimiter = ',', required = true)]
        countries: Vec<String>,
        #[arg(long)]
        experience: Option<String>,
        #[arg(long)]
        industry: Option<String>,
    },

    /// Record a hire for a partner
    Hire {
        partner_id: String,
    },
}
