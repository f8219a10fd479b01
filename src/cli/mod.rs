pub mod compute;
pub mod config;
pub mod lookup;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(
    name = "gst-invoice",
    version,
    about = "Compute GST invoice lines, totals, HSN summary and print pages."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute an invoice from a JSON request file.
    Compute {
        /// Path to the request JSON (`-` reads stdin)
        file: String,
        /// Items per printed page (default: from settings)
        #[arg(long = "page-size")]
        page_size: Option<usize>,
        /// Print the computed document as JSON instead of tables
        #[arg(long)]
        json: bool,
    },
    /// Spell out an amount in words (lakh/crore).
    Words {
        /// Amount, e.g. 123456.50
        amount: f64,
    },
    /// Look up a state by name, GST state code or GSTIN.
    State {
        /// State name, two-digit code, or a full GSTIN
        query: String,
    },
    /// Show or change settings.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Print shell completions.
    Completions {
        /// Target shell
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the current settings.
    Show,
    /// Update settings.
    Set {
        /// Default items per printed page
        #[arg(long = "page-size")]
        page_size: Option<usize>,
        /// JSON file with the default seller (company) profile
        #[arg(long)]
        seller: Option<String>,
        /// Log level: error, warn, info, debug, trace
        #[arg(long = "log-level")]
        log_level: Option<String>,
    },
}
