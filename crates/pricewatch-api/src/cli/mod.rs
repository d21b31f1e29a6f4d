//! CLI command definitions for the `pricewatch` binary.
//!
//! Long-running front ends (`serve`, `bot`) and operator commands that call
//! the same product use cases as the REST API and the bot.

pub mod product;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use rust_decimal::Decimal;

use pricewatch_types::product::ProductId;

/// Track product prices over REST and Telegram.
#[derive(Parser)]
#[command(name = "pricewatch", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (defaults to ./pricewatch.toml when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Port to listen on (overrides configuration).
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (overrides configuration).
        #[arg(long)]
        host: Option<String>,
    },

    /// Run the Telegram bot (long polling).
    Bot,

    /// Create the database schema and exit.
    #[command(name = "init-db")]
    InitDb,

    /// Start monitoring a product URL for a user.
    Add {
        /// Owner id (session id or Telegram user id).
        #[arg(long)]
        user: String,

        /// Product page URL.
        url: String,
    },

    /// List a user's monitored products.
    #[command(alias = "ls")]
    List {
        #[arg(long)]
        user: String,
    },

    /// Stop monitoring a product and delete its price history.
    #[command(alias = "rm")]
    Remove {
        #[arg(long)]
        user: String,

        product_id: ProductId,
    },

    /// Show the recorded prices of a product.
    History {
        #[arg(long)]
        user: String,

        product_id: ProductId,
    },

    /// Record an observed price for a product.
    Record {
        product_id: ProductId,

        #[arg(long)]
        price: Decimal,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        rating: Option<Decimal>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
