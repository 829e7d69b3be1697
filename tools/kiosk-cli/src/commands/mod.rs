//! CLI command implementations.

pub mod browse;
pub mod config;
pub mod quote;

use clap::{Args, Subcommand};
use kiosk_storefront::DEFAULT_VIEWPORT_WIDTH;

/// Arguments for the browse command.
#[derive(Args)]
pub struct BrowseArgs {
    /// Catalog fixture (JSON array of products).
    #[arg(short, long, default_value = "catalog.json")]
    pub fixture: String,

    /// Check a category box. Repeatable.
    #[arg(long = "category")]
    pub categories: Vec<String>,

    /// Search text.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Page to show (1-based).
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Viewport width in pixels, for the page-size tier.
    #[arg(short, long, default_value_t = DEFAULT_VIEWPORT_WIDTH)]
    pub width: u32,
}

/// Arguments for the quote command.
#[derive(Args)]
pub struct QuoteArgs {
    /// Catalog fixture (JSON array of products).
    #[arg(short, long, default_value = "catalog.json")]
    pub fixture: String,

    /// Items as `PRODUCT_ID[:QUANTITY]`. Repeated ids merge into one line.
    #[arg(required = true)]
    pub items: Vec<String>,

    /// Price lines as unit price times quantity.
    #[arg(long)]
    pub unit_snapshot: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Get a config value.
    Get {
        /// Config key (dot-separated).
        key: String,
    },
    /// Set a config value.
    Set {
        /// Config key (dot-separated).
        key: String,
        /// Value to set.
        value: String,
    },
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
        /// Write JSON instead of TOML.
        #[arg(long = "as-json")]
        as_json: bool,
    },
    /// Validate the config file.
    Validate,
}
