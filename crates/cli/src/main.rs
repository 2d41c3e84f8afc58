//! Cartkeeper CLI - Cart and theme management over a file-backed store.
//!
//! # Usage
//!
//! ```bash
//! # Add a product (repeat to increase the quantity)
//! ck-cli cart add --id tee --name "Pineapple Tee" --price 19.99 --image /img/tee.jpg
//!
//! # Show the cart
//! ck-cli cart show
//!
//! # Remove a product, empty the cart, or submit it as an order
//! ck-cli cart remove tee
//! ck-cli cart clear
//! ck-cli cart submit
//!
//! # Theme preference
//! ck-cli theme show --prefers-dark
//! ck-cli theme set dark
//! ck-cli theme toggle
//! ```
//!
//! # Commands
//!
//! - `cart` - Add, remove, clear, show and submit the cart
//! - `theme` - Show, set and toggle the light/dark preference

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use cartkeeper_core::Theme;
use cartkeeper_storefront::StorefrontConfig;

mod commands;

#[derive(Parser)]
#[command(name = "ck-cli")]
#[command(author, version, about = "Cartkeeper CLI tools")]
struct Cli {
    /// Storage file (overrides `CARTKEEPER_DATA_FILE`)
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage the theme preference
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Add one unit of a product
    Add {
        /// Product ID
        #[arg(long)]
        id: String,

        /// Product display name
        #[arg(long)]
        name: String,

        /// Unit price, e.g. 19.99
        #[arg(long)]
        price: String,

        /// Image URL
        #[arg(long)]
        image: Option<String>,
    },
    /// Remove a product from the cart
    Remove {
        /// Product ID
        id: String,
    },
    /// Empty the cart
    Clear,
    /// Show the cart contents and total
    Show,
    /// Submit the cart as an order and empty it
    Submit,
}

#[derive(Subcommand)]
enum ThemeAction {
    /// Show the active theme
    Show {
        /// Treat the environment as preferring dark mode
        #[arg(long)]
        prefers_dark: bool,
    },
    /// Save a theme preference (`dark` or `light`)
    Set {
        theme: Theme,
    },
    /// Switch between dark and light
    Toggle {
        /// Treat the environment as preferring dark mode
        #[arg(long)]
        prefers_dark: bool,
    },
}

fn main() {
    // Logs go to stderr so command output on stdout stays clean.
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "cartkeeper_storefront=info,ck_cli=info".into());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = StorefrontConfig::from_env()?;
    if let Some(data_file) = cli.data_file {
        config.data_file = data_file;
    }
    tracing::debug!(data_file = %config.data_file.display(), "Using storage file");

    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Add {
                id,
                name,
                price,
                image,
            } => commands::cart::add(&config, id, name, price, image)?,
            CartAction::Remove { id } => commands::cart::remove(&config, id)?,
            CartAction::Clear => commands::cart::clear(&config)?,
            CartAction::Show => commands::cart::show(&config),
            CartAction::Submit => commands::cart::submit(&config)?,
        },
        Commands::Theme { action } => match action {
            ThemeAction::Show { prefers_dark } => commands::theme::show(&config, prefers_dark),
            ThemeAction::Set { theme } => commands::theme::set(&config, theme)?,
            ThemeAction::Toggle { prefers_dark } => {
                commands::theme::toggle(&config, prefers_dark)?;
            }
        },
    }
    Ok(())
}
