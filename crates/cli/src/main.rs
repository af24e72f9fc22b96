//! Autolot CLI - Drive the cart and wishlist session from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Shop as a guest
//! autolot cart add v1 --price 25000 --title "2019 Civic"
//! autolot wishlist toggle v2 --price 18000
//!
//! # Sign in: the guest cart and wishlist merge into the account
//! autolot login a1
//!
//! # Act as the account
//! autolot --account a1 cart set v1 3
//! autolot --account a1 summary
//!
//! # Sign out: account data stays stored, the guest starts empty
//! autolot --account a1 logout
//! ```
//!
//! # Commands
//!
//! - `cart` - List, add, remove, set quantity, clear
//! - `wishlist` - List, add, remove, toggle
//! - `login` / `logout` - Identity transitions
//! - `summary` - Counts and totals

#![cfg_attr(not(test), forbid(unsafe_code))]

use autolot_core::AccountId;
use autolot_storefront::config::{LogFormat, StorefrontConfig};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::ListingArgs;

#[derive(Parser)]
#[command(name = "autolot")]
#[command(author, version, about = "Autolot cart and wishlist tools")]
struct Cli {
    /// Act as this account (omit to act as the guest)
    #[arg(short, long, global = true)]
    account: Option<AccountId>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage the wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
    /// Sign in as an account, merging the guest cart and wishlist into it
    Login {
        /// Account to sign in as
        #[arg(value_name = "ACCOUNT")]
        target: AccountId,
    },
    /// Sign out of the account given with --account
    Logout,
    /// Show counts and totals
    Summary,
}

#[derive(Subcommand)]
enum CartAction {
    /// List cart lines
    List,
    /// Add one unit of a listing
    Add(ListingArgs),
    /// Remove a listing's line
    Remove {
        /// Listing id
        id: String,
    },
    /// Set a line's quantity (zero or less removes it)
    Set {
        /// Listing id
        id: String,
        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove every line
    Clear,
}

#[derive(Subcommand)]
enum WishlistAction {
    /// List wishlist entries
    List,
    /// Add a listing
    Add(ListingArgs),
    /// Remove a listing
    Remove {
        /// Listing id
        id: String,
    },
    /// Add the listing if absent, remove it if present
    Toggle(ListingArgs),
}

/// Info level for the library and this binary (whose target is `autolot`).
const DEFAULT_LOG_FILTER: &str = "autolot_storefront=info,autolot=info";

fn init_tracing(format: LogFormat) {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

fn main() {
    let config = StorefrontConfig::from_env();
    init_tracing(
        config
            .as_ref()
            .map_or(LogFormat::default(), |config| config.log_format),
    );

    let cli = Cli::parse();

    let result = config
        .map_err(commands::CommandError::from)
        .and_then(|config| run(cli, &config));

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli, config: &StorefrontConfig) -> Result<(), commands::CommandError> {
    let account = cli.account;
    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::List => commands::cart::list(config, account),
            CartAction::Add(listing) => commands::cart::add(config, account, listing),
            CartAction::Remove { id } => commands::cart::remove(config, account, &id),
            CartAction::Set { id, quantity } => {
                commands::cart::set_quantity(config, account, &id, quantity)
            }
            CartAction::Clear => commands::cart::clear(config, account),
        },
        Commands::Wishlist { action } => match action {
            WishlistAction::List => commands::wishlist::list(config, account),
            WishlistAction::Add(listing) => commands::wishlist::add(config, account, listing),
            WishlistAction::Remove { id } => commands::wishlist::remove(config, account, &id),
            WishlistAction::Toggle(listing) => {
                commands::wishlist::toggle(config, account, listing)
            }
        },
        Commands::Login { target } => commands::auth::login(config, target),
        Commands::Logout => {
            let account = account.ok_or(commands::CommandError::MissingAccount)?;
            commands::auth::logout(config, account)
        }
        Commands::Summary => commands::summary::show(config, account),
    }
}
