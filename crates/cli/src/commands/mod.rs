//! CLI command implementations.
//!
//! Each invocation opens the file-backed store, observes the identity given on
//! the command line (hydrating that identity's collections), runs one
//! operation and prints the result.

pub mod auth;
pub mod cart;
mod output;
pub mod summary;
pub mod wishlist;

use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use autolot_core::{AccountId, Identity, ListingStatus};
use autolot_storefront::config::{ConfigError, StorefrontConfig};
use autolot_storefront::{
    CartSession, DisplayAttributes, FileStore, Listing, Persistence, SessionError,
};

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The session refused the input.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// `logout` was run without `--account`.
    #[error("logout needs --account <ACCOUNT>")]
    MissingAccount,
}

/// Listing details supplied on the command line.
#[derive(Args, Debug)]
pub struct ListingArgs {
    /// Listing id
    pub id: String,

    /// Unit price in USD
    #[arg(long)]
    pub price: Decimal,

    /// Listing title
    #[arg(long)]
    pub title: Option<String>,

    /// Image URL
    #[arg(long)]
    pub image: Option<String>,

    /// Model year
    #[arg(long)]
    pub year: Option<u16>,

    /// Fuel type
    #[arg(long)]
    pub fuel: Option<String>,

    /// Exterior color
    #[arg(long)]
    pub color: Option<String>,

    /// Seat count
    #[arg(long)]
    pub seats: Option<u8>,

    /// Availability status (available, reserved, sold, ...)
    #[arg(long)]
    pub status: Option<ListingStatus>,
}

impl From<ListingArgs> for Listing {
    fn from(args: ListingArgs) -> Self {
        let mut attributes = DisplayAttributes::new();
        let fields = [
            ("title", args.title.map(Value::from)),
            ("image", args.image.map(Value::from)),
            ("year", args.year.map(Value::from)),
            ("fuel", args.fuel.map(Value::from)),
            ("color", args.color.map(Value::from)),
            ("seats", args.seats.map(Value::from)),
            ("status", args.status.map(|status| Value::from(String::from(status)))),
        ];
        for (key, value) in fields {
            if let Some(value) = value {
                attributes = attributes.with(key, value);
            }
        }
        Self::new(args.id, args.price).with_attributes(attributes)
    }
}

/// Open the store and hydrate the session for `account` (guest if `None`).
fn open_session(config: &StorefrontConfig, account: Option<AccountId>) -> CartSession<FileStore> {
    let mut session = CartSession::new(FileStore::new(&config.store_path));
    session.observe_identity(Identity::from(account));
    session
}

/// Log what a mutation did to storage. A failed write is not fatal.
fn report(persistence: &Persistence) {
    match persistence {
        Persistence::Failed(error) => {
            warn!(error = %error, "store write failed, change applies to this run only");
        }
        Persistence::Unchanged => info!("nothing to change"),
        Persistence::Written | Persistence::Deferred => {}
    }
}
