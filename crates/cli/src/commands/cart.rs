//! Cart commands.

use tracing::info;

use autolot_core::AccountId;
use autolot_storefront::Listing;
use autolot_storefront::config::StorefrontConfig;

use super::{CommandError, ListingArgs, open_session, output, report};

/// Print the cart.
///
/// # Errors
///
/// Never fails today; the signature matches the other commands.
pub fn list(config: &StorefrontConfig, account: Option<AccountId>) -> Result<(), CommandError> {
    let session = open_session(config, account);
    output::cart(&session, config.usd_cny_rate);
    Ok(())
}

/// Add one unit of a listing.
///
/// # Errors
///
/// Returns an error if the listing id is invalid.
pub fn add(
    config: &StorefrontConfig,
    account: Option<AccountId>,
    args: ListingArgs,
) -> Result<(), CommandError> {
    let mut session = open_session(config, account);
    let listing = Listing::from(args);
    report(&session.add_to_cart(&listing)?);
    info!(
        id = %listing.id,
        quantity = session.get_item_quantity(&listing.id),
        "added to cart"
    );
    output::cart(&session, config.usd_cny_rate);
    Ok(())
}

/// Remove a listing's line.
///
/// # Errors
///
/// Returns an error if the listing id is invalid.
pub fn remove(
    config: &StorefrontConfig,
    account: Option<AccountId>,
    id: &str,
) -> Result<(), CommandError> {
    let mut session = open_session(config, account);
    report(&session.remove_from_cart(id)?);
    output::cart(&session, config.usd_cny_rate);
    Ok(())
}

/// Set a line's quantity.
///
/// # Errors
///
/// Returns an error if the listing id is invalid.
pub fn set_quantity(
    config: &StorefrontConfig,
    account: Option<AccountId>,
    id: &str,
    quantity: i64,
) -> Result<(), CommandError> {
    let mut session = open_session(config, account);
    report(&session.update_quantity(id, quantity)?);
    output::cart(&session, config.usd_cny_rate);
    Ok(())
}

/// Empty the cart.
///
/// # Errors
///
/// Never fails today; the signature matches the other commands.
pub fn clear(config: &StorefrontConfig, account: Option<AccountId>) -> Result<(), CommandError> {
    let mut session = open_session(config, account);
    report(&session.clear_cart());
    output::cart(&session, config.usd_cny_rate);
    Ok(())
}
