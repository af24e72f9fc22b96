//! Wishlist commands.

use autolot_core::AccountId;
use autolot_storefront::Listing;
use autolot_storefront::config::StorefrontConfig;

use super::{CommandError, ListingArgs, open_session, output, report};

/// Print the wishlist.
///
/// # Errors
///
/// Never fails today; the signature matches the other commands.
pub fn list(config: &StorefrontConfig, account: Option<AccountId>) -> Result<(), CommandError> {
    let session = open_session(config, account);
    output::wishlist(&session);
    Ok(())
}

/// Add a listing.
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
    report(&session.add_to_wishlist(&Listing::from(args))?);
    output::wishlist(&session);
    Ok(())
}

/// Remove a listing.
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
    report(&session.remove_from_wishlist(id)?);
    output::wishlist(&session);
    Ok(())
}

/// Toggle a listing's membership.
///
/// # Errors
///
/// Returns an error if the listing id is invalid.
pub fn toggle(
    config: &StorefrontConfig,
    account: Option<AccountId>,
    args: ListingArgs,
) -> Result<(), CommandError> {
    let mut session = open_session(config, account);
    report(&session.toggle_wishlist(&Listing::from(args))?);
    output::wishlist(&session);
    Ok(())
}
