//! Sign-in and sign-out commands.
//!
//! A CLI run has no live auth layer, so these replay the identity sequence a
//! browser session would observe: the previous identity first, then the new
//! one. The second observation is what triggers the merge or the reset.

use tracing::info;

use autolot_core::{AccountId, Identity};
use autolot_storefront::config::StorefrontConfig;
use autolot_storefront::{CartSession, FileStore};

use super::{CommandError, output};

/// Sign in as `account`, merging the guest cart and wishlist into it.
///
/// # Errors
///
/// Never fails today; the signature matches the other commands.
pub fn login(config: &StorefrontConfig, account: AccountId) -> Result<(), CommandError> {
    let mut session = CartSession::new(FileStore::new(&config.store_path));
    session.observe_identity(Identity::Guest);
    let guest_items = session.cart_count();

    let transition = session.observe_identity(Identity::Identified(account.clone()));
    info!(
        account = %account,
        ?transition,
        guest_items,
        cart_items = session.cart_count(),
        "signed in"
    );
    output::summary(&session, config.usd_cny_rate);
    Ok(())
}

/// Sign `account` out. Its stored cart and wishlist are kept.
///
/// # Errors
///
/// Never fails today; the signature matches the other commands.
pub fn logout(config: &StorefrontConfig, account: AccountId) -> Result<(), CommandError> {
    let mut session = CartSession::new(FileStore::new(&config.store_path));
    session.observe_identity(Identity::Identified(account.clone()));

    let transition = session.observe_identity(Identity::Guest);
    info!(account = %account, ?transition, "signed out");
    output::summary(&session, config.usd_cny_rate);
    Ok(())
}
