//! Session summary command.

use autolot_core::AccountId;
use autolot_storefront::config::StorefrontConfig;

use super::{CommandError, open_session, output};

/// Print counts and totals for the identity.
///
/// # Errors
///
/// Never fails today; the signature matches the other commands.
pub fn show(config: &StorefrontConfig, account: Option<AccountId>) -> Result<(), CommandError> {
    let session = open_session(config, account);
    output::summary(&session, config.usd_cny_rate);
    Ok(())
}
