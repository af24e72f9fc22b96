//! Shopper identity.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::id::AccountId;

/// Who is shopping right now.
///
/// A shopper is either an anonymous [`Identity::Guest`] or an authenticated
/// account holder. Credentials never live here; the identity is only the
/// value observed from the auth layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "account", rename_all = "snake_case")]
pub enum Identity {
    /// Unauthenticated shopper sharing the browser-wide guest slot.
    #[default]
    Guest,
    /// Authenticated shopper scoped by account id.
    Identified(AccountId),
}

impl Identity {
    /// Returns the account id for an identified shopper.
    #[must_use]
    pub const fn account(&self) -> Option<&AccountId> {
        match self {
            Self::Guest => None,
            Self::Identified(account) => Some(account),
        }
    }

    /// Returns true for the guest identity.
    #[must_use]
    pub const fn is_guest(&self) -> bool {
        matches!(self, Self::Guest)
    }

    /// Returns true for an authenticated identity.
    #[must_use]
    pub const fn is_identified(&self) -> bool {
        matches!(self, Self::Identified(_))
    }
}

impl From<AccountId> for Identity {
    fn from(account: AccountId) -> Self {
        Self::Identified(account)
    }
}

impl From<Option<AccountId>> for Identity {
    fn from(account: Option<AccountId>) -> Self {
        account.map_or(Self::Guest, Self::Identified)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Guest => f.write_str("guest"),
            Self::Identified(account) => write!(f, "account:{account}"),
        }
    }
}
