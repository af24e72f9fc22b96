//! Identity observation and login/logout detection.
//!
//! The auth layer owns credentials; the session only sees whether a credential
//! is present and, once resolved, which account it belongs to. Identity changes
//! arrive out of band from cart edits, so [`TransitionDetector`] classifies
//! every observation against the identity it recorded last, never against a
//! stale copy.

use std::future::Future;

use secrecy::{ExposeSecret, SecretString};

use autolot_core::{AccountId, Identity};

/// Account profile resolved from a credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountProfile {
    pub id: AccountId,
    pub display_name: Option<String>,
}

impl AccountProfile {
    /// Create a profile with no display name.
    #[must_use]
    pub const fn new(id: AccountId) -> Self {
        Self {
            id,
            display_name: None,
        }
    }
}

/// Source of the current identity.
pub trait IdentityObserver {
    /// Whether an authentication credential is currently held.
    fn credential_present(&self) -> bool;

    /// Resolve the account owning the current credential, if any.
    fn resolve_account(&self) -> impl Future<Output = Option<AccountProfile>>;
}

/// An observer with a fixed credential and account.
///
/// Used by the CLI and tests where there is no live auth layer.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity {
    credential: Option<SecretString>,
    account: Option<AccountProfile>,
}

impl StaticIdentity {
    /// No credential; resolves to the guest.
    #[must_use]
    pub fn guest() -> Self {
        Self::default()
    }

    /// A credential that resolves to `account`.
    #[must_use]
    pub const fn signed_in(credential: SecretString, account: AccountProfile) -> Self {
        Self {
            credential: Some(credential),
            account: Some(account),
        }
    }

    /// A credential the auth layer no longer recognises.
    #[must_use]
    pub const fn unresolvable(credential: SecretString) -> Self {
        Self {
            credential: Some(credential),
            account: None,
        }
    }
}

impl IdentityObserver for StaticIdentity {
    fn credential_present(&self) -> bool {
        self.credential
            .as_ref()
            .is_some_and(|credential| !credential.expose_secret().is_empty())
    }

    async fn resolve_account(&self) -> Option<AccountProfile> {
        if self.credential_present() {
            self.account.clone()
        } else {
            None
        }
    }
}

/// Observed identity, which may still be resolving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityState {
    /// A credential exists but its account is not known yet.
    Resolving,
    /// The identity is determinate.
    Resolved(Identity),
}

impl From<Identity> for IdentityState {
    fn from(identity: Identity) -> Self {
        Self::Resolved(identity)
    }
}

/// Classification of an observed identity change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// A guest (or a not-yet-observed shopper) signed in after the session loaded.
    GuestToIdentified,
    /// An identified shopper signed out.
    IdentifiedToNone,
    /// Anything else, including the first observation and repeated values.
    NoOp,
}

/// Classifies identity observations into [`Transition`]s.
///
/// Each call finalizes the classification and then records the observed
/// identity as the previous one, so repeating an observation yields
/// [`Transition::NoOp`].
#[derive(Debug, Clone, Default)]
pub struct TransitionDetector {
    previous: Option<Identity>,
}

impl TransitionDetector {
    /// Create a detector that has observed nothing.
    #[must_use]
    pub const fn new() -> Self {
        Self { previous: None }
    }

    /// Identity recorded by the last observation.
    #[must_use]
    pub const fn previous(&self) -> Option<&Identity> {
        self.previous.as_ref()
    }

    /// Classify `current` and advance.
    ///
    /// A sign-in only counts when `is_loaded` is true, so hydrating a session
    /// that starts out signed in is not mistaken for a login.
    pub fn observe(&mut self, current: &Identity, is_loaded: bool) -> Transition {
        let transition = match (&self.previous, current) {
            (None | Some(Identity::Guest), Identity::Identified(_)) if is_loaded => {
                Transition::GuestToIdentified
            }
            (Some(Identity::Identified(_)), Identity::Guest) => Transition::IdentifiedToNone,
            _ => Transition::NoOp,
        };
        self.previous = Some(current.clone());
        transition
    }

    /// Forget the previous identity and treat the shopper as a guest.
    pub fn reset_to_guest(&mut self) {
        self.previous = Some(Identity::Guest);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn account(id: &str) -> Identity {
        Identity::Identified(AccountId::parse(id).unwrap())
    }

    #[test]
    fn test_login_after_load_is_detected_once() {
        let mut detector = TransitionDetector::new();
        assert_eq!(detector.observe(&Identity::Guest, false), Transition::NoOp);
        assert_eq!(
            detector.observe(&account("a1"), true),
            Transition::GuestToIdentified
        );
        for _ in 0..5 {
            assert_eq!(detector.observe(&account("a1"), true), Transition::NoOp);
        }
    }

    #[test]
    fn test_first_hydration_while_signed_in_is_not_a_login() {
        let mut detector = TransitionDetector::new();
        assert_eq!(detector.observe(&account("a1"), false), Transition::NoOp);
        assert_eq!(detector.previous(), Some(&account("a1")));
    }

    #[test]
    fn test_login_before_load_is_not_a_login() {
        let mut detector = TransitionDetector::new();
        detector.reset_to_guest();
        assert_eq!(detector.observe(&account("a1"), false), Transition::NoOp);
    }

    #[test]
    fn test_logout() {
        let mut detector = TransitionDetector::new();
        detector.observe(&account("a1"), false);
        assert_eq!(
            detector.observe(&Identity::Guest, true),
            Transition::IdentifiedToNone
        );
        assert_eq!(detector.observe(&Identity::Guest, true), Transition::NoOp);
    }

    #[test]
    fn test_account_switch_is_noop() {
        let mut detector = TransitionDetector::new();
        detector.observe(&account("a1"), false);
        assert_eq!(detector.observe(&account("a2"), true), Transition::NoOp);
    }

    #[test]
    fn test_login_logout_login() {
        let mut detector = TransitionDetector::new();
        detector.observe(&Identity::Guest, false);
        assert_eq!(
            detector.observe(&account("a1"), true),
            Transition::GuestToIdentified
        );
        assert_eq!(
            detector.observe(&Identity::Guest, true),
            Transition::IdentifiedToNone
        );
        assert_eq!(
            detector.observe(&account("a1"), true),
            Transition::GuestToIdentified
        );
    }

    #[tokio::test]
    async fn test_static_identity() {
        let profile = AccountProfile::new(AccountId::parse("a1").unwrap());

        let guest = StaticIdentity::guest();
        assert!(!guest.credential_present());
        assert_eq!(guest.resolve_account().await, None);

        let signed_in = StaticIdentity::signed_in(SecretString::from("token"), profile.clone());
        assert!(signed_in.credential_present());
        assert_eq!(signed_in.resolve_account().await, Some(profile.clone()));

        let blank = StaticIdentity::signed_in(SecretString::from(""), profile);
        assert!(!blank.credential_present());
        assert_eq!(blank.resolve_account().await, None);
    }
}
