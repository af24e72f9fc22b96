//! The cart and wishlist session manager.
//!
//! [`CartSession`] owns the in-memory cart and wishlist for one shopper and is
//! the only thing that reads or writes their storage keys. Everything runs to
//! completion on the caller's thread: identity handling and mutators never
//! interleave.
//!
//! # Lifecycle
//!
//! 1. A new session is *not loaded*. Mutators still work in memory but nothing
//!    is written, so a premature empty collection can never overwrite stored
//!    data.
//! 2. The first resolved identity hydrates the collections for that identity
//!    and marks the session loaded.
//! 3. A guest signing in merges the guest collections into the account's
//!    (once), writes the result under the account keys and deletes the guest
//!    keys.
//! 4. Signing out clears the in-memory session. Account keys are kept for the
//!    next sign-in.
//!
//! # Example
//!
//! ```
//! use autolot_core::{AccountId, Identity};
//! use autolot_storefront::{CartSession, Listing, MemoryStore};
//! use rust_decimal::Decimal;
//!
//! let mut session = CartSession::new(MemoryStore::new());
//! session.observe_identity(Identity::Guest);
//! session.add_to_cart(&Listing::new("v1", Decimal::from(1000))).unwrap();
//!
//! let account = AccountId::parse("a1").unwrap();
//! session.observe_identity(Identity::Identified(account));
//! assert_eq!(session.cart_count(), 1);
//! ```

mod events;

pub use events::{SessionEvent, SubscriptionId};

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use autolot_core::{DisplayAmount, Identity, ListingId, to_display_currency};

use crate::error::{Result, SessionError};
use crate::identity::{IdentityObserver, IdentityState, Transition, TransitionDetector};
use crate::keys::{CollectionKind, key_for};
use crate::merge::{merge_cart, merge_wishlist, normalize_cart, normalize_wishlist};
use crate::models::{CartItem, Listing, WishlistItem};
use crate::persist;
use crate::storage::{KeyValueStore, StorageError};
use events::Listeners;

/// What happened to storage after a mutation.
#[derive(Debug)]
#[must_use]
pub enum Persistence {
    /// The collection was written under the current identity's key.
    Written,
    /// The mutation changed nothing, so nothing was written.
    Unchanged,
    /// The session is not loaded yet; the change lives in memory only.
    Deferred,
    /// The write failed. In-memory state is kept for this session.
    Failed(StorageError),
}

impl Persistence {
    /// Returns true if the collection reached storage.
    #[must_use]
    pub const fn is_written(&self) -> bool {
        matches!(self, Self::Written)
    }
}

/// Cart and wishlist state for one shopper.
#[derive(Debug)]
pub struct CartSession<S> {
    store: S,
    session_id: Uuid,
    identity: Option<Identity>,
    detector: TransitionDetector,
    is_loaded: bool,
    cart: Vec<CartItem>,
    wishlist: Vec<WishlistItem>,
    listeners: Listeners,
}

impl<S: KeyValueStore> CartSession<S> {
    /// Create an unloaded session over `store`.
    pub fn new(store: S) -> Self {
        Self {
            store,
            session_id: Uuid::new_v4(),
            identity: None,
            detector: TransitionDetector::new(),
            is_loaded: false,
            cart: Vec::new(),
            wishlist: Vec::new(),
            listeners: Listeners::default(),
        }
    }

    /// Id used to correlate this session's log lines.
    #[must_use]
    pub const fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// The backing store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Current identity, or `None` before the first resolved observation.
    #[must_use]
    pub const fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Whether collections have been hydrated from storage.
    ///
    /// Before this is true, empty collections mean "unknown", not "empty".
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.is_loaded
    }

    // =========================================================================
    // Identity
    // =========================================================================

    /// Resolve the identity from `observer` and apply it.
    #[instrument(skip(self, observer), fields(session_id = %self.session_id))]
    pub async fn sync_identity<O: IdentityObserver>(&mut self, observer: &O) -> Transition {
        if !observer.credential_present() {
            return self.observe_identity(Identity::Guest);
        }
        match observer.resolve_account().await {
            Some(profile) => self.observe_identity(Identity::Identified(profile.id)),
            None => {
                debug!("credential did not resolve to an account, continuing as guest");
                self.observe_identity(Identity::Guest)
            }
        }
    }

    /// Apply an observed identity.
    ///
    /// Resolving identities are ignored. Otherwise the change is classified
    /// and handled: a sign-in merges, a sign-out resets, and any other change
    /// of identity (or the first observation) hydrates from storage.
    pub fn observe_identity(&mut self, state: impl Into<IdentityState>) -> Transition {
        let IdentityState::Resolved(current) = state.into() else {
            debug!(session_id = %self.session_id, "identity still resolving");
            return Transition::NoOp;
        };

        let transition = self.detector.observe(&current, self.is_loaded);
        match transition {
            Transition::GuestToIdentified => self.merge_guest_into(&current),
            Transition::IdentifiedToNone => self.reset_for_guest(),
            Transition::NoOp => {
                if !self.is_loaded || self.identity.as_ref() != Some(&current) {
                    self.hydrate(&current);
                }
            }
        }

        self.identity = Some(current);
        self.is_loaded = true;
        transition
    }

    fn hydrate(&mut self, identity: &Identity) {
        self.cart = normalize_cart(self.load(CollectionKind::Cart, identity));
        self.wishlist = normalize_wishlist(self.load(CollectionKind::Wishlist, identity));
        info!(
            session_id = %self.session_id,
            identity = %identity,
            cart_items = self.cart.len(),
            wishlist_items = self.wishlist.len(),
            "hydrated session"
        );
        self.listeners.notify(&SessionEvent::Hydrated {
            identity: identity.clone(),
        });
    }

    fn merge_guest_into(&mut self, identity: &Identity) {
        // The loaded guest collections match guest storage unless a write
        // failed, in which case memory is the more complete copy.
        let guest_cart = std::mem::take(&mut self.cart);
        let guest_wishlist = std::mem::take(&mut self.wishlist);
        let account_cart = normalize_cart(self.load(CollectionKind::Cart, identity));
        let account_wishlist = normalize_wishlist(self.load(CollectionKind::Wishlist, identity));

        self.cart = merge_cart(&guest_cart, &account_cart);
        self.wishlist = merge_wishlist(&guest_wishlist, &account_wishlist);

        for kind in [CollectionKind::Cart, CollectionKind::Wishlist] {
            let key = key_for(kind, &Identity::Guest);
            // The guest copy is the only durable one until the merged result lands.
            if !self.write(kind, identity).is_written() {
                warn!(
                    session_id = %self.session_id,
                    key = %key,
                    "merged collection not persisted, keeping guest collection"
                );
                continue;
            }
            if let Err(error) = self.store.remove(key.as_str()) {
                warn!(
                    session_id = %self.session_id,
                    key = %key,
                    error = %error,
                    "failed to delete guest collection after merge"
                );
            }
        }

        info!(
            session_id = %self.session_id,
            identity = %identity,
            guest_cart_items = guest_cart.len(),
            guest_wishlist_items = guest_wishlist.len(),
            cart_items = self.cart.len(),
            wishlist_items = self.wishlist.len(),
            "merged guest session into account"
        );
        self.listeners.notify(&SessionEvent::Merged {
            identity: identity.clone(),
            cart_items: self.cart.len(),
            wishlist_items: self.wishlist.len(),
        });
    }

    fn reset_for_guest(&mut self) {
        self.cart.clear();
        self.wishlist.clear();
        self.detector.reset_to_guest();
        info!(session_id = %self.session_id, "signed out, session reset to guest");
        self.listeners.notify(&SessionEvent::LoggedOut);
    }

    // =========================================================================
    // Storage
    // =========================================================================

    fn load<T: DeserializeOwned>(&self, kind: CollectionKind, identity: &Identity) -> Vec<T> {
        let key = key_for(kind, identity);
        match self.store.get(key.as_str()) {
            Ok(Some(raw)) => persist::decode(&raw).unwrap_or_else(|error| {
                warn!(
                    session_id = %self.session_id,
                    key = %key,
                    error = %error,
                    "ignoring unreadable stored collection"
                );
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(error) => {
                warn!(
                    session_id = %self.session_id,
                    key = %key,
                    error = %error,
                    "failed to read stored collection"
                );
                Vec::new()
            }
        }
    }

    fn persist(&self, kind: CollectionKind) -> Persistence {
        match (&self.identity, self.is_loaded) {
            (Some(identity), true) => self.write(kind, identity),
            _ => {
                debug!(session_id = %self.session_id, collection = %kind, "session not loaded, write deferred");
                Persistence::Deferred
            }
        }
    }

    fn write(&self, kind: CollectionKind, identity: &Identity) -> Persistence {
        let key = key_for(kind, identity);
        let encoded = match kind {
            CollectionKind::Cart => persist::encode(&self.cart),
            CollectionKind::Wishlist => persist::encode(&self.wishlist),
        };
        let result = encoded
            .map_err(StorageError::from)
            .and_then(|raw| self.store.set(key.as_str(), &raw));

        match result {
            Ok(()) => {
                debug!(session_id = %self.session_id, key = %key, "persisted collection");
                Persistence::Written
            }
            Err(error) => {
                warn!(
                    session_id = %self.session_id,
                    key = %key,
                    error = %error,
                    "failed to persist collection, keeping in-memory state"
                );
                self.listeners.notify(&SessionEvent::PersistFailed {
                    key: key.to_string(),
                    error: error.to_string(),
                });
                Persistence::Failed(error)
            }
        }
    }

    fn cart_changed(&self) -> Persistence {
        self.listeners.notify(&SessionEvent::CartChanged);
        self.persist(CollectionKind::Cart)
    }

    fn wishlist_changed(&self) -> Persistence {
        self.listeners.notify(&SessionEvent::WishlistChanged);
        self.persist(CollectionKind::Wishlist)
    }

    // =========================================================================
    // Cart mutators
    // =========================================================================

    /// Add one unit of `listing`, or increment its existing line.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidListingId`] if the listing id is unusable.
    pub fn add_to_cart(&mut self, listing: &Listing) -> Result<Persistence> {
        let id = parse_listing_id(&listing.id)?;
        match self.cart.iter_mut().find(|item| item.id == id) {
            Some(item) => item.quantity = item.quantity.saturating_add(1),
            None => self.cart.push(CartItem::from_listing(id, listing, 1)),
        }
        Ok(self.cart_changed())
    }

    /// Remove the line for `id`. Absent ids are a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidListingId`] if `id` is unusable.
    pub fn remove_from_cart(&mut self, id: &str) -> Result<Persistence> {
        let id = parse_listing_id(id)?;
        let before = self.cart.len();
        self.cart.retain(|item| item.id != id);
        if self.cart.len() == before {
            return Ok(Persistence::Unchanged);
        }
        Ok(self.cart_changed())
    }

    /// Set the quantity of the line for `id` to exactly `quantity`.
    ///
    /// A quantity of zero or less removes the line.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidListingId`] if `id` is unusable.
    pub fn update_quantity(&mut self, id: &str, quantity: i64) -> Result<Persistence> {
        if quantity <= 0 {
            return self.remove_from_cart(id);
        }
        let id = parse_listing_id(id)?;
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        let Some(item) = self.cart.iter_mut().find(|item| item.id == id) else {
            return Ok(Persistence::Unchanged);
        };
        if item.quantity == quantity {
            return Ok(Persistence::Unchanged);
        }
        item.quantity = quantity;
        Ok(self.cart_changed())
    }

    /// Empty the cart. The wishlist is untouched.
    pub fn clear_cart(&mut self) -> Persistence {
        if self.cart.is_empty() {
            return Persistence::Unchanged;
        }
        self.cart.clear();
        self.cart_changed()
    }

    // =========================================================================
    // Wishlist mutators
    // =========================================================================

    /// Add `listing` to the wishlist if it is not already there.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidListingId`] if the listing id is unusable.
    pub fn add_to_wishlist(&mut self, listing: &Listing) -> Result<Persistence> {
        let id = parse_listing_id(&listing.id)?;
        if self.wishlist.iter().any(|item| item.id == id) {
            return Ok(Persistence::Unchanged);
        }
        self.wishlist.push(WishlistItem::from_listing(id, listing));
        Ok(self.wishlist_changed())
    }

    /// Remove `id` from the wishlist. Absent ids are a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidListingId`] if `id` is unusable.
    pub fn remove_from_wishlist(&mut self, id: &str) -> Result<Persistence> {
        let id = parse_listing_id(id)?;
        let before = self.wishlist.len();
        self.wishlist.retain(|item| item.id != id);
        if self.wishlist.len() == before {
            return Ok(Persistence::Unchanged);
        }
        Ok(self.wishlist_changed())
    }

    /// Remove `listing` from the wishlist if present, otherwise add it.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidListingId`] if the listing id is unusable.
    pub fn toggle_wishlist(&mut self, listing: &Listing) -> Result<Persistence> {
        if self.is_in_wishlist(&listing.id) {
            self.remove_from_wishlist(&listing.id)
        } else {
            self.add_to_wishlist(listing)
        }
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    /// Register `listener` for every [`SessionEvent`].
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&SessionEvent) + 'static,
    {
        self.listeners.add(Box::new(listener))
    }

    /// Remove a listener. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(id)
    }
}

// Read-only views and aggregates, always derived from the current collections.
impl<S> CartSession<S> {
    /// Cart lines in insertion order.
    #[must_use]
    pub fn cart_items(&self) -> &[CartItem] {
        &self.cart
    }

    /// Wishlist entries in insertion order.
    #[must_use]
    pub fn wishlist_items(&self) -> &[WishlistItem] {
        &self.wishlist
    }

    /// Total units across all cart lines.
    #[must_use]
    pub fn cart_count(&self) -> u64 {
        self.cart.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Sum of `price * quantity` in USD.
    #[must_use]
    pub fn cart_total(&self) -> Decimal {
        self.cart
            .iter()
            .fold(Decimal::ZERO, |total, item| total.saturating_add(item.line_total()))
    }

    /// Cart total in the display currency at `rate`.
    #[must_use]
    pub fn cart_total_display(&self, rate: Option<Decimal>) -> DisplayAmount {
        to_display_currency(Some(self.cart_total()), rate)
    }

    /// Number of wishlist entries.
    #[must_use]
    pub fn wishlist_count(&self) -> usize {
        self.wishlist.len()
    }

    /// Whether the cart has a line for `id`.
    #[must_use]
    pub fn is_in_cart(&self, id: &str) -> bool {
        self.get_item_quantity(id) > 0
    }

    /// Whether the wishlist contains `id`.
    #[must_use]
    pub fn is_in_wishlist(&self, id: &str) -> bool {
        ListingId::parse(id).is_ok_and(|id| self.wishlist.iter().any(|item| item.id == id))
    }

    /// Quantity of the cart line for `id`, or 0.
    #[must_use]
    pub fn get_item_quantity(&self, id: &str) -> u32 {
        ListingId::parse(id)
            .ok()
            .and_then(|id| self.cart.iter().find(|item| item.id == id))
            .map_or(0, |item| item.quantity)
    }
}

fn parse_listing_id(raw: &str) -> Result<ListingId> {
    ListingId::parse(raw).map_err(|source| {
        warn!(raw, error = %source, "rejecting item without a usable id");
        SessionError::InvalidListingId {
            raw: raw.to_string(),
            source,
        }
    })
}
