//! Change notifications for session consumers.

use autolot_core::Identity;

/// Handle returned by [`CartSession::subscribe`](super::CartSession::subscribe).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(super) u64);

/// Something consumers may need to re-render for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Collections were loaded from storage for `identity`.
    Hydrated { identity: Identity },
    /// Guest collections were merged into the account's at login.
    Merged {
        identity: Identity,
        cart_items: usize,
        wishlist_items: usize,
    },
    /// The shopper signed out and the in-memory session was reset.
    LoggedOut,
    CartChanged,
    WishlistChanged,
    /// A write to `key` failed; in-memory state is still current.
    PersistFailed { key: String, error: String },
}

pub(super) type Listener = Box<dyn Fn(&SessionEvent)>;

/// Registered listeners, notified in subscription order.
#[derive(Default)]
pub(super) struct Listeners {
    next_id: u64,
    entries: Vec<(SubscriptionId, Listener)>,
}

impl Listeners {
    pub(super) fn add(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    pub(super) fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(existing, _)| *existing != id);
        self.entries.len() != before
    }

    pub(super) fn notify(&self, event: &SessionEvent) {
        for (_, listener) in &self.entries {
            listener(event);
        }
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}
