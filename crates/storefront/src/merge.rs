//! Guest/account merge at login.
//!
//! Both functions keep the account's items first, in their original order,
//! followed by guest-only items in guest order.
//!
//! - [`merge_cart`] sums quantities of lines present on both sides.
//! - [`merge_wishlist`] is a set union keyed by id.

use crate::models::{CartItem, WishlistItem};

/// Merge a guest cart into an account cart.
///
/// A guest line whose id already exists in the result adds its quantity to that
/// line (saturating at `u32::MAX`); otherwise it is appended unchanged.
#[must_use]
pub fn merge_cart(guest: &[CartItem], account: &[CartItem]) -> Vec<CartItem> {
    let mut merged = account.to_vec();
    for item in guest {
        match merged.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(item.quantity);
            }
            None => merged.push(item.clone()),
        }
    }
    merged
}

/// Merge a guest wishlist into an account wishlist, dropping duplicate ids.
#[must_use]
pub fn merge_wishlist(guest: &[WishlistItem], account: &[WishlistItem]) -> Vec<WishlistItem> {
    let mut merged = account.to_vec();
    for item in guest {
        if !merged.iter().any(|existing| existing.id == item.id) {
            merged.push(item.clone());
        }
    }
    merged
}

/// Restore cart invariants on data read from storage.
///
/// Drops zero-quantity lines and folds repeated ids into the first occurrence.
#[must_use]
pub fn normalize_cart(items: Vec<CartItem>) -> Vec<CartItem> {
    let items: Vec<CartItem> = items.into_iter().filter(|item| item.quantity > 0).collect();
    merge_cart(&items, &[])
}

/// Restore wishlist invariants on data read from storage.
#[must_use]
pub fn normalize_wishlist(items: Vec<WishlistItem>) -> Vec<WishlistItem> {
    merge_wishlist(&items, &[])
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashSet;

    use autolot_core::ListingId;
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    use super::*;
    use crate::models::Listing;

    fn line(id: &str, quantity: u32, price: i64) -> CartItem {
        let listing = Listing::new(id, Decimal::from(price));
        CartItem::from_listing(ListingId::parse(id).unwrap(), &listing, quantity)
    }

    fn wish(id: &str) -> WishlistItem {
        let listing = Listing::new(id, Decimal::from(100));
        WishlistItem::from_listing(ListingId::parse(id).unwrap(), &listing)
    }

    fn quantity_of(items: &[CartItem], id: &str) -> u32 {
        items
            .iter()
            .filter(|item| item.id.as_str() == id)
            .map(|item| item.quantity)
            .sum()
    }

    #[test]
    fn test_cart_merge_example() {
        let guest = vec![line("v1", 2, 1000)];
        let account = vec![line("v1", 1, 1000), line("v2", 1, 500)];

        let merged = merge_cart(&guest, &account);

        assert_eq!(merged, vec![line("v1", 3, 1000), line("v2", 1, 500)]);
    }

    #[test]
    fn test_cart_merge_appends_guest_only_items_in_guest_order() {
        let guest = vec![line("g2", 1, 10), line("a1", 4, 10), line("g1", 2, 10)];
        let account = vec![line("a1", 1, 10), line("a2", 1, 10)];

        let merged = merge_cart(&guest, &account);
        let ids: Vec<&str> = merged.iter().map(|item| item.id.as_str()).collect();

        assert_eq!(ids, vec!["a1", "a2", "g2", "g1"]);
        assert_eq!(quantity_of(&merged, "a1"), 5);
        assert_eq!(quantity_of(&merged, "g1"), 2);
    }

    #[test]
    fn test_cart_merge_sums_regardless_of_order() {
        let guest = vec![line("x", 2, 1), line("y", 3, 1), line("z", 1, 1)];
        let account = vec![line("z", 7, 1), line("x", 5, 1)];

        let mut guest_rev = guest.clone();
        guest_rev.reverse();
        let mut account_rev = account.clone();
        account_rev.reverse();

        for (g, a) in [(&guest, &account), (&guest_rev, &account_rev)] {
            let merged = merge_cart(g, a);
            assert_eq!(quantity_of(&merged, "x"), 7);
            assert_eq!(quantity_of(&merged, "y"), 3);
            assert_eq!(quantity_of(&merged, "z"), 8);
            assert_eq!(merged.len(), 3);
        }
    }

    #[test]
    fn test_cart_merge_keeps_account_price_snapshot() {
        let guest = vec![line("v1", 1, 900)];
        let account = vec![line("v1", 1, 1000)];
        let merged = merge_cart(&guest, &account);
        assert_eq!(merged[0].price, Decimal::from(1000));
    }

    #[test]
    fn test_cart_merge_saturates() {
        let merged = merge_cart(&[line("v1", u32::MAX, 1)], &[line("v1", 5, 1)]);
        assert_eq!(merged[0].quantity, u32::MAX);
    }

    #[test]
    fn test_cart_merge_with_empty_sides() {
        let items = vec![line("v1", 2, 1)];
        assert_eq!(merge_cart(&items, &[]), items);
        assert_eq!(merge_cart(&[], &items), items);
        assert!(merge_cart(&[], &[]).is_empty());
    }

    #[test]
    fn test_wishlist_merge_is_set_union() {
        let guest = vec![wish("v3"), wish("v1"), wish("v4")];
        let account = vec![wish("v1"), wish("v2")];

        let merged = merge_wishlist(&guest, &account);
        let ids: Vec<&str> = merged.iter().map(|item| item.id.as_str()).collect();

        assert_eq!(ids, vec!["v1", "v2", "v3", "v4"]);
        let unique: HashSet<&str> = ids.iter().copied().collect();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn test_normalize_cart_drops_zero_and_folds_duplicates() {
        let items = vec![line("v1", 1, 10), line("v2", 0, 10), line("v1", 2, 10)];
        let normalized = normalize_cart(items);
        assert_eq!(normalized, vec![line("v1", 3, 10)]);
    }

    #[test]
    fn test_normalize_wishlist_keeps_first() {
        let normalized = normalize_wishlist(vec![wish("v1"), wish("v2"), wish("v1")]);
        assert_eq!(normalized.len(), 2);
    }

    fn cart_strategy() -> impl Strategy<Value = Vec<CartItem>> {
        prop::collection::vec(("[a-f][0-9]?", 1u32..1000), 0..8).prop_map(|lines| {
            normalize_cart(
                lines
                    .iter()
                    .map(|(id, quantity)| line(id, *quantity, 10))
                    .collect(),
            )
        })
    }

    fn wishlist_strategy() -> impl Strategy<Value = Vec<WishlistItem>> {
        prop::collection::vec("[a-f][0-9]?", 0..8)
            .prop_map(|raw| normalize_wishlist(raw.iter().map(|id| wish(id)).collect()))
    }

    proptest! {
        #[test]
        fn prop_cart_merge_sums_each_id_once(guest in cart_strategy(), account in cart_strategy()) {
            let merged = merge_cart(&guest, &account);
            let all: HashSet<&str> = guest
                .iter()
                .chain(&account)
                .map(|item| item.id.as_str())
                .collect();

            prop_assert_eq!(merged.len(), all.len());
            for id in all {
                prop_assert_eq!(
                    quantity_of(&merged, id),
                    quantity_of(&guest, id) + quantity_of(&account, id)
                );
                prop_assert_eq!(merged.iter().filter(|item| item.id.as_str() == id).count(), 1);
            }
        }

        #[test]
        fn prop_cart_merge_quantities_ignore_input_order(
            guest in cart_strategy(),
            account in cart_strategy(),
        ) {
            let mut guest_rev = guest.clone();
            guest_rev.reverse();
            let mut account_rev = account.clone();
            account_rev.reverse();

            let forward = merge_cart(&guest, &account);
            let reversed = merge_cart(&guest_rev, &account_rev);

            prop_assert_eq!(forward.len(), reversed.len());
            for item in &forward {
                prop_assert_eq!(quantity_of(&reversed, item.id.as_str()), item.quantity);
            }
        }

        #[test]
        fn prop_cart_merge_keeps_account_order_first(
            guest in cart_strategy(),
            account in cart_strategy(),
        ) {
            let merged = merge_cart(&guest, &account);
            let merged_ids: Vec<&str> = merged.iter().map(|item| item.id.as_str()).collect();
            let account_ids: Vec<&str> = account.iter().map(|item| item.id.as_str()).collect();
            prop_assert_eq!(&merged_ids[..account.len()], account_ids.as_slice());
        }

        #[test]
        fn prop_wishlist_merge_is_union(guest in wishlist_strategy(), account in wishlist_strategy()) {
            let merged = merge_wishlist(&guest, &account);
            let merged_ids: Vec<&str> = merged.iter().map(|item| item.id.as_str()).collect();
            let unique: HashSet<&str> = merged_ids.iter().copied().collect();
            let expected: HashSet<&str> = guest
                .iter()
                .chain(&account)
                .map(|item| item.id.as_str())
                .collect();

            prop_assert_eq!(unique.len(), merged_ids.len());
            prop_assert_eq!(unique, expected);
        }
    }
}
