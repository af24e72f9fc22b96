//! Identity-scoped keys in a shared file store.

#![allow(clippy::unwrap_used)]

use autolot_core::Identity;
use autolot_integration_tests::{TestStore, account, listing};
use autolot_storefront::keys::{CollectionKind, key_for};
use autolot_storefront::{FileStore, KeyValueStore, Listing, Persistence};

#[test]
fn test_accounts_do_not_see_each_other() {
    let store = TestStore::new();

    let mut a1 = store.open(account("a1"));
    a1.add_to_cart(&listing("v1", 100)).unwrap();
    a1.add_to_wishlist(&listing("v2", 10)).unwrap();

    let mut a2 = store.open(account("a2"));
    assert!(a2.cart_items().is_empty());
    assert!(a2.wishlist_items().is_empty());
    a2.add_to_cart(&listing("v3", 30)).unwrap();

    let guest = store.open(Identity::Guest);
    assert!(guest.cart_items().is_empty());

    let a1 = store.open(account("a1"));
    assert_eq!(a1.get_item_quantity("v1"), 1);
    assert_eq!(a1.get_item_quantity("v3"), 0);
}

#[test]
fn test_keys_written_to_file() {
    let store = TestStore::new();
    let mut session = store.open(account("a1"));
    session.add_to_cart(&listing("v1", 100)).unwrap();
    session.add_to_wishlist(&listing("v1", 100)).unwrap();

    let raw = std::fs::read_to_string(store.path()).unwrap();
    let entries: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&raw).unwrap();
    let mut keys: Vec<_> = entries.keys().cloned().collect();
    keys.sort();
    assert_eq!(keys, ["cart:a1", "wishlist:a1"]);
}

#[test]
fn test_account_switch_rehydrates() {
    let store = TestStore::new();
    let mut a1 = store.open(account("a1"));
    a1.add_to_cart(&listing("v1", 100)).unwrap();
    let mut a2 = store.open(account("a2"));
    a2.add_to_cart(&listing("v2", 100)).unwrap();

    let mut session = store.open(account("a1"));
    session.observe_identity(account("a2"));
    assert_eq!(session.get_item_quantity("v1"), 0);
    assert_eq!(session.get_item_quantity("v2"), 1);
}

#[test]
fn test_legacy_bare_array_is_read() {
    let store = TestStore::new();
    FileStore::new(store.path())
        .set(
            key_for(CollectionKind::Cart, &Identity::Guest).as_str(),
            r#"[{"id":"v1","quantity":2,"price":"10.50","title":"Civic"}]"#,
        )
        .unwrap();

    let session = store.open(Identity::Guest);
    assert_eq!(session.get_item_quantity("v1"), 2);
    assert_eq!(
        session.cart_items()[0].attributes.title(),
        Some("Civic")
    );
}

#[test]
fn test_corrupt_value_loads_empty_and_is_overwritten_on_change() {
    let store = TestStore::new();
    let backing = FileStore::new(store.path());
    let key = key_for(CollectionKind::Cart, &Identity::Guest);
    backing.set(key.as_str(), "not json").unwrap();

    let mut session = store.open(Identity::Guest);
    assert!(session.cart_items().is_empty());
    assert_eq!(backing.get(key.as_str()).unwrap().as_deref(), Some("not json"));

    let persistence = session.add_to_cart(&listing("v1", 100)).unwrap();
    assert!(matches!(persistence, Persistence::Written));
    assert_ne!(backing.get(key.as_str()).unwrap().as_deref(), Some("not json"));
}

#[test]
fn test_corrupt_store_file_keeps_memory_state() {
    let store = TestStore::new();
    std::fs::write(store.path(), "{ broken").unwrap();

    let mut session = store.open(Identity::Guest);
    let persistence = session.add_to_cart(&listing("v1", 100)).unwrap();
    assert!(matches!(persistence, Persistence::Failed(_)));
    assert_eq!(session.get_item_quantity("v1"), 1);
    assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "{ broken");
}

#[test]
fn test_mistyped_attributes_survive_hydration_and_writes() {
    let store = TestStore::new();
    FileStore::new(store.path())
        .set(
            key_for(CollectionKind::Cart, &Identity::Guest).as_str(),
            r#"[{"id":"v1","quantity":2,"price":1000,"year":"2019"},{"id":"v2","quantity":1,"price":500}]"#,
        )
        .unwrap();

    let mut session = store.open(Identity::Guest);
    assert_eq!(session.cart_count(), 3);
    session.add_to_cart(&listing("v3", 10)).unwrap();

    let reopened = store.open(Identity::Guest);
    assert_eq!(reopened.get_item_quantity("v1"), 2);
    assert_eq!(reopened.get_item_quantity("v2"), 1);
    assert_eq!(reopened.get_item_quantity("v3"), 1);
    assert_eq!(
        reopened.cart_items()[0].attributes.get("year"),
        Some(&serde_json::json!("2019"))
    );
}

#[test]
fn test_listing_with_own_quantity_field_reloads() {
    let store = TestStore::new();
    let stocked: Listing =
        serde_json::from_str(r#"{"id":"v1","price":"100","quantity":5}"#).unwrap();

    let mut session = store.open(Identity::Guest);
    session.add_to_cart(&stocked).unwrap();
    session.add_to_cart(&listing("v2", 50)).unwrap();

    let reopened = store.open(Identity::Guest);
    assert_eq!(reopened.cart_items().len(), 2);
    assert_eq!(reopened.get_item_quantity("v1"), 1);
}
