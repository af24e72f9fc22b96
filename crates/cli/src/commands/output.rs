//! Terminal output for session state.

#![allow(clippy::print_stdout)]

use rust_decimal::Decimal;

use autolot_core::{DisplayAmount, Price, to_display_currency};
use autolot_storefront::{CartSession, DisplayAttributes, KeyValueStore};

fn label(attributes: &DisplayAttributes) -> String {
    let mut parts = Vec::new();
    if let Some(year) = attributes.year() {
        parts.push(year.to_string());
    }
    if let Some(title) = attributes.title() {
        parts.push(title.to_string());
    }
    if let Some(status) = attributes.status()
        && !status.is_purchasable()
    {
        parts.push(format!("({status})"));
    }
    parts.join(" ")
}

fn converted(amount: Decimal, rate: Option<Decimal>) -> DisplayAmount {
    to_display_currency(Some(amount), rate)
}

pub fn cart<S>(session: &CartSession<S>, rate: Option<Decimal>) {
    if session.cart_items().is_empty() {
        println!("Cart is empty.");
        return;
    }
    for item in session.cart_items() {
        println!(
            "{:<16} x{:<4} {:>12} {:>14}  {}",
            item.id,
            item.quantity,
            Price::usd(item.line_total()).to_string(),
            converted(item.line_total(), rate).to_string(),
            label(&item.attributes)
        );
    }
    println!(
        "{} item(s), total {} / {}",
        session.cart_count(),
        Price::usd(session.cart_total()),
        session.cart_total_display(rate)
    );
}

pub fn wishlist<S>(session: &CartSession<S>) {
    if session.wishlist_items().is_empty() {
        println!("Wishlist is empty.");
        return;
    }
    for item in session.wishlist_items() {
        println!(
            "{:<16} {:>12}  {}",
            item.id,
            Price::usd(item.price).to_string(),
            label(&item.attributes)
        );
    }
    println!("{} saved listing(s)", session.wishlist_count());
}

pub fn summary<S: KeyValueStore>(session: &CartSession<S>, rate: Option<Decimal>) {
    let identity = session
        .identity()
        .map_or_else(|| "unknown".to_string(), ToString::to_string);
    println!("Identity:  {identity}");
    println!("Cart:      {} item(s)", session.cart_count());
    println!("Total:     {}", Price::usd(session.cart_total()));
    println!("Display:   {}", session.cart_total_display(rate));
    println!("Wishlist:  {} listing(s)", session.wishlist_count());
}
