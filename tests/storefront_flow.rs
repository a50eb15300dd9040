//! Full customer journey over the storefront core: arrive with a filtered
//! URL, browse the shop, pick a variant on the product page, manage the
//! cart, and place an order.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use rust_decimal::Decimal;

use aurum_storefront::catalog::{self, Color, Description};
use aurum_storefront::checkout::{self, CheckoutForm};
use aurum_storefront::shop::{self, ShopFilterState};
use aurum_storefront::{
    CartStore, InMemoryStorage, Product, ShopQuery, SortOrder, VariantError, VariantState,
};

fn product(id: &str, slug: &str, category: &str, price: i64, is_new: bool) -> Product {
    Product {
        id: id.into(),
        slug: slug.into(),
        title: format!("Product {id}"),
        price: Decimal::from(price),
        old_price: None,
        category: category.into(),
        is_new,
        is_sale: false,
        sizes: vec!["S".into(), "M".into()],
        colors: vec![Color {
            name: "Black".into(),
            hex: "#000".into(),
        }],
        images: vec![format!("{slug}.jpg")],
        description: Description {
            short: "Short description".into(),
        },
    }
}

fn catalog() -> Vec<Product> {
    vec![
        product("1", "wool-coat", "outerwear", 4500, true),
        product("2", "silk-dress", "dresses", 3200, false),
        product("3", "linen-shirt", "shirts", 1800, true),
        product("4", "midi-dress", "dresses", 2600, true),
    ]
}

#[test]
fn browse_select_and_order() {
    let catalog = catalog();

    // Landing from a shared link seeds the filter state.
    let query = ShopQuery::parse("?category=dresses&tag=new");
    let mut state = ShopFilterState::from_query(&query);
    assert!(state.tag_new);

    // The customer unticks the tag and sorts by price.
    state.set_tags(false, false);
    state.set_sort(SortOrder::PriceAsc);

    let view = shop::apply(&catalog, &state);
    let slugs: Vec<_> = view.items.iter().map(|p| p.slug.as_str()).collect();
    assert_eq!(slugs, vec!["midi-dress", "silk-dress"]);
    assert!(!view.has_more);

    // Product page: size gating before the cart sees anything.
    let chosen = catalog::find_by_slug(&catalog, Some("midi-dress")).unwrap();
    let store = CartStore::new(InMemoryStorage::new());
    let renders = Arc::new(AtomicU32::new(0));
    {
        let renders = Arc::clone(&renders);
        store.subscribe(move || {
            renders.fetch_add(1, Ordering::SeqCst);
        });
    }

    let mut selection = VariantState::for_product(chosen);
    assert_eq!(
        selection.line_item(chosen),
        Err(VariantError::SizeNotSelected)
    );
    assert_eq!(store.count(), 0);

    selection.select_size("M");
    store.add(selection.line_item(chosen).unwrap()).unwrap();
    store.add(selection.line_item(chosen).unwrap()).unwrap();
    assert_eq!(store.items().len(), 1);
    assert_eq!(store.count(), 2);
    assert_eq!(renders.load(Ordering::SeqCst), 2);

    // Checkout: masked phone, validated form, cart cleared on success.
    let form = CheckoutForm {
        name: "Aigerim".into(),
        phone: checkout::mask_phone("996555123456"),
        address: "Bishkek, Kievskaya 95".into(),
        city: "Bishkek".into(),
        comment: String::new(),
    };
    assert_eq!(form.phone, "+996 555 123 456");
    assert!(checkout::submit_enabled(&form, store.count()));

    let confirmation = checkout::submit(&store, &form).unwrap();
    assert_eq!(confirmation.total, Decimal::from(5200));
    assert!(confirmation.order_id.starts_with("AU-"));
    assert!(store.items().is_empty());
    assert_eq!(renders.load(Ordering::SeqCst), 3);
    assert!(!checkout::submit_enabled(&form, store.count()));
}

#[test]
fn cart_survives_page_reload_through_storage() {
    let storage = InMemoryStorage::new();
    let catalog = catalog();
    let chosen = catalog::find_by_slug(&catalog, Some("wool-coat")).unwrap();

    {
        let store = CartStore::new(storage.clone());
        let mut selection = VariantState::for_product(chosen);
        selection.select_size("S");
        store.add(selection.line_item(chosen).unwrap()).unwrap();
    }

    // A fresh store over the same backend sees the persisted record.
    let reloaded = CartStore::new(storage);
    assert_eq!(reloaded.count(), 1);
    assert_eq!(reloaded.subtotal(), Decimal::from(4500));
    assert_eq!(reloaded.items()[0].image, "wool-coat.jpg");
}
