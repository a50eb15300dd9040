//! Aurum Storefront Core
//!
//! Client-side domain logic for a small e-commerce storefront: a cart
//! persisted through an injected key-value storage backend, a pure
//! filter/sort/paginate pipeline over a read-only product catalog,
//! product-page variant and gallery state, and a checkout form validator
//! with national phone masking.
//!
//! ## Features
//! - Cart store with merge-by-variant-key semantics and change broadcast
//! - Shop filtering, sorting and "load more" pagination
//! - Shareable filter state in URL query parameters
//! - Size-gated variant selection and a wrapping image gallery
//! - Checkout validation, +996 phone mask, display-only order ids
//!
//! Rendering, toasts, routing and the static catalog data live in the host
//! page; everything here is synchronous and framework-free. All failure
//! paths degrade to an empty or default state, never a crash.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod debounce;
pub mod product_page;
pub mod shop;

pub use cart::{
    CartLineItem, CartReadError, CartSnapshot, CartStore, ChangeBus, InMemoryStorage, LineKey,
    StorageError, StringStore, SubscriptionToken, CART_STORAGE_KEY,
};
pub use catalog::{CatalogError, Color, Product};
pub use checkout::{CheckoutError, CheckoutForm, FieldErrors, OrderConfirmation};
pub use product_page::{Gallery, SwipeAction, VariantError, VariantState};
pub use shop::{query::ShopQuery, ShopFilterState, ShopView, SortOrder, PAGE_SIZE};
