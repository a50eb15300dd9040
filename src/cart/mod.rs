//! Cart store: the single source of truth for cart contents.
//!
//! State is one JSON array persisted under a single storage key. There is no
//! in-memory cache; every read re-parses the stored value, so the store is
//! stateless between calls aside from the storage itself. Every mutation
//! completes the persist-then-notify sequence before returning.

mod notify;
mod storage;

pub use notify::{ChangeBus, SubscriptionToken};
pub use storage::{InMemoryStorage, StorageError, StringStore};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Storage key holding the serialized cart record.
pub const CART_STORAGE_KEY: &str = "aurum_cart_v1";

/// One cart entry: a specific product+size+color combination and its
/// quantity. Title, price and image are copied at add-time and are not
/// live-linked to the catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub product_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::price")]
    pub price: Decimal,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub color: String,
    #[serde(default = "lenient::one", deserialize_with = "lenient::qty")]
    pub qty: u32,
}

impl CartLineItem {
    pub fn key(&self) -> LineKey {
        LineKey {
            product_id: self.product_id.clone(),
            size: self.size.clone(),
            color: self.color.clone(),
        }
    }

    fn matches(&self, key: &LineKey) -> bool {
        self.product_id == key.product_id && self.size == key.size && self.color == key.color
    }
}

/// Identity key deciding whether two cart operations refer to the same line.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LineKey {
    pub product_id: String,
    pub size: String,
    pub color: String,
}

/// Outcome of decoding the persisted cart record, kept distinct so callers
/// can tell an empty cart apart from one recovered from garbage.
#[derive(Debug)]
pub enum CartSnapshot {
    /// Nothing stored under the cart key yet.
    Missing,
    Items(Vec<CartLineItem>),
    /// Stored value was unreadable; fail-open readers see an empty cart.
    Corrupt(CartReadError),
}

#[derive(Debug, Error)]
pub enum CartReadError {
    #[error("stored cart is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("stored cart is not a list")]
    NotAList,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Persisted cart state plus its change broadcast.
///
/// The storage backend is injected; [`InMemoryStorage`] serves tests and
/// embedding, the host supplies a localStorage-backed implementation.
pub struct CartStore<S: StringStore> {
    storage: S,
    key: String,
    bus: ChangeBus,
}

impl<S: StringStore> CartStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, CART_STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            bus: ChangeBus::new(),
        }
    }

    /// Decode the stored record, keeping the failure reason.
    pub fn snapshot(&self) -> CartSnapshot {
        let raw = match self.storage.load(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return CartSnapshot::Missing,
            Err(e) => return CartSnapshot::Corrupt(CartReadError::Storage(e)),
        };
        let value: serde_json::Value = match serde_json::from_str(&raw) {
            Ok(v) => v,
            Err(e) => return CartSnapshot::Corrupt(CartReadError::Malformed(e)),
        };
        if !value.is_array() {
            return CartSnapshot::Corrupt(CartReadError::NotAList);
        }
        match serde_json::from_value(value) {
            Ok(items) => CartSnapshot::Items(items),
            Err(e) => CartSnapshot::Corrupt(CartReadError::Malformed(e)),
        }
    }

    /// Current cart contents, fail-open to empty on any decode error.
    pub fn items(&self) -> Vec<CartLineItem> {
        match self.snapshot() {
            CartSnapshot::Items(items) => items,
            CartSnapshot::Missing => Vec::new(),
            CartSnapshot::Corrupt(reason) => {
                warn!(%reason, "unreadable cart record, treating as empty");
                Vec::new()
            }
        }
    }

    /// Total quantity across all lines.
    pub fn count(&self) -> u32 {
        self.items().iter().map(|it| it.qty).sum()
    }

    /// Sum of `price * qty` across all lines.
    pub fn subtotal(&self) -> Decimal {
        self.items()
            .iter()
            .map(|it| it.price * Decimal::from(it.qty))
            .sum()
    }

    /// Merge `item` into the cart by identity key: an existing line gains
    /// its quantity, otherwise the item is appended. Insertion order of
    /// lines is preserved.
    pub fn add(&self, item: CartLineItem) -> Result<(), StorageError> {
        let key = item.key();
        let qty = item.qty.max(1);
        let mut items = self.items();
        match items.iter_mut().find(|existing| existing.matches(&key)) {
            Some(existing) => {
                existing.qty = existing.qty.saturating_add(qty);
                debug!(product_id = %key.product_id, qty = existing.qty, "merged cart line");
            }
            None => {
                debug!(product_id = %key.product_id, "appended cart line");
                items.push(CartLineItem { qty, ..item });
            }
        }
        self.persist(&items)
    }

    /// Set the quantity of the line matching `key`, clamped to at least 1.
    /// A missing line is a silent no-op.
    pub fn set_qty(&self, key: &LineKey, qty: i64) -> Result<(), StorageError> {
        let mut items = self.items();
        let Some(line) = items.iter_mut().find(|it| it.matches(key)) else {
            debug!(product_id = %key.product_id, "set_qty on absent line ignored");
            return Ok(());
        };
        line.qty = qty.clamp(1, i64::from(u32::MAX)) as u32;
        self.persist(&items)
    }

    /// Delete the line matching `key`. Persists and notifies even when
    /// nothing matched.
    pub fn remove(&self, key: &LineKey) -> Result<(), StorageError> {
        let mut items = self.items();
        items.retain(|it| !it.matches(key));
        self.persist(&items)
    }

    /// Drop every line.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.persist(&[])
    }

    pub fn subscribe(&self, handler: impl Fn() + Send + Sync + 'static) -> SubscriptionToken {
        self.bus.subscribe(handler)
    }

    pub fn unsubscribe(&self, token: SubscriptionToken) -> bool {
        self.bus.unsubscribe(token)
    }

    fn persist(&self, items: &[CartLineItem]) -> Result<(), StorageError> {
        let raw =
            serde_json::to_string(items).map_err(|e| StorageError::Backend(e.to_string()))?;
        self.storage.store(&self.key, &raw)?;
        self.bus.notify();
        Ok(())
    }
}

mod lenient {
    //! Tolerant decoding for numeric line-item fields: a bad price reads as
    //! zero, a bad quantity reads as one. Whole-record failures still fall
    //! through to the fail-open empty cart.

    use std::str::FromStr;

    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub(super) fn one() -> u32 {
        1
    }

    pub(super) fn price<'de, D>(de: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(de)? {
            Value::Number(n) => Decimal::from_str(&n.to_string()).unwrap_or_default(),
            Value::String(s) => Decimal::from_str(s.trim()).unwrap_or_default(),
            _ => Decimal::ZERO,
        })
    }

    pub(super) fn qty<'de, D>(de: D) -> Result<u32, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(de)? {
            Value::Number(n) => n
                .as_u64()
                .filter(|q| *q >= 1)
                .map(|q| q.min(u64::from(u32::MAX)) as u32)
                .unwrap_or(1),
            _ => 1,
        })
    }
}
