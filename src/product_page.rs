//! Product page state: variant selection, gallery cursor, swipe gestures.

use thiserror::Error;

use crate::cart::CartLineItem;
use crate::catalog::Product;

/// Horizontal displacement a drag must exceed to count as a swipe.
pub const SWIPE_THRESHOLD: f64 = 40.0;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VariantError {
    #[error("a size must be selected before adding to cart")]
    SizeNotSelected,
}

/// Transient per-page selection state, never persisted or shared across
/// pages. Size starts unselected; color defaults to the first catalog color.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantState {
    selected_size: Option<String>,
    selected_color: String,
}

impl VariantState {
    pub fn for_product(product: &Product) -> Self {
        Self {
            selected_size: None,
            selected_color: product
                .colors
                .first()
                .map(|c| c.name.clone())
                .unwrap_or_default(),
        }
    }

    pub fn select_size(&mut self, size: impl Into<String>) {
        self.selected_size = Some(size.into());
    }

    pub fn select_color(&mut self, color: impl Into<String>) {
        self.selected_color = color.into();
    }

    pub fn selected_size(&self) -> Option<&str> {
        self.selected_size.as_deref()
    }

    pub fn selected_color(&self) -> &str {
        &self.selected_color
    }

    /// Build the cart line for the current selection. Fails while no size is
    /// chosen, without touching the cart; color never blocks.
    pub fn line_item(&self, product: &Product) -> Result<CartLineItem, VariantError> {
        let size = self
            .selected_size
            .clone()
            .ok_or(VariantError::SizeNotSelected)?;
        Ok(CartLineItem {
            product_id: product.id.clone(),
            title: product.title.clone(),
            price: product.price,
            image: product.images.first().cloned().unwrap_or_default(),
            size,
            color: self.selected_color.clone(),
            qty: 1,
        })
    }
}

/// Cursor over the product's gallery images, wrapping modulo the image count
/// in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gallery {
    index: usize,
    len: usize,
}

impl Gallery {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn current(&self) -> usize {
        self.index
    }

    pub fn set(&mut self, index: isize) {
        if self.len == 0 {
            return;
        }
        self.index = index.rem_euclid(self.len as isize) as usize;
    }

    pub fn next(&mut self) {
        self.set(self.index as isize + 1);
    }

    pub fn prev(&mut self) {
        self.set(self.index as isize - 1);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeAction {
    Advance,
    Retreat,
}

/// Resolve a pointer gesture: the horizontal displacement must exceed
/// [`SWIPE_THRESHOLD`] and dominate the vertical one. Negative dx advances,
/// positive dx retreats; anything else is ignored.
pub fn resolve_swipe(dx: f64, dy: f64) -> Option<SwipeAction> {
    if dx.abs() <= SWIPE_THRESHOLD || dx.abs() <= dy.abs() {
        return None;
    }
    Some(if dx < 0.0 {
        SwipeAction::Advance
    } else {
        SwipeAction::Retreat
    })
}
