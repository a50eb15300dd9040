//! Shop page filter/sort/paginate pipeline.
//!
//! A pure derivation: given the static catalog and the current filter state,
//! produce the visible subset. The catalog is never mutated; sorting works on
//! a copied list of references.

pub mod query;

use rust_decimal::Decimal;

use crate::catalog::Product;
use query::{ShopQuery, Tag};

/// Page-size increment for the "load more" control.
pub const PAGE_SIZE: usize = 8;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// New arrivals first; ties keep the catalog's own order.
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
}

/// Mutable filter state for the shop page. Initialized from the URL at page
/// load, mutated by control events, never persisted beyond the URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShopFilterState {
    pub category: String,
    pub tag_new: bool,
    pub tag_sale: bool,
    pub price_min: Option<Decimal>,
    pub price_max: Option<Decimal>,
    pub sort: SortOrder,
    pub limit: usize,
}

impl Default for ShopFilterState {
    fn default() -> Self {
        Self {
            category: String::new(),
            tag_new: false,
            tag_sale: false,
            price_min: None,
            price_max: None,
            sort: SortOrder::default(),
            limit: PAGE_SIZE,
        }
    }
}

impl ShopFilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from URL query parameters at page load.
    pub fn from_query(q: &ShopQuery) -> Self {
        let mut state = Self::default();
        if let Some(category) = &q.category {
            state.category = category.clone();
        }
        match q.tag {
            Some(Tag::New) => state.tag_new = true,
            Some(Tag::Sale) => state.tag_sale = true,
            None => {}
        }
        state
    }

    /// Shareable subset of this state. The URL can carry only one tag value,
    /// so when both tag filters are active `new` wins.
    pub fn to_query(&self) -> ShopQuery {
        ShopQuery {
            category: Some(self.category.clone()).filter(|c| !c.is_empty()),
            tag: if self.tag_new {
                Some(Tag::New)
            } else if self.tag_sale {
                Some(Tag::Sale)
            } else {
                None
            },
            slug: None,
        }
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = category.into();
        self.reset_page();
    }

    pub fn set_tags(&mut self, tag_new: bool, tag_sale: bool) {
        self.tag_new = tag_new;
        self.tag_sale = tag_sale;
        self.reset_page();
    }

    pub fn set_price_min(&mut self, min: Option<Decimal>) {
        self.price_min = min;
        self.reset_page();
    }

    pub fn set_price_max(&mut self, max: Option<Decimal>) {
        self.price_max = max;
        self.reset_page();
    }

    pub fn set_sort(&mut self, sort: SortOrder) {
        self.sort = sort;
        self.reset_page();
    }

    /// Back to the unfiltered first page.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Grow the visible window by one page. The only input that does not
    /// reset `limit`.
    pub fn load_more(&mut self) {
        self.limit += PAGE_SIZE;
    }

    fn reset_page(&mut self) {
        self.limit = PAGE_SIZE;
    }
}

/// Derived visible subset for one render.
#[derive(Debug)]
pub struct ShopView<'a> {
    pub items: Vec<&'a Product>,
    /// Count after filtering, before truncation.
    pub total: usize,
    pub has_more: bool,
}

/// Run the pipeline in fixed order: category, tags, inclusive price bounds,
/// sort, truncate to `state.limit`.
pub fn apply<'a>(catalog: &'a [Product], state: &ShopFilterState) -> ShopView<'a> {
    let mut list: Vec<&Product> = catalog.iter().collect();

    if !state.category.is_empty() {
        list.retain(|p| p.category == state.category);
    }
    if state.tag_new {
        list.retain(|p| p.is_new);
    }
    if state.tag_sale {
        list.retain(|p| p.is_sale);
    }
    if let Some(min) = state.price_min {
        list.retain(|p| p.price >= min);
    }
    if let Some(max) = state.price_max {
        list.retain(|p| p.price <= max);
    }

    match state.sort {
        SortOrder::PriceAsc => list.sort_by(|a, b| a.price.cmp(&b.price)),
        SortOrder::PriceDesc => list.sort_by(|a, b| b.price.cmp(&a.price)),
        SortOrder::Newest => list.sort_by_key(|p| !p.is_new),
    }

    let total = list.len();
    list.truncate(state.limit);
    ShopView {
        items: list,
        total,
        has_more: total > state.limit,
    }
}

/// Advisory placeholders for the price inputs: min/max over the full,
/// unfiltered catalog. Display hints only, never enforced bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PriceHints {
    pub min: Decimal,
    pub max: Decimal,
}

pub fn price_hints(catalog: &[Product]) -> Option<PriceHints> {
    let min = catalog.iter().map(|p| p.price).min()?;
    let max = catalog.iter().map(|p| p.price).max()?;
    Some(PriceHints { min, max })
}
