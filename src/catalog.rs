//! Product catalog collaborator.
//!
//! The catalog is a static, read-only, ordered sequence of products supplied
//! by the host page at load time. Nothing in this crate mutates it.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound on the "similar products" strip of the product page.
pub const SIMILAR_LIMIT: usize = 4;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub price: Decimal,
    #[serde(default)]
    pub old_price: Option<Decimal>,
    pub category: String,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_sale: bool,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub colors: Vec<Color>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub description: Description,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub name: String,
    pub hex: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Description {
    #[serde(default)]
    pub short: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("catalog has no products")]
    Empty,
}

/// Resolve the product a page should show for `slug`.
///
/// Unknown or absent slugs fall back to the first catalog entry; only an
/// empty catalog is a terminal failure.
pub fn find_by_slug<'a>(
    catalog: &'a [Product],
    slug: Option<&str>,
) -> Result<&'a Product, CatalogError> {
    slug.and_then(|s| catalog.iter().find(|p| p.slug == s))
        .or_else(|| catalog.first())
        .ok_or(CatalogError::Empty)
}

/// Products sharing a category or a tag with `target`, excluding `target`
/// itself, capped at [`SIMILAR_LIMIT`]. Catalog order is preserved.
pub fn similar_products<'a>(catalog: &'a [Product], target: &Product) -> Vec<&'a Product> {
    catalog
        .iter()
        .filter(|p| {
            p.id != target.id
                && (p.category == target.category
                    || p.is_new == target.is_new
                    || p.is_sale == target.is_sale)
        })
        .take(SIMILAR_LIMIT)
        .collect()
}

/// Format a som amount for display, grouping thousands with spaces.
pub fn format_kgs(amount: Decimal) -> String {
    let whole = amount.round().to_i64().unwrap_or(0);
    let digits = whole.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }
    if whole < 0 {
        format!("-{grouped} сом")
    } else {
        format!("{grouped} сом")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, slug: &str, category: &str, is_new: bool, is_sale: bool) -> Product {
        Product {
            id: id.into(),
            slug: slug.into(),
            title: format!("Product {id}"),
            price: Decimal::from(1000),
            old_price: None,
            category: category.into(),
            is_new,
            is_sale,
            sizes: vec!["M".into()],
            colors: vec![],
            images: vec![],
            description: Description::default(),
        }
    }

    #[test]
    fn test_find_by_slug() {
        let catalog = vec![product("1", "coat", "outerwear", true, false),
                           product("2", "dress", "dresses", false, false)];
        assert_eq!(find_by_slug(&catalog, Some("dress")).unwrap().id, "2");
    }

    #[test]
    fn test_unknown_slug_falls_back_to_first() {
        let catalog = vec![product("1", "coat", "outerwear", true, false)];
        assert_eq!(find_by_slug(&catalog, Some("missing")).unwrap().id, "1");
        assert_eq!(find_by_slug(&catalog, None).unwrap().id, "1");
    }

    #[test]
    fn test_empty_catalog_is_terminal() {
        assert_eq!(find_by_slug(&[], Some("coat")), Err(CatalogError::Empty));
    }

    #[test]
    fn test_similar_excludes_target_and_caps() {
        let mut catalog = vec![product("0", "target", "dresses", true, false)];
        for i in 1..=6 {
            catalog.push(product(&i.to_string(), &format!("p{i}"), "dresses", false, false));
        }
        let target = catalog[0].clone();
        let similar = similar_products(&catalog, &target);
        assert_eq!(similar.len(), SIMILAR_LIMIT);
        assert!(similar.iter().all(|p| p.id != "0"));
    }

    #[test]
    fn test_format_kgs_groups_thousands() {
        assert_eq!(format_kgs(Decimal::from(1_250_500)), "1 250 500 сом");
        assert_eq!(format_kgs(Decimal::from(950)), "950 сом");
        assert_eq!(format_kgs(Decimal::ZERO), "0 сом");
    }
}
