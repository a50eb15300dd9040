//! URL query state for shareable, bookmarkable filtered views.

use url::form_urlencoded;

/// Tag filter as representable in the URL: a single value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tag {
    New,
    Sale,
}

impl Tag {
    pub fn as_str(self) -> &'static str {
        match self {
            Tag::New => "new",
            Tag::Sale => "sale",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "new" => Some(Tag::New),
            "sale" => Some(Tag::Sale),
            _ => None,
        }
    }
}

/// Subset of page state carried in the URL query string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShopQuery {
    pub category: Option<String>,
    pub tag: Option<Tag>,
    pub slug: Option<String>,
}

impl ShopQuery {
    /// Parse a raw query string; a leading `?` is tolerated. Unknown keys
    /// and empty values are ignored.
    pub fn parse(raw: &str) -> Self {
        let mut out = Self::default();
        for (k, v) in form_urlencoded::parse(raw.trim_start_matches('?').as_bytes()) {
            if v.is_empty() {
                continue;
            }
            match k.as_ref() {
                "category" => out.category = Some(v.into_owned()),
                "tag" => out.tag = Tag::parse(&v),
                "slug" => out.slug = Some(v.into_owned()),
                _ => {}
            }
        }
        out
    }

    /// Encode back to a query string, skipping absent values.
    pub fn encode(&self) -> String {
        let mut ser = form_urlencoded::Serializer::new(String::new());
        if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
            ser.append_pair("category", category);
        }
        if let Some(tag) = self.tag {
            ser.append_pair("tag", tag.as_str());
        }
        if let Some(slug) = self.slug.as_deref().filter(|s| !s.is_empty()) {
            ser.append_pair("slug", slug);
        }
        ser.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_keys() {
        let q = ShopQuery::parse("?category=dresses&tag=sale&slug=silk-dress");
        assert_eq!(q.category.as_deref(), Some("dresses"));
        assert_eq!(q.tag, Some(Tag::Sale));
        assert_eq!(q.slug.as_deref(), Some("silk-dress"));
    }

    #[test]
    fn test_parse_ignores_unknown_and_empty() {
        let q = ShopQuery::parse("category=&tag=featured&utm_source=mail");
        assert_eq!(q, ShopQuery::default());
    }

    #[test]
    fn test_encode_skips_absent_values() {
        let q = ShopQuery {
            category: Some("outerwear".into()),
            tag: None,
            slug: None,
        };
        assert_eq!(q.encode(), "category=outerwear");
        assert_eq!(ShopQuery::default().encode(), "");
    }

    #[test]
    fn test_round_trip() {
        let q = ShopQuery {
            category: Some("new in".into()),
            tag: Some(Tag::New),
            slug: None,
        };
        assert_eq!(ShopQuery::parse(&q.encode()), q);
    }
}
