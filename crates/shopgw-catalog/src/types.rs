//! Common raw catalog shape shared by every upstream dialect.
//!
//! ## Observed upstream differences
//!
//! ### Identifiers
//! SellAuth returns numeric product/variant ids; Lemon Squeezy returns them
//! as JSON strings. [`SourceId`] models both, and every identity comparison
//! in the pipeline happens on the stringified form so `10` and `"10"` are
//! the same id.
//!
//! ### Prices
//! Either a JSON number (`12.5`) or a decimal string (`"12.50"`), depending
//! on the upstream. [`PriceField::as_f64`] parses both; an unparseable
//! string degrades to "no price" rather than failing normalization.
//!
//! ### Images
//! The image gallery key varies per upstream: a singular `image` object, an
//! `images` list, or a `media` list. The common shape carries all three and
//! the resolver walks them in a fixed order. Image objects name their URL
//! `url`, `src`, or `image_url`, and may carry a content-delivery id under
//! either `cf_image_id` or `cloudflare_image_id`; serde aliases fold all of
//! these into one struct.
//!
//! ### Variant display labels
//! SellAuth variants carry a `size` field, other catalogs a `name` field,
//! and some both. Both are kept; the export report prefers `size`.

use std::fmt;

use serde::Deserialize;

/// An upstream identifier that may arrive as a JSON number or string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SourceId {
    Number(i64),
    Text(String),
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceId::Number(n) => write!(f, "{n}"),
            SourceId::Text(s) => f.write_str(s),
        }
    }
}

/// A price that may arrive as a JSON number or a decimal string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PriceField {
    Number(f64),
    Text(String),
}

impl PriceField {
    /// Numeric value, if the field parses as one.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PriceField::Number(n) => Some(*n),
            PriceField::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// An image reference from any upstream dialect.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogImage {
    #[serde(default, alias = "src", alias = "image_url")]
    pub url: Option<String>,
    /// Content-delivery identifier under either of the two keys upstreams
    /// use for it.
    #[serde(default, alias = "cf_image_id", alias = "cloudflare_image_id")]
    pub content_id: Option<String>,
}

impl CatalogImage {
    /// `true` when the object carries a usable URL or content id.
    /// Empty strings count as absent.
    #[must_use]
    pub fn has_source(&self) -> bool {
        let non_empty = |s: &Option<String>| s.as_deref().is_some_and(|v| !v.trim().is_empty());
        non_empty(&self.url) || non_empty(&self.content_id)
    }
}

/// A product in the common raw shape, after provider-specific decoding but
/// before normalization.
#[derive(Debug, Clone)]
pub struct CatalogProduct {
    pub id: SourceId,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<PriceField>,
    pub image: Option<CatalogImage>,
    pub images: Vec<CatalogImage>,
    pub media: Vec<CatalogImage>,
    pub variants: Vec<CatalogVariant>,
    /// The upstream payload exactly as received.
    pub raw: serde_json::Value,
}

/// A purchasable variant in the common raw shape.
#[derive(Debug, Clone)]
pub struct CatalogVariant {
    pub id: SourceId,
    pub name: Option<String>,
    pub size: Option<String>,
    pub price: Option<PriceField>,
    pub image: Option<CatalogImage>,
}
