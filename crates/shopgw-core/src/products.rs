use serde::{Deserialize, Serialize};

/// A product/variant record in the stable client-facing schema, independent
/// of which upstream catalog produced it.
///
/// Wire names are camelCase — this is the contract the storefront UI codes
/// against, so field renames here are breaking changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedProduct {
    /// Product identifier, stringified (upstreams disagree on number vs string).
    pub id: String,
    /// Resolved variant identifier, stringified. When the product has no
    /// variants this echoes the requested identifier so the field is always
    /// present.
    pub variant_id: String,
    /// Display name; never empty. Falls back to `Product {id}`.
    pub name: String,
    /// Variant price if present, else product price, else null.
    pub price: Option<f64>,
    /// Product description, defaulted to the empty string.
    pub description: String,
    pub image: ResolvedImage,
    /// Original upstream payload, retained for debugging and forward
    /// compatibility.
    pub raw: serde_json::Value,
}

/// Display image resolved through the fallback chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedImage {
    /// Null only when no source resolved anywhere in the chain; never the
    /// empty string.
    pub url: Option<String>,
    /// Content-delivery identifier, when the winning source carried one.
    pub content_id: Option<String>,
}

/// Per-item failure record emitted by batch aggregation in place of a
/// [`NormalizedProduct`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchItemError {
    pub id: String,
    pub variant_id: String,
    /// Always `true`; its presence is what tags the slot as a failure.
    pub error: bool,
    pub message: String,
}

impl BatchItemError {
    #[must_use]
    pub fn new(id: String, variant_id: String, message: String) -> Self {
        Self {
            id,
            variant_id,
            error: true,
            message,
        }
    }
}

/// One slot of a batch response: a normalized record or an isolated per-item
/// failure. Serializes untagged, so clients distinguish the two by the
/// presence of the `error` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BatchResultItem {
    Product(Box<NormalizedProduct>),
    Error(BatchItemError),
}

impl BatchResultItem {
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, BatchResultItem::Error(_))
    }

    /// Returns the normalized record when this slot succeeded.
    #[must_use]
    pub fn as_product(&self) -> Option<&NormalizedProduct> {
        match self {
            BatchResultItem::Product(product) => Some(product),
            BatchResultItem::Error(_) => None,
        }
    }
}
