//! Variant and image resolution over the common catalog shape.

use shopgw_core::ResolvedImage;

use crate::types::{CatalogImage, CatalogProduct, CatalogVariant};

/// Root of the content-delivery network that serves images referenced by
/// content id instead of a literal URL.
const CDN_DELIVERY_BASE: &str = "https://imagedelivery.net";

/// Selects the variant a request is asking for.
///
/// First variant whose stringified id equals the stringified requested id
/// wins. When nothing matches and the list is non-empty, the first variant
/// is returned instead of an error: a stale or mistyped variant id degrades
/// to a sellable variant rather than failing the item. `None` only when the
/// product has no variants at all — callers then use product-level fields.
#[must_use]
pub fn resolve_variant<'a>(
    product: &'a CatalogProduct,
    requested_variant_id: &str,
) -> Option<&'a CatalogVariant> {
    let requested = requested_variant_id.trim();
    product
        .variants
        .iter()
        .find(|v| v.id.to_string() == requested)
        .or_else(|| product.variants.first())
}

/// Derives the display image through the ordered fallback chain:
/// variant image → product `image` → first of `images` → first of `media`.
///
/// The first candidate carrying a usable URL or content id wins. When the
/// winner has a content-delivery id, the display URL is synthesized as
/// `{CDN_DELIVERY_BASE}/{account_hash}/{content_id}/public` and any literal
/// URL on the object is ignored. No resolvable source yields `{url: None,
/// content_id: None}`, which is not an error condition.
#[must_use]
pub fn resolve_image(
    product: &CatalogProduct,
    variant: Option<&CatalogVariant>,
    cdn_account_hash: &str,
) -> ResolvedImage {
    let candidate = variant
        .and_then(|v| v.image.as_ref())
        .into_iter()
        .chain(product.image.as_ref())
        .chain(product.images.first())
        .chain(product.media.first())
        .find(|image| image.has_source());

    let Some(image) = candidate else {
        return ResolvedImage::default();
    };

    let content_id = trimmed(&image.content_id);
    let url = match &content_id {
        Some(id) => Some(format!("{CDN_DELIVERY_BASE}/{cdn_account_hash}/{id}/public")),
        None => trimmed(&image.url),
    };

    ResolvedImage { url, content_id }
}

/// Empty-or-whitespace strings become `None`; they must never surface in the
/// output contract.
fn trimmed(field: &Option<String>) -> Option<String> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
}
