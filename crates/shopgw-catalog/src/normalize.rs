//! Normalization from the common catalog shape to the client-facing
//! [`NormalizedProduct`] contract.

use shopgw_core::NormalizedProduct;

use crate::resolve::{resolve_image, resolve_variant};
use crate::types::{CatalogProduct, PriceField};

/// Collapses a raw product and a requested variant id into one
/// [`NormalizedProduct`].
///
/// Pure function of its inputs: no I/O and no failure mode. Any shape that
/// merely omits optional fields degrades to defaults (null price, empty
/// description, `Product {id}` name) so that per-item failure stays isolated
/// to the fetch step.
#[must_use]
pub fn normalize_product(
    product: CatalogProduct,
    requested_variant_id: &str,
    cdn_account_hash: &str,
) -> NormalizedProduct {
    let id = product.id.to_string();
    let variant = resolve_variant(&product, requested_variant_id);
    let image = resolve_image(&product, variant, cdn_account_hash);

    let variant_id = variant.map_or_else(
        || requested_variant_id.trim().to_owned(),
        |v| v.id.to_string(),
    );
    let price = variant
        .and_then(|v| v.price.as_ref())
        .and_then(PriceField::as_f64)
        .or_else(|| product.price.as_ref().and_then(PriceField::as_f64));
    let name = product
        .name
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map_or_else(|| format!("Product {id}"), ToOwned::to_owned);
    let description = product.description.clone().unwrap_or_default();

    NormalizedProduct {
        id,
        variant_id,
        name,
        price,
        description,
        image,
        raw: product.raw,
    }
}
