//! Batch aggregation: fetch-and-normalize many `(product, variant)` pairs
//! with per-item failure isolation.

use futures::future;
use shopgw_core::{BatchItemError, BatchResultItem};

use crate::client::CatalogClient;
use crate::error::CatalogError;
use crate::normalize::normalize_product;

/// One requested `(productId, variantId)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductPair {
    pub product_id: String,
    pub variant_id: String,
}

/// Parses the `list` query parameter: comma-separated `productId:variantId`
/// entries, colon- and comma-trimmed.
///
/// Empty entries (trailing or doubled commas) are skipped. An entry without
/// a colon, or with nothing after it, yields an empty variant id — variant
/// resolution treats that as "give me the default". An empty product id is
/// rejected: there is nothing sensible to fetch.
///
/// # Errors
///
/// Returns [`CatalogError::InvalidInput`] when an entry has no product id or
/// the whole list parses to nothing — an empty batch signals a malformed
/// request, not "no products found".
pub fn parse_pair_list(list: &str) -> Result<Vec<ProductPair>, CatalogError> {
    let mut pairs = Vec::new();
    for entry in list.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        let (product_id, variant_id) = match entry.split_once(':') {
            Some((product, variant)) => (product.trim(), variant.trim()),
            None => (entry, ""),
        };
        if product_id.is_empty() {
            return Err(CatalogError::InvalidInput {
                reason: format!("list entry \"{entry}\" is missing a product id"),
            });
        }
        pairs.push(ProductPair {
            product_id: product_id.to_owned(),
            variant_id: variant_id.to_owned(),
        });
    }

    if pairs.is_empty() {
        return Err(CatalogError::InvalidInput {
            reason: "list query parameter is empty".to_owned(),
        });
    }
    Ok(pairs)
}

/// Fetches and normalizes every pair, independently and concurrently.
///
/// The result has exactly the same length and order as `pairs`:
/// `join_all` polls the per-pair futures concurrently but yields their
/// outputs in input order, never completion order. A failed fetch becomes a
/// per-item error record in its slot; it cannot abort or reorder the rest.
///
/// # Errors
///
/// Returns [`CatalogError::InvalidInput`] for an empty `pairs` slice before
/// any fetch is issued. Upstream failures never surface here — they are
/// folded into the per-item records.
pub async fn aggregate(
    client: &CatalogClient,
    cdn_account_hash: &str,
    pairs: &[ProductPair],
) -> Result<Vec<BatchResultItem>, CatalogError> {
    if pairs.is_empty() {
        return Err(CatalogError::InvalidInput {
            reason: "empty product batch".to_owned(),
        });
    }

    let items = pairs.iter().map(|pair| async move {
        match client.fetch_product(&pair.product_id).await {
            Ok(product) => BatchResultItem::Product(Box::new(normalize_product(
                product,
                &pair.variant_id,
                cdn_account_hash,
            ))),
            Err(error) => {
                tracing::warn!(
                    product_id = %pair.product_id,
                    error = %error,
                    "batch item fetch failed"
                );
                BatchResultItem::Error(BatchItemError::new(
                    pair.product_id.clone(),
                    pair.variant_id.clone(),
                    error.to_string(),
                ))
            }
        }
    });

    Ok(future::join_all(items).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_pairs_in_order() {
        let pairs = parse_pair_list("1:10,2:20").unwrap();
        assert_eq!(
            pairs,
            vec![
                ProductPair {
                    product_id: "1".to_owned(),
                    variant_id: "10".to_owned()
                },
                ProductPair {
                    product_id: "2".to_owned(),
                    variant_id: "20".to_owned()
                },
            ]
        );
    }

    #[test]
    fn trims_whitespace_around_commas_and_colons() {
        let pairs = parse_pair_list(" 1 : 10 , 2 : 20 ").unwrap();
        assert_eq!(pairs[0].product_id, "1");
        assert_eq!(pairs[0].variant_id, "10");
        assert_eq!(pairs[1].product_id, "2");
    }

    #[test]
    fn missing_variant_side_yields_empty_variant_id() {
        let pairs = parse_pair_list("1:10,2:").unwrap();
        assert_eq!(pairs[1].variant_id, "");
    }

    #[test]
    fn entry_without_colon_yields_empty_variant_id() {
        let pairs = parse_pair_list("7").unwrap();
        assert_eq!(pairs[0].product_id, "7");
        assert_eq!(pairs[0].variant_id, "");
    }

    #[test]
    fn trailing_and_doubled_commas_are_skipped() {
        let pairs = parse_pair_list("1:10,,2:20,").unwrap();
        assert_eq!(pairs.len(), 2);
    }

    #[test]
    fn empty_list_is_invalid_input() {
        let result = parse_pair_list("");
        assert!(
            matches!(result, Err(CatalogError::InvalidInput { .. })),
            "expected InvalidInput, got: {result:?}"
        );
    }

    #[test]
    fn commas_only_is_invalid_input() {
        assert!(matches!(
            parse_pair_list(",,,"),
            Err(CatalogError::InvalidInput { .. })
        ));
    }

    #[test]
    fn entry_with_empty_product_id_is_invalid_input() {
        let result = parse_pair_list(":10");
        assert!(
            matches!(result, Err(CatalogError::InvalidInput { .. })),
            "expected InvalidInput, got: {result:?}"
        );
    }
}
