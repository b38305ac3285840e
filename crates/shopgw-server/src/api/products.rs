use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use shopgw_catalog::{aggregate, normalize_product, parse_pair_list};
use shopgw_core::{BatchResultItem, NormalizedProduct};

use super::{map_catalog_error, ApiError, AppState};

/// `GET /product/{product_id}/{variant_id}` — fetch and normalize one
/// product. With no batch to isolate within, a fetch failure surfaces
/// directly as a 5xx.
pub(super) async fn get_product(
    State(state): State<AppState>,
    Path((product_id, variant_id)): Path<(String, String)>,
) -> Result<Json<NormalizedProduct>, ApiError> {
    let product = state
        .catalog
        .fetch_product(&product_id)
        .await
        .map_err(|e| map_catalog_error("failed to fetch product", &e))?;
    Ok(Json(normalize_product(
        product,
        &variant_id,
        &state.cdn_account_hash,
    )))
}

#[derive(Debug, Deserialize)]
pub(super) struct ProductsQuery {
    list: Option<String>,
}

/// `GET /products?list=pid:vid,...` — ordered batch with per-item failure
/// isolation.
pub(super) async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductsQuery>,
) -> Result<Json<Vec<BatchResultItem>>, ApiError> {
    let pairs = parse_pair_list(query.list.as_deref().unwrap_or_default())
        .map_err(|e| map_catalog_error("invalid product list", &e))?;
    let items = aggregate(&state.catalog, &state.cdn_account_hash, &pairs)
        .await
        .map_err(|e| map_catalog_error("failed to aggregate products", &e))?;
    Ok(Json(items))
}
