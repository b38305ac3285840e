use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use shopgw_catalog::LineItem;

use super::{map_catalog_error, ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct CreateCheckoutRequest {
    #[serde(default)]
    items: Vec<LineItem>,
    #[serde(default)]
    success_url: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CreateCheckoutResponse {
    checkout_id: String,
}

/// `POST /api/create-checkout` — proxy the cart to the payment provider and
/// hand the opaque session id back to the storefront.
pub(super) async fn create_checkout(
    State(state): State<AppState>,
    Json(body): Json<CreateCheckoutRequest>,
) -> Result<Json<CreateCheckoutResponse>, ApiError> {
    let checkout_id = state
        .checkout
        .create_checkout(&body.items, body.success_url.as_deref())
        .await
        .map_err(|e| map_catalog_error("failed to create checkout", &e))?;
    Ok(Json(CreateCheckoutResponse { checkout_id }))
}
