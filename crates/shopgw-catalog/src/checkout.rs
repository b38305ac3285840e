//! Checkout-session creation against the payment provider.
//!
//! This is the write path of the gateway: the storefront posts the cart's
//! `(variant, quantity)` tuples and gets back an opaque checkout session id
//! to redirect the shopper to. No catalog data is involved.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;

use crate::client::classify_transport;
use crate::error::CatalogError;
use crate::types::SourceId;

/// One cart line as sent by the storefront UI.
#[derive(Debug, Clone, Deserialize)]
pub struct LineItem {
    /// Variant identifier; storefronts send numbers or strings.
    pub variant: SourceId,
    pub quantity: u32,
}

/// HTTP client for the payment provider's `/checkouts` endpoint.
pub struct CheckoutClient {
    client: Client,
    base_url: String,
    api_key: String,
    success_url: String,
}

#[derive(Debug, Deserialize)]
struct CheckoutSession {
    data: CheckoutSessionData,
}

#[derive(Debug, Deserialize)]
struct CheckoutSessionData {
    id: SourceId,
}

impl CheckoutClient {
    /// Creates a `CheckoutClient` with the configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        base_url: &str,
        api_key: &str,
        success_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_key: api_key.to_owned(),
            success_url: success_url.to_owned(),
        })
    }

    /// Creates a checkout session for the given line items and returns the
    /// provider's opaque session id.
    ///
    /// `success_url` overrides the configured post-checkout redirect when
    /// the storefront supplies one.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::InvalidInput`] — empty `items` (no request made).
    /// - [`CatalogError::Unauthorized`] / [`CatalogError::UpstreamStatus`] /
    ///   [`CatalogError::Timeout`] / [`CatalogError::Http`] — same
    ///   classification as catalog fetches.
    /// - [`CatalogError::Deserialize`] — response body has no `data.id`.
    pub async fn create_checkout(
        &self,
        items: &[LineItem],
        success_url: Option<&str>,
    ) -> Result<String, CatalogError> {
        if items.is_empty() {
            return Err(CatalogError::InvalidInput {
                reason: "no line items provided".to_owned(),
            });
        }

        let url = format!("{}/checkouts", self.base_url);
        let payload = json!({
            "checkout": {
                "line_items": items
                    .iter()
                    .map(|item| json!({
                        "variant_id": item.variant.to_string(),
                        "quantity": item.quantity,
                    }))
                    .collect::<Vec<_>>(),
                "success_url": success_url.unwrap_or(&self.success_url),
            }
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| classify_transport(e, &url))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(CatalogError::Unauthorized {
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            return Err(CatalogError::UpstreamStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| classify_transport(e, &url))?;
        let session: CheckoutSession =
            serde_json::from_str(&body).map_err(|e| CatalogError::Deserialize {
                context: "checkout session".to_owned(),
                source: e,
            })?;
        Ok(session.data.id.to_string())
    }
}
