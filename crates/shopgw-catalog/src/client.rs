use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde_json::Value;
use shopgw_core::Provider;

use crate::dialect;
use crate::error::CatalogError;
use crate::types::CatalogProduct;

/// Maximum number of pages to fetch before returning an error.
/// Prevents infinite loops on an upstream that never returns an empty page.
const MAX_PAGES: usize = 200;

/// HTTP client for a single shop's upstream catalog API.
///
/// Performs one bounded-time, bearer-authenticated GET per call and
/// classifies failures into typed errors (`NotFound`, `Unauthorized`,
/// `Timeout`, `UpstreamStatus`). There is no retry or backoff: a request
/// gets exactly one attempt, and a stuck upstream costs at most the
/// configured timeout.
pub struct CatalogClient {
    client: Client,
    provider: Provider,
    base_url: String,
    shop_id: String,
    api_key: String,
}

impl CatalogClient {
    /// Creates a `CatalogClient` with the configured timeout and `User-Agent`.
    ///
    /// `base_url` of `None` selects the provider's default API root.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(
        provider: Provider,
        base_url: Option<&str>,
        shop_id: &str,
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        let base_url = base_url
            .unwrap_or_else(|| provider.default_catalog_base_url())
            .trim_end_matches('/')
            .to_owned();
        Ok(Self {
            client,
            provider,
            base_url,
            shop_id: shop_id.to_owned(),
            api_key: api_key.to_owned(),
        })
    }

    /// Fetches one product by its upstream identifier and decodes it into
    /// the common catalog shape.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::InvalidInput`] — empty product id (no request made).
    /// - [`CatalogError::NotFound`] — upstream 404.
    /// - [`CatalogError::Unauthorized`] — upstream 401/403.
    /// - [`CatalogError::UpstreamStatus`] — any other non-2xx status.
    /// - [`CatalogError::Timeout`] — the bounded per-request timeout elapsed.
    /// - [`CatalogError::Http`] — transport/TLS failure.
    /// - [`CatalogError::Deserialize`] — body is not valid JSON or does not
    ///   match the provider dialect.
    pub async fn fetch_product(&self, product_id: &str) -> Result<CatalogProduct, CatalogError> {
        let product_id = product_id.trim();
        if product_id.is_empty() {
            return Err(CatalogError::InvalidInput {
                reason: "product id is empty".to_owned(),
            });
        }

        let url = self.product_url(product_id);
        let value = self
            .get_json(&url, |status| {
                if status == StatusCode::NOT_FOUND {
                    Some(CatalogError::NotFound {
                        product_id: product_id.to_owned(),
                    })
                } else {
                    None
                }
            })
            .await?;

        dialect::decode_product(self.provider, value).map_err(|e| CatalogError::Deserialize {
            context: format!("product {product_id}"),
            source: e,
        })
    }

    /// Fetches one page of the shop's product list.
    ///
    /// `page` is 1-based. An empty result means the previous page was the
    /// last one.
    ///
    /// # Errors
    ///
    /// Same classification as [`Self::fetch_product`], minus `NotFound`
    /// special-casing (a 404 here is an [`CatalogError::UpstreamStatus`]).
    pub async fn fetch_products_page(
        &self,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<CatalogProduct>, CatalogError> {
        let url = self.products_page_url(page, per_page);
        let value = self.get_json(&url, |_| None).await?;

        dialect::decode_product_list(self.provider, value).map_err(|e| CatalogError::Deserialize {
            context: format!("products page {page}"),
            source: e,
        })
    }

    /// Fetches the shop's entire catalog by walking the list pages until one
    /// comes back empty.
    ///
    /// `inter_request_delay_ms` is the delay between page requests (applied
    /// after every page except the first).
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::fetch_products_page`]. Returns
    /// [`CatalogError::PaginationLimit`] if the number of pages exceeds
    /// [`MAX_PAGES`].
    pub async fn fetch_all_products(
        &self,
        per_page: u32,
        inter_request_delay_ms: u64,
    ) -> Result<Vec<CatalogProduct>, CatalogError> {
        let mut all_products: Vec<CatalogProduct> = Vec::new();
        let mut page = 1u32;

        loop {
            if page as usize > MAX_PAGES {
                return Err(CatalogError::PaginationLimit {
                    url: self.products_page_url(page, per_page),
                    max_pages: MAX_PAGES,
                });
            }

            if page > 1 && inter_request_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(inter_request_delay_ms)).await;
            }

            let products = self.fetch_products_page(page, per_page).await?;
            if products.is_empty() {
                break;
            }
            tracing::debug!(page, count = products.len(), "fetched catalog page");
            all_products.extend(products);
            page += 1;
        }

        Ok(all_products)
    }

    /// Issues one GET and applies the shared status classification.
    ///
    /// `special` lets the caller claim a status (e.g. 404 on the product
    /// endpoint) before the generic rules run.
    async fn get_json<F>(&self, url: &str, special: F) -> Result<Value, CatalogError>
    where
        F: Fn(StatusCode) -> Option<CatalogError>,
    {
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| classify_transport(e, url))?;

        let status = response.status();
        if let Some(error) = special(status) {
            return Err(error);
        }
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(CatalogError::Unauthorized {
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            return Err(CatalogError::UpstreamStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| classify_transport(e, url))?;
        serde_json::from_str(&body).map_err(|e| CatalogError::Deserialize {
            context: format!("response from {url}"),
            source: e,
        })
    }

    fn product_url(&self, product_id: &str) -> String {
        match self.provider {
            Provider::SellAuth => format!(
                "{}/shops/{}/products/{product_id}",
                self.base_url, self.shop_id
            ),
            Provider::LemonSqueezy => format!("{}/products/{product_id}", self.base_url),
        }
    }

    fn products_page_url(&self, page: u32, per_page: u32) -> String {
        match self.provider {
            Provider::SellAuth => format!(
                "{}/shops/{}/products?page={page}&perPage={per_page}",
                self.base_url, self.shop_id
            ),
            Provider::LemonSqueezy => format!(
                "{}/products?page[number]={page}&page[size]={per_page}",
                self.base_url
            ),
        }
    }
}

/// Maps a transport-level `reqwest` failure onto the error taxonomy,
/// separating the bounded-timeout case from everything else.
pub(crate) fn classify_transport(error: reqwest::Error, url: &str) -> CatalogError {
    if error.is_timeout() {
        CatalogError::Timeout {
            url: url.to_owned(),
        }
    } else {
        CatalogError::Http(error)
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
