mod checkout;
mod products;

use std::sync::Arc;

use axum::{
    http::{header, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use shopgw_catalog::{CatalogClient, CatalogError, CheckoutClient};
use shopgw_core::AppConfig;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::middleware::request_id;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogClient>,
    pub checkout: Arc<CheckoutClient>,
    pub cdn_account_hash: String,
}

impl AppState {
    /// Wires the upstream clients from the loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Http`] if a `reqwest` client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, CatalogError> {
        let catalog = CatalogClient::new(
            config.provider,
            config.catalog_base_url.as_deref(),
            &config.shop_id,
            &config.catalog_api_key,
            config.request_timeout_secs,
            &config.user_agent,
        )?;
        let checkout = CheckoutClient::new(
            &config.checkout_base_url,
            config
                .checkout_api_key
                .as_deref()
                .unwrap_or(&config.catalog_api_key),
            &config.checkout_success_url,
            config.request_timeout_secs,
            &config.user_agent,
        )?;
        Ok(Self {
            catalog: Arc::new(catalog),
            checkout: Arc::new(checkout),
            cdn_account_hash: config.cdn_account_hash.clone(),
        })
    }
}

/// Structured error body: `{error, details}`. `error` is a stable short
/// summary for the UI; `details` carries the classified failure message.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub details: String,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Maps a pipeline failure onto the facade's status space: caller mistakes
/// are 400, a slow upstream is 504, everything else upstream is 502. An
/// upstream 401 stays a 5xx — the broken credential is the gateway's, and
/// forwarding 401 would invite the storefront to log the shopper out.
pub(super) fn map_catalog_error(summary: &str, error: &CatalogError) -> ApiError {
    let status = match error {
        CatalogError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
        CatalogError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
        _ => StatusCode::BAD_GATEWAY,
    };
    if status.is_server_error() {
        tracing::error!(error = %error, "upstream call failed");
    }
    ApiError {
        status,
        body: ErrorBody {
            error: summary.to_owned(),
            details: error.to_string(),
        },
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/product/{product_id}/{variant_id}",
            get(products::get_product),
        )
        .route("/products", get(products::list_products))
        .route("/api/create-checkout", post(checkout::create_checkout))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::json;
    use shopgw_core::Provider;
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SHOP_ID: &str = "179365";

    /// State wired against a wiremock upstream instead of the real catalog.
    fn test_state(server: &MockServer) -> AppState {
        AppState {
            catalog: Arc::new(
                CatalogClient::new(
                    Provider::SellAuth,
                    Some(&server.uri()),
                    SHOP_ID,
                    "test-key",
                    5,
                    "shopgw-test/0.1",
                )
                .expect("catalog client"),
            ),
            checkout: Arc::new(
                CheckoutClient::new(
                    &server.uri(),
                    "test-key",
                    "https://shop.example.com/thank-you",
                    5,
                    "shopgw-test/0.1",
                )
                .expect("checkout client"),
            ),
            cdn_account_hash: "acct-hash".to_owned(),
        }
    }

    fn product_path(id: &str) -> String {
        format!("/shops/{SHOP_ID}/products/{id}")
    }

    fn sellauth_product_json(id: i64) -> serde_json::Value {
        json!({
            "id": id,
            "name": "Hoodie",
            "price": "39.99",
            "image": {"cloudflare_image_id": "img-1"},
            "variants": [{"id": 10, "size": "small", "price": "34.99"}]
        })
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json = serde_json::from_slice(&body).expect("json parse");
        (status, json)
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let server = MockServer::start().await;
        let app = build_app(test_state(&server));
        let (status, json) = get_json(app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"].as_str(), Some("ok"));
    }

    #[tokio::test]
    async fn get_product_returns_normalized_record() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(product_path("1")))
            .respond_with(ResponseTemplate::new(200).set_body_json(&sellauth_product_json(1)))
            .mount(&server)
            .await;

        let app = build_app(test_state(&server));
        let (status, json) = get_json(app, "/product/1/10").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["id"].as_str(), Some("1"));
        assert_eq!(json["variantId"].as_str(), Some("10"));
        assert_eq!(json["name"].as_str(), Some("Hoodie"));
        assert!((json["price"].as_f64().unwrap() - 34.99).abs() < f64::EPSILON);
        assert_eq!(
            json["image"]["url"].as_str(),
            Some("https://imagedelivery.net/acct-hash/img-1/public")
        );
        assert_eq!(json["raw"]["id"].as_i64(), Some(1), "raw payload retained");
    }

    #[tokio::test]
    async fn get_product_upstream_404_maps_to_502_with_error_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(product_path("9")))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let app = build_app(test_state(&server));
        let (status, json) = get_json(app, "/product/9/1").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(json["error"].as_str(), Some("failed to fetch product"));
        assert!(json["details"].as_str().unwrap().contains("not found"));
    }

    #[tokio::test]
    async fn list_products_isolates_the_missing_item() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(product_path("1")))
            .respond_with(ResponseTemplate::new(200).set_body_json(&sellauth_product_json(1)))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(product_path("2")))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let app = build_app(test_state(&server));
        let (status, json) = get_json(app, "/products?list=1:10,2:").await;

        assert_eq!(status, StatusCode::OK);
        let items = json.as_array().expect("array body");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["id"].as_str(), Some("1"));
        assert_eq!(items[0]["variantId"].as_str(), Some("10"));
        assert!(items[0].get("error").is_none());
        assert_eq!(items[1]["id"].as_str(), Some("2"));
        assert_eq!(items[1]["variantId"].as_str(), Some(""));
        assert_eq!(items[1]["error"].as_bool(), Some(true));
    }

    #[tokio::test]
    async fn list_products_without_list_param_is_bad_request() {
        let server = MockServer::start().await;
        let app = build_app(test_state(&server));
        let (status, json) = get_json(app, "/products").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"].as_str(), Some("invalid product list"));
    }

    #[tokio::test]
    async fn list_products_with_empty_list_param_is_bad_request() {
        let server = MockServer::start().await;
        let app = build_app(test_state(&server));
        let (status, _) = get_json(app, "/products?list=,,").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_checkout_proxies_and_returns_the_session_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/checkouts"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(&json!({"data": {"id": "chk_9"}})),
            )
            .mount(&server)
            .await;

        let app = build_app(test_state(&server));
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/create-checkout")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        json!({"items": [{"variant": 11, "quantity": 2}]}).to_string(),
                    ))
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json parse");
        assert_eq!(json["checkoutId"].as_str(), Some("chk_9"));
    }

    #[tokio::test]
    async fn create_checkout_with_no_items_is_bad_request() {
        let server = MockServer::start().await;
        let app = build_app(test_state(&server));
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/create-checkout")
                    .header("content-type", "application/json")
                    .body(Body::from(json!({"items": []}).to_string()))
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn responses_carry_a_request_id_header() {
        let server = MockServer::start().await;
        let app = build_app(test_state(&server));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header("x-request-id", "req-abc")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(
            response.headers().get("x-request-id").unwrap(),
            "req-abc",
            "incoming request id should be echoed"
        );
    }

    #[test]
    fn map_catalog_error_statuses() {
        let invalid = CatalogError::InvalidInput {
            reason: "empty".to_owned(),
        };
        assert_eq!(
            map_catalog_error("x", &invalid).status,
            StatusCode::BAD_REQUEST
        );

        let timeout = CatalogError::Timeout {
            url: "https://x".to_owned(),
        };
        assert_eq!(
            map_catalog_error("x", &timeout).status,
            StatusCode::GATEWAY_TIMEOUT
        );

        let not_found = CatalogError::NotFound {
            product_id: "1".to_owned(),
        };
        assert_eq!(
            map_catalog_error("x", &not_found).status,
            StatusCode::BAD_GATEWAY
        );
    }
}
