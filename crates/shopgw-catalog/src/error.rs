use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("product {product_id} not found upstream")]
    NotFound { product_id: String },

    #[error("upstream rejected credentials (status {status})")]
    Unauthorized { status: u16 },

    #[error("unexpected upstream status {status} from {url}")]
    UpstreamStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid request: {reason}")]
    InvalidInput { reason: String },

    #[error("pagination limit reached for {url}: exceeded {max_pages} pages")]
    PaginationLimit { url: String, max_pages: usize },
}
