pub mod batch;
pub mod checkout;
pub mod client;
pub mod dialect;
pub mod error;
pub mod export;
pub mod normalize;
pub mod resolve;
pub mod types;

pub use batch::{aggregate, parse_pair_list, ProductPair};
pub use checkout::{CheckoutClient, LineItem};
pub use client::CatalogClient;
pub use error::CatalogError;
pub use normalize::normalize_product;
pub use resolve::{resolve_image, resolve_variant};
pub use types::{CatalogImage, CatalogProduct, CatalogVariant, PriceField, SourceId};
