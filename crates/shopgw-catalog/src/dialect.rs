//! Provider-specific payload shapes and their mapping into the common
//! [`CatalogProduct`] form.
//!
//! Only this module and the URL builders in [`crate::client`] know which
//! provider is in play; resolution and normalization never see a
//! provider-specific shape.
//!
//! ## SellAuth
//! Flat product objects. Single-product responses are served bare on some
//! deployments and wrapped in `{"data": {...}}` on others, so both are
//! accepted; list responses are always `{"data": [...]}`.
//!
//! ## Lemon Squeezy
//! JSON:API documents: `{"data": {"id", "attributes": {...}}}` with variant
//! resources side-loaded in `included` and (optionally) referenced from
//! `relationships.variants.data`. When the relationship block is absent,
//! every included variant resource belongs to the product.

use std::collections::HashSet;

use serde::Deserialize;
use serde_json::Value;
use shopgw_core::Provider;

use crate::types::{CatalogImage, CatalogProduct, CatalogVariant, PriceField, SourceId};

/// Decodes a single-product response body into the common shape.
///
/// The full body is retained as `CatalogProduct::raw`.
///
/// # Errors
///
/// Returns the underlying `serde_json::Error` when the payload does not
/// match the provider's dialect.
pub fn decode_product(provider: Provider, value: Value) -> Result<CatalogProduct, serde_json::Error> {
    match provider {
        Provider::SellAuth => {
            let payload = match value.get("data") {
                Some(data) if data.is_object() => data.clone(),
                _ => value.clone(),
            };
            let product: SellAuthProduct = serde_json::from_value(payload)?;
            Ok(product.into_catalog(value))
        }
        Provider::LemonSqueezy => {
            let document: LemonSqueezyDocument = serde_json::from_value(value.clone())?;
            Ok(lemonsqueezy_catalog(document.data, &document.included, value))
        }
    }
}

/// Decodes one page of a product-list response into the common shape.
///
/// Each product's `raw` is its own element of the `data` array, not the
/// whole page.
///
/// # Errors
///
/// Returns the underlying `serde_json::Error` when the payload does not
/// match the provider's dialect.
pub fn decode_product_list(
    provider: Provider,
    value: Value,
) -> Result<Vec<CatalogProduct>, serde_json::Error> {
    match provider {
        Provider::SellAuth => {
            let envelope: SellAuthListEnvelope = serde_json::from_value(value)?;
            envelope
                .data
                .into_iter()
                .map(|element| {
                    let product: SellAuthProduct = serde_json::from_value(element.clone())?;
                    Ok(product.into_catalog(element))
                })
                .collect()
        }
        Provider::LemonSqueezy => {
            let envelope: LemonSqueezyListEnvelope = serde_json::from_value(value)?;
            envelope
                .data
                .into_iter()
                .map(|element| {
                    let resource: LemonSqueezyResource = serde_json::from_value(element.clone())?;
                    Ok(lemonsqueezy_catalog(resource, &envelope.included, element))
                })
                .collect()
        }
    }
}

// ---------------------------------------------------------------------------
// SellAuth
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SellAuthListEnvelope {
    data: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct SellAuthProduct {
    id: SourceId,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    price: Option<PriceField>,
    #[serde(default)]
    image: Option<CatalogImage>,
    #[serde(default)]
    images: Vec<CatalogImage>,
    #[serde(default)]
    variants: Vec<SellAuthVariant>,
}

#[derive(Debug, Deserialize)]
struct SellAuthVariant {
    id: SourceId,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    size: Option<String>,
    #[serde(default)]
    price: Option<PriceField>,
    #[serde(default)]
    image: Option<CatalogImage>,
}

impl SellAuthProduct {
    fn into_catalog(self, raw: Value) -> CatalogProduct {
        CatalogProduct {
            id: self.id,
            name: self.name,
            description: self.description,
            price: self.price,
            image: self.image,
            images: self.images,
            media: Vec::new(),
            variants: self
                .variants
                .into_iter()
                .map(|v| CatalogVariant {
                    id: v.id,
                    name: v.name,
                    size: v.size,
                    price: v.price,
                    image: v.image,
                })
                .collect(),
            raw,
        }
    }
}

// ---------------------------------------------------------------------------
// Lemon Squeezy
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct LemonSqueezyDocument {
    data: LemonSqueezyResource,
    #[serde(default)]
    included: Vec<LemonSqueezyResource>,
}

#[derive(Debug, Deserialize)]
struct LemonSqueezyListEnvelope {
    data: Vec<Value>,
    #[serde(default)]
    included: Vec<LemonSqueezyResource>,
}

#[derive(Debug, Clone, Deserialize)]
struct LemonSqueezyResource {
    id: SourceId,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    attributes: LemonSqueezyAttributes,
    #[serde(default)]
    relationships: Option<LemonSqueezyRelationships>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct LemonSqueezyAttributes {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    price: Option<PriceField>,
    #[serde(default)]
    media: Vec<CatalogImage>,
}

#[derive(Debug, Clone, Deserialize)]
struct LemonSqueezyRelationships {
    #[serde(default)]
    variants: Option<LemonSqueezyRelated>,
}

#[derive(Debug, Clone, Deserialize)]
struct LemonSqueezyRelated {
    #[serde(default)]
    data: Vec<LemonSqueezyIdentifier>,
}

#[derive(Debug, Clone, Deserialize)]
struct LemonSqueezyIdentifier {
    id: SourceId,
}

fn lemonsqueezy_catalog(
    resource: LemonSqueezyResource,
    included: &[LemonSqueezyResource],
    raw: Value,
) -> CatalogProduct {
    // Restrict included variants to the ones this product references, when
    // the relationship block names them.
    let referenced: Option<HashSet<String>> = resource
        .relationships
        .as_ref()
        .and_then(|r| r.variants.as_ref())
        .map(|related| related.data.iter().map(|v| v.id.to_string()).collect());

    let variants = included
        .iter()
        .filter(|r| r.kind.as_deref() == Some("variants"))
        .filter(|r| {
            referenced
                .as_ref()
                .is_none_or(|ids| ids.contains(&r.id.to_string()))
        })
        .map(|r| CatalogVariant {
            id: r.id.clone(),
            name: r.attributes.name.clone(),
            size: None,
            price: r.attributes.price.clone(),
            image: r.attributes.media.first().cloned(),
        })
        .collect();

    CatalogProduct {
        id: resource.id,
        name: resource.attributes.name,
        description: resource.attributes.description,
        price: resource.attributes.price,
        image: None,
        images: Vec::new(),
        media: resource.attributes.media,
        variants,
        raw,
    }
}
