//! Flat-text variant report for the one-shot export job.
//!
//! The report is consumed by humans wiring variant ids into a storefront,
//! so it favors readability over machine-parsability:
//!
//! ```text
//! Product Name: Hoodie
//! Product ID: 42
//! Image: https://imagedelivery.net/acct/img-1/public
//! Variants:
//!   - Small: 1
//!   - Large: 2
//! ```

use crate::resolve::resolve_image;
use crate::types::{CatalogProduct, CatalogVariant};

/// Renders the full catalog into the flat report format, one block per
/// product, blank line between blocks.
#[must_use]
pub fn render_variant_report(products: &[CatalogProduct], cdn_account_hash: &str) -> String {
    products
        .iter()
        .map(|product| render_product_block(product, cdn_account_hash))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_product_block(product: &CatalogProduct, cdn_account_hash: &str) -> String {
    let id = product.id.to_string();
    let name = product
        .name
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map_or_else(|| format!("Product {id}"), ToOwned::to_owned);
    let image = resolve_image(product, None, cdn_account_hash)
        .url
        .unwrap_or_else(|| "No image available".to_owned());

    let variants = if product.variants.is_empty() {
        "  - Default variant".to_owned()
    } else {
        product
            .variants
            .iter()
            .map(render_variant_line)
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!("Product Name: {name}\nProduct ID: {id}\nImage: {image}\nVariants:\n{variants}\n")
}

fn render_variant_line(variant: &CatalogVariant) -> String {
    // The display-label key varies per upstream: prefer `size`, then `name`.
    let label = variant
        .size
        .as_deref()
        .or(variant.name.as_deref())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map_or_else(|| "Default".to_owned(), capitalize);
    format!("  - {label}: {}", variant.id)
}

/// Uppercases the first character, leaving the rest untouched.
fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CatalogImage, SourceId};

    fn variant(id: i64, size: Option<&str>, name: Option<&str>) -> CatalogVariant {
        CatalogVariant {
            id: SourceId::Number(id),
            name: name.map(ToOwned::to_owned),
            size: size.map(ToOwned::to_owned),
            price: None,
            image: None,
        }
    }

    fn product(id: i64, name: Option<&str>, variants: Vec<CatalogVariant>) -> CatalogProduct {
        CatalogProduct {
            id: SourceId::Number(id),
            name: name.map(ToOwned::to_owned),
            description: None,
            price: None,
            image: None,
            images: Vec::new(),
            media: Vec::new(),
            variants,
            raw: serde_json::Value::Null,
        }
    }

    #[test]
    fn renders_one_block_per_product_with_variant_lines() {
        let products = vec![product(
            42,
            Some("Hoodie"),
            vec![variant(1, Some("small"), None), variant(2, Some("large"), None)],
        )];
        let report = render_variant_report(&products, "acct");
        assert_eq!(
            report,
            "Product Name: Hoodie\nProduct ID: 42\nImage: No image available\nVariants:\n  - Small: 1\n  - Large: 2\n"
        );
    }

    #[test]
    fn label_prefers_size_over_name() {
        let products = vec![product(
            1,
            Some("A"),
            vec![variant(10, Some("xl"), Some("ignored"))],
        )];
        let report = render_variant_report(&products, "acct");
        assert!(report.contains("  - Xl: 10"));
    }

    #[test]
    fn label_falls_back_to_name_then_default() {
        let products = vec![product(
            1,
            Some("A"),
            vec![variant(10, None, Some("lifetime")), variant(11, None, None)],
        )];
        let report = render_variant_report(&products, "acct");
        assert!(report.contains("  - Lifetime: 10"));
        assert!(report.contains("  - Default: 11"));
    }

    #[test]
    fn product_without_variants_gets_a_placeholder_line() {
        let products = vec![product(1, Some("A"), vec![])];
        let report = render_variant_report(&products, "acct");
        assert!(report.contains("Variants:\n  - Default variant\n"));
    }

    #[test]
    fn image_line_uses_the_resolved_delivery_url() {
        let mut p = product(1, Some("A"), vec![]);
        p.image = Some(CatalogImage {
            url: None,
            content_id: Some("img-9".to_owned()),
        });
        let report = render_variant_report(&[p], "acct");
        assert!(report.contains("Image: https://imagedelivery.net/acct/img-9/public"));
    }

    #[test]
    fn unnamed_product_uses_the_id_fallback_label() {
        let products = vec![product(7, None, vec![])];
        let report = render_variant_report(&products, "acct");
        assert!(report.contains("Product Name: Product 7"));
    }

    #[test]
    fn blocks_are_separated_by_a_blank_line() {
        let products = vec![product(1, Some("A"), vec![]), product(2, Some("B"), vec![])];
        let report = render_variant_report(&products, "acct");
        assert!(report.contains("Default variant\n\nProduct Name: B"));
    }

    #[test]
    fn capitalize_handles_empty_and_unicode() {
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("small"), "Small");
        assert_eq!(capitalize("éclair"), "Éclair");
    }
}
