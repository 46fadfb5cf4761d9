//! Display helpers shared by presentation adapters.

use zoppl_core::text::capitalize_first;
use zoppl_core::{AnalysisResult, Product};

/// Shown when a product has no name.
pub const DEFAULT_PRODUCT_NAME: &str = "Product";

/// Link target used when a product has no URL.
pub const NO_OP_LINK: &str = "#";

/// Price label with the first euro sign shown as a dollar sign. The rest of
/// the label is left alone.
#[must_use]
pub fn display_price(price: &str) -> String {
    price.replacen('€', "$", 1)
}

#[must_use]
pub fn display_name(product: &Product) -> &str {
    product.name.as_deref().unwrap_or(DEFAULT_PRODUCT_NAME)
}

#[must_use]
pub fn link_target(product: &Product) -> &str {
    product.product_url.as_deref().unwrap_or(NO_OP_LINK)
}

/// `"search_string"` becomes `"Search string"`.
#[must_use]
pub fn attribute_label(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => {
            let rest: String = chars.collect();
            format!("{}{}", capitalize_first(&first.to_string()), rest.replace('_', " "))
        }
        None => String::new(),
    }
}

/// Label/value rows for the analysis panel: `Item Type` first when known,
/// then every other attribute.
#[must_use]
pub fn analysis_rows(analysis: &AnalysisResult) -> Vec<(String, String)> {
    let mut rows = Vec::new();
    if let Some(clothing_type) = &analysis.clothing_type {
        rows.push(("Item Type".to_string(), clothing_type.clone()));
    }
    rows.extend(
        analysis
            .display_attributes()
            .map(|(key, value)| (attribute_label(key), value.to_string())),
    );
    rows
}
