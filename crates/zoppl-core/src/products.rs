use serde::{Serialize, Serializer};

use crate::text::{capitalize_first, normalize_key};

/// Retailer identity, normalized once when a product is decoded.
///
/// The search service spells H&M either as `"H&M"` or `"hm"` depending on
/// which scraper produced the item; both map to [`Retailer::HAndM`] so facet
/// matching never has to compare raw text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Retailer {
    Zara,
    HAndM,
    /// Any other retailer, keyed by its lower-cased trimmed name.
    Other(String),
}

impl Retailer {
    /// Normalizes a raw retailer name. Returns `None` for blank input.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let key = normalize_key(name);
        match key.as_str() {
            "" => None,
            "zara" => Some(Self::Zara),
            "h&m" | "hm" => Some(Self::HAndM),
            _ => Some(Self::Other(key)),
        }
    }

    /// Lower-cased identity used as the facet key.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Zara => "zara",
            Self::HAndM => "h&m",
            Self::Other(key) => key,
        }
    }

    /// Facet label: the key with its first letter capitalized.
    #[must_use]
    pub fn label(&self) -> String {
        capitalize_first(self.key())
    }
}

impl std::fmt::Display for Retailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl Serialize for Retailer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

/// Garment attributes reported for a matched product.
///
/// Values keep the casing the service sent; the `*_key` accessors return the
/// lower-cased form used for facet derivation and filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProductAttributes {
    pub color: Option<String>,
    pub length: Option<String>,
    pub material: Option<String>,
    pub style: Option<String>,
    pub clothing_type: Option<String>,
}

impl ProductAttributes {
    #[must_use]
    pub fn color_key(&self) -> Option<String> {
        self.color.as_deref().map(normalize_key)
    }

    #[must_use]
    pub fn length_key(&self) -> Option<String> {
        self.length.as_deref().map(normalize_key)
    }

    #[must_use]
    pub fn clothing_type_key(&self) -> Option<String> {
        self.clothing_type.as_deref().map(normalize_key)
    }

    /// Non-empty descriptive values in card order: colour, length, material, style.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        [&self.color, &self.length, &self.material, &self.style]
            .into_iter()
            .filter_map(|value| value.as_deref())
    }
}

/// One matched item from the external catalogue.
///
/// A `Product` is never mutated after normalization; validity and visibility
/// are computed by pure functions over its fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Product {
    pub name: Option<String>,
    /// Opaque price label, e.g. `"€39.95"`. Never parsed as a number.
    pub price: Option<String>,
    pub image_url: Option<String>,
    pub product_url: Option<String>,
    pub retailer: Option<Retailer>,
    /// Free-text stock status, e.g. `"Available"` or `"Out of stock"`.
    pub availability: Option<String>,
    pub attributes: ProductAttributes,
}

impl Product {
    /// Image URL with protocol-relative references (`//cdn/…`) upgraded to `https:`.
    #[must_use]
    pub fn secure_image_url(&self) -> Option<String> {
        self.image_url.as_deref().map(|url| {
            if url.starts_with("//") {
                format!("https:{url}")
            } else {
                url.to_string()
            }
        })
    }

    /// Returns `true` unless an availability text is present and lacks the
    /// token `available` (case-insensitive).
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.availability
            .as_deref()
            .is_none_or(|text| text.to_lowercase().contains("available"))
    }
}
