//! Normalization from the analysis service's JSON into [`AnalysisResult`] and
//! [`Product`] values.
//!
//! The service's response shape is not fixed. Depending on which backend
//! answered, the garment analysis may sit under `clothing_attributes`, at the
//! top level next to the product list, or be missing entirely, and the
//! products may be under `items`, `response`, `products`, `results`, or be the
//! whole body. Each known location is an extraction strategy, tried in
//! priority order; the first structural match wins.
//!
//! Nothing in this module fails. Missing or oddly typed fields degrade to
//! `None` or an empty list.

use std::collections::BTreeMap;

use serde_json::Value;

use zoppl_core::analysis::CLOTHING_TYPE_KEY;
use zoppl_core::{AnalysisResult, Product, ProductAttributes, Retailer};

use crate::error::{FinderError, SERVICE_FAILURE_MESSAGE};

/// Canonical form of one analysis response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedResponse {
    /// `None` when the payload carries no recognizable garment analysis.
    pub analysis: Option<AnalysisResult>,
    /// Products in the order the service returned them, before validation.
    pub products: Vec<Product>,
    /// Search string the backend used, when it reports one.
    pub search_term: Option<String>,
}

/// Where the garment analysis is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AnalysisSource {
    /// The analysis is the value of this field.
    Nested(&'static str),
    /// The payload itself is the analysis when this field is present.
    TopLevel(&'static str),
}

const ANALYSIS_SOURCES: [AnalysisSource; 3] = [
    AnalysisSource::Nested("clothing_attributes"),
    AnalysisSource::TopLevel("attributes"),
    AnalysisSource::TopLevel(CLOTHING_TYPE_KEY),
];

impl AnalysisSource {
    fn locate<'a>(self, data: &'a Value) -> Option<&'a Value> {
        match self {
            Self::Nested(field) => present(data, field),
            Self::TopLevel(field) => present(data, field).map(|_| data),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Nested(field) | Self::TopLevel(field) => field,
        }
    }
}

/// Where the product list is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProductSource {
    Field(&'static str),
    BareArray,
}

const PRODUCT_SOURCES: [ProductSource; 5] = [
    ProductSource::Field("items"),
    ProductSource::Field("response"),
    ProductSource::Field("products"),
    ProductSource::Field("results"),
    ProductSource::BareArray,
];

impl ProductSource {
    fn locate(self, data: &Value) -> Option<&Vec<Value>> {
        match self {
            Self::Field(field) => data.get(field).and_then(Value::as_array),
            Self::BareArray => data.as_array(),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Field(field) => field,
            Self::BareArray => "<body>",
        }
    }
}

/// Returns the service-reported failure message when the payload's
/// top-level `status` is exactly `false`.
#[must_use]
pub fn service_failure(data: &Value) -> Option<String> {
    if data.get("status") != Some(&Value::Bool(false)) {
        return None;
    }
    Some(
        data.get("message")
            .and_then(Value::as_str)
            .filter(|message| !message.is_empty())
            .unwrap_or(SERVICE_FAILURE_MESSAGE)
            .to_string(),
    )
}

/// Checks for a service-reported failure, then normalizes the payload.
///
/// # Errors
///
/// Returns [`FinderError::ServiceFailure`] when the payload has `status: false`.
pub fn interpret_response(data: &Value) -> Result<NormalizedResponse, FinderError> {
    if let Some(message) = service_failure(data) {
        tracing::warn!(%message, "analysis service reported failure");
        return Err(FinderError::ServiceFailure { message });
    }
    Ok(normalize_response(data))
}

/// Normalizes an arbitrarily shaped analysis payload.
#[must_use]
pub fn normalize_response(data: &Value) -> NormalizedResponse {
    NormalizedResponse {
        analysis: extract_analysis(data),
        products: extract_products(data),
        search_term: data.get("search_term").and_then(value_as_string),
    }
}

fn extract_analysis(data: &Value) -> Option<AnalysisResult> {
    ANALYSIS_SOURCES.into_iter().find_map(|source| {
        let located = source.locate(data)?;
        tracing::debug!(source = source.name(), "located garment analysis");
        Some(analysis_from_source(located))
    })
}

fn analysis_from_source(source: &Value) -> AnalysisResult {
    if let Some(clothing_type) = present(source, CLOTHING_TYPE_KEY) {
        return AnalysisResult {
            clothing_type: value_as_string(clothing_type),
            attributes: present(source, "attributes")
                .map(attribute_map)
                .unwrap_or_default(),
        };
    }

    if let Some(attributes) = present(source, "attributes") {
        return AnalysisResult {
            clothing_type: attributes.get(CLOTHING_TYPE_KEY).and_then(value_as_string),
            attributes: attribute_map(attributes),
        };
    }

    AnalysisResult::default()
}

fn attribute_map(attributes: &Value) -> BTreeMap<String, String> {
    attributes
        .as_object()
        .into_iter()
        .flatten()
        .filter_map(|(key, value)| Some((key.clone(), value_as_string(value)?)))
        .collect()
}

fn extract_products(data: &Value) -> Vec<Product> {
    let Some((source, items)) = PRODUCT_SOURCES
        .into_iter()
        .find_map(|source| source.locate(data).map(|items| (source, items)))
    else {
        tracing::debug!("no product list found in analysis response");
        return Vec::new();
    };

    tracing::debug!(
        source = source.name(),
        count = items.len(),
        "located product list"
    );
    items.iter().map(map_product).collect()
}

/// Maps one catalogue entry. Entries that are not objects become an empty
/// [`Product`], which validation later drops for lack of an image.
fn map_product(item: &Value) -> Product {
    let retailer = string_field(item, "retailer")
        .or_else(|| string_field(item, "brand"))
        .and_then(|name| Retailer::from_name(&name));

    Product {
        name: string_field(item, "name"),
        price: string_field(item, "price"),
        image_url: string_field(item, "image_url"),
        product_url: string_field(item, "product_url"),
        retailer,
        availability: string_field(item, "availability"),
        attributes: item
            .get("attributes")
            .map(map_attributes)
            .unwrap_or_default(),
    }
}

fn map_attributes(attributes: &Value) -> ProductAttributes {
    ProductAttributes {
        color: string_field(attributes, "color"),
        length: string_field(attributes, "length"),
        material: string_field(attributes, "material"),
        style: string_field(attributes, "style"),
        clothing_type: string_field(attributes, CLOTHING_TYPE_KEY),
    }
}

/// Returns the field when it exists and is truthy (not `null`, `false`, `0`
/// or `""`).
fn present<'a>(value: &'a Value, field: &str) -> Option<&'a Value> {
    value.get(field).filter(|v| is_truthy(v))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn string_field(value: &Value, field: &str) -> Option<String> {
    value.get(field).and_then(value_as_string)
}

/// Reads strings (trimmed, non-empty) and numbers as text; everything else is absent.
fn value_as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.trim())
            .filter(|text| !text.is_empty())
            .map(str::to_string),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
