use std::collections::BTreeMap;

use serde::Serialize;

/// Attribute key that duplicates [`AnalysisResult::clothing_type`] in some payloads.
pub const CLOTHING_TYPE_KEY: &str = "clothing_type";

/// Summary of the garment recognized in the uploaded photo.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    /// Recognized garment type, e.g. `"skirt"`.
    pub clothing_type: Option<String>,
    /// Attribute name to value, e.g. `color → "black"`. Key order carries no meaning.
    pub attributes: BTreeMap<String, String>,
}

impl AnalysisResult {
    /// Attributes to display, skipping the `clothing_type` entry which is
    /// shown on its own.
    pub fn display_attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .filter(|(key, _)| key.as_str() != CLOTHING_TYPE_KEY)
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clothing_type.is_none() && self.display_attributes().next().is_none()
    }
}
