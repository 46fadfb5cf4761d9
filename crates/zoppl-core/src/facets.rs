//! Filter facets offered to the user and the single active selection.

use serde::Serialize;

use crate::products::Retailer;
use crate::text::normalize_key;

/// Key of the unconditional facet that shows every product.
pub const ALL_KEY: &str = "all";

/// Skirt and dress lengths offered as facets, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GarmentLength {
    Mini,
    Midi,
    Maxi,
}

impl GarmentLength {
    /// Fixed emission order for length facets.
    pub const ALL: [GarmentLength; 3] = [Self::Mini, Self::Midi, Self::Maxi];

    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            Self::Mini => "mini",
            Self::Midi => "midi",
            Self::Maxi => "maxi",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Mini => "Mini",
            Self::Midi => "Midi",
            Self::Maxi => "Maxi",
        }
    }
}

/// What a facet filters on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FacetKind {
    All,
    Retailer(Retailer),
    Length(GarmentLength),
    /// Products whose colour mentions black.
    Black,
    /// Products with a colour that does not mention black.
    Colored,
}

impl FacetKind {
    /// Resolves a facet key (case and surrounding whitespace ignored).
    ///
    /// Keys that are not one of the fixed tokens are read as retailer names,
    /// so `"hm"` and `"h&m"` resolve to the same facet. Returns `None` for a
    /// blank key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        let key = normalize_key(key);
        let kind = match key.as_str() {
            ALL_KEY => Self::All,
            "black" => Self::Black,
            "colored" => Self::Colored,
            other => {
                if let Some(length) = GarmentLength::ALL.into_iter().find(|l| l.token() == other) {
                    Self::Length(length)
                } else {
                    Self::Retailer(Retailer::from_name(other)?)
                }
            }
        };
        Some(kind)
    }

    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::All => "All".to_string(),
            Self::Retailer(retailer) => retailer.label(),
            Self::Length(length) => length.label().to_string(),
            Self::Black => "Black".to_string(),
            Self::Colored => "Colored".to_string(),
        }
    }
}

/// A single filter offering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Facet {
    /// Human-cased display label, e.g. `"Zara"`.
    pub label: String,
    /// Lower-cased trimmed label; the facet's identity within one derivation.
    pub key: String,
    pub is_default_active: bool,
    #[serde(skip)]
    pub kind: FacetKind,
}

impl Facet {
    #[must_use]
    pub fn new(kind: FacetKind) -> Self {
        let label = kind.label();
        Self {
            key: normalize_key(&label),
            is_default_active: kind == FacetKind::All,
            label,
            kind,
        }
    }

    #[must_use]
    pub fn all() -> Self {
        Self::new(FacetKind::All)
    }
}

/// The currently active facet key.
///
/// There is no "nothing selected" state: a new selection replaces the old one
/// and `all` is both the initial and the fallback value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    active_key: String,
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self {
            active_key: ALL_KEY.to_string(),
        }
    }
}

impl FilterSelection {
    #[must_use]
    pub fn active_key(&self) -> &str {
        &self.active_key
    }

    /// Replaces the active key. A blank key falls back to `all`.
    pub fn select(&mut self, key: &str) {
        let key = normalize_key(key);
        self.active_key = if key.is_empty() {
            ALL_KEY.to_string()
        } else {
            key
        };
    }

    pub fn reset(&mut self) {
        self.active_key = ALL_KEY.to_string();
    }
}
