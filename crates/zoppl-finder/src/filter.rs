//! Visibility predicate for the active facet.

use zoppl_core::text::normalize_key;
use zoppl_core::{Facet, FacetKind, FilterSelection, Product};

/// Returns `true` when `product` belongs to the facet `kind`.
///
/// Length and colour facets match by substring, so `"midi-length"` is a
/// midi and `"black/white"` is black.
#[must_use]
pub fn matches_facet(product: &Product, kind: &FacetKind) -> bool {
    let attributes = &product.attributes;
    match kind {
        FacetKind::All => true,
        FacetKind::Retailer(retailer) => product.retailer.as_ref() == Some(retailer),
        FacetKind::Length(length) => attributes
            .length_key()
            .is_some_and(|value| value.contains(length.token())),
        FacetKind::Black => attributes
            .color_key()
            .is_some_and(|value| value.contains("black")),
        FacetKind::Colored => attributes
            .color_key()
            .is_some_and(|value| !value.contains("black")),
    }
}

/// Classifies `product` for a raw facet key, without a derived facet set.
///
/// Keys outside the fixed vocabulary are read as retailer names; a blank key
/// matches nothing.
#[must_use]
pub fn is_visible(product: &Product, active_key: &str) -> bool {
    FacetKind::from_key(active_key).is_some_and(|kind| matches_facet(product, &kind))
}

/// Holds the facets of the current result set and the single active selection.
#[derive(Debug, Clone)]
pub struct FilterEngine {
    facets: Vec<Facet>,
    selection: FilterSelection,
}

impl Default for FilterEngine {
    fn default() -> Self {
        Self::new(vec![Facet::all()])
    }
}

impl FilterEngine {
    /// Starts a new engine with `all` active.
    #[must_use]
    pub fn new(facets: Vec<Facet>) -> Self {
        Self {
            facets,
            selection: FilterSelection::default(),
        }
    }

    #[must_use]
    pub fn facets(&self) -> &[Facet] {
        &self.facets
    }

    #[must_use]
    pub fn active_key(&self) -> &str {
        self.selection.active_key()
    }

    /// Replaces the active selection.
    pub fn select(&mut self, key: &str) {
        self.selection.select(key);
        tracing::debug!(active = self.selection.active_key(), "facet selected");
    }

    /// Finds the offered facet a key refers to, honouring retailer aliases
    /// (`hm` finds the `h&m` facet).
    #[must_use]
    pub fn resolve(&self, key: &str) -> Option<&Facet> {
        let key = normalize_key(key);
        if let Some(facet) = self.facets.iter().find(|facet| facet.key == key) {
            return Some(facet);
        }
        let kind = FacetKind::from_key(&key)?;
        self.facets.iter().find(|facet| facet.kind == kind)
    }

    /// Classifies `product` for `active_key`.
    ///
    /// The fixed keys (`all`, lengths, `black`, `colored`) always apply their
    /// own rule. A retailer key must name an offered facet; any other key
    /// hides everything.
    #[must_use]
    pub fn is_visible(&self, product: &Product, active_key: &str) -> bool {
        match FacetKind::from_key(active_key) {
            Some(FacetKind::Retailer(_)) => self
                .resolve(active_key)
                .is_some_and(|facet| matches_facet(product, &facet.kind)),
            Some(kind) => matches_facet(product, &kind),
            None => false,
        }
    }

    /// Products visible under the current selection, in input order.
    #[must_use]
    pub fn visible<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        let active_key = self.selection.active_key();
        products
            .iter()
            .filter(|product| self.is_visible(product, active_key))
            .collect()
    }
}
