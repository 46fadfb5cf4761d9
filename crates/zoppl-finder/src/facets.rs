//! Derives the filter facets offered for a validated product set.
//!
//! Facets are emitted in a fixed category order: `All`, then retailers in
//! first-seen order, then lengths (`Mini`, `Midi`, `Maxi`), then colour
//! groups. A category only gets a facet when at least one product backs it.

use std::collections::HashSet;

use indexmap::IndexSet;

use zoppl_core::facets::ALL_KEY;
use zoppl_core::{Facet, FacetKind, GarmentLength, Product, Retailer};

const BLACK: &str = "black";

/// Garment types for which a length facet is meaningful.
const LENGTH_RELEVANT_GARMENTS: [&str; 2] = ["skirt", "dress"];

/// Keys owned by non-retailer facets. A retailer whose name collides with one
/// of these gets no facet, keeping keys unique within a derivation.
const RESERVED_KEYS: [&str; 6] = [ALL_KEY, "mini", "midi", "maxi", BLACK, "colored"];

/// Derives the ordered facet list for `products`, which must already be validated.
#[must_use]
pub fn derive_facets(products: &[Product]) -> Vec<Facet> {
    let mut retailers: IndexSet<&Retailer> = IndexSet::new();
    let mut lengths: HashSet<String> = HashSet::new();
    let mut clothing_types: HashSet<String> = HashSet::new();
    let mut colors: HashSet<String> = HashSet::new();

    for product in products {
        if let Some(retailer) = &product.retailer {
            retailers.insert(retailer);
        }
        let attributes = &product.attributes;
        lengths.extend(attributes.length_key());
        clothing_types.extend(attributes.clothing_type_key());
        colors.extend(attributes.color_key());
    }

    let mut facets = vec![Facet::all()];

    for retailer in retailers {
        if RESERVED_KEYS.contains(&retailer.key()) {
            tracing::debug!(retailer = %retailer, "retailer name collides with a filter key");
            continue;
        }
        facets.push(Facet::new(FacetKind::Retailer(retailer.clone())));
    }

    let has_length_relevant_garment = clothing_types.iter().any(|clothing_type| {
        LENGTH_RELEVANT_GARMENTS
            .iter()
            .any(|garment| clothing_type.contains(garment))
    });
    if has_length_relevant_garment {
        facets.extend(
            GarmentLength::ALL
                .into_iter()
                .filter(|length| lengths.contains(length.token()))
                .map(|length| Facet::new(FacetKind::Length(length))),
        );
    }

    let has_black = colors.contains(BLACK);
    if has_black {
        facets.push(Facet::new(FacetKind::Black));
    }
    if colors.len() > 1 || (colors.len() == 1 && !has_black) {
        facets.push(Facet::new(FacetKind::Colored));
    }

    facets
}
