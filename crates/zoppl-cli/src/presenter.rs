//! Plain-text rendering of search results for the terminal.

use std::io::Write;

use zoppl_core::{AnalysisResult, Facet, Product};
use zoppl_finder::present::{analysis_rows, display_name, display_price, link_target};
use zoppl_finder::PresentationAdapter;

/// Writes analysis, facets and errors as they arrive. The product list is
/// held back until [`TerminalPresenter::finish`] so that only the final
/// selection is printed when a facet is applied after the initial render.
pub struct TerminalPresenter<W: Write> {
    out: W,
    pending: Option<Vec<String>>,
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out, pending: None }
    }

    /// Writes a line outside the adapter callbacks.
    pub fn note(&mut self, text: &str) {
        self.line(text);
    }

    /// Flushes the last product list, if one was presented.
    pub fn finish(&mut self) {
        if let Some(lines) = self.pending.take() {
            for line in lines {
                self.line(&line);
            }
        }
        if let Err(e) = self.out.flush() {
            tracing::warn!(error = %e, "failed to flush output");
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{text}") {
            tracing::warn!(error = %e, "failed to write output");
        }
    }
}

impl<W: Write> PresentationAdapter for TerminalPresenter<W> {
    fn on_busy(&mut self, busy: bool) {
        if busy {
            self.line("Analyzing image...");
        }
    }

    fn on_analysis(&mut self, analysis: Option<&AnalysisResult>) {
        let Some(analysis) = analysis.filter(|a| !a.is_empty()) else {
            return;
        };
        self.line("Analysis");
        for (label, value) in analysis_rows(analysis) {
            self.line(&format!("  {label}: {value}"));
        }
    }

    fn on_facets(&mut self, facets: &[Facet]) {
        let labels: Vec<String> = facets
            .iter()
            .map(|facet| {
                if facet.is_default_active {
                    format!("[{}]", facet.label)
                } else {
                    format!("{} ({})", facet.label, facet.key)
                }
            })
            .collect();
        self.line(&format!("Filters: {}", labels.join("  ")));
    }

    fn on_products(&mut self, products: &[&Product]) {
        let mut lines = Vec::with_capacity(products.len() * 3 + 1);
        if products.is_empty() {
            lines.push("No products match the selected filter.".to_string());
        } else {
            lines.push(format!("Results ({})", products.len()));
        }
        for (index, product) in products.iter().enumerate() {
            lines.extend(product_lines(index + 1, product));
        }
        self.pending = Some(lines);
    }

    fn on_empty(&mut self) {
        self.pending = None;
        self.line("No matching products found.");
    }

    fn on_error(&mut self, message: &str) {
        self.pending = None;
        self.line(&format!("error: {message}"));
    }
}

fn product_lines(position: usize, product: &Product) -> Vec<String> {
    let mut heading = format!("{position:>3}. {}", display_name(product));
    if let Some(price) = &product.price {
        heading.push_str(&format!("  {}", display_price(price)));
    }
    if let Some(retailer) = &product.retailer {
        heading.push_str(&format!("  [{}]", retailer.label()));
    }
    if !product.is_available() {
        heading.push_str("  (unavailable)");
    }

    let mut lines = vec![heading];
    if let Some(image) = product.secure_image_url() {
        lines.push(format!("     image: {image}"));
    }
    lines.push(format!("     link:  {}", link_target(product)));
    let tags: Vec<&str> = product.attributes.tags().collect();
    if !tags.is_empty() {
        lines.push(format!("     tags:  {}", tags.join(", ")));
    }
    lines
}
