//! Per-upload search state and the presentation boundary it drives.
//!
//! A [`SearchSession`] owns the only mutable state of the finder: the current
//! [`SearchState`] (validated products, derived facets, active selection).
//! Every submission rebuilds it from scratch; nothing is cached between
//! uploads. Submissions take `&mut self`, so one session never has two
//! requests in flight.

use std::path::Path;

use serde_json::Value;

use zoppl_core::{AnalysisResult, Facet, Product};

use crate::client::FinderClient;
use crate::error::FinderError;
use crate::facets::derive_facets;
use crate::filter::FilterEngine;
use crate::normalize::{interpret_response, NormalizedResponse};
use crate::upload::ImageUpload;
use crate::validate::validate_products;

/// Rendering side of the finder. Implementations decide how results look;
/// the session decides what is shown and when.
pub trait PresentationAdapter {
    /// Submit control disabled (`true`) or re-enabled (`false`). Always
    /// re-enabled once the request finishes, whatever the outcome.
    fn on_busy(&mut self, _busy: bool) {}

    /// Garment analysis for the latest response, `None` when the response
    /// carried none.
    fn on_analysis(&mut self, analysis: Option<&AnalysisResult>);

    fn on_facets(&mut self, facets: &[Facet]);

    /// Products visible under the active facet, in service order.
    fn on_products(&mut self, products: &[&Product]);

    /// No displayable products in the latest response.
    fn on_empty(&mut self);

    fn on_error(&mut self, message: &str);
}

/// Validated products, their facets and the active selection for one response.
#[derive(Debug, Clone)]
pub struct SearchState {
    analysis: Option<AnalysisResult>,
    search_term: Option<String>,
    products: Vec<Product>,
    filter: FilterEngine,
}

impl SearchState {
    /// Validates the products, derives facets and starts with `all` active.
    #[must_use]
    pub fn from_response(response: NormalizedResponse) -> Self {
        let products = validate_products(response.products);
        let filter = FilterEngine::new(derive_facets(&products));
        Self {
            analysis: response.analysis,
            search_term: response.search_term,
            products,
            filter,
        }
    }

    #[must_use]
    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.analysis.as_ref()
    }

    #[must_use]
    pub fn search_term(&self) -> Option<&str> {
        self.search_term.as_deref()
    }

    /// All validated products, regardless of the active facet.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn facets(&self) -> &[Facet] {
        self.filter.facets()
    }

    #[must_use]
    pub fn active_key(&self) -> &str {
        self.filter.active_key()
    }

    /// Whether `key` names one of the offered facets (aliases included).
    #[must_use]
    pub fn offers(&self, key: &str) -> bool {
        self.filter.resolve(key).is_some()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    #[must_use]
    pub fn visible_products(&self) -> Vec<&Product> {
        self.filter.visible(&self.products)
    }

    /// Replaces the active facet and returns the new visible set.
    pub fn select_facet(&mut self, key: &str) -> Vec<&Product> {
        self.filter.select(key);
        self.visible_products()
    }
}

/// Drives one user's uploads and facet selections.
#[derive(Debug, Default)]
pub struct SearchSession {
    state: Option<SearchState>,
}

impl SearchSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// State of the last successful response, if any.
    #[must_use]
    pub fn state(&self) -> Option<&SearchState> {
        self.state.as_ref()
    }

    /// Validates the image at `image`, posts it, and presents the outcome.
    ///
    /// A bad selection is reported before any request and leaves the
    /// previous results in place. Otherwise previous results are cleared,
    /// the presenter is marked busy for the duration of the request, and
    /// released again on every path.
    ///
    /// # Errors
    ///
    /// Returns the [`FinderError`] that was also reported through
    /// [`PresentationAdapter::on_error`].
    pub async fn submit<P>(
        &mut self,
        client: &FinderClient,
        image: &Path,
        max_image_bytes: u64,
        presenter: &mut P,
    ) -> Result<(), FinderError>
    where
        P: PresentationAdapter + ?Sized,
    {
        let upload = match ImageUpload::read(image, max_image_bytes).await {
            Ok(upload) => upload,
            Err(err) => {
                tracing::warn!(image = %image.display(), error = %err, "image rejected");
                presenter.on_error(&err.user_message());
                return Err(err);
            }
        };

        self.state = None;
        presenter.on_busy(true);
        let response = client.analyze_image(&upload).await;
        presenter.on_busy(false);

        let outcome = response.and_then(|data| self.render_response(&data, presenter));
        if let Err(err) = &outcome {
            tracing::warn!(error = %err, "analysis submission failed");
            presenter.on_error(&err.user_message());
        }
        outcome
    }

    /// Presents an already received payload, e.g. one replayed from disk.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::ServiceFailure`] for a `status: false` payload,
    /// after reporting it through [`PresentationAdapter::on_error`].
    pub fn handle_response<P>(&mut self, data: &Value, presenter: &mut P) -> Result<(), FinderError>
    where
        P: PresentationAdapter + ?Sized,
    {
        self.state = None;
        let outcome = self.render_response(data, presenter);
        if let Err(err) = &outcome {
            presenter.on_error(&err.user_message());
        }
        outcome
    }

    /// Applies a facet selection to the current results.
    ///
    /// Returns `false` (and presents nothing) when there are no results yet.
    pub fn select_facet<P>(&mut self, key: &str, presenter: &mut P) -> bool
    where
        P: PresentationAdapter + ?Sized,
    {
        let Some(state) = self.state.as_mut() else {
            return false;
        };
        let visible = state.select_facet(key);
        presenter.on_products(&visible);
        true
    }

    fn render_response<P>(&mut self, data: &Value, presenter: &mut P) -> Result<(), FinderError>
    where
        P: PresentationAdapter + ?Sized,
    {
        let state = SearchState::from_response(interpret_response(data)?);

        presenter.on_analysis(state.analysis());
        if state.is_empty() {
            presenter.on_empty();
        } else {
            presenter.on_facets(state.facets());
            presenter.on_products(&state.visible_products());
        }

        tracing::info!(
            products = state.products().len(),
            facets = state.facets().len(),
            has_analysis = state.analysis().is_some(),
            "analysis response presented"
        );
        self.state = Some(state);
        Ok(())
    }
}
