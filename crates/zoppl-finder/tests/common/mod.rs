//! Presenter that records every callback for assertions.

#![allow(dead_code)]

use zoppl_core::{AnalysisResult, Facet, Product};
use zoppl_finder::PresentationAdapter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Busy(bool),
    Analysis(Option<AnalysisResult>),
    /// Facet labels in order.
    Facets(Vec<String>),
    /// Visible product names in order.
    Products(Vec<String>),
    Empty,
    Error(String),
}

#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub events: Vec<Event>,
}

impl RecordingPresenter {
    pub fn errors(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Error(message) => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn last_products(&self) -> Option<&[String]> {
        self.events.iter().rev().find_map(|event| match event {
            Event::Products(names) => Some(names.as_slice()),
            _ => None,
        })
    }

    pub fn facet_labels(&self) -> Option<&[String]> {
        self.events.iter().rev().find_map(|event| match event {
            Event::Facets(labels) => Some(labels.as_slice()),
            _ => None,
        })
    }

    pub fn saw_analysis(&self) -> bool {
        self.events
            .iter()
            .any(|event| matches!(event, Event::Analysis(_)))
    }
}

impl PresentationAdapter for RecordingPresenter {
    fn on_busy(&mut self, busy: bool) {
        self.events.push(Event::Busy(busy));
    }

    fn on_analysis(&mut self, analysis: Option<&AnalysisResult>) {
        self.events.push(Event::Analysis(analysis.cloned()));
    }

    fn on_facets(&mut self, facets: &[Facet]) {
        self.events
            .push(Event::Facets(facets.iter().map(|f| f.label.clone()).collect()));
    }

    fn on_products(&mut self, products: &[&Product]) {
        self.events.push(Event::Products(
            products
                .iter()
                .map(|p| p.name.clone().unwrap_or_default())
                .collect(),
        ));
    }

    fn on_empty(&mut self) {
        self.events.push(Event::Empty);
    }

    fn on_error(&mut self, message: &str) {
        self.events.push(Event::Error(message.to_string()));
    }
}
