//! Domain model and configuration shared by the Zoppl fashion finder crates.

pub mod analysis;
pub mod app_config;
pub mod config;
pub mod facets;
pub mod products;
pub mod text;

use thiserror::Error;

pub use analysis::AnalysisResult;
pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use facets::{Facet, FacetKind, FilterSelection, GarmentLength};
pub use products::{Product, ProductAttributes, Retailer};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
