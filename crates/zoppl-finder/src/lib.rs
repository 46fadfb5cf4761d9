pub mod client;
pub mod error;
pub mod facets;
pub mod filter;
pub mod normalize;
pub mod present;
pub mod session;
pub mod upload;
pub mod validate;

pub use client::FinderClient;
pub use error::FinderError;
pub use facets::derive_facets;
pub use filter::{is_visible, matches_facet, FilterEngine};
pub use normalize::{interpret_response, normalize_response, service_failure, NormalizedResponse};
pub use session::{PresentationAdapter, SearchSession, SearchState};
pub use upload::ImageUpload;
pub use validate::{is_displayable, validate_products};
