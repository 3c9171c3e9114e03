//! Core library for the `meteo` dashboard CLI.
//!
//! This crate defines:
//! - Configuration (search options, climate range, endpoint hosts)
//! - Location search and per-feature data fetching against Open-Meteo
//! - Typed responses for every feature panel
//! - The search-then-select workflow shared by all panels
//! - Detail views (cards, charts, links) built from fetched data
//!
//! It is used by `meteo-cli`, but can also be reused by other front ends.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod view;
pub mod workflow;

pub use config::Config;
pub use error::NetworkError;
pub use model::{DomainQuery, DomainResult, LocationCandidate};
pub use provider::{
    FeatureFetcher, FeatureKind, LocationResolver, client_from_config, openmeteo::OpenMeteoClient,
};
pub use view::DetailView;
pub use workflow::{Detail, PanelKind, PanelState, Workflow};
