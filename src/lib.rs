pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::JsonFileSink;
pub use config::EnrichConfig;
pub use core::{
    engine::EnrichmentEngine, registry::SamGovClient, search::WebSearchClient, site::SiteScraper,
    ClientSettings,
};
pub use domain::model::{CompanyQuery, EnrichedProfile, FieldMap, SourceKind, SourceResult, SourceSurvey};
pub use domain::ports::{DocumentTextSource, ProfileSink, RegistrySource, SearchSource, SiteSource};
pub use domain::record::CompanyProfileRecord;
pub use utils::error::{EnrichError, Result};
