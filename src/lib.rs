//! geolite-adapter Library
//!
//! MaxMind GeoLite provider for a host geolocation plugin: resolves IP
//! addresses against local database files, refreshes those files through a
//! host-supplied download helper, and describes itself to the host.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;

// Re-export commonly used types
pub use application::{FieldContext, GeoLookupService};
pub use config::{load_config, Config, ConfigError};
pub use domain::entities::{
    CityRecord, DatabaseRecord, DatabaseState, DownloadArgs, DownloadResult, LookupResult,
    ProviderInfo, RefreshResult, SettingsField,
};
pub use domain::ports::{
    DownloadHelper, GeoDatabase, GeoDatabaseLibrary, ProviderRegistry, SettingsPanel,
};
pub use domain::services::DatabaseLocator;
pub use domain::value_objects::{DatabaseEdition, IpVersion};
