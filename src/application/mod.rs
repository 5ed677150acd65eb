//! Application Layer
//!
//! Use cases that orchestrate the domain through its ports.

mod geo_lookup_service;

pub use geo_lookup_service::{local_date, FieldContext, GeoLookupService, PROVIDER_NAME};
