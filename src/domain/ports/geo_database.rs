//! GeoIP Database Port
//!
//! Defines the interface to the library that reads GeoIP database files.
//! The adapter never parses database files itself.

use crate::domain::entities::CityRecord;
use crate::domain::value_objects::DatabaseEdition;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::path::Path;

/// Opens database files.
///
/// This is an outbound port. Implementations may wrap MaxMind DB readers,
/// legacy GeoIP bindings, or test stubs.
pub trait GeoDatabaseLibrary: Send + Sync {
    /// Open the database at `path`.
    ///
    /// Returns None if the file cannot be opened or is not a database.
    fn open(&self, path: &Path) -> Option<Box<dyn GeoDatabase>>;
}

/// An open database handle.
///
/// Lookup primitives return None when the address has no record.
pub trait GeoDatabase: Send {
    /// Edition declared by the file, mapped at the boundary.
    fn edition(&self) -> DatabaseEdition;

    fn country_code_v4(&self, ip: Ipv4Addr) -> Option<String>;

    fn country_code_v6(&self, ip: Ipv6Addr) -> Option<String>;

    fn city_record_v4(&self, ip: Ipv4Addr) -> Option<CityRecord>;

    fn city_record_v6(&self, ip: Ipv6Addr) -> Option<CityRecord>;

    /// Release the handle. Called exactly once, by `OpenDatabase`.
    fn close(&mut self);
}
