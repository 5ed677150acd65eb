//! MaxMind Database Library
//!
//! Implements GeoDatabaseLibrary on top of the `maxminddb` reader.

use crate::domain::entities::CityRecord;
use crate::domain::ports::{GeoDatabase, GeoDatabaseLibrary};
use crate::domain::value_objects::DatabaseEdition;
use maxminddb::Reader;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::path::Path;

#[derive(Debug, Deserialize)]
struct Country {
    iso_code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Location {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct CountryResp {
    country: Option<Country>,
}

#[derive(Debug, Deserialize)]
struct CityResp {
    country: Option<Country>,
    location: Option<Location>,
}

/// Opens MaxMind DB files from disk.
///
/// The files at the locator paths (`GeoIP.dat`, `GeoIPv6.dat`) must hold
/// MaxMind DB (`.mmdb`) content. The legacy GeoLite `.dat.gz` archives that
/// the default URLs serve are a different binary format; hosts that install
/// those need a `GeoDatabaseLibrary` backed by a legacy-format reader.
///
/// The whole file is read into memory on open and released on close.
#[derive(Debug, Default, Clone, Copy)]
pub struct MaxMindDatabaseLibrary;

impl MaxMindDatabaseLibrary {
    pub fn new() -> Self {
        Self
    }
}

impl GeoDatabaseLibrary for MaxMindDatabaseLibrary {
    fn open(&self, path: &Path) -> Option<Box<dyn GeoDatabase>> {
        match MaxMindDatabase::from_file(path) {
            Ok(db) => Some(Box::new(db)),
            Err(e) => {
                tracing::warn!("failed to load GeoIP DB from {}: {:?}", path.display(), e);
                None
            }
        }
    }
}

/// An open MaxMind DB file.
pub struct MaxMindDatabase {
    reader: Option<Reader<Vec<u8>>>,
    edition: DatabaseEdition,
}

impl MaxMindDatabase {
    /// Load a database from a file path.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let reader = Reader::open_readfile(path)?;
        Ok(Self::from_reader(reader))
    }

    /// Load a database from raw bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> anyhow::Result<Self> {
        let reader = Reader::from_source(bytes)?;
        Ok(Self::from_reader(reader))
    }

    fn from_reader(reader: Reader<Vec<u8>>) -> Self {
        let edition = DatabaseEdition::from_metadata(
            &reader.metadata.database_type,
            reader.metadata.ip_version,
        );
        Self {
            reader: Some(reader),
            edition,
        }
    }

    fn country(&self, ip: IpAddr) -> Option<String> {
        let resp: CountryResp = self.reader.as_ref()?.lookup(ip).ok()?;
        resp.country?.iso_code
    }

    fn city(&self, ip: IpAddr) -> Option<CityRecord> {
        let resp: CityResp = self.reader.as_ref()?.lookup(ip).ok()?;
        let location = resp.location;

        Some(CityRecord {
            country_code: resp.country.and_then(|c| c.iso_code).unwrap_or_default(),
            latitude: location.as_ref().and_then(|l| l.latitude),
            longitude: location.as_ref().and_then(|l| l.longitude),
        })
    }
}

impl GeoDatabase for MaxMindDatabase {
    fn edition(&self) -> DatabaseEdition {
        self.edition
    }

    fn country_code_v4(&self, ip: Ipv4Addr) -> Option<String> {
        self.country(IpAddr::V4(ip))
    }

    fn country_code_v6(&self, ip: Ipv6Addr) -> Option<String> {
        self.country(IpAddr::V6(ip))
    }

    fn city_record_v4(&self, ip: Ipv4Addr) -> Option<CityRecord> {
        self.city(IpAddr::V4(ip))
    }

    fn city_record_v6(&self, ip: Ipv6Addr) -> Option<CityRecord> {
        self.city(IpAddr::V6(ip))
    }

    fn close(&mut self) {
        self.reader = None;
    }
}
