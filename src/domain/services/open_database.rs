//! Scoped database handle.

use crate::domain::entities::LookupResult;
use crate::domain::ports::GeoDatabase;
use crate::domain::value_objects::DatabaseEdition;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Owns an open database and closes it when dropped.
///
/// Every return path out of a lookup drops the guard, so the handle is
/// released on success, on error, and on early return alike.
pub struct OpenDatabase {
    inner: Box<dyn GeoDatabase>,
}

impl OpenDatabase {
    pub fn new(inner: Box<dyn GeoDatabase>) -> Self {
        Self { inner }
    }

    pub fn edition(&self) -> DatabaseEdition {
        self.inner.edition()
    }

    /// Dispatch on the declared edition and shape the result.
    ///
    /// An address with no record gives an empty country code, and for city
    /// editions null coordinates.
    pub fn lookup(&self, ip: IpAddr) -> LookupResult {
        match self.edition() {
            DatabaseEdition::CountryV4 => LookupResult::Country {
                country_code: as_v4(ip)
                    .and_then(|v4| self.inner.country_code_v4(v4))
                    .unwrap_or_default(),
            },
            DatabaseEdition::CountryV6 => LookupResult::Country {
                country_code: self.inner.country_code_v6(as_v6(ip)).unwrap_or_default(),
            },
            DatabaseEdition::CityV4 => as_v4(ip)
                .and_then(|v4| self.inner.city_record_v4(v4))
                .unwrap_or_default()
                .into(),
            DatabaseEdition::CityV6 => self
                .inner
                .city_record_v6(as_v6(ip))
                .unwrap_or_default()
                .into(),
            DatabaseEdition::Unknown => LookupResult::unknown_database_type(),
        }
    }
}

impl Drop for OpenDatabase {
    fn drop(&mut self) {
        self.inner.close();
    }
}

/// IPv4 view of an address: itself, or the IPv4 embedded in a mapped or
/// compatible IPv6 address.
fn as_v4(ip: IpAddr) -> Option<Ipv4Addr> {
    match ip {
        IpAddr::V4(v4) => Some(v4),
        IpAddr::V6(v6) => v6.to_ipv4(),
    }
}

/// IPv6 view of an address; IPv4 becomes `::ffff:a.b.c.d`.
fn as_v6(ip: IpAddr) -> Ipv6Addr {
    match ip {
        IpAddr::V4(v4) => v4.to_ipv6_mapped(),
        IpAddr::V6(v6) => v6,
    }
}
