//! Database Locator Service
//!
//! Single source of truth for where database files live and where they are
//! downloaded from. Lookup, refresh and the settings page all derive their
//! paths from the same locator, so they cannot disagree.

use crate::domain::value_objects::IpVersion;
use std::path::{Path, PathBuf};

/// Filename of the IPv4 database inside the database directory.
pub const IPV4_FILENAME: &str = "GeoIP.dat";
/// Filename of the IPv6 database inside the database directory.
pub const IPV6_FILENAME: &str = "GeoIPv6.dat";

pub const IPV4_URL: &str =
    "http://geolite.maxmind.com/download/geoip/database/GeoLiteCountry/GeoIP.dat.gz";
pub const IPV6_URL: &str = "http://geolite.maxmind.com/download/geoip/database/GeoIPv6.dat.gz";

/// Resolves database paths and source URLs per IP version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseLocator {
    dir: PathBuf,
    ipv4_url: String,
    ipv6_url: String,
}

impl DatabaseLocator {
    /// Locator for `dir` with the default MaxMind URLs.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ipv4_url: IPV4_URL.to_string(),
            ipv6_url: IPV6_URL.to_string(),
        }
    }

    /// Override the source URL for one IP version.
    pub fn with_url(mut self, version: IpVersion, url: impl Into<String>) -> Self {
        match version {
            IpVersion::V4 => self.ipv4_url = url.into(),
            IpVersion::V6 => self.ipv6_url = url.into(),
        }
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn filename(version: IpVersion) -> &'static str {
        match version {
            IpVersion::V4 => IPV4_FILENAME,
            IpVersion::V6 => IPV6_FILENAME,
        }
    }

    /// On-disk path of the database for `version`.
    pub fn path(&self, version: IpVersion) -> PathBuf {
        self.dir.join(Self::filename(version))
    }

    pub fn url(&self, version: IpVersion) -> &str {
        match version {
            IpVersion::V4 => &self.ipv4_url,
            IpVersion::V6 => &self.ipv6_url,
        }
    }
}
