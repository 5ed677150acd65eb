//! Value Objects - Immutable domain primitives
//!
//! Value objects are identified by their value rather than identity.
//! They are immutable and can be freely shared.

use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// IP protocol version of an address or a database file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IpVersion {
    V4,
    V6,
}

impl IpVersion {
    /// Parse an IP literal and return it together with its version.
    ///
    /// Returns None for anything that is not a plain IPv4 or IPv6 literal
    /// (no ports, no zone ids, no surrounding whitespace).
    pub fn parse(ip: &str) -> Option<(IpAddr, Self)> {
        let addr: IpAddr = ip.parse().ok()?;
        Some((addr, Self::of(&addr)))
    }

    pub fn of(addr: &IpAddr) -> Self {
        match addr {
            IpAddr::V4(_) => Self::V4,
            IpAddr::V6(_) => Self::V6,
        }
    }

    /// Short key used in persisted state and settings ids.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::V4 => "ipv4",
            Self::V6 => "ipv6",
        }
    }

    /// Human label used in settings field titles.
    pub fn label(&self) -> &'static str {
        match self {
            Self::V4 => "IPv4",
            Self::V6 => "IPv6",
        }
    }
}

impl std::fmt::Display for IpVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Edition of a GeoIP database file.
///
/// Raw tags reported by a database library are mapped into this enum at the
/// adapter boundary, so lookup dispatch is a total match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatabaseEdition {
    CountryV4,
    CountryV6,
    CityV4,
    CityV6,
    Unknown,
}

impl DatabaseEdition {
    /// Legacy GeoIP `databaseType` values.
    pub const LEGACY_COUNTRY: u8 = 1;
    pub const LEGACY_CITY_REV1: u8 = 2;
    pub const LEGACY_COUNTRY_V6: u8 = 12;
    pub const LEGACY_CITY_REV1_V6: u8 = 30;

    /// Map a legacy GeoIP edition tag.
    pub fn from_legacy_tag(tag: u8) -> Self {
        match tag {
            Self::LEGACY_COUNTRY => Self::CountryV4,
            Self::LEGACY_COUNTRY_V6 => Self::CountryV6,
            Self::LEGACY_CITY_REV1 => Self::CityV4,
            Self::LEGACY_CITY_REV1_V6 => Self::CityV6,
            _ => Self::Unknown,
        }
    }

    /// Map MaxMind DB metadata (`database_type`, `ip_version`).
    ///
    /// `database_type` values look like `GeoLite2-Country`, `GeoIP2-City`
    /// or `DBIP-City-Lite`; only the country and city families are known.
    pub fn from_metadata(database_type: &str, ip_version: u16) -> Self {
        let kind = database_type.to_ascii_lowercase();
        let is_city = kind.ends_with("-city") || kind.contains("-city-");
        let is_country = kind.ends_with("-country") || kind.contains("-country-");

        match (is_city, is_country, ip_version) {
            (true, _, 4) => Self::CityV4,
            (true, _, 6) => Self::CityV6,
            (false, true, 4) => Self::CountryV4,
            (false, true, 6) => Self::CountryV6,
            _ => Self::Unknown,
        }
    }
}

impl std::fmt::Display for DatabaseEdition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::CountryV4 => "country",
            Self::CountryV6 => "country-v6",
            Self::CityV4 => "city",
            Self::CityV6 => "city-v6",
            Self::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== IpVersion Tests =====

    #[test]
    fn test_parse_ipv4() {
        let (addr, version) = IpVersion::parse("8.8.8.8").unwrap();
        assert_eq!(version, IpVersion::V4);
        assert_eq!(addr.to_string(), "8.8.8.8");
    }

    #[test]
    fn test_parse_ipv6() {
        let (_, version) = IpVersion::parse("2001:4860:4860::8888").unwrap();
        assert_eq!(version, IpVersion::V6);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let invalid = vec![
            "",
            "localhost",
            "256.1.1.1",
            "1.2.3",
            "1.2.3.4:80",
            " 1.2.3.4",
            "fe80::1%eth0",
            "2001:db8::g",
        ];

        for input in invalid {
            assert!(IpVersion::parse(input).is_none(), "accepted: {:?}", input);
        }
    }

    #[test]
    fn test_ip_version_strings() {
        assert_eq!(IpVersion::V4.as_str(), "ipv4");
        assert_eq!(IpVersion::V6.as_str(), "ipv6");
        assert_eq!(IpVersion::V4.label(), "IPv4");
        assert_eq!(IpVersion::V6.to_string(), "ipv6");
    }

    // ===== DatabaseEdition Tests =====

    #[test]
    fn test_from_legacy_tag() {
        let tests = vec![
            (1, DatabaseEdition::CountryV4),
            (12, DatabaseEdition::CountryV6),
            (2, DatabaseEdition::CityV4),
            (30, DatabaseEdition::CityV6),
        ];

        for (tag, expected) in tests {
            assert_eq!(DatabaseEdition::from_legacy_tag(tag), expected, "tag {}", tag);
        }
    }

    #[test]
    fn test_from_legacy_tag_unknown() {
        for tag in [0, 3, 6, 7, 11, 31, 255] {
            assert_eq!(DatabaseEdition::from_legacy_tag(tag), DatabaseEdition::Unknown);
        }
    }

    #[test]
    fn test_from_metadata() {
        let tests = vec![
            ("GeoLite2-Country", 6, DatabaseEdition::CountryV6),
            ("GeoLite2-Country", 4, DatabaseEdition::CountryV4),
            ("GeoIP2-City", 6, DatabaseEdition::CityV6),
            ("GeoLite2-City", 4, DatabaseEdition::CityV4),
            ("DBIP-City-Lite", 6, DatabaseEdition::CityV6),
            ("DBIP-Country-Lite", 6, DatabaseEdition::CountryV6),
        ];

        for (kind, version, expected) in tests {
            assert_eq!(
                DatabaseEdition::from_metadata(kind, version),
                expected,
                "Failed for {} v{}",
                kind,
                version
            );
        }
    }

    #[test]
    fn test_from_metadata_unknown() {
        assert_eq!(
            DatabaseEdition::from_metadata("GeoLite2-ASN", 6),
            DatabaseEdition::Unknown
        );
        assert_eq!(
            DatabaseEdition::from_metadata("GeoLite2-City", 5),
            DatabaseEdition::Unknown
        );
        assert_eq!(DatabaseEdition::from_metadata("", 4), DatabaseEdition::Unknown);
    }
}
