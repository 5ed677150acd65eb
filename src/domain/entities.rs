//! Domain Entities - Core business objects
//!
//! These entities represent the lookup results and the download bookkeeping
//! that the adapter exchanges with its host. They have no external
//! dependencies beyond serde.

use crate::domain::value_objects::IpVersion;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::path::PathBuf;
use std::time::Duration;

/// Error message for an address that is neither IPv4 nor IPv6.
pub const ILLEGAL_FORMAT: &str = "illegal format";

/// Error message for a database whose edition is not country or city.
pub const UNKNOWN_DATABASE_TYPE: &str = "unknown database type";

/// Outcome of a single lookup.
///
/// Exactly one shape is produced per call. `Unavailable` means the database
/// file is missing or could not be opened, which callers treat as "no data"
/// rather than as bad input.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupResult {
    Country {
        country_code: String,
    },
    /// Coordinates are None when the record has no location.
    City {
        country_code: String,
        latitude: Option<f64>,
        longitude: Option<f64>,
    },
    Error {
        error_message: String,
    },
    Unavailable,
}

impl LookupResult {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            error_message: message.into(),
        }
    }

    pub fn illegal_format() -> Self {
        Self::error(ILLEGAL_FORMAT)
    }

    pub fn unknown_database_type() -> Self {
        Self::error(UNKNOWN_DATABASE_TYPE)
    }

    /// Country code of a successful lookup.
    pub fn country_code(&self) -> Option<&str> {
        match self {
            Self::Country { country_code } | Self::City { country_code, .. } => {
                Some(country_code)
            }
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error { error_message } => Some(error_message),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Country { .. } | Self::City { .. })
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable)
    }
}

/// Serialises to the associative shapes hosts expect:
/// `{"countryCode"}`, `{"countryCode","latitude","longitude"}`,
/// `{"errorMessage"}` or a bare `false`. Missing coordinates become `null`.
impl Serialize for LookupResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Country { country_code } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("countryCode", country_code)?;
                map.end()
            }
            Self::City {
                country_code,
                latitude,
                longitude,
            } => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("countryCode", country_code)?;
                map.serialize_entry("latitude", latitude)?;
                map.serialize_entry("longitude", longitude)?;
                map.end()
            }
            Self::Error { error_message } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("errorMessage", error_message)?;
                map.end()
            }
            Self::Unavailable => serializer.serialize_bool(false),
        }
    }
}

/// Raw city record as returned by a database library.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CityRecord {
    pub country_code: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl From<CityRecord> for LookupResult {
    fn from(record: CityRecord) -> Self {
        Self::City {
            country_code: record.country_code,
            latitude: record.latitude,
            longitude: record.longitude,
        }
    }
}

/// Last successful download of one database file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseRecord {
    /// Where the helper left the file, None if it produced nothing
    pub path: Option<PathBuf>,
    /// Remote modification time as a unix timestamp, 0 = never fetched
    pub last_modified: u64,
}

impl DatabaseRecord {
    /// Fold a download result into this record.
    ///
    /// An empty filename clears the path and a missing modification time
    /// resets the watermark to 0.
    pub fn apply(&mut self, result: &DownloadResult) {
        self.path = result
            .filename
            .as_ref()
            .filter(|p| !p.as_os_str().is_empty())
            .cloned();
        self.last_modified = result.modified.unwrap_or(0);
    }
}

/// Download bookkeeping for both database files.
///
/// Owned and persisted by the host; only `refresh_databases` mutates it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseState {
    pub ipv4_path: Option<PathBuf>,
    #[serde(default)]
    pub ipv4_last: u64,
    pub ipv6_path: Option<PathBuf>,
    #[serde(default)]
    pub ipv6_last: u64,
}

impl DatabaseState {
    pub fn record(&self, version: IpVersion) -> DatabaseRecord {
        match version {
            IpVersion::V4 => DatabaseRecord {
                path: self.ipv4_path.clone(),
                last_modified: self.ipv4_last,
            },
            IpVersion::V6 => DatabaseRecord {
                path: self.ipv6_path.clone(),
                last_modified: self.ipv6_last,
            },
        }
    }

    pub fn set_record(&mut self, version: IpVersion, record: DatabaseRecord) {
        match version {
            IpVersion::V4 => {
                self.ipv4_path = record.path;
                self.ipv4_last = record.last_modified;
            }
            IpVersion::V6 => {
                self.ipv6_path = record.path;
                self.ipv6_last = record.last_modified;
            }
        }
    }

    /// Fold one version's download result into the state.
    pub fn apply(&mut self, version: IpVersion, result: &DownloadResult) {
        let mut record = self.record(version);
        record.apply(result);
        self.set_record(version, record);
    }

    pub fn last_modified(&self, version: IpVersion) -> u64 {
        match version {
            IpVersion::V4 => self.ipv4_last,
            IpVersion::V6 => self.ipv6_last,
        }
    }
}

/// What a download helper reports for one file.
///
/// Failures are carried as data: `message` holds whatever the helper said,
/// and missing fields mean nothing usable was produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl DownloadResult {
    pub fn success(filename: impl Into<PathBuf>, modified: u64) -> Self {
        Self {
            filename: Some(filename.into()),
            modified: Some(modified),
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }
}

/// Both results of one refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshResult {
    pub ipv4: DownloadResult,
    pub ipv6: DownloadResult,
}

/// Options shared by both downloads of a refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadArgs {
    pub timeout: Duration,
    pub user_agent: Option<String>,
}

impl Default for DownloadArgs {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: None,
        }
    }
}

/// Metadata a provider registers with the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderInfo {
    pub name: String,
    /// API key needed to use the provider, None when free
    pub key: Option<String>,
    /// Supported address types and licence terms
    #[serde(rename = "type")]
    pub supported_types: String,
    /// Attribution link (HTML)
    pub link: String,
}

/// Input kind of a settings field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
}

/// A field registered into the host's settings page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsField {
    pub id: String,
    pub label: String,
    /// Host callback that draws the field
    pub renderer: String,
    pub page: String,
    pub section: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Option the field is bound to
    pub option: String,
    pub field: String,
    pub sub_field: String,
    pub value: String,
    pub disabled: bool,
    /// HTML rendered after the input
    pub after: String,
}
