use crate::domain::entities::DownloadArgs;
use crate::domain::services::{DatabaseLocator, IPV4_URL, IPV6_URL};
use crate::domain::value_objects::IpVersion;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    // Database location and sources
    pub db_dir: PathBuf,
    pub ipv4_url: String,
    pub ipv6_url: String,

    // Download settings handed to the host's download helper
    pub download_timeout_secs: u64,
    pub user_agent: Option<String>,

    // Settings page
    pub plugin_slug: String,

    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_dir: default_db_dir(),
            ipv4_url: IPV4_URL.to_string(),
            ipv6_url: IPV6_URL.to_string(),
            download_timeout_secs: 30,
            user_agent: None,
            plugin_slug: "ip_geo_block".to_string(),
            debug: false,
        }
    }
}

impl Config {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.db_dir.as_os_str().is_empty() {
            return Err(ConfigError::MissingDbDir);
        }
        if self.ipv4_url.trim().is_empty() {
            return Err(ConfigError::MissingUrl(IpVersion::V4));
        }
        if self.ipv6_url.trim().is_empty() {
            return Err(ConfigError::MissingUrl(IpVersion::V6));
        }
        if self.plugin_slug.is_empty() {
            return Err(ConfigError::MissingPluginSlug);
        }
        Ok(())
    }

    /// Build the locator every operation derives its paths from.
    pub fn locator(&self) -> DatabaseLocator {
        DatabaseLocator::new(&self.db_dir)
            .with_url(IpVersion::V4, &self.ipv4_url)
            .with_url(IpVersion::V6, &self.ipv6_url)
    }

    pub fn download_args(&self) -> DownloadArgs {
        DownloadArgs {
            timeout: Duration::from_secs(self.download_timeout_secs),
            user_agent: self.user_agent.clone(),
        }
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("database directory is required")]
    MissingDbDir,
    #[error("{0} source url is required")]
    MissingUrl(IpVersion),
    #[error("plugin slug is required")]
    MissingPluginSlug,
}

/// Directory holding the running executable, or `.` if it cannot be found.
fn default_db_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn load_config() -> anyhow::Result<Config> {
    let db_dir = std::env::var("GEOLITE_DB_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| default_db_dir());

    let ipv4_url = std::env::var("GEOLITE_IPV4_URL").unwrap_or_else(|_| IPV4_URL.to_string());

    let ipv6_url = std::env::var("GEOLITE_IPV6_URL").unwrap_or_else(|_| IPV6_URL.to_string());

    let download_timeout_secs = std::env::var("GEOLITE_DOWNLOAD_TIMEOUT_SECS")
        .unwrap_or_else(|_| "30".to_string())
        .parse()
        .unwrap_or(30);

    let user_agent = std::env::var("GEOLITE_USER_AGENT").ok();

    let plugin_slug =
        std::env::var("GEOLITE_PLUGIN_SLUG").unwrap_or_else(|_| "ip_geo_block".to_string());

    let debug = std::env::var("DEBUG").is_ok();

    let cfg = Config {
        db_dir,
        ipv4_url,
        ipv6_url,
        download_timeout_secs,
        user_agent,
        plugin_slug,
        debug,
    };
    cfg.validate()?;

    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Every test that touches the environment uses its own variable so the
    // tests stay independent when run in parallel.

    #[test]
    fn test_default_config() {
        let cfg = Config::default();
        assert_eq!(cfg.ipv4_url, IPV4_URL);
        assert_eq!(cfg.ipv6_url, IPV6_URL);
        assert_eq!(cfg.download_timeout_secs, 30);
        assert_eq!(cfg.plugin_slug, "ip_geo_block");
        assert!(!cfg.debug);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_default_db_dir_is_not_empty() {
        assert!(!default_db_dir().as_os_str().is_empty());
    }

    #[test]
    fn test_locator_uses_config() {
        let cfg = Config {
            db_dir: PathBuf::from("/srv/geo"),
            ipv6_url: "https://mirror.example/v6.gz".to_string(),
            ..Config::default()
        };
        let locator = cfg.locator();

        assert_eq!(locator.path(IpVersion::V4), PathBuf::from("/srv/geo/GeoIP.dat"));
        assert_eq!(locator.url(IpVersion::V4), IPV4_URL);
        assert_eq!(locator.url(IpVersion::V6), "https://mirror.example/v6.gz");
    }

    #[test]
    fn test_download_args() {
        let cfg = Config {
            download_timeout_secs: 5,
            user_agent: Some("geolite-adapter/0.1".to_string()),
            ..Config::default()
        };
        let args = cfg.download_args();
        assert_eq!(args.timeout, Duration::from_secs(5));
        assert_eq!(args.user_agent.as_deref(), Some("geolite-adapter/0.1"));
    }

    #[test]
    fn test_validate_missing_dir() {
        let cfg = Config {
            db_dir: PathBuf::new(),
            ..Config::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::MissingDbDir));
    }

    #[test]
    fn test_validate_blank_url() {
        let cfg = Config {
            ipv6_url: "  ".to_string(),
            ..Config::default()
        };
        let err = cfg.validate().unwrap_err();
        assert_eq!(err, ConfigError::MissingUrl(IpVersion::V6));
        assert_eq!(err.to_string(), "ipv6 source url is required");
    }

    #[test]
    fn test_validate_missing_slug() {
        let cfg = Config {
            plugin_slug: String::new(),
            ..Config::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::MissingPluginSlug)));
    }

    #[test]
    fn test_load_config_with_db_dir() {
        std::env::set_var("GEOLITE_DB_DIR", "/tmp/geolite-test");
        let cfg = load_config().unwrap();
        assert_eq!(cfg.db_dir, PathBuf::from("/tmp/geolite-test"));
        std::env::remove_var("GEOLITE_DB_DIR");
    }

    #[test]
    fn test_load_config_with_ipv4_url() {
        std::env::set_var("GEOLITE_IPV4_URL", "https://mirror.example/GeoIP.dat.gz");
        let cfg = load_config().unwrap();
        assert_eq!(cfg.ipv4_url, "https://mirror.example/GeoIP.dat.gz");
        std::env::remove_var("GEOLITE_IPV4_URL");
    }

    #[test]
    fn test_load_config_timeout_parse_error_uses_default() {
        std::env::set_var("GEOLITE_DOWNLOAD_TIMEOUT_SECS", "not_a_number");
        let cfg = load_config().unwrap();
        assert_eq!(cfg.download_timeout_secs, 30); // default
        std::env::remove_var("GEOLITE_DOWNLOAD_TIMEOUT_SECS");
    }

    #[test]
    fn test_load_config_with_user_agent() {
        std::env::set_var("GEOLITE_USER_AGENT", "probe/1.0");
        let cfg = load_config().unwrap();
        assert_eq!(cfg.user_agent, Some("probe/1.0".to_string()));
        std::env::remove_var("GEOLITE_USER_AGENT");
    }
}
