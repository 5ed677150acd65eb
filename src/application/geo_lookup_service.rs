//! Geo Lookup Service - the provider's use cases
//!
//! Resolves addresses against the local database files, refreshes those
//! files through the host's download helper, and describes the provider to
//! the host's registry and settings page.

use crate::domain::entities::{
    DatabaseState, DownloadArgs, DownloadResult, FieldType, LookupResult, ProviderInfo,
    RefreshResult, SettingsField,
};
use crate::domain::ports::{DownloadHelper, GeoDatabaseLibrary, ProviderRegistry, SettingsPanel};
use crate::domain::services::{DatabaseLocator, OpenDatabase};
use crate::domain::value_objects::IpVersion;
use chrono::{DateTime, Local};
use std::sync::Arc;

/// Name the provider registers under.
pub const PROVIDER_NAME: &str = "Maxmind";

const PROVIDER_TYPE: &str = "IPv4, IPv6 / free, need an attribution link";

const PROVIDER_LINK: &str = "<a class=\"ip-geo-block-link\" href=\"http://dev.maxmind.com/geoip/legacy/geolite/\" title=\"GeoLite Free Downloadable Databases &laquo; Maxmind Developer Site\" rel=noreferrer target=_blank>http://www.maxmind.com</a>&nbsp;(IPv4, IPv6 / free, need an attribution link)";

const PROVIDER_INFO: &str = "This product includes GeoLite data created by MaxMind, available from <a class=\"ip-geo-block-link\" href=\"http://www.maxmind.com\" rel=noreferrer target=_blank>http://www.maxmind.com</a>.";

/// Labels and placement for the settings fields of one provider entry.
#[derive(Debug, Clone)]
pub struct FieldContext<'a> {
    /// Logical field name, e.g. `maxmind`
    pub field: &'a str,
    pub section: &'a str,
    pub page: &'a str,
    /// Option the host persists the state under
    pub option_name: &'a str,
    /// Host callback that draws the field
    pub renderer: &'a str,
    /// Text placed between the field name and the version, e.g. `Path to database`
    pub path_label: &'a str,
    /// Template with one `%s` for the last update date; `%%` is a literal `%`
    pub last_label: &'a str,
}

/// Geo lookup service.
///
/// This service owns no state of its own: the database files live on disk,
/// the download bookkeeping lives with the host, and every lookup opens and
/// closes its own handle.
pub struct GeoLookupService {
    library: Arc<dyn GeoDatabaseLibrary>,
    locator: DatabaseLocator,
    plugin_slug: String,
}

impl GeoLookupService {
    /// Create a new service.
    pub fn new(
        library: Arc<dyn GeoDatabaseLibrary>,
        locator: DatabaseLocator,
        plugin_slug: impl Into<String>,
    ) -> Self {
        Self {
            library,
            locator,
            plugin_slug: plugin_slug.into(),
        }
    }

    pub fn locator(&self) -> &DatabaseLocator {
        &self.locator
    }

    /// Resolve an IP literal to a location.
    ///
    /// Malformed input is rejected before any file is touched. A missing or
    /// unreadable database yields `LookupResult::Unavailable`.
    pub fn resolve(&self, ip: &str) -> LookupResult {
        let Some((addr, version)) = IpVersion::parse(ip) else {
            return LookupResult::illegal_format();
        };

        let path = self.locator.path(version);
        if !path.exists() {
            tracing::debug!("{} database not found at {}", version, path.display());
            return LookupResult::Unavailable;
        }

        let Some(handle) = self.library.open(&path) else {
            tracing::warn!("failed to open {} database {}", version, path.display());
            return LookupResult::Unavailable;
        };

        let db = OpenDatabase::new(handle);
        let result = db.lookup(addr);

        tracing::debug!("resolved {} via {} database -> {:?}", ip, db.edition(), result);

        result
    }

    /// Refresh both database files.
    ///
    /// Both downloads are attempted on every call and run concurrently.
    /// Each result is folded into `state` on its own, so one failure never
    /// touches the other version's record.
    pub async fn refresh_databases(
        &self,
        helper: &dyn DownloadHelper,
        state: &mut DatabaseState,
        args: &DownloadArgs,
    ) -> RefreshResult {
        let since_v4 = state.last_modified(IpVersion::V4);
        let since_v6 = state.last_modified(IpVersion::V6);

        let (ipv4, ipv6) = tokio::join!(
            self.fetch(helper, IpVersion::V4, args, since_v4),
            self.fetch(helper, IpVersion::V6, args, since_v6),
        );

        state.apply(IpVersion::V4, &ipv4);
        state.apply(IpVersion::V6, &ipv6);

        RefreshResult { ipv4, ipv6 }
    }

    async fn fetch(
        &self,
        helper: &dyn DownloadHelper,
        version: IpVersion,
        args: &DownloadArgs,
        since: u64,
    ) -> DownloadResult {
        let url = self.locator.url(version);
        let destination = self.locator.path(version);

        let result = helper.fetch(url, args, &destination, since).await;

        match &result.message {
            Some(message) if result.filename.is_none() => {
                tracing::warn!("{} download from {} failed: {}", version, url, message)
            }
            _ => tracing::debug!("{} download from {} -> {:?}", version, url, result),
        }

        result
    }

    /// Attribution text shown next to the provider.
    pub fn describe_provider(&self) -> &'static str {
        PROVIDER_INFO
    }

    pub fn provider_info(&self) -> ProviderInfo {
        ProviderInfo {
            name: PROVIDER_NAME.to_string(),
            key: None,
            supported_types: PROVIDER_TYPE.to_string(),
            link: PROVIDER_LINK.to_string(),
        }
    }

    pub fn register_provider(&self, registry: &dyn ProviderRegistry) {
        registry.register(self.provider_info());
    }

    /// Register the read-only path fields, one per IP version.
    pub fn register_settings_fields(
        &self,
        panel: &dyn SettingsPanel,
        ctx: &FieldContext<'_>,
        state: &DatabaseState,
    ) {
        for version in [IpVersion::V4, IpVersion::V6] {
            panel.register_field(self.settings_field(ctx, state, version));
        }
    }

    fn settings_field(
        &self,
        ctx: &FieldContext<'_>,
        state: &DatabaseState,
        version: IpVersion,
    ) -> SettingsField {
        let last = format_label(ctx.last_label, &local_date(state.last_modified(version)));

        SettingsField {
            id: format!("{}_{}_{}", ctx.option_name, ctx.field, version.as_str()),
            label: format!("{} {} ({})", ctx.field, ctx.path_label, version.label()),
            renderer: ctx.renderer.to_string(),
            page: ctx.page.to_string(),
            section: ctx.section.to_string(),
            field_type: FieldType::Text,
            option: ctx.option_name.to_string(),
            field: ctx.field.to_string(),
            sub_field: format!("{}_path", version.as_str()),
            value: self.locator.path(version).display().to_string(),
            disabled: true,
            after: format!(
                "<br /><p id=\"{}_{}_{}\" style=\"margin-left: 0.2em\">{}</p>",
                self.plugin_slug,
                ctx.field,
                version.as_str(),
                last
            ),
        }
    }
}

/// Fill a translated label template: the first `%s` takes `arg` and `%%`
/// becomes `%`. Any other `%` is kept as written.
fn format_label(template: &str, arg: &str) -> String {
    let mut out = String::with_capacity(template.len() + arg.len());
    let mut filled = false;
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('%') => {
                chars.next();
                out.push('%');
            }
            Some('s') if !filled => {
                chars.next();
                out.push_str(arg);
                filled = true;
            }
            _ => out.push('%'),
        }
    }
    out
}

/// Format a unix timestamp in local time; 0 means the file was never fetched.
pub fn local_date(timestamp: u64) -> String {
    if timestamp == 0 {
        return "never".to_string();
    }

    i64::try_from(timestamp)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|utc| {
            utc.with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        })
        .unwrap_or_else(|| "never".to_string())
}
