mod download_helper;
mod geo_database;
mod provider_registry;
mod settings_panel;

pub use download_helper::DownloadHelper;
pub use geo_database::{GeoDatabase, GeoDatabaseLibrary};
pub use provider_registry::ProviderRegistry;
pub use settings_panel::SettingsPanel;
