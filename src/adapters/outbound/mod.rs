mod dashmap_provider_registry;
mod maxmind_database;
mod memory_settings_panel;

pub use dashmap_provider_registry::DashMapProviderRegistry;
pub use maxmind_database::{MaxMindDatabase, MaxMindDatabaseLibrary};
pub use memory_settings_panel::MemorySettingsPanel;
