//! Settings Panel Port

use crate::domain::entities::SettingsField;

/// Host settings page that accepts field definitions.
///
/// Rendering and persistence stay on the host side.
pub trait SettingsPanel: Send + Sync {
    fn register_field(&self, field: SettingsField);
}
