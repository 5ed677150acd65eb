//! In-memory Settings Panel
//!
//! Collects registered fields in order, for hosts that render them later
//! and for inspection from the command line.

use crate::domain::entities::SettingsField;
use crate::domain::ports::SettingsPanel;
use parking_lot::RwLock;

#[derive(Default)]
pub struct MemorySettingsPanel {
    fields: RwLock<Vec<SettingsField>>,
}

impl MemorySettingsPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registered fields, in registration order.
    pub fn fields(&self) -> Vec<SettingsField> {
        self.fields.read().clone()
    }

    /// Fields registered into one settings section.
    pub fn section(&self, section: &str) -> Vec<SettingsField> {
        self.fields
            .read()
            .iter()
            .filter(|f| f.section == section)
            .cloned()
            .collect()
    }
}

impl SettingsPanel for MemorySettingsPanel {
    fn register_field(&self, field: SettingsField) {
        let mut fields = self.fields.write();
        // Same id registered twice keeps the latest definition in place.
        match fields.iter_mut().find(|f| f.id == field.id) {
            Some(existing) => *existing = field,
            None => fields.push(field),
        }
    }
}
