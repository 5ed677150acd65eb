//! Provider Registry Port
//!
//! Defines how geolocation providers announce themselves to the host.

use crate::domain::entities::ProviderInfo;

/// Host-side registry of geolocation backends.
pub trait ProviderRegistry: Send + Sync {
    /// Register a provider. Registering the same name again replaces it.
    fn register(&self, info: ProviderInfo);
}
