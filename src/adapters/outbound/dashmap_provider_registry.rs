//! DashMap Provider Registry
//!
//! Implements ProviderRegistry using DashMap for lock-free concurrent access.

use crate::domain::entities::ProviderInfo;
use crate::domain::ports::ProviderRegistry;
use dashmap::DashMap;
use std::sync::Arc;

/// DashMap-backed provider registry, keyed by provider name.
pub struct DashMapProviderRegistry {
    providers: Arc<DashMap<String, ProviderInfo>>,
}

impl DashMapProviderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            providers: Arc::new(DashMap::new()),
        }
    }

    pub fn get(&self, name: &str) -> Option<ProviderInfo> {
        self.providers.get(name).map(|e| e.value().clone())
    }

    /// Names of all registered providers, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.providers.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    pub fn count(&self) -> usize {
        self.providers.len()
    }
}

impl Default for DashMapProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderRegistry for DashMapProviderRegistry {
    fn register(&self, info: ProviderInfo) {
        if self.providers.contains_key(&info.name) {
            tracing::debug!("replacing provider {}", info.name);
        }
        self.providers.insert(info.name.clone(), info);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(name: &str, supported: &str) -> ProviderInfo {
        ProviderInfo {
            name: name.to_string(),
            key: None,
            supported_types: supported.to_string(),
            link: String::new(),
        }
    }

    #[test]
    fn test_register_and_get() {
        let registry = DashMapProviderRegistry::new();
        registry.register(info("Maxmind", "IPv4, IPv6"));

        let result = registry.get("Maxmind");
        assert!(result.is_some());
        assert_eq!(result.unwrap().supported_types, "IPv4, IPv6");
    }

    #[test]
    fn test_get_nonexistent() {
        let registry = DashMapProviderRegistry::new();
        assert!(registry.get("Maxmind").is_none());
        assert_eq!(registry.count(), 0);
    }

    #[test]
    fn test_register_replaces_same_name() {
        let registry = DashMapProviderRegistry::new();
        registry.register(info("Maxmind", "IPv4"));
        registry.register(info("Maxmind", "IPv4, IPv6"));

        assert_eq!(registry.count(), 1);
        assert_eq!(registry.get("Maxmind").unwrap().supported_types, "IPv4, IPv6");
    }

    #[test]
    fn test_names_sorted() {
        let registry = DashMapProviderRegistry::default();
        registry.register(info("ipinfo.io", "IPv4"));
        registry.register(info("Maxmind", "IPv4, IPv6"));
        registry.register(info("IP2Location", "IPv4, IPv6"));

        assert_eq!(registry.names(), vec!["IP2Location", "Maxmind", "ipinfo.io"]);
    }
}
