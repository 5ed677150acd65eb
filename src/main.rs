//! geolite-adapter - resolve IP addresses against local GeoLite databases
//!
//! This is the composition root that wires together all the components.
//! Every argument is resolved and printed as one JSON line.

use geolite_adapter::adapters::outbound::{DashMapProviderRegistry, MaxMindDatabaseLibrary};
use geolite_adapter::{load_config, GeoLookupService};
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    // Load configuration from environment
    let cfg = load_config()?;

    // Setup logging on stderr, stdout carries the results
    let log_level = if cfg.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    // ===== COMPOSITION ROOT =====
    let library = Arc::new(MaxMindDatabaseLibrary::new());
    let service = GeoLookupService::new(library, cfg.locator(), cfg.plugin_slug.clone());

    let registry = DashMapProviderRegistry::new();
    service.register_provider(&registry);

    tracing::info!(
        "geolite-adapter providers={:?} db_dir={}",
        registry.names(),
        service.locator().dir().display()
    );

    let ips: Vec<String> = std::env::args().skip(1).collect();
    if ips.is_empty() {
        eprintln!("usage: geolite-adapter <ip> [<ip> ...]");
        eprintln!("{}", service.describe_provider());
        return Ok(());
    }

    for ip in ips {
        let result = service.resolve(&ip);
        println!(
            "{}",
            serde_json::json!({ "ip": ip, "result": result })
        );
    }

    Ok(())
}
