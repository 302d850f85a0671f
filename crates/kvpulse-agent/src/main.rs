//! kvpulse agent: one-shot store probe.
//!
//! Loads `kvpulse.yaml`, emits a single snapshot from the configured store,
//! and prints it as JSON. Polling cadence is owned by the caller (cron, a
//! supervisor loop, ...), not by this binary.

use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use kvpulse_agent::collector::{Instrument, StoreCollector};
use kvpulse_agent::config;
use kvpulse_core::sink::TracingSink;

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cfg = match config::load_from_file("kvpulse.yaml") {
        Ok(cfg) => cfg,
        Err(err) => {
            tracing::error!(error = %err, "config load failed");
            std::process::exit(1);
        }
    };

    let collector = StoreCollector::new(&cfg.store.base_url, Arc::new(TracingSink));
    tracing::info!(
        stats = collector.stats_endpoint(),
        keys = collector.keys_endpoint(),
        "kvpulse-agent emitting"
    );

    let context = collector.emit().await;
    match serde_json::to_string_pretty(&context) {
        Ok(json) => println!("{json}"),
        Err(err) => {
            tracing::error!(error = %err, "snapshot serialization failed");
            std::process::exit(1);
        }
    }
}
