//! Store collector: polls the key-value store's admin API and assembles one
//! metric snapshot per `emit`.
//!
//! Two sequential GETs per invocation: the stats endpoint (JSON counter body)
//! and the key-tree endpoint (consensus position headers). Any failure at any
//! step discards all work done in the invocation and yields an empty context;
//! the failure is visible only through the injected [`ErrorSink`].

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use kvpulse_core::error::{KvPulseError, Result};
use kvpulse_core::instrumentation::{
    export_name, ConsensusHeader, ConsensusHeaders, Metric, MetricContext,
};
use kvpulse_core::sink::ErrorSink;

use super::Instrument;

/// Context label on every snapshot emitted by this collector.
pub const CONTEXT_NAME: &str = "store";

/// Collector for one store's administrative HTTP API.
///
/// Holds only immutable configuration after construction, so a single
/// instance is safe to `emit` from concurrently.
pub struct StoreCollector {
    stats_endpoint: String,
    keys_endpoint: String,
    client: reqwest::Client,
    sink: Arc<dyn ErrorSink>,
}

impl StoreCollector {
    /// Derive the two endpoint URLs from the base address. No network
    /// activity happens here.
    pub fn new(base_addr: &str, sink: Arc<dyn ErrorSink>) -> Self {
        let base = normalize_base(base_addr);
        Self {
            stats_endpoint: format!("{base}/v2/stats/store"),
            keys_endpoint: format!("{base}/v2/keys/"),
            client: reqwest::Client::new(),
            sink,
        }
    }

    pub fn stats_endpoint(&self) -> &str {
        &self.stats_endpoint
    }

    pub fn keys_endpoint(&self) -> &str {
        &self.keys_endpoint
    }

    /// The two fetches and the merge, with `?` at every step. `emit` maps the
    /// first error to a sink event plus an empty context.
    async fn try_collect(&self) -> Result<Vec<Metric>> {
        let stats_resp = self
            .client
            .get(&self.stats_endpoint)
            .send()
            .await
            .map_err(|e| KvPulseError::StatsUnreachable(e.to_string()))?;

        // Status codes are not inspected; whatever body comes back is
        // decoded, and a non-JSON error page fails the decode.
        let stats: HashMap<String, u64> = stats_resp
            .json()
            .await
            .map_err(|e| KvPulseError::StatsMalformed(e.to_string()))?;

        let keys_resp = self
            .client
            .get(&self.keys_endpoint)
            .send()
            .await
            .map_err(|e| KvPulseError::StoreUnreachable(e.to_string()))?;

        // A missing or non-UTF-8 header reads as "" and fails the parse.
        let raw = |h: ConsensusHeader| {
            keys_resp
                .headers()
                .get(h.header_name())
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
        };
        let headers = ConsensusHeaders::parse(
            raw(ConsensusHeader::EtcdIndex),
            raw(ConsensusHeader::RaftIndex),
            raw(ConsensusHeader::RaftTerm),
        );
        // The key-tree body is never read; dropping the response releases the
        // connection on every path.
        drop(keys_resp);
        let headers = headers?;

        let mut metrics = Vec::with_capacity(3 + stats.len());
        metrics.extend(headers.into_metrics());
        for (name, value) in stats {
            metrics.push(Metric::new(export_name(&name), value));
        }
        Ok(metrics)
    }
}

#[async_trait]
impl Instrument for StoreCollector {
    fn name(&self) -> &'static str {
        CONTEXT_NAME
    }

    async fn emit(&self) -> MetricContext {
        match self.try_collect().await {
            Ok(metrics) => MetricContext::new(CONTEXT_NAME, metrics),
            Err(err) => {
                self.sink.error(err.event(), &err, &err.data());
                MetricContext::empty(CONTEXT_NAME)
            }
        }
    }
}

/// Strip trailing slashes and default to plain http when the configured base
/// carries no scheme (the client requires absolute URLs).
fn normalize_base(base_addr: &str) -> String {
    let trimmed = base_addr.trim_end_matches('/');
    if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    }
}
