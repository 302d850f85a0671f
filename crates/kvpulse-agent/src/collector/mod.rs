//! Snapshot collectors feeding the external aggregator.

pub mod store;

use async_trait::async_trait;

use kvpulse_core::instrumentation::MetricContext;

pub use store::StoreCollector;

/// One instrumentation source consumed by the external aggregator.
#[async_trait]
pub trait Instrument: Send + Sync {
    /// Context label identifying the source.
    fn name(&self) -> &'static str;

    /// Collect one snapshot.
    ///
    /// Never fails from the caller's point of view: any collection failure is
    /// reported to the injected sink and degrades to an empty context.
    async fn emit(&self) -> MetricContext;
}
