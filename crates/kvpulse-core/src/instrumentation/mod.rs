//! Instrumentation snapshot shapes and the consensus header contract.
//!
//! This module hosts the two halves of an emitted snapshot:
//! - metric/context types handed to the external aggregator, and
//! - the fixed three-header consensus contract read off the key-tree response.
//!
//! All parsers are panic-free: malformed header values are reported as
//! `KvPulseError` instead of panicking, keeping the agent resilient to a
//! misbehaving store.

pub mod consensus;
pub mod metric;

pub use consensus::{ConsensusHeader, ConsensusHeaders};
pub use metric::{export_name, Metric, MetricContext};
