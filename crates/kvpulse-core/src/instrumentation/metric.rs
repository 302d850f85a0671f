//! Emitted snapshot types.

use serde::Serialize;

/// One emitted (name, value) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metric {
    pub name: String,
    pub value: u64,
}

impl Metric {
    pub fn new(name: impl Into<String>, value: u64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Ordered metric snapshot plus a context label.
///
/// An empty `metrics` list is the all-or-nothing failure result: consumers
/// never see a partially populated snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricContext {
    pub name: String,
    pub metrics: Vec<Metric>,
}

impl MetricContext {
    pub fn new(name: impl Into<String>, metrics: Vec<Metric>) -> Self {
        Self {
            name: name.into(),
            metrics,
        }
    }

    /// Context with no metrics, returned on any collection failure.
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }
}

/// Export form of a stats counter name: first character upper-cased, the
/// remainder unchanged (`getsCount` -> `GetsCount`).
///
/// The empty string is a defined no-op.
pub fn export_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
