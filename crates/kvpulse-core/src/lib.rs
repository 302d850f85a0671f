//! kvpulse core: transport-agnostic instrumentation primitives, the consensus
//! header contract, error types, and the logging-sink seam.
//!
//! This crate defines the snapshot shapes and error surface shared by the
//! agent and by anything that consumes emitted contexts. It intentionally
//! carries no HTTP or runtime dependencies so it can be reused in multiple
//! contexts.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `KvPulseError`/`Result` so production
//! processes do not crash on malformed responses from the monitored store.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod instrumentation;
pub mod sink;

/// Shared result type.
pub use error::{KvPulseError, Result};
