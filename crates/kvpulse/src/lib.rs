//! Top-level facade crate for kvpulse.
//!
//! Re-exports core types and the agent library so users can depend on a single crate.

pub mod core {
    pub use kvpulse_core::*;
}

pub mod agent {
    pub use kvpulse_agent::*;
}
