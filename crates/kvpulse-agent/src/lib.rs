//! kvpulse agent library entry.
//!
//! This crate wires the config layer and the store collector into the
//! one-shot probe binary (`main.rs`); integration tests consume it directly.

pub mod collector;
pub mod config;
