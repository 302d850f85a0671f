//! Agent config loader (strict parsing).

pub mod schema;

use std::fs;

use kvpulse_core::error::{KvPulseError, Result};

pub use schema::{CollectorConfig, StoreSection};

pub fn load_from_file(path: &str) -> Result<CollectorConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| KvPulseError::InvalidConfig(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<CollectorConfig> {
    let cfg: CollectorConfig = serde_yaml::from_str(s)
        .map_err(|e| KvPulseError::InvalidConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
