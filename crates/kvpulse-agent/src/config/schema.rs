use serde::Deserialize;

use kvpulse_core::error::{KvPulseError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollectorConfig {
    pub version: u32,

    pub store: StoreSection,
}

impl CollectorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(KvPulseError::UnsupportedVersion);
        }

        self.store.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreSection {
    /// Base address of the store's administrative HTTP API.
    /// Accepts a URL prefix or a bare host:port.
    pub base_url: String,
}

impl StoreSection {
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(KvPulseError::InvalidConfig(
                "store.base_url must not be empty".into(),
            ));
        }
        Ok(())
    }
}
