//! Shared error type across kvpulse crates.

use thiserror::Error;

use crate::instrumentation::consensus::ConsensusHeader;

/// Shared result type.
pub type Result<T> = std::result::Result<T, KvPulseError>;

/// Unified error type used by core and agent.
///
/// Collection failures never reach callers of `emit` as error values; they are
/// reported through the injected [`crate::sink::ErrorSink`] under the stable
/// event names returned by [`KvPulseError::event`].
#[derive(Debug, Error)]
pub enum KvPulseError {
    /// The stats endpoint could not be reached or the body could not be read.
    #[error("stats request failed: {0}")]
    StatsUnreachable(String),
    /// The stats body was not a JSON object of unsigned-integer counters.
    #[error("stats body malformed: {0}")]
    StatsMalformed(String),
    /// The key-tree endpoint could not be reached.
    #[error("key-tree request failed: {0}")]
    StoreUnreachable(String),
    /// A consensus header was missing or not a base-10 unsigned integer.
    #[error("header {header} is not a base-10 unsigned integer: {raw:?}")]
    HeaderNotNumeric {
        header: ConsensusHeader,
        raw: String,
    },
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
}

impl KvPulseError {
    /// Map the error to a stable log event name.
    pub fn event(&self) -> &'static str {
        match self {
            KvPulseError::StatsUnreachable(_) => "failed-to-collect-stats",
            KvPulseError::StatsMalformed(_) => "failed-to-unmarshal-stats",
            KvPulseError::StoreUnreachable(_) => "failed-to-read-from-store",
            KvPulseError::HeaderNotNumeric { header, .. } => header.parse_event(),
            KvPulseError::InvalidConfig(_) => "invalid-config",
            KvPulseError::UnsupportedVersion => "unsupported-config-version",
        }
    }

    /// Structured key-value context to attach to the log event.
    ///
    /// Header parse failures carry the offending raw string under the field
    /// name the original operators grep for; other variants carry nothing.
    pub fn data(&self) -> Vec<(&'static str, String)> {
        match self {
            KvPulseError::HeaderNotNumeric { header, raw } => {
                vec![(header.data_key(), raw.clone())]
            }
            _ => Vec::new(),
        }
    }
}
