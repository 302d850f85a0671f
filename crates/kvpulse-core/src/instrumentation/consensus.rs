//! Consensus position headers on the key-tree response.
//!
//! The store reports its replication-log position through three response
//! headers. All three must parse as base-10 unsigned integers; the first bad
//! field aborts the whole read so downstream never sees a partial triple.

use std::fmt;

use crate::error::{KvPulseError, Result};
use crate::instrumentation::metric::Metric;

/// One of the three consensus position headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsensusHeader {
    EtcdIndex,
    RaftIndex,
    RaftTerm,
}

impl ConsensusHeader {
    /// Fixed parse/emit order.
    pub const ALL: [ConsensusHeader; 3] = [
        ConsensusHeader::EtcdIndex,
        ConsensusHeader::RaftIndex,
        ConsensusHeader::RaftTerm,
    ];

    /// Wire name of the HTTP response header.
    pub fn header_name(self) -> &'static str {
        match self {
            ConsensusHeader::EtcdIndex => "X-Etcd-Index",
            ConsensusHeader::RaftIndex => "X-Raft-Index",
            ConsensusHeader::RaftTerm => "X-Raft-Term",
        }
    }

    /// Name of the metric emitted for this header.
    pub fn metric_name(self) -> &'static str {
        match self {
            ConsensusHeader::EtcdIndex => "EtcdIndex",
            ConsensusHeader::RaftIndex => "RaftIndex",
            ConsensusHeader::RaftTerm => "RaftTerm",
        }
    }

    /// Log event name reported when this header fails to parse.
    pub fn parse_event(self) -> &'static str {
        match self {
            ConsensusHeader::EtcdIndex => "failed-to-parse-etcd-index",
            ConsensusHeader::RaftIndex => "failed-to-parse-raft-index",
            ConsensusHeader::RaftTerm => "failed-to-parse-raft-term",
        }
    }

    /// Structured-data key carrying the offending raw value in that event.
    pub fn data_key(self) -> &'static str {
        match self {
            ConsensusHeader::EtcdIndex => "index",
            ConsensusHeader::RaftIndex => "index",
            ConsensusHeader::RaftTerm => "term",
        }
    }

    fn parse(self, raw: &str) -> Result<u64> {
        raw.parse::<u64>().map_err(|_| KvPulseError::HeaderNotNumeric {
            header: self,
            raw: raw.to_string(),
        })
    }
}

impl fmt::Display for ConsensusHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header_name())
    }
}

/// Parsed consensus position triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsensusHeaders {
    pub etcd_index: u64,
    pub raft_index: u64,
    pub raft_term: u64,
}

impl ConsensusHeaders {
    /// Parse the three raw header values in fixed order.
    ///
    /// A missing header arrives here as the empty string and fails the numeric
    /// parse. The first failure returns immediately; later fields are not
    /// inspected.
    pub fn parse(etcd_index: &str, raft_index: &str, raft_term: &str) -> Result<Self> {
        Ok(Self {
            etcd_index: ConsensusHeader::EtcdIndex.parse(etcd_index)?,
            raft_index: ConsensusHeader::RaftIndex.parse(raft_index)?,
            raft_term: ConsensusHeader::RaftTerm.parse(raft_term)?,
        })
    }

    /// The fixed-order metric triple that leads every successful snapshot.
    pub fn into_metrics(self) -> [Metric; 3] {
        [
            Metric::new(ConsensusHeader::EtcdIndex.metric_name(), self.etcd_index),
            Metric::new(ConsensusHeader::RaftIndex.metric_name(), self.raft_index),
            Metric::new(ConsensusHeader::RaftTerm.metric_name(), self.raft_term),
        ]
    }
}
