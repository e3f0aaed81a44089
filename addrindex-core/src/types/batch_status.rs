//! Scan-pass checkpoint records.

use serde::{Deserialize, Serialize};

use crate::u256::U256;

/// A checkpoint recording progress of one scan pass over a contiguous
/// block range.
///
/// A record is identified by (from, to, step, created_at). The scanning
/// worker re-puts the record as it advances, updating `updated_at` and
/// `current`; records are never deleted and double as an audit trail and
/// resume point.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchStatus {
    /// First block number of the assigned range.
    pub from: u64,

    /// Last block number of the assigned range.
    pub to: u64,

    /// Identifies the scan pass/shard.
    pub step: u8,

    /// Creation time, seconds since epoch. Only used to distinguish
    /// records sharing the same (from, to, step).
    pub created_at: u64,

    /// Time of the last progress update, seconds since epoch.
    pub updated_at: u64,

    /// Block number last processed. `None` means the pass has not
    /// started. On the wire this is the empty magnitude, so a pass whose
    /// last processed block is genuinely block 0 decodes as `None` too;
    /// the layout cannot express the difference.
    pub current: Option<U256>,
}

impl BatchStatus {
    /// Check whether the pass has recorded any progress.
    pub fn started(&self) -> bool {
        self.current.is_some()
    }
}
