//! Ordering guard for overlapping refreshes.

/// Numbers outgoing refreshes and remembers the newest one applied.
///
/// A completion may be applied only if it was issued after every completion
/// applied so far, and not before the current floor. Sequence numbers start
/// at 1.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshSequence {
    issued: u64,
    applied: u64,
    floor: u64,
}

impl RefreshSequence {
    /// Fresh counter: nothing issued, nothing applied.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the next sequence number for an outgoing request.
    pub fn issue(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// Highest sequence number handed out so far (0 if none).
    pub fn latest_issued(&self) -> u64 {
        self.issued
    }

    /// Highest sequence number applied so far (0 if none).
    pub fn last_applied(&self) -> u64 {
        self.applied
    }

    /// Oldest sequence number still eligible to be applied (0 if unrestricted).
    pub fn floor(&self) -> u64 {
        self.floor
    }

    /// Reject every completion issued before `seq`, applied or not.
    ///
    /// Used when the search text changes: responses to requests for an
    /// earlier term are stale even if nothing newer has been applied yet.
    pub fn raise_floor(&mut self, seq: u64) {
        self.floor = self.floor.max(seq);
    }

    /// Record `seq` as applied if it is newer than the last applied one and
    /// not below the floor.
    ///
    /// Returns `false` for stale completions, which must be discarded.
    pub fn try_apply(&mut self, seq: u64) -> bool {
        if seq <= self.applied || seq < self.floor {
            return false;
        }
        self.applied = seq;
        true
    }
}
