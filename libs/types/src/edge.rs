//! Read-only edge (capability) query surface
//!
//! An edge is the static description of one point-to-point link: which
//! transfer sizes, operations, and address ranges each endpoint supports,
//! plus the link's beat width and guaranteed minimum round-trip latency.
//! The monitor consumes it purely through this trait; malformed capability
//! descriptions are a configuration-time concern and never surface here.

use serde::{Deserialize, Serialize};

/// Abstract operation kinds used in capability queries.
///
/// A manager table answers for the request opcodes a client may send it;
/// a client table answers for the probe and forwarded-request opcodes a
/// manager may send back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    /// Ownership acquisition (A channel)
    Acquire,
    /// Permission probe (B channel)
    Probe,
    /// Read
    Get,
    /// Full write
    PutFull,
    /// Partial write
    PutPartial,
    /// Atomic arithmetic
    Arithmetic,
    /// Atomic logical
    Logical,
    /// Prefetch hint
    Hint,
}

impl Operation {
    /// Operation name as used in fault reports
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Acquire => "Acquire",
            Operation::Probe => "Probe",
            Operation::Get => "Get",
            Operation::PutFull => "PutFull",
            Operation::PutPartial => "PutPartial",
            Operation::Arithmetic => "Arithmetic",
            Operation::Logical => "Logical",
            Operation::Hint => "Hint",
        }
    }
}

/// Static capability description of one link, queried read-only.
///
/// All queries are pure; the only state an implementation carries is the
/// tables themselves. `size` parameters are log2 of the transfer length in
/// bytes throughout.
pub trait Edge {
    /// Does the client owning `source` support `op` at this transfer size?
    fn client_supports(&self, op: Operation, source: u32, size: u8) -> bool;

    /// Does a manager support `op` for the full transfer at this address?
    fn manager_supports(&self, op: Operation, address: u64, size: u8) -> bool;

    /// Does `address` lie within any managed range?
    fn address_managed(&self, address: u64) -> bool;

    /// Is `sink` within some manager's owned sink-ID range?
    fn sink_valid(&self, sink: u32) -> bool;

    /// Is `source` within some client's owned source-ID range?
    fn source_owned(&self, source: u32) -> bool;

    /// The byte-lane mask a transfer of `2^size` bytes at `address`
    /// occupies within its beat. All lanes when the transfer spans one or
    /// more full beats.
    fn implied_mask(&self, address: u64, size: u8) -> u64;

    /// Width of one beat in bytes (a power of two).
    fn beat_bytes(&self) -> u32;

    /// Guaranteed minimum request-to-response latency in ticks. Zero means
    /// a same-tick response is legal.
    fn min_latency(&self) -> u32;

    /// One past the highest source ID any client may hold outstanding.
    fn end_source_id(&self) -> u32;

    /// Total beats in a transfer: one for messages without a data payload,
    /// otherwise the transfer length divided by the beat width, at least
    /// one.
    fn beats(&self, carries_data: bool, size: u8) -> u32 {
        if !carries_data {
            return 1;
        }
        // Saturate rather than overflow on absurd sizes; such traffic is
        // already faulted by the capability checks
        let bytes = 1u64.checked_shl(size.into()).unwrap_or(u64::MAX);
        let per_beat = u64::from(self.beat_bytes());
        (bytes / per_beat).max(1).min(u64::from(u32::MAX)) as u32
    }
}
