//! Protocol fault taxonomy
//!
//! One variant per checkable rule. Each fault identifies the channel, the
//! opcode (or raw value when the opcode itself is the problem), and the
//! observed-versus-expected context, so a single report pinpoints the
//! offending beat without replaying the trace.

use thiserror::Error;
use types::Channel;

/// A detected protocol violation.
///
/// Faults are fatal to the traffic source by definition: the monitor
/// detects deviations, it does not tolerate or route around them. The
/// monitor reports every violated rule separately rather than collapsing
/// a beat's failures into one generic error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Fault {
    /// Raw opcode outside the channel's encoding space
    #[error("'{channel}' channel has invalid opcode {opcode}")]
    InvalidOpcode { channel: Channel, opcode: u8 },

    /// Manager capability table rejects this operation at this location
    #[error("'{channel}' channel carries {opcode} type unsupported by manager (address {address:#x}, size {size})")]
    ManagerUnsupported {
        channel: Channel,
        opcode: &'static str,
        address: u64,
        size: u8,
    },

    /// Client capability table rejects this operation at this source
    #[error("'{channel}' channel carries {opcode} type unsupported by client (source {source}, size {size})")]
    ClientUnsupported {
        channel: Channel,
        opcode: &'static str,
        source: u32,
        size: u8,
    },

    /// Source ID outside every client's owned range
    #[error("'{channel}' channel {opcode} carries source {source} outside any client's range")]
    SourceOutOfRange {
        channel: Channel,
        opcode: &'static str,
        source: u32,
    },

    /// Sink ID outside every manager's owned range
    #[error("'{channel}' channel {opcode} carries invalid sink {sink}")]
    SinkOutOfRange {
        channel: Channel,
        opcode: &'static str,
        sink: u32,
    },

    /// Address outside every managed region
    #[error("'{channel}' channel {opcode} address {address:#x} is not managed")]
    AddressNotManaged {
        channel: Channel,
        opcode: &'static str,
        address: u64,
    },

    /// Address not a multiple of the transfer length
    #[error("'{channel}' channel {opcode} address {address:#x} is not aligned to size {size}")]
    AddressMisaligned {
        channel: Channel,
        opcode: &'static str,
        address: u64,
        size: u8,
    },

    /// Ownership transfer finer than the coherence granularity of one beat
    #[error("'{channel}' channel {opcode} is smaller than a beat (size {size}, beat {beat_bytes} bytes)")]
    SubBeatTransfer {
        channel: Channel,
        opcode: &'static str,
        size: u8,
        beat_bytes: u32,
    },

    /// Permission-transition or sub-code outside the opcode's legal set
    #[error("'{channel}' channel {opcode} carries invalid param {param}")]
    InvalidParam {
        channel: Channel,
        opcode: &'static str,
        param: u8,
    },

    /// Lane mask inconsistent with the mask implied by address and size
    #[error("'{channel}' channel {opcode} contains invalid mask (mask {mask:#x}, implied {implied:#x})")]
    InvalidMask {
        channel: Channel,
        opcode: &'static str,
        mask: u64,
        implied: u64,
    },

    /// Error flag set on a pure ownership-protocol response
    #[error("'{channel}' channel {opcode} carries an error it is forbidden to report")]
    ErrorForbidden { channel: Channel, opcode: &'static str },

    /// A control field drifted between beats of one burst
    #[error("'{channel}' channel {field} changed within multibeat operation (first {first:#x}, now {now:#x})")]
    BurstFieldChanged {
        channel: Channel,
        field: &'static str,
        first: u64,
        now: u64,
    },

    /// A request reissued a source ID that is still awaiting completion
    #[error("'A' channel reused source {source} while it is still in flight")]
    SourceReused { source: u32 },

    /// A response completed a request that was never issued
    #[error("'D' channel acknowledged for nothing inflight (source {source})")]
    NothingInflight { source: u32 },

    /// Request and response for one source delivered in the same tick
    /// despite a declared nonzero minimum latency
    #[error("'D' channel responded to source {source} in the same tick as its request (min latency {min_latency})")]
    ResponseTooEarly { source: u32, min_latency: u32 },
}

impl Fault {
    /// The channel the offending beat was observed on.
    pub fn channel(&self) -> Channel {
        match self {
            Fault::InvalidOpcode { channel, .. }
            | Fault::ManagerUnsupported { channel, .. }
            | Fault::ClientUnsupported { channel, .. }
            | Fault::SourceOutOfRange { channel, .. }
            | Fault::SinkOutOfRange { channel, .. }
            | Fault::AddressNotManaged { channel, .. }
            | Fault::AddressMisaligned { channel, .. }
            | Fault::SubBeatTransfer { channel, .. }
            | Fault::InvalidParam { channel, .. }
            | Fault::InvalidMask { channel, .. }
            | Fault::ErrorForbidden { channel, .. }
            | Fault::BurstFieldChanged { channel, .. } => *channel,
            Fault::SourceReused { .. } => Channel::A,
            Fault::NothingInflight { .. } | Fault::ResponseTooEarly { .. } => Channel::D,
        }
    }

    /// Short stable tag for the violated rule, for structured logs.
    pub fn rule(&self) -> &'static str {
        match self {
            Fault::InvalidOpcode { .. } => "invalid-opcode",
            Fault::ManagerUnsupported { .. } => "manager-unsupported",
            Fault::ClientUnsupported { .. } => "client-unsupported",
            Fault::SourceOutOfRange { .. } => "source-out-of-range",
            Fault::SinkOutOfRange { .. } => "sink-out-of-range",
            Fault::AddressNotManaged { .. } => "address-not-managed",
            Fault::AddressMisaligned { .. } => "address-misaligned",
            Fault::SubBeatTransfer { .. } => "sub-beat-transfer",
            Fault::InvalidParam { .. } => "invalid-param",
            Fault::InvalidMask { .. } => "invalid-mask",
            Fault::ErrorForbidden { .. } => "error-forbidden",
            Fault::BurstFieldChanged { .. } => "burst-field-changed",
            Fault::SourceReused { .. } => "source-reused",
            Fault::NothingInflight { .. } => "nothing-inflight",
            Fault::ResponseTooEarly { .. } => "response-too-early",
        }
    }
}
