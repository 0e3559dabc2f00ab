//! Per-channel opcode spaces
//!
//! Each channel has its own small opcode encoding. Message structs store
//! the raw value; these enums are the recognized subsets. A raw value that
//! fails conversion is a protocol violation, reported by the monitor as
//! "channel has invalid opcode" rather than treated as a decode failure.

use crate::edge::Operation;
use num_enum::TryFromPrimitive;

/// A-channel (client request) opcodes
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
pub enum AOpcode {
    /// Write a full transfer; every implied byte lane is written
    PutFullData = 0,
    /// Write a subset of the implied byte lanes
    PutPartialData = 1,
    /// Atomic read-modify-write with an arithmetic sub-code
    ArithmeticData = 2,
    /// Atomic read-modify-write with a logical sub-code
    LogicalData = 3,
    /// Read a transfer
    Get = 4,
    /// Prefetch / cache-management hint
    Hint = 5,
    /// Request ownership permissions over a block
    Acquire = 6,
}

impl AOpcode {
    /// Opcode name as used in fault reports
    pub fn name(&self) -> &'static str {
        match self {
            AOpcode::PutFullData => "PutFullData",
            AOpcode::PutPartialData => "PutPartialData",
            AOpcode::ArithmeticData => "ArithmeticData",
            AOpcode::LogicalData => "LogicalData",
            AOpcode::Get => "Get",
            AOpcode::Hint => "Hint",
            AOpcode::Acquire => "Acquire",
        }
    }

    /// True if the message carries a data payload and may span beats
    pub fn carries_data(&self) -> bool {
        matches!(
            self,
            AOpcode::PutFullData
                | AOpcode::PutPartialData
                | AOpcode::ArithmeticData
                | AOpcode::LogicalData
        )
    }

    /// The abstract operation this opcode performs, for capability queries
    pub fn operation(&self) -> Operation {
        match self {
            AOpcode::PutFullData => Operation::PutFull,
            AOpcode::PutPartialData => Operation::PutPartial,
            AOpcode::ArithmeticData => Operation::Arithmetic,
            AOpcode::LogicalData => Operation::Logical,
            AOpcode::Get => Operation::Get,
            AOpcode::Hint => Operation::Hint,
            AOpcode::Acquire => Operation::Acquire,
        }
    }
}

/// B-channel (manager probe / forwarded request) opcodes
///
/// Mirrors the A-channel data-access space, with Probe in place of
/// Acquire: a manager may forward plain accesses to a caching client or
/// probe its permissions.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
pub enum BOpcode {
    /// Forwarded full write
    PutFullData = 0,
    /// Forwarded partial write
    PutPartialData = 1,
    /// Forwarded atomic arithmetic
    ArithmeticData = 2,
    /// Forwarded atomic logical
    LogicalData = 3,
    /// Forwarded read
    Get = 4,
    /// Forwarded hint
    Hint = 5,
    /// Query or revoke a client's permissions on a block
    Probe = 6,
}

impl BOpcode {
    /// Opcode name as used in fault reports
    pub fn name(&self) -> &'static str {
        match self {
            BOpcode::PutFullData => "PutFullData",
            BOpcode::PutPartialData => "PutPartialData",
            BOpcode::ArithmeticData => "ArithmeticData",
            BOpcode::LogicalData => "LogicalData",
            BOpcode::Get => "Get",
            BOpcode::Hint => "Hint",
            BOpcode::Probe => "Probe",
        }
    }

    /// True if the message carries a data payload and may span beats
    pub fn carries_data(&self) -> bool {
        matches!(
            self,
            BOpcode::PutFullData
                | BOpcode::PutPartialData
                | BOpcode::ArithmeticData
                | BOpcode::LogicalData
        )
    }

    /// The abstract operation this opcode performs, for capability queries
    pub fn operation(&self) -> Operation {
        match self {
            BOpcode::PutFullData => Operation::PutFull,
            BOpcode::PutPartialData => Operation::PutPartial,
            BOpcode::ArithmeticData => Operation::Arithmetic,
            BOpcode::LogicalData => Operation::Logical,
            BOpcode::Get => Operation::Get,
            BOpcode::Hint => Operation::Hint,
            BOpcode::Probe => Operation::Probe,
        }
    }
}

/// C-channel (client response / release) opcodes
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
pub enum COpcode {
    /// Acknowledge a forwarded write
    AccessAck = 0,
    /// Acknowledge a forwarded read, carrying data
    AccessAckData = 1,
    /// Acknowledge a forwarded hint
    HintAck = 2,
    /// Respond to a Probe without data
    ProbeAck = 4,
    /// Respond to a Probe, writing dirty data back
    ProbeAckData = 5,
    /// Voluntarily downgrade permissions without data
    Release = 6,
    /// Voluntarily downgrade permissions, writing dirty data back
    ReleaseData = 7,
}

impl COpcode {
    /// Opcode name as used in fault reports
    pub fn name(&self) -> &'static str {
        match self {
            COpcode::AccessAck => "AccessAck",
            COpcode::AccessAckData => "AccessAckData",
            COpcode::HintAck => "HintAck",
            COpcode::ProbeAck => "ProbeAck",
            COpcode::ProbeAckData => "ProbeAckData",
            COpcode::Release => "Release",
            COpcode::ReleaseData => "ReleaseData",
        }
    }

    /// True if the message carries a data payload and may span beats
    pub fn carries_data(&self) -> bool {
        matches!(
            self,
            COpcode::AccessAckData | COpcode::ProbeAckData | COpcode::ReleaseData
        )
    }

    /// True for the ownership-transfer opcodes bound by coherence granularity
    pub fn is_ownership(&self) -> bool {
        matches!(
            self,
            COpcode::ProbeAck | COpcode::ProbeAckData | COpcode::Release | COpcode::ReleaseData
        )
    }
}

/// D-channel (manager response / grant) opcodes
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
pub enum DOpcode {
    /// Acknowledge a write
    AccessAck = 0,
    /// Acknowledge a read, carrying data
    AccessAckData = 1,
    /// Acknowledge a hint
    HintAck = 2,
    /// Grant permissions without data
    Grant = 4,
    /// Grant permissions, carrying data
    GrantData = 5,
    /// Acknowledge a voluntary Release
    ReleaseAck = 6,
}

impl DOpcode {
    /// Opcode name as used in fault reports
    pub fn name(&self) -> &'static str {
        match self {
            DOpcode::AccessAck => "AccessAck",
            DOpcode::AccessAckData => "AccessAckData",
            DOpcode::HintAck => "HintAck",
            DOpcode::Grant => "Grant",
            DOpcode::GrantData => "GrantData",
            DOpcode::ReleaseAck => "ReleaseAck",
        }
    }

    /// True if the message carries a data payload and may span beats
    pub fn carries_data(&self) -> bool {
        matches!(self, DOpcode::AccessAckData | DOpcode::GrantData)
    }

    /// True for the ownership-transfer opcodes bound by coherence granularity
    pub fn is_ownership(&self) -> bool {
        matches!(self, DOpcode::Grant | DOpcode::GrantData | DOpcode::ReleaseAck)
    }
}
