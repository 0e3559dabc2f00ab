//! Permission-transition and atomic sub-code spaces for the `param` field
//!
//! The legal `param` range depends on the opcode. Ownership-transfer
//! opcodes draw from one of three disjoint code families depending on
//! direction; atomic data opcodes carry an operation sub-code; every other
//! data-access opcode requires `param == 0`.

use num_enum::TryFromPrimitive;

/// Upward permission transitions, carried by Acquire.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
pub enum Grow {
    /// None to Branch (read-only)
    NtoB = 0,
    /// None to Trunk (read-write)
    NtoT = 1,
    /// Branch to Trunk
    BtoT = 2,
}

/// Permission ceilings, carried by Probe and Grant/GrantData.
///
/// The receiver may end at or below the named level, so these codes bound
/// rather than dictate the transition.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
pub enum Cap {
    /// Cap at Trunk
    ToT = 0,
    /// Cap at Branch
    ToB = 1,
    /// Cap at None
    ToN = 2,
}

/// Downward transitions and unchanged-state reports, carried by
/// ProbeAck/ProbeAckData and Release/ReleaseData.
///
/// The first three codes shrink permissions; the last three report that
/// the responder already held the stated level and kept it.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
pub enum Prune {
    /// Trunk down to Branch
    TtoB = 0,
    /// Trunk down to None
    TtoN = 1,
    /// Branch down to None
    BtoN = 2,
    /// Held Trunk, kept Trunk
    TtoT = 3,
    /// Held Branch, kept Branch
    BtoB = 4,
    /// Held None, kept None
    NtoN = 5,
}

/// Atomic arithmetic sub-codes, carried by ArithmeticData.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
pub enum AtomicArithmetic {
    /// Signed minimum
    Min = 0,
    /// Signed maximum
    Max = 1,
    /// Unsigned minimum
    MinU = 2,
    /// Unsigned maximum
    MaxU = 3,
    /// Addition
    Add = 4,
}

/// Atomic logical sub-codes, carried by LogicalData.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
pub enum AtomicLogical {
    /// Bitwise exclusive or
    Xor = 0,
    /// Bitwise or
    Or = 1,
    /// Bitwise and
    And = 2,
    /// Unconditional swap
    Swap = 3,
}

impl Grow {
    /// Whether `raw` is a legal grow code
    pub fn valid(raw: u8) -> bool {
        Self::try_from(raw).is_ok()
    }
}

impl Cap {
    /// Whether `raw` is a legal cap code
    pub fn valid(raw: u8) -> bool {
        Self::try_from(raw).is_ok()
    }
}

impl Prune {
    /// Whether `raw` is a legal prune code
    pub fn valid(raw: u8) -> bool {
        Self::try_from(raw).is_ok()
    }
}

impl AtomicArithmetic {
    /// Whether `raw` is a legal arithmetic sub-code
    pub fn valid(raw: u8) -> bool {
        Self::try_from(raw).is_ok()
    }
}

impl AtomicLogical {
    /// Whether `raw` is a legal logical sub-code
    pub fn valid(raw: u8) -> bool {
        Self::try_from(raw).is_ok()
    }
}
