//! Channel message structs
//!
//! One struct per channel, carrying exactly the control fields that
//! channel's messages have. Opcodes are stored raw (the wire value) so an
//! unrecognized encoding is representable; decode on inspection with the
//! typed accessors. `size` is log2 of the transfer length in bytes; `mask`
//! is a per-byte lane bitmap of beat width.

use crate::opcode::{AOpcode, BOpcode, COpcode, DOpcode};
use serde::{Deserialize, Serialize};

/// A-channel beat: a client request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AChannel {
    /// Raw opcode (see [`AOpcode`])
    pub opcode: u8,
    /// Permission-transition or atomic sub-code, opcode-dependent
    pub param: u8,
    /// log2 of transfer length in bytes
    pub size: u8,
    /// Requesting client's transaction ID
    pub source: u32,
    /// Full byte address of the transfer
    pub address: u64,
    /// Byte-lane validity bitmap, one bit per beat byte
    pub mask: u64,
}

impl AChannel {
    /// Construct from a typed opcode.
    pub fn new(opcode: AOpcode, param: u8, size: u8, source: u32, address: u64, mask: u64) -> Self {
        Self {
            opcode: opcode as u8,
            param,
            size,
            source,
            address,
            mask,
        }
    }

    /// Decode the raw opcode, if recognized.
    pub fn opcode(&self) -> Option<AOpcode> {
        AOpcode::try_from(self.opcode).ok()
    }
}

/// B-channel beat: a manager probe or forwarded request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BChannel {
    /// Raw opcode (see [`BOpcode`])
    pub opcode: u8,
    /// Permission ceiling or atomic sub-code, opcode-dependent
    pub param: u8,
    /// log2 of transfer length in bytes
    pub size: u8,
    /// Source ID of the client being addressed
    pub source: u32,
    /// Full byte address of the transfer
    pub address: u64,
    /// Byte-lane validity bitmap, one bit per beat byte
    pub mask: u64,
}

impl BChannel {
    /// Construct from a typed opcode.
    pub fn new(opcode: BOpcode, param: u8, size: u8, source: u32, address: u64, mask: u64) -> Self {
        Self {
            opcode: opcode as u8,
            param,
            size,
            source,
            address,
            mask,
        }
    }

    /// Decode the raw opcode, if recognized.
    pub fn opcode(&self) -> Option<BOpcode> {
        BOpcode::try_from(self.opcode).ok()
    }
}

/// C-channel beat: a client response or voluntary release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CChannel {
    /// Raw opcode (see [`COpcode`])
    pub opcode: u8,
    /// Permission transition report, opcode-dependent
    pub param: u8,
    /// log2 of transfer length in bytes
    pub size: u8,
    /// Responding client's transaction ID
    pub source: u32,
    /// Full byte address of the transfer
    pub address: u64,
    /// Failed-access flag; forbidden on the pure ownership opcodes
    pub error: bool,
}

impl CChannel {
    /// Construct from a typed opcode.
    pub fn new(opcode: COpcode, param: u8, size: u8, source: u32, address: u64, error: bool) -> Self {
        Self {
            opcode: opcode as u8,
            param,
            size,
            source,
            address,
            error,
        }
    }

    /// Decode the raw opcode, if recognized.
    pub fn opcode(&self) -> Option<COpcode> {
        COpcode::try_from(self.opcode).ok()
    }
}

/// D-channel beat: a manager response or grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DChannel {
    /// Raw opcode (see [`DOpcode`])
    pub opcode: u8,
    /// Permission ceiling, opcode-dependent
    pub param: u8,
    /// log2 of transfer length in bytes
    pub size: u8,
    /// Source ID of the request being answered
    pub source: u32,
    /// Manager-chosen ID for this grant, referenced by the E-channel ack
    pub sink: u32,
    /// Low address bits, enough to reconstruct lane alignment
    pub addr_lo: u64,
    /// Failed-access flag; forbidden on ReleaseAck and HintAck
    pub error: bool,
}

impl DChannel {
    /// Construct from a typed opcode.
    pub fn new(
        opcode: DOpcode,
        param: u8,
        size: u8,
        source: u32,
        sink: u32,
        addr_lo: u64,
        error: bool,
    ) -> Self {
        Self {
            opcode: opcode as u8,
            param,
            size,
            source,
            sink,
            addr_lo,
            error,
        }
    }

    /// Decode the raw opcode, if recognized.
    pub fn opcode(&self) -> Option<DOpcode> {
        DOpcode::try_from(self.opcode).ok()
    }
}

/// E-channel beat: the client's final grant acknowledgment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EChannel {
    /// Sink ID of the grant being acknowledged
    pub sink: u32,
}
