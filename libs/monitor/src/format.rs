//! Format legalization: per-message, per-channel legality rules
//!
//! Rules are dispatched per (channel, opcode); each opcode's arm asserts
//! exactly the predicates that are meaningful for it and ignores the
//! rest. Every violated predicate pushes its own fault, so a beat that
//! breaks three rules yields three reports.

use crate::fault::Fault;
use types::{
    AChannel, AOpcode, AtomicArithmetic, AtomicLogical, BChannel, BOpcode, CChannel, COpcode, Cap,
    Channel, DChannel, DOpcode, EChannel, Edge, Grow, Operation, Prune,
};

/// Alignment without shift overflow: an address is aligned to `2^size`
/// when it has at least `size` trailing zero bits.
fn is_aligned(address: u64, size: u8) -> bool {
    address == 0 || u32::from(size) <= address.trailing_zeros()
}

fn beat_log2<E: Edge>(edge: &E) -> u8 {
    edge.beat_bytes().trailing_zeros() as u8
}

/// Legalize one delivered A-channel beat.
pub fn legalize_a<E: Edge>(edge: &E, a: &AChannel, faults: &mut Vec<Fault>) {
    let Some(op) = a.opcode() else {
        faults.push(Fault::InvalidOpcode {
            channel: Channel::A,
            opcode: a.opcode,
        });
        return;
    };
    let name = op.name();

    if !edge.source_owned(a.source) {
        faults.push(Fault::SourceOutOfRange {
            channel: Channel::A,
            opcode: name,
            source: a.source,
        });
    }
    if !is_aligned(a.address, a.size) {
        faults.push(Fault::AddressMisaligned {
            channel: Channel::A,
            opcode: name,
            address: a.address,
            size: a.size,
        });
    }
    if !edge.manager_supports(op.operation(), a.address, a.size) {
        faults.push(Fault::ManagerUnsupported {
            channel: Channel::A,
            opcode: name,
            address: a.address,
            size: a.size,
        });
    }

    let implied = edge.implied_mask(a.address, a.size);
    match op {
        AOpcode::Acquire => {
            if a.size < beat_log2(edge) {
                faults.push(Fault::SubBeatTransfer {
                    channel: Channel::A,
                    opcode: name,
                    size: a.size,
                    beat_bytes: edge.beat_bytes(),
                });
            }
            if !Grow::valid(a.param) {
                faults.push(Fault::InvalidParam {
                    channel: Channel::A,
                    opcode: name,
                    param: a.param,
                });
            }
            // An Acquire names whole beats, so the implied mask is all lanes
            if a.mask != implied {
                faults.push(Fault::InvalidMask {
                    channel: Channel::A,
                    opcode: name,
                    mask: a.mask,
                    implied,
                });
            }
        }
        AOpcode::Get | AOpcode::PutFullData | AOpcode::Hint => {
            if a.param != 0 {
                faults.push(Fault::InvalidParam {
                    channel: Channel::A,
                    opcode: name,
                    param: a.param,
                });
            }
            if a.mask != implied {
                faults.push(Fault::InvalidMask {
                    channel: Channel::A,
                    opcode: name,
                    mask: a.mask,
                    implied,
                });
            }
        }
        AOpcode::PutPartialData => {
            if a.param != 0 {
                faults.push(Fault::InvalidParam {
                    channel: Channel::A,
                    opcode: name,
                    param: a.param,
                });
            }
            // Partial writes may leave implied lanes unwritten, never add lanes
            if a.mask & !implied != 0 {
                faults.push(Fault::InvalidMask {
                    channel: Channel::A,
                    opcode: name,
                    mask: a.mask,
                    implied,
                });
            }
        }
        AOpcode::ArithmeticData => {
            if !AtomicArithmetic::valid(a.param) {
                faults.push(Fault::InvalidParam {
                    channel: Channel::A,
                    opcode: name,
                    param: a.param,
                });
            }
            if a.mask != implied {
                faults.push(Fault::InvalidMask {
                    channel: Channel::A,
                    opcode: name,
                    mask: a.mask,
                    implied,
                });
            }
        }
        AOpcode::LogicalData => {
            if !AtomicLogical::valid(a.param) {
                faults.push(Fault::InvalidParam {
                    channel: Channel::A,
                    opcode: name,
                    param: a.param,
                });
            }
            if a.mask != implied {
                faults.push(Fault::InvalidMask {
                    channel: Channel::A,
                    opcode: name,
                    mask: a.mask,
                    implied,
                });
            }
        }
    }
}

/// Legalize one delivered B-channel beat.
pub fn legalize_b<E: Edge>(edge: &E, b: &BChannel, faults: &mut Vec<Fault>) {
    let Some(op) = b.opcode() else {
        faults.push(Fault::InvalidOpcode {
            channel: Channel::B,
            opcode: b.opcode,
        });
        return;
    };
    let name = op.name();

    if !edge.source_owned(b.source) {
        faults.push(Fault::SourceOutOfRange {
            channel: Channel::B,
            opcode: name,
            source: b.source,
        });
    }
    if !edge.address_managed(b.address) {
        faults.push(Fault::AddressNotManaged {
            channel: Channel::B,
            opcode: name,
            address: b.address,
        });
    }
    if !is_aligned(b.address, b.size) {
        faults.push(Fault::AddressMisaligned {
            channel: Channel::B,
            opcode: name,
            address: b.address,
            size: b.size,
        });
    }
    if !edge.client_supports(op.operation(), b.source, b.size) {
        faults.push(Fault::ClientUnsupported {
            channel: Channel::B,
            opcode: name,
            source: b.source,
            size: b.size,
        });
    }

    let implied = edge.implied_mask(b.address, b.size);
    match op {
        BOpcode::Probe => {
            if b.size < beat_log2(edge) {
                faults.push(Fault::SubBeatTransfer {
                    channel: Channel::B,
                    opcode: name,
                    size: b.size,
                    beat_bytes: edge.beat_bytes(),
                });
            }
            if !Cap::valid(b.param) {
                faults.push(Fault::InvalidParam {
                    channel: Channel::B,
                    opcode: name,
                    param: b.param,
                });
            }
            if b.mask != implied {
                faults.push(Fault::InvalidMask {
                    channel: Channel::B,
                    opcode: name,
                    mask: b.mask,
                    implied,
                });
            }
        }
        BOpcode::Get | BOpcode::PutFullData | BOpcode::Hint => {
            if b.param != 0 {
                faults.push(Fault::InvalidParam {
                    channel: Channel::B,
                    opcode: name,
                    param: b.param,
                });
            }
            if b.mask != implied {
                faults.push(Fault::InvalidMask {
                    channel: Channel::B,
                    opcode: name,
                    mask: b.mask,
                    implied,
                });
            }
        }
        BOpcode::PutPartialData => {
            if b.param != 0 {
                faults.push(Fault::InvalidParam {
                    channel: Channel::B,
                    opcode: name,
                    param: b.param,
                });
            }
            if b.mask & !implied != 0 {
                faults.push(Fault::InvalidMask {
                    channel: Channel::B,
                    opcode: name,
                    mask: b.mask,
                    implied,
                });
            }
        }
        BOpcode::ArithmeticData => {
            if !AtomicArithmetic::valid(b.param) {
                faults.push(Fault::InvalidParam {
                    channel: Channel::B,
                    opcode: name,
                    param: b.param,
                });
            }
            if b.mask != implied {
                faults.push(Fault::InvalidMask {
                    channel: Channel::B,
                    opcode: name,
                    mask: b.mask,
                    implied,
                });
            }
        }
        BOpcode::LogicalData => {
            if !AtomicLogical::valid(b.param) {
                faults.push(Fault::InvalidParam {
                    channel: Channel::B,
                    opcode: name,
                    param: b.param,
                });
            }
            if b.mask != implied {
                faults.push(Fault::InvalidMask {
                    channel: Channel::B,
                    opcode: name,
                    mask: b.mask,
                    implied,
                });
            }
        }
    }
}

/// Legalize one delivered C-channel beat.
pub fn legalize_c<E: Edge>(edge: &E, c: &CChannel, faults: &mut Vec<Fault>) {
    let Some(op) = c.opcode() else {
        faults.push(Fault::InvalidOpcode {
            channel: Channel::C,
            opcode: c.opcode,
        });
        return;
    };
    let name = op.name();

    if !edge.source_owned(c.source) {
        faults.push(Fault::SourceOutOfRange {
            channel: Channel::C,
            opcode: name,
            source: c.source,
        });
    }
    if !edge.address_managed(c.address) {
        faults.push(Fault::AddressNotManaged {
            channel: Channel::C,
            opcode: name,
            address: c.address,
        });
    }
    if !is_aligned(c.address, c.size) {
        faults.push(Fault::AddressMisaligned {
            channel: Channel::C,
            opcode: name,
            address: c.address,
            size: c.size,
        });
    }

    if op.is_ownership() && c.size < beat_log2(edge) {
        faults.push(Fault::SubBeatTransfer {
            channel: Channel::C,
            opcode: name,
            size: c.size,
            beat_bytes: edge.beat_bytes(),
        });
    }

    match op {
        COpcode::ProbeAck | COpcode::ProbeAckData => {
            if !Prune::valid(c.param) {
                faults.push(Fault::InvalidParam {
                    channel: Channel::C,
                    opcode: name,
                    param: c.param,
                });
            }
            if c.error {
                faults.push(Fault::ErrorForbidden {
                    channel: Channel::C,
                    opcode: name,
                });
            }
        }
        COpcode::Release | COpcode::ReleaseData => {
            // A release returns permissions acquired here, so the manager
            // must support Acquire at this location
            if !edge.manager_supports(Operation::Acquire, c.address, c.size) {
                faults.push(Fault::ManagerUnsupported {
                    channel: Channel::C,
                    opcode: name,
                    address: c.address,
                    size: c.size,
                });
            }
            if !Prune::valid(c.param) {
                faults.push(Fault::InvalidParam {
                    channel: Channel::C,
                    opcode: name,
                    param: c.param,
                });
            }
            if c.error {
                faults.push(Fault::ErrorForbidden {
                    channel: Channel::C,
                    opcode: name,
                });
            }
        }
        COpcode::AccessAck | COpcode::AccessAckData => {
            // Data-access acknowledgments may legitimately report errors
            if c.param != 0 {
                faults.push(Fault::InvalidParam {
                    channel: Channel::C,
                    opcode: name,
                    param: c.param,
                });
            }
        }
        COpcode::HintAck => {
            if c.param != 0 {
                faults.push(Fault::InvalidParam {
                    channel: Channel::C,
                    opcode: name,
                    param: c.param,
                });
            }
            if c.error {
                faults.push(Fault::ErrorForbidden {
                    channel: Channel::C,
                    opcode: name,
                });
            }
        }
    }
}

/// Legalize one delivered D-channel beat.
pub fn legalize_d<E: Edge>(edge: &E, d: &DChannel, faults: &mut Vec<Fault>) {
    let Some(op) = d.opcode() else {
        faults.push(Fault::InvalidOpcode {
            channel: Channel::D,
            opcode: d.opcode,
        });
        return;
    };
    let name = op.name();

    if !edge.source_owned(d.source) {
        faults.push(Fault::SourceOutOfRange {
            channel: Channel::D,
            opcode: name,
            source: d.source,
        });
    }

    if op.is_ownership() && d.size < beat_log2(edge) {
        faults.push(Fault::SubBeatTransfer {
            channel: Channel::D,
            opcode: name,
            size: d.size,
            beat_bytes: edge.beat_bytes(),
        });
    }

    match op {
        DOpcode::Grant | DOpcode::GrantData => {
            if !edge.sink_valid(d.sink) {
                faults.push(Fault::SinkOutOfRange {
                    channel: Channel::D,
                    opcode: name,
                    sink: d.sink,
                });
            }
            if !Cap::valid(d.param) {
                faults.push(Fault::InvalidParam {
                    channel: Channel::D,
                    opcode: name,
                    param: d.param,
                });
            }
            // A grant may be denied, so the error flag is legal here
        }
        DOpcode::ReleaseAck => {
            if d.param != 0 {
                faults.push(Fault::InvalidParam {
                    channel: Channel::D,
                    opcode: name,
                    param: d.param,
                });
            }
            if d.error {
                faults.push(Fault::ErrorForbidden {
                    channel: Channel::D,
                    opcode: name,
                });
            }
        }
        DOpcode::AccessAck | DOpcode::AccessAckData => {
            if d.param != 0 {
                faults.push(Fault::InvalidParam {
                    channel: Channel::D,
                    opcode: name,
                    param: d.param,
                });
            }
        }
        DOpcode::HintAck => {
            if d.param != 0 {
                faults.push(Fault::InvalidParam {
                    channel: Channel::D,
                    opcode: name,
                    param: d.param,
                });
            }
            if d.error {
                faults.push(Fault::ErrorForbidden {
                    channel: Channel::D,
                    opcode: name,
                });
            }
        }
    }
}

/// Legalize one delivered E-channel beat.
pub fn legalize_e<E: Edge>(edge: &E, e: &EChannel, faults: &mut Vec<Fault>) {
    if !edge.sink_valid(e.sink) {
        faults.push(Fault::SinkOutOfRange {
            channel: Channel::E,
            opcode: "GrantAck",
            sink: e.sink,
        });
    }
}
