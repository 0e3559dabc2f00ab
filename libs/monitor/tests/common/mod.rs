//! Shared fixtures for the monitor integration tests
#![allow(dead_code)]

use config::{
    AddressRange, ClientCaps, ClientSupport, LinkDescription, LinkEdge, ManagerCaps,
    ManagerSupport, TransferSizes,
};

pub const RAM_BASE: u64 = 0x8000_0000;

fn all_sizes() -> Option<TransferSizes> {
    Some(TransferSizes { min: 0, max: 6 })
}

fn block_sizes() -> Option<TransferSizes> {
    Some(TransferSizes { min: 3, max: 6 })
}

/// One client (sources 0..8), one manager (256 MiB at `RAM_BASE`,
/// sinks 0..4) supporting the full operation set, 8-byte beats.
pub fn description() -> LinkDescription {
    LinkDescription {
        beat_bytes: 8,
        min_latency: 0,
        clients: vec![ClientCaps {
            name: "core".into(),
            first_source: 0,
            end_source: 8,
            supports: ClientSupport {
                probe: block_sizes(),
                get: all_sizes(),
                put_full: all_sizes(),
                put_partial: all_sizes(),
                arithmetic: all_sizes(),
                logical: all_sizes(),
                hint: all_sizes(),
            },
        }],
        managers: vec![ManagerCaps {
            name: "ram".into(),
            first_sink: 0,
            end_sink: 4,
            regions: vec![AddressRange {
                base: RAM_BASE,
                size: 0x1000_0000,
            }],
            supports: ManagerSupport {
                acquire: block_sizes(),
                get: all_sizes(),
                put_full: all_sizes(),
                put_partial: all_sizes(),
                arithmetic: all_sizes(),
                logical: all_sizes(),
                hint: all_sizes(),
            },
        }],
    }
}

pub fn edge() -> LinkEdge {
    LinkEdge::new(description()).unwrap()
}

/// Same link, but the manager does not accept Acquire anywhere.
pub fn edge_without_acquire() -> LinkEdge {
    let mut desc = description();
    desc.managers[0].supports.acquire = None;
    LinkEdge::new(desc).unwrap()
}

/// Same link, but with a declared one-tick minimum round-trip latency.
pub fn edge_with_min_latency() -> LinkEdge {
    let mut desc = description();
    desc.min_latency = 1;
    LinkEdge::new(desc).unwrap()
}
