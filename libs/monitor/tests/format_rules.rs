//! Format-legalizer integration tests
//!
//! Drives whole tick snapshots through the monitor and checks that each
//! violated predicate raises exactly one fault, that conforming traffic
//! raises none, and that fields not meaningful for an opcode are ignored.

mod common;

use common::{edge, edge_without_acquire, RAM_BASE};
use monitor::{Fault, Monitor};
use types::{
    AChannel, AOpcode, BChannel, BOpcode, CChannel, COpcode, Channel, DChannel, DOpcode, EChannel,
    TickSnapshot,
};

fn a_tick(a: AChannel) -> TickSnapshot {
    TickSnapshot {
        a: Some(a),
        ..Default::default()
    }
}

fn d_tick(d: DChannel) -> TickSnapshot {
    TickSnapshot {
        d: Some(d),
        ..Default::default()
    }
}

#[test]
fn conforming_acquire_raises_no_fault() {
    let mut mon = Monitor::new(edge());
    let acquire = AChannel::new(AOpcode::Acquire, 0, 6, 3, RAM_BASE, 0xff);
    assert!(mon.check_tick(&a_tick(acquire)).is_empty());
}

#[test]
fn acquire_unsupported_by_manager_is_exactly_one_fault() {
    // Every other predicate holds: owned source, aligned address, grow
    // param, full mask, block-sized transfer
    let mut mon = Monitor::new(edge_without_acquire());
    let acquire = AChannel::new(AOpcode::Acquire, 0, 6, 3, RAM_BASE, 0xff);
    let faults = mon.check_tick(&a_tick(acquire));
    assert_eq!(
        faults,
        vec![Fault::ManagerUnsupported {
            channel: Channel::A,
            opcode: "Acquire",
            address: RAM_BASE,
            size: 6,
        }]
    );
}

#[test]
fn put_partial_subset_mask_is_legal_put_full_is_not() {
    let mut mon = Monitor::new(edge());

    // 4-byte transfer at beat offset 0 implies mask 0b1111; 0b1010 is a
    // subset, legal for a partial write
    let partial = AChannel::new(AOpcode::PutPartialData, 0, 2, 1, RAM_BASE, 0b1010);
    assert!(mon.check_tick(&a_tick(partial)).is_empty());

    // The same lanes on a full write must match the implied mask exactly
    let full = AChannel::new(AOpcode::PutFullData, 0, 2, 2, RAM_BASE, 0b1010);
    let faults = mon.check_tick(&a_tick(full));
    assert_eq!(
        faults,
        vec![Fault::InvalidMask {
            channel: Channel::A,
            opcode: "PutFullData",
            mask: 0b1010,
            implied: 0b1111,
        }]
    );
}

#[test]
fn put_partial_mask_outside_implied_lanes_faults() {
    let mut mon = Monitor::new(edge());
    // Transfer occupies lanes 4..8; lane 0 is outside it
    let partial = AChannel::new(AOpcode::PutPartialData, 0, 2, 1, RAM_BASE + 4, 0b0001_0001);
    let faults = mon.check_tick(&a_tick(partial));
    assert_eq!(faults.len(), 1);
    assert!(matches!(faults[0], Fault::InvalidMask { .. }));
}

#[test]
fn invalid_opcode_is_reported_per_channel() {
    let mut mon = Monitor::new(edge());

    let mut a = AChannel::new(AOpcode::Get, 0, 3, 0, RAM_BASE, 0xff);
    a.opcode = 7;
    assert_eq!(
        mon.check_tick(&a_tick(a)),
        vec![Fault::InvalidOpcode {
            channel: Channel::A,
            opcode: 7
        }]
    );

    let mut d = DChannel::new(DOpcode::AccessAck, 0, 3, 0, 0, 0, false);
    d.opcode = 3;
    let faults = mon.check_tick(&d_tick(d));
    assert_eq!(
        faults,
        vec![Fault::InvalidOpcode {
            channel: Channel::D,
            opcode: 3
        }]
    );
}

#[test]
fn misaligned_address_faults() {
    let mut mon = Monitor::new(edge());
    // 64-byte transfer at a 32-byte-aligned address
    let get = AChannel::new(AOpcode::Get, 0, 6, 0, RAM_BASE + 0x20, 0xff);
    let faults = mon.check_tick(&a_tick(get));
    assert_eq!(faults.len(), 1);
    assert!(matches!(faults[0], Fault::AddressMisaligned { .. }));
}

#[test]
fn sub_beat_acquire_faults() {
    let mut mon = Monitor::new(edge());
    // 4-byte Acquire on an 8-byte beat; capability also rejects it, and
    // the mask only covers the transfer's lanes
    let acquire = AChannel::new(AOpcode::Acquire, 0, 2, 0, RAM_BASE, 0x0f);
    let faults = mon.check_tick(&a_tick(acquire));
    assert!(faults.contains(&Fault::SubBeatTransfer {
        channel: Channel::A,
        opcode: "Acquire",
        size: 2,
        beat_bytes: 8,
    }));
}

#[test]
fn one_fault_per_violated_predicate_not_aggregated() {
    let mut mon = Monitor::new(edge());
    // Unowned source, bad grow param, wrong mask; address and support fine
    let acquire = AChannel::new(AOpcode::Acquire, 5, 6, 99, RAM_BASE, 0x0f);
    let faults = mon.check_tick(&a_tick(acquire));
    assert_eq!(faults.len(), 3);
    assert!(faults.iter().any(|f| f.rule() == "source-out-of-range"));
    assert!(faults.iter().any(|f| f.rule() == "invalid-param"));
    assert!(faults.iter().any(|f| f.rule() == "invalid-mask"));
}

#[test]
fn data_access_param_must_be_zero() {
    let mut mon = Monitor::new(edge());
    let get = AChannel::new(AOpcode::Get, 1, 3, 0, RAM_BASE, 0xff);
    let faults = mon.check_tick(&a_tick(get));
    assert_eq!(
        faults,
        vec![Fault::InvalidParam {
            channel: Channel::A,
            opcode: "Get",
            param: 1,
        }]
    );
}

#[test]
fn atomic_subcodes_validated_against_fixed_sets() {
    let mut mon = Monitor::new(edge());

    // Add is the largest legal arithmetic sub-code
    let arith = AChannel::new(AOpcode::ArithmeticData, 4, 3, 0, RAM_BASE, 0xff);
    assert!(mon.check_tick(&a_tick(arith)).is_empty());

    let arith = AChannel::new(AOpcode::ArithmeticData, 5, 3, 1, RAM_BASE, 0xff);
    assert_eq!(mon.check_tick(&a_tick(arith)).len(), 1);

    let logical = AChannel::new(AOpcode::LogicalData, 3, 3, 2, RAM_BASE, 0xff);
    assert!(mon.check_tick(&a_tick(logical)).is_empty());

    let logical = AChannel::new(AOpcode::LogicalData, 4, 3, 3, RAM_BASE, 0xff);
    assert_eq!(mon.check_tick(&a_tick(logical)).len(), 1);
}

#[test]
fn probe_checks_client_table_and_cap_param() {
    let mut mon = Monitor::new(edge());

    let probe = BChannel::new(BOpcode::Probe, 1, 6, 2, RAM_BASE, 0xff);
    let tick = TickSnapshot {
        b: Some(probe),
        ..Default::default()
    };
    assert!(mon.check_tick(&tick).is_empty());

    // Cap codes stop at 2
    let probe = BChannel::new(BOpcode::Probe, 3, 6, 2, RAM_BASE, 0xff);
    let tick = TickSnapshot {
        b: Some(probe),
        ..Default::default()
    };
    assert_eq!(
        mon.check_tick(&tick),
        vec![Fault::InvalidParam {
            channel: Channel::B,
            opcode: "Probe",
            param: 3,
        }]
    );
}

#[test]
fn b_channel_unmanaged_address_faults() {
    let mut mon = Monitor::new(edge());
    let probe = BChannel::new(BOpcode::Probe, 0, 6, 2, 0x4000_0000, 0xff);
    let tick = TickSnapshot {
        b: Some(probe),
        ..Default::default()
    };
    let faults = mon.check_tick(&tick);
    assert_eq!(faults.len(), 1);
    assert!(matches!(faults[0], Fault::AddressNotManaged { .. }));
}

#[test]
fn release_needs_acquire_support_and_clean_error_flag() {
    let mut mon = Monitor::new(edge());

    let release = CChannel::new(COpcode::Release, 0, 6, 1, RAM_BASE, false);
    let tick = TickSnapshot {
        c: Some(release),
        ..Default::default()
    };
    assert!(mon.check_tick(&tick).is_empty());

    // The ownership responses may never report an error
    let release = CChannel::new(COpcode::Release, 0, 6, 1, RAM_BASE, true);
    let tick = TickSnapshot {
        c: Some(release),
        ..Default::default()
    };
    assert_eq!(
        mon.check_tick(&tick),
        vec![Fault::ErrorForbidden {
            channel: Channel::C,
            opcode: "Release",
        }]
    );

    let mut mon = Monitor::new(edge_without_acquire());
    let release = CChannel::new(COpcode::Release, 0, 6, 1, RAM_BASE, false);
    let tick = TickSnapshot {
        c: Some(release),
        ..Default::default()
    };
    let faults = mon.check_tick(&tick);
    assert_eq!(
        faults,
        vec![Fault::ManagerUnsupported {
            channel: Channel::C,
            opcode: "Release",
            address: RAM_BASE,
            size: 6,
        }]
    );
}

#[test]
fn c_channel_access_ack_may_report_error() {
    let mut mon = Monitor::new(edge());
    let ack = CChannel::new(COpcode::AccessAck, 0, 3, 1, RAM_BASE, true);
    let tick = TickSnapshot {
        c: Some(ack),
        ..Default::default()
    };
    assert!(mon.check_tick(&tick).is_empty());
}

#[test]
fn d_channel_rules() {
    let mut mon = Monitor::new(edge());

    // Grant with an invalid sink; the error flag on a grant is legal
    let grant = DChannel::new(DOpcode::Grant, 1, 6, 0, 9, 0, true);
    let faults = mon.check_tick(&d_tick(grant));
    assert!(faults.contains(&Fault::SinkOutOfRange {
        channel: Channel::D,
        opcode: "Grant",
        sink: 9,
    }));
    // The orphan-lifecycle fault also fires; no other format fault does
    assert_eq!(faults.len(), 2);

    // ReleaseAck must stay clean of errors and params
    let release_ack = DChannel::new(DOpcode::ReleaseAck, 1, 6, 0, 0, 0, true);
    let faults = mon.check_tick(&d_tick(release_ack));
    assert_eq!(faults.len(), 2);
    assert!(faults.iter().any(|f| f.rule() == "invalid-param"));
    assert!(faults.iter().any(|f| f.rule() == "error-forbidden"));
}

#[test]
fn size_is_ignored_on_plain_access_ack() {
    let mut mon = Monitor::new(edge());
    // Size 40 would be absurd as a transfer, but AccessAck has no
    // granularity or mask rules, so it must not be asserted
    let mut d = DChannel::new(DOpcode::AccessAck, 0, 40, 2, 0, 0, false);
    d.source = 2;
    // Complete an outstanding request first so the lifecycle stays quiet
    let a = AChannel::new(AOpcode::Get, 0, 3, 2, RAM_BASE, 0xff);
    assert!(mon.check_tick(&a_tick(a)).is_empty());
    assert!(mon.check_tick(&d_tick(d)).is_empty());
}

#[test]
fn e_channel_sink_validity() {
    let mut mon = Monitor::new(edge());

    let tick = TickSnapshot {
        e: Some(EChannel { sink: 3 }),
        ..Default::default()
    };
    assert!(mon.check_tick(&tick).is_empty());

    let tick = TickSnapshot {
        e: Some(EChannel { sink: 4 }),
        ..Default::default()
    };
    assert_eq!(
        mon.check_tick(&tick),
        vec![Fault::SinkOutOfRange {
            channel: Channel::E,
            opcode: "GrantAck",
            sink: 4,
        }]
    );
}
