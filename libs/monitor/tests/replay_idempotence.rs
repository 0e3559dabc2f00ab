//! Replaying an identical stream after a reset reproduces identical
//! fault sequences: the monitor's verdicts depend only on the traffic
//! and the edge, never on wall-clock state or prior runs.

mod common;

use common::{edge, RAM_BASE};
use monitor::{Fault, Monitor};
use types::{AChannel, AOpcode, DChannel, DOpcode, TickSnapshot};

fn stream() -> Vec<TickSnapshot> {
    let mut ticks = Vec::new();

    // A clean Get round trip
    ticks.push(TickSnapshot {
        a: Some(AChannel::new(AOpcode::Get, 0, 3, 0, RAM_BASE, 0xff)),
        ..Default::default()
    });
    ticks.push(TickSnapshot {
        d: Some(DChannel::new(DOpcode::AccessAckData, 0, 3, 0, 0, 0, false)),
        ..Default::default()
    });

    // A reused source ID: raises one fault
    ticks.push(TickSnapshot {
        a: Some(AChannel::new(AOpcode::Get, 0, 3, 1, RAM_BASE + 8, 0xff)),
        ..Default::default()
    });
    ticks.push(TickSnapshot {
        a: Some(AChannel::new(AOpcode::Get, 0, 3, 1, RAM_BASE + 16, 0xff)),
        ..Default::default()
    });

    // A two-beat burst whose source drifts: raises one fault
    ticks.push(TickSnapshot {
        a: Some(AChannel::new(AOpcode::PutFullData, 0, 4, 2, RAM_BASE + 64, 0xff)),
        ..Default::default()
    });
    let mut drifted = AChannel::new(AOpcode::PutFullData, 0, 4, 2, RAM_BASE + 64, 0xff);
    drifted.source = 3;
    ticks.push(TickSnapshot {
        a: Some(drifted),
        ..Default::default()
    });

    // An orphan completion: raises one fault
    ticks.push(TickSnapshot {
        d: Some(DChannel::new(DOpcode::AccessAck, 0, 3, 7, 0, 0, false)),
        ..Default::default()
    });

    ticks
}

fn run(mon: &mut Monitor<config::LinkEdge>, ticks: &[TickSnapshot]) -> Vec<Vec<Fault>> {
    ticks.iter().map(|t| mon.check_tick(t)).collect()
}

#[test]
fn replay_after_reset_is_identical() {
    let ticks = stream();
    let mut mon = Monitor::new(edge());

    let first = run(&mut mon, &ticks);
    mon.reset();
    let second = run(&mut mon, &ticks);

    assert_eq!(first, second);
    // The stream carries exactly three violations
    let total: usize = first.iter().map(Vec::len).sum();
    assert_eq!(total, 3);
}

#[test]
fn fresh_monitor_matches_reset_monitor() {
    let ticks = stream();

    let mut reused = Monitor::new(edge());
    run(&mut reused, &ticks);
    reused.reset();

    let mut fresh = Monitor::new(edge());
    assert_eq!(run(&mut reused, &ticks), run(&mut fresh, &ticks));
}
