//! Multibeat consistency checking
//!
//! A burst's control fields are captured at its first beat and every later
//! beat must repeat them unchanged; drift would corrupt data framing for
//! any consumer that latched the fields once. Each drifted field raises
//! its own fault at the beat where the drift is observed.

use crate::beat::BeatPosition;
use crate::fault::Fault;
use types::{AChannel, BChannel, CChannel, Channel, DChannel};

/// Control-field snapshot of one burst, compared beat by beat.
#[derive(Debug)]
pub struct MultibeatChecker {
    channel: Channel,
    shadow: Option<Vec<(&'static str, u64)>>,
}

impl MultibeatChecker {
    pub fn new(channel: Channel) -> Self {
        Self {
            channel,
            shadow: None,
        }
    }

    /// Observe one delivered beat with its position in the transaction.
    pub fn observe(
        &mut self,
        fields: Vec<(&'static str, u64)>,
        pos: BeatPosition,
        faults: &mut Vec<Fault>,
    ) {
        if pos.first {
            self.shadow = if pos.last { None } else { Some(fields) };
            return;
        }
        if let Some(shadow) = &self.shadow {
            for (&(name, first), &(_, now)) in shadow.iter().zip(fields.iter()) {
                if first != now {
                    faults.push(Fault::BurstFieldChanged {
                        channel: self.channel,
                        field: name,
                        first,
                        now,
                    });
                }
            }
        }
        if pos.last {
            self.shadow = None;
        }
    }

    /// Forget any burst in flight (protocol reset).
    pub fn reset(&mut self) {
        self.shadow = None;
    }
}

/// Control fields held constant across an A-channel burst.
pub fn a_fields(a: &AChannel) -> Vec<(&'static str, u64)> {
    vec![
        ("opcode", u64::from(a.opcode)),
        ("param", u64::from(a.param)),
        ("size", u64::from(a.size)),
        ("source", u64::from(a.source)),
        ("address", a.address),
    ]
}

/// Control fields held constant across a B-channel burst.
pub fn b_fields(b: &BChannel) -> Vec<(&'static str, u64)> {
    vec![
        ("opcode", u64::from(b.opcode)),
        ("param", u64::from(b.param)),
        ("size", u64::from(b.size)),
        ("source", u64::from(b.source)),
        ("address", b.address),
    ]
}

/// Control fields held constant across a C-channel burst.
pub fn c_fields(c: &CChannel) -> Vec<(&'static str, u64)> {
    vec![
        ("opcode", u64::from(c.opcode)),
        ("param", u64::from(c.param)),
        ("size", u64::from(c.size)),
        ("source", u64::from(c.source)),
        ("address", c.address),
    ]
}

/// Control fields held constant across a D-channel burst.
pub fn d_fields(d: &DChannel) -> Vec<(&'static str, u64)> {
    vec![
        ("opcode", u64::from(d.opcode)),
        ("param", u64::from(d.param)),
        ("size", u64::from(d.size)),
        ("source", u64::from(d.source)),
        ("sink", u64::from(d.sink)),
        ("addr_lo", d.addr_lo),
    ]
}
