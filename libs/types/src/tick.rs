//! Per-tick delivery snapshot
//!
//! The bus advances in one global synchronous tick. A channel slot is
//! populated iff that channel's handshake fired (valid and ready both
//! asserted) this tick, so the monitor only ever sees delivered beats.
//! Several channels firing in the same tick is an ordinary, legal state.

use crate::message::{AChannel, BChannel, CChannel, DChannel, EChannel};
use serde::{Deserialize, Serialize};

/// What fired on each channel this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TickSnapshot {
    /// Delivered A-channel beat, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a: Option<AChannel>,
    /// Delivered B-channel beat, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b: Option<BChannel>,
    /// Delivered C-channel beat, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub c: Option<CChannel>,
    /// Delivered D-channel beat, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub d: Option<DChannel>,
    /// Delivered E-channel beat, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub e: Option<EChannel>,
}

impl TickSnapshot {
    /// A tick on which nothing fired.
    pub fn idle() -> Self {
        Self::default()
    }

    /// True if no channel fired this tick.
    pub fn is_idle(&self) -> bool {
        self.a.is_none()
            && self.b.is_none()
            && self.c.is_none()
            && self.d.is_none()
            && self.e.is_none()
    }
}
