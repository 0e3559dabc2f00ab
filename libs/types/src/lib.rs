//! # Bus Protocol Types Library
//!
//! ## Purpose
//!
//! Pure data definitions for the split-transaction, five-channel bus
//! protocol: channel identifiers, per-channel opcode spaces, permission
//! transition codes, channel message structs, the per-tick delivery
//! snapshot, and the read-only edge (capability) query trait.
//!
//! This crate contains no checking logic. Legality rules live in the
//! `monitor` crate; concrete capability tables live in the `config` crate.
//!
//! ## Architecture Role
//!
//! ```text
//! libs/types → [monitor] → fault reports
//!     ↑            ↑
//! Pure Data   Protocol Rules
//! Messages    Legality/Lifecycle
//! Edge trait  Burst tracking
//!     ↑
//! [config] — capability tables implementing the Edge trait
//! ```
//!
//! ## Design Philosophy
//!
//! - **Raw on the wire, typed on inspection**: message structs carry raw
//!   opcode bytes so an out-of-space opcode is representable (it is itself
//!   a protocol violation the monitor must report, not a decode panic).
//! - **Delivered-only semantics**: the tick snapshot holds `Option`s, one
//!   per channel; a populated slot means that channel fired this tick.
//!   Same-tick delivery on several channels is first-class.
//! - **Dense integer identities**: source and sink IDs are plain integers
//!   drawn from statically bounded ranges owned by the endpoints.

pub mod channel;
pub mod edge;
pub mod message;
pub mod opcode;
pub mod param;
pub mod tick;

// Re-export key types for convenience
pub use channel::Channel;
pub use edge::{Edge, Operation};
pub use message::{AChannel, BChannel, CChannel, DChannel, EChannel};
pub use opcode::{AOpcode, BOpcode, COpcode, DOpcode};
pub use param::{AtomicArithmetic, AtomicLogical, Cap, Grow, Prune};
pub use tick::TickSnapshot;
