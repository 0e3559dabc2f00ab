//! # Bus Conformance Monitor
//!
//! ## Purpose
//!
//! Observes every message delivered across one point-to-point link of the
//! split-transaction bus and asserts that the traffic obeys the protocol's
//! format, permission, alignment, and lifecycle rules, given the link's
//! static capability description (the edge). The monitor never alters or
//! generates traffic; its only product is fault reports.
//!
//! ## Architecture
//!
//! Three passes run over the same tick snapshot:
//!
//! ```text
//! TickSnapshot → Format Legalizer      → Fault*   (per-message legality)
//!             → Multibeat Checker      → Fault*   (burst field stability)
//!             → Source Lifecycle       → Fault*   (outstanding-ID accounting)
//!                    ↑
//!               Edge queries (read-only capability tables)
//! ```
//!
//! The passes are independent: the format legalizer judges each delivered
//! beat on its own, the multibeat checker compares later beats of a burst
//! against its first beat, and the lifecycle tracker accounts for source
//! IDs across the full A-request / D-response round trip.
//!
//! ## Fault Model
//!
//! Every violated rule raises its own [`Fault`] carrying channel, opcode,
//! and the expected-versus-observed context, so one report pinpoints one
//! violation without replay. Faults are returned from
//! [`Monitor::check_tick`] and logged through `tracing`; nothing is ever
//! silently dropped, and no violation is recoverable at this layer.

pub mod beat;
pub mod fault;
pub mod format;
pub mod lifecycle;
pub mod multibeat;
mod monitor;

pub use fault::Fault;
pub use lifecycle::SourceTracker;
pub use monitor::Monitor;
