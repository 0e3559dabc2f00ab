//! The monitor entry point: one instance per point-to-point link

use crate::beat::BeatCounter;
use crate::fault::Fault;
use crate::format;
use crate::lifecycle::{RequestBeat, ResponseBeat, SourceTracker};
use crate::multibeat::{self, MultibeatChecker};
use tracing::{error, trace};
use types::{Channel, DOpcode, Edge, TickSnapshot};

/// Conformance monitor for one link.
///
/// Feed it every tick's delivered messages through [`check_tick`]; it
/// evaluates the format, multibeat, and lifecycle passes against the
/// injected edge and returns every fault the tick raised. The monitor
/// never blocks, never alters traffic, and keeps only the derived state
/// the passes need: per-channel beat counters and burst shadows, plus the
/// outstanding-source bitset.
///
/// [`check_tick`]: Monitor::check_tick
pub struct Monitor<E: Edge> {
    edge: E,
    label: Option<String>,
    a_beats: BeatCounter,
    b_beats: BeatCounter,
    c_beats: BeatCounter,
    d_beats: BeatCounter,
    a_burst: MultibeatChecker,
    b_burst: MultibeatChecker,
    c_burst: MultibeatChecker,
    d_burst: MultibeatChecker,
    tracker: SourceTracker,
}

impl<E: Edge> Monitor<E> {
    /// Build a monitor for the link the edge describes.
    pub fn new(edge: E) -> Self {
        let tracker = SourceTracker::new(edge.end_source_id(), edge.min_latency());
        Self {
            edge,
            label: None,
            a_beats: BeatCounter::new(),
            b_beats: BeatCounter::new(),
            c_beats: BeatCounter::new(),
            d_beats: BeatCounter::new(),
            a_burst: MultibeatChecker::new(Channel::A),
            b_burst: MultibeatChecker::new(Channel::B),
            c_burst: MultibeatChecker::new(Channel::C),
            d_burst: MultibeatChecker::new(Channel::D),
            tracker,
        }
    }

    /// Attach a free-text location annotation carried in fault logs,
    /// e.g. which link of a larger fabric this instance watches.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// The injected capability description.
    pub fn edge(&self) -> &E {
        &self.edge
    }

    /// The location annotation, if one was attached.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Drop all derived state (protocol reset). The next delivered beat
    /// on each channel opens a fresh transaction.
    pub fn reset(&mut self) {
        self.a_beats.reset();
        self.b_beats.reset();
        self.c_beats.reset();
        self.d_beats.reset();
        self.a_burst.reset();
        self.b_burst.reset();
        self.c_burst.reset();
        self.d_burst.reset();
        self.tracker.reset();
    }

    /// Evaluate every pass against one tick's delivered messages.
    ///
    /// Returns all faults the tick raised, already logged at error level;
    /// an empty vector means the tick conforms. State updates use this
    /// tick's inputs only, so replaying an identical stream after
    /// [`reset`](Monitor::reset) reproduces identical fault sequences.
    pub fn check_tick(&mut self, tick: &TickSnapshot) -> Vec<Fault> {
        let mut faults = Vec::new();
        let mut request = None;
        let mut response = None;

        if let Some(a) = &tick.a {
            trace!(channel = "A", opcode = a.opcode, source = a.source, "beat");
            format::legalize_a(&self.edge, a, &mut faults);
            let carries_data = a.opcode().is_some_and(|op| op.carries_data());
            let pos = self.a_beats.advance(self.edge.beats(carries_data, a.size));
            self.a_burst.observe(multibeat::a_fields(a), pos, &mut faults);
            if a.opcode().is_some() {
                request = Some(RequestBeat {
                    source: a.source,
                    last: pos.last,
                });
            }
        }

        if let Some(b) = &tick.b {
            trace!(channel = "B", opcode = b.opcode, source = b.source, "beat");
            format::legalize_b(&self.edge, b, &mut faults);
            let carries_data = b.opcode().is_some_and(|op| op.carries_data());
            let pos = self.b_beats.advance(self.edge.beats(carries_data, b.size));
            self.b_burst.observe(multibeat::b_fields(b), pos, &mut faults);
        }

        if let Some(c) = &tick.c {
            trace!(channel = "C", opcode = c.opcode, source = c.source, "beat");
            format::legalize_c(&self.edge, c, &mut faults);
            let carries_data = c.opcode().is_some_and(|op| op.carries_data());
            let pos = self.c_beats.advance(self.edge.beats(carries_data, c.size));
            self.c_burst.observe(multibeat::c_fields(c), pos, &mut faults);
        }

        if let Some(d) = &tick.d {
            trace!(channel = "D", opcode = d.opcode, source = d.source, "beat");
            format::legalize_d(&self.edge, d, &mut faults);
            let carries_data = d.opcode().is_some_and(|op| op.carries_data());
            let pos = self.d_beats.advance(self.edge.beats(carries_data, d.size));
            self.d_burst.observe(multibeat::d_fields(d), pos, &mut faults);
            if let Some(op) = d.opcode() {
                response = Some(ResponseBeat {
                    source: d.source,
                    last: pos.last,
                    release_ack: op == DOpcode::ReleaseAck,
                });
            }
        }

        if let Some(e) = &tick.e {
            trace!(channel = "E", sink = e.sink, "beat");
            format::legalize_e(&self.edge, e, &mut faults);
        }

        self.tracker.observe(request, response, &mut faults);

        for fault in &faults {
            error!(
                channel = %fault.channel(),
                rule = fault.rule(),
                label = self.label.as_deref().unwrap_or(""),
                "{fault}"
            );
        }
        faults
    }
}
