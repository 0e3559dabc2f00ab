//! Source-ID lifecycle tracking
//!
//! One bit per source ID the link's clients may hold outstanding. A bit is
//! set while an A-channel request has delivered its final beat and the
//! matching D-channel completion has not. ReleaseAck completions belong to
//! the voluntary-release flow and never touch this accounting.
//!
//! Both edges of a round trip may fire in the same tick: an A-channel
//! final beat inserting a source and a D-channel final beat clearing it
//! are evaluated against the same snapshot, with insertion visible to the
//! completion check and removal winning the update. That same-tick pairing
//! is only legal when the manager declares a zero minimum latency.

use crate::fault::Fault;

/// Fixed-width bitset indexed by dense integer source IDs.
///
/// IDs at or beyond the configured width are ignored rather than tracked;
/// out-of-range sources are already format faults.
#[derive(Debug, Clone)]
struct IdSet {
    words: Vec<u64>,
    width: u32,
}

impl IdSet {
    fn new(width: u32) -> Self {
        let words = vec![0u64; ((width as usize) + 63) / 64];
        Self { words, width }
    }

    fn contains(&self, id: u32) -> bool {
        id < self.width && self.words[(id / 64) as usize] & (1u64 << (id % 64)) != 0
    }

    fn insert(&mut self, id: u32) {
        if id < self.width {
            self.words[(id / 64) as usize] |= 1u64 << (id % 64);
        }
    }

    fn remove(&mut self, id: u32) {
        if id < self.width {
            self.words[(id / 64) as usize] &= !(1u64 << (id % 64));
        }
    }

    fn clear(&mut self) {
        self.words.fill(0);
    }
}

/// A fired A-channel beat, as the lifecycle tracker sees it.
#[derive(Debug, Clone, Copy)]
pub struct RequestBeat {
    /// Source ID of the request
    pub source: u32,
    /// This beat completes the request
    pub last: bool,
}

/// A fired D-channel beat, as the lifecycle tracker sees it.
#[derive(Debug, Clone, Copy)]
pub struct ResponseBeat {
    /// Source ID the response answers
    pub source: u32,
    /// This beat completes the response
    pub last: bool,
    /// The response is a ReleaseAck, outside this accounting
    pub release_ack: bool,
}

/// Tracks outstanding request IDs across the A-request / D-response round
/// trip for one link.
#[derive(Debug)]
pub struct SourceTracker {
    inflight: IdSet,
    min_latency: u32,
}

impl SourceTracker {
    /// `end_source_id` is one past the highest trackable source ID;
    /// `min_latency` is the manager's declared minimum round trip.
    pub fn new(end_source_id: u32, min_latency: u32) -> Self {
        Self {
            inflight: IdSet::new(end_source_id),
            min_latency,
        }
    }

    /// Is this source currently awaiting its completion?
    pub fn is_inflight(&self, source: u32) -> bool {
        self.inflight.contains(source)
    }

    /// Evaluate one tick's fired beats and update the outstanding set.
    pub fn observe(
        &mut self,
        request: Option<RequestBeat>,
        response: Option<ResponseBeat>,
        faults: &mut Vec<Fault>,
    ) {
        let inserting = request.filter(|r| r.last).map(|r| r.source);
        if let Some(source) = inserting {
            if self.inflight.contains(source) {
                faults.push(Fault::SourceReused { source });
            }
        }

        let tracked = response.filter(|r| !r.release_ack);
        if let Some(resp) = tracked {
            if resp.last {
                // A request completing in this same tick legitimately pairs
                // with its response when both edges fire together
                let set_this_tick = inserting == Some(resp.source);
                if !self.inflight.contains(resp.source) && !set_this_tick {
                    faults.push(Fault::NothingInflight {
                        source: resp.source,
                    });
                }
            }
            if self.min_latency > 0 {
                if let Some(req) = request {
                    if req.source == resp.source {
                        faults.push(Fault::ResponseTooEarly {
                            source: resp.source,
                            min_latency: self.min_latency,
                        });
                    }
                }
            }
        }

        // inflight' = (inflight | inserted) & !cleared; removal wins when
        // both happen for one source in the same tick
        if let Some(source) = inserting {
            self.inflight.insert(source);
        }
        if let Some(resp) = tracked {
            if resp.last {
                self.inflight.remove(resp.source);
            }
        }
    }

    /// Clear all outstanding state (protocol reset).
    pub fn reset(&mut self) {
        self.inflight.clear();
    }
}
