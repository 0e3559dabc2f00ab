//! Concrete edge built from a validated link description

use crate::link::{ConfigError, LinkDescription};
use types::{Edge, Operation};

/// The capability query surface of one link, backed by its description.
///
/// Construction validates the description; a built `LinkEdge` answers
/// every query infallibly.
#[derive(Debug, Clone)]
pub struct LinkEdge {
    desc: LinkDescription,
    beat_log2: u8,
}

impl LinkEdge {
    /// Validate `desc` and wrap it as an edge.
    pub fn new(desc: LinkDescription) -> Result<Self, ConfigError> {
        desc.validate()?;
        let beat_log2 = desc.beat_bytes.trailing_zeros() as u8;
        Ok(Self { desc, beat_log2 })
    }

    /// The underlying description.
    pub fn description(&self) -> &LinkDescription {
        &self.desc
    }

    /// log2 of the beat width in bytes.
    pub fn beat_log2(&self) -> u8 {
        self.beat_log2
    }
}

impl Edge for LinkEdge {
    fn client_supports(&self, op: Operation, source: u32, size: u8) -> bool {
        self.desc
            .clients
            .iter()
            .find(|c| c.owns_source(source))
            .is_some_and(|c| c.supports.supports(op, size))
    }

    fn manager_supports(&self, op: Operation, address: u64, size: u8) -> bool {
        let Some(bytes) = 1u64.checked_shl(size.into()) else {
            return false;
        };
        self.desc
            .managers
            .iter()
            .any(|m| m.serves_transfer(address, bytes) && m.supports.supports(op, size))
    }

    fn address_managed(&self, address: u64) -> bool {
        self.desc
            .managers
            .iter()
            .any(|m| m.regions.iter().any(|r| r.contains(address)))
    }

    fn sink_valid(&self, sink: u32) -> bool {
        self.desc.managers.iter().any(|m| m.owns_sink(sink))
    }

    fn source_owned(&self, source: u32) -> bool {
        self.desc.clients.iter().any(|c| c.owns_source(source))
    }

    fn implied_mask(&self, address: u64, size: u8) -> u64 {
        let lanes = self.desc.beat_bytes;
        if size >= self.beat_log2 {
            return full_mask(lanes);
        }
        let bytes = 1u32 << size;
        let offset = (address & u64::from(lanes - 1)) as u32;
        // A sub-beat transfer occupies `bytes` contiguous lanes at its
        // offset within the beat.
        (full_mask(bytes)) << offset
    }

    fn beat_bytes(&self) -> u32 {
        self.desc.beat_bytes
    }

    fn min_latency(&self) -> u32 {
        self.desc.min_latency
    }

    fn end_source_id(&self) -> u32 {
        self.desc
            .clients
            .iter()
            .map(|c| c.end_source)
            .max()
            .unwrap_or(0)
    }
}

fn full_mask(lanes: u32) -> u64 {
    if lanes >= 64 {
        u64::MAX
    } else {
        (1u64 << lanes) - 1
    }
}
