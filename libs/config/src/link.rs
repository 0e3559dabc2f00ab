//! Link description structs, TOML loading, and validation

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::info;
use types::Operation;

/// Errors detected while validating a link description.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Beat width must be a power of two bytes
    #[error("beat width must be a power of two, got {beat_bytes}")]
    BeatNotPowerOfTwo { beat_bytes: u32 },

    /// Lane masks are 64 bits wide, bounding the beat width
    #[error("beat width {beat_bytes} exceeds the 64-lane mask limit")]
    BeatTooWide { beat_bytes: u32 },

    /// A link needs at least one client
    #[error("link description declares no clients")]
    NoClients,

    /// A link needs at least one manager
    #[error("link description declares no managers")]
    NoManagers,

    /// A client must own at least one source ID
    #[error("client '{client}' owns an empty source-ID range")]
    EmptySourceRange { client: String },

    /// Source-ID ranges identify clients and must not overlap
    #[error("clients '{first}' and '{second}' have overlapping source-ID ranges")]
    OverlappingSources { first: String, second: String },

    /// A manager must manage at least one address range
    #[error("manager '{manager}' declares no address regions")]
    NoRegions { manager: String },

    /// Regions must be non-empty power-of-two extents
    #[error("manager '{manager}' region at {base:#x} has non-power-of-two size {size:#x}")]
    RegionNotPowerOfTwo { manager: String, base: u64, size: u64 },

    /// Region bases must be aligned to their size
    #[error("manager '{manager}' region base {base:#x} is not aligned to its size {size:#x}")]
    MisalignedRegion { manager: String, base: u64, size: u64 },

    /// A transfer-size range with min above max supports nothing
    #[error("{context}: transfer-size range has min {min} above max {max}")]
    InvalidTransferRange { context: String, min: u8, max: u8 },
}

/// Inclusive range of supported transfer sizes, as log2 of bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferSizes {
    /// Smallest supported size (log2 bytes)
    pub min: u8,
    /// Largest supported size (log2 bytes)
    pub max: u8,
}

impl TransferSizes {
    /// Does this range include a transfer of `2^size` bytes?
    pub fn contains(&self, size: u8) -> bool {
        self.min <= size && size <= self.max
    }
}

/// One managed address region: a power-of-two extent aligned to its size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressRange {
    /// First byte address of the region
    pub base: u64,
    /// Region length in bytes
    pub size: u64,
}

impl AddressRange {
    /// Does the region contain this byte address?
    pub fn contains(&self, address: u64) -> bool {
        address >= self.base && address - self.base < self.size
    }

    /// Does the region contain the whole `bytes`-long transfer at `address`?
    pub fn contains_transfer(&self, address: u64, bytes: u64) -> bool {
        self.contains(address) && bytes <= self.size - (address - self.base)
    }
}

/// Operations a client answers on the B channel, by transfer size.
///
/// An absent entry means the operation is unsupported at any size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSupport {
    /// Permission probes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probe: Option<TransferSizes>,
    /// Forwarded reads
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get: Option<TransferSizes>,
    /// Forwarded full writes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub put_full: Option<TransferSizes>,
    /// Forwarded partial writes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub put_partial: Option<TransferSizes>,
    /// Forwarded atomic arithmetic
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arithmetic: Option<TransferSizes>,
    /// Forwarded atomic logical
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logical: Option<TransferSizes>,
    /// Forwarded hints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<TransferSizes>,
}

impl ClientSupport {
    /// Does this client support `op` at this transfer size?
    pub fn supports(&self, op: Operation, size: u8) -> bool {
        let range = match op {
            Operation::Probe => self.probe,
            Operation::Get => self.get,
            Operation::PutFull => self.put_full,
            Operation::PutPartial => self.put_partial,
            Operation::Arithmetic => self.arithmetic,
            Operation::Logical => self.logical,
            Operation::Hint => self.hint,
            // Clients receive no Acquire
            Operation::Acquire => None,
        };
        range.is_some_and(|r| r.contains(size))
    }
}

/// Operations a manager answers on the A channel, by transfer size.
///
/// An absent entry means the operation is unsupported at any size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerSupport {
    /// Ownership acquisition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acquire: Option<TransferSizes>,
    /// Reads
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get: Option<TransferSizes>,
    /// Full writes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub put_full: Option<TransferSizes>,
    /// Partial writes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub put_partial: Option<TransferSizes>,
    /// Atomic arithmetic
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arithmetic: Option<TransferSizes>,
    /// Atomic logical
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logical: Option<TransferSizes>,
    /// Hints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<TransferSizes>,
}

impl ManagerSupport {
    /// Does this manager support `op` at this transfer size?
    pub fn supports(&self, op: Operation, size: u8) -> bool {
        let range = match op {
            Operation::Acquire => self.acquire,
            Operation::Get => self.get,
            Operation::PutFull => self.put_full,
            Operation::PutPartial => self.put_partial,
            Operation::Arithmetic => self.arithmetic,
            Operation::Logical => self.logical,
            Operation::Hint => self.hint,
            // Managers receive no Probe
            Operation::Probe => None,
        };
        range.is_some_and(|r| r.contains(size))
    }
}

/// Capability table for one client endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientCaps {
    /// Human-readable endpoint name, used in diagnostics
    pub name: String,
    /// First source ID this client owns
    pub first_source: u32,
    /// One past the last source ID this client owns
    pub end_source: u32,
    /// Per-operation supported transfer sizes
    #[serde(default)]
    pub supports: ClientSupport,
}

impl ClientCaps {
    /// Does this client own the source ID?
    pub fn owns_source(&self, source: u32) -> bool {
        self.first_source <= source && source < self.end_source
    }
}

/// Capability table for one manager endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerCaps {
    /// Human-readable endpoint name, used in diagnostics
    pub name: String,
    /// First sink ID this manager owns
    #[serde(default)]
    pub first_sink: u32,
    /// One past the last sink ID this manager owns
    #[serde(default)]
    pub end_sink: u32,
    /// Address regions this manager serves
    pub regions: Vec<AddressRange>,
    /// Per-operation supported transfer sizes
    #[serde(default)]
    pub supports: ManagerSupport,
}

impl ManagerCaps {
    /// Does this manager own the sink ID?
    pub fn owns_sink(&self, sink: u32) -> bool {
        self.first_sink <= sink && sink < self.end_sink
    }

    /// Does any region contain the whole `bytes`-long transfer?
    pub fn serves_transfer(&self, address: u64, bytes: u64) -> bool {
        self.regions
            .iter()
            .any(|r| r.contains_transfer(address, bytes))
    }
}

/// Full static description of one point-to-point link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkDescription {
    /// Bus beat width in bytes (power of two, at most 64)
    pub beat_bytes: u32,
    /// Guaranteed minimum request-to-response latency in ticks
    #[serde(default)]
    pub min_latency: u32,
    /// Client endpoints on this link
    pub clients: Vec<ClientCaps>,
    /// Manager endpoints on this link
    pub managers: Vec<ManagerCaps>,
}

impl LinkDescription {
    /// Parse and validate a description from TOML text.
    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        let desc: LinkDescription =
            toml::from_str(text).context("parsing link description TOML")?;
        desc.validate().context("validating link description")?;
        Ok(desc)
    }

    /// Load, parse, and validate a description from a TOML file.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading link description {}", path.display()))?;
        let desc = Self::from_toml_str(&text)?;
        info!(
            clients = desc.clients.len(),
            managers = desc.managers.len(),
            beat_bytes = desc.beat_bytes,
            "loaded link description from {}",
            path.display()
        );
        Ok(desc)
    }

    /// Check the structural invariants a usable description must satisfy.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.beat_bytes.is_power_of_two() {
            return Err(ConfigError::BeatNotPowerOfTwo {
                beat_bytes: self.beat_bytes,
            });
        }
        if self.beat_bytes > 64 {
            return Err(ConfigError::BeatTooWide {
                beat_bytes: self.beat_bytes,
            });
        }
        if self.clients.is_empty() {
            return Err(ConfigError::NoClients);
        }
        if self.managers.is_empty() {
            return Err(ConfigError::NoManagers);
        }

        for client in &self.clients {
            if client.first_source >= client.end_source {
                return Err(ConfigError::EmptySourceRange {
                    client: client.name.clone(),
                });
            }
            validate_support_ranges(&client.name, &support_ranges_client(&client.supports))?;
        }
        for (i, a) in self.clients.iter().enumerate() {
            for b in &self.clients[i + 1..] {
                if a.first_source < b.end_source && b.first_source < a.end_source {
                    return Err(ConfigError::OverlappingSources {
                        first: a.name.clone(),
                        second: b.name.clone(),
                    });
                }
            }
        }

        for manager in &self.managers {
            if manager.regions.is_empty() {
                return Err(ConfigError::NoRegions {
                    manager: manager.name.clone(),
                });
            }
            for region in &manager.regions {
                if region.size == 0 || !region.size.is_power_of_two() {
                    return Err(ConfigError::RegionNotPowerOfTwo {
                        manager: manager.name.clone(),
                        base: region.base,
                        size: region.size,
                    });
                }
                if region.base % region.size != 0 {
                    return Err(ConfigError::MisalignedRegion {
                        manager: manager.name.clone(),
                        base: region.base,
                        size: region.size,
                    });
                }
            }
            validate_support_ranges(&manager.name, &support_ranges_manager(&manager.supports))?;
        }

        Ok(())
    }
}

fn support_ranges_client(s: &ClientSupport) -> [(&'static str, Option<TransferSizes>); 7] {
    [
        ("probe", s.probe),
        ("get", s.get),
        ("put_full", s.put_full),
        ("put_partial", s.put_partial),
        ("arithmetic", s.arithmetic),
        ("logical", s.logical),
        ("hint", s.hint),
    ]
}

fn support_ranges_manager(s: &ManagerSupport) -> [(&'static str, Option<TransferSizes>); 7] {
    [
        ("acquire", s.acquire),
        ("get", s.get),
        ("put_full", s.put_full),
        ("put_partial", s.put_partial),
        ("arithmetic", s.arithmetic),
        ("logical", s.logical),
        ("hint", s.hint),
    ]
}

fn validate_support_ranges(
    endpoint: &str,
    ranges: &[(&'static str, Option<TransferSizes>)],
) -> Result<(), ConfigError> {
    for (op, range) in ranges {
        if let Some(r) = range {
            if r.min > r.max {
                return Err(ConfigError::InvalidTransferRange {
                    context: format!("{endpoint}.{op}"),
                    min: r.min,
                    max: r.max,
                });
            }
        }
    }
    Ok(())
}
