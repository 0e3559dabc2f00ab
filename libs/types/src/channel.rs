//! Channel identifiers for the five logical message streams

use std::fmt;

/// The five unidirectional channels of one link.
///
/// A carries client requests, B manager-to-client probes and forwarded
/// requests, C client responses and releases, D manager responses and
/// grants, E the client's final grant acknowledgment. Priority for
/// deadlock freedom is E > D > C > B > A, but the monitor only needs the
/// identity, not the ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Channel {
    /// Client request channel
    A,
    /// Manager probe / forwarded request channel
    B,
    /// Client response / release channel
    C,
    /// Manager response / grant channel
    D,
    /// Client grant-acknowledgment channel
    E,
}

impl Channel {
    /// Channel letter as used in fault reports.
    pub fn letter(&self) -> char {
        match self {
            Channel::A => 'A',
            Channel::B => 'B',
            Channel::C => 'C',
            Channel::D => 'D',
            Channel::E => 'E',
        }
    }

    /// True for channels whose messages can span multiple beats.
    pub fn burst_capable(&self) -> bool {
        !matches!(self, Channel::E)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}
