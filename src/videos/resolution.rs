//! Closed set of video quality labels.
//!
//! Membership is exact and case-sensitive. Every label is distinct.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A video quality tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resolution {
    P144,
    P240,
    P360,
    P480,
    P720,
    P1080,
    P1440,
    P2160,
}

impl Resolution {
    /// Every member, in ascending quality order
    pub const ALL: [Resolution; 8] = [
        Resolution::P144,
        Resolution::P240,
        Resolution::P360,
        Resolution::P480,
        Resolution::P720,
        Resolution::P1080,
        Resolution::P1440,
        Resolution::P2160,
    ];

    /// Returns the wire label
    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::P144 => "P144",
            Resolution::P240 => "P240",
            Resolution::P360 => "P360",
            Resolution::P480 => "P480",
            Resolution::P720 => "P720",
            Resolution::P1080 => "P1080",
            Resolution::P1440 => "P1440",
            Resolution::P2160 => "P2160",
        }
    }

    /// Looks up a label. No aliasing, no case folding.
    pub fn parse(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|r| r.as_str() == label)
    }

    /// Membership test against the closed set
    pub fn is_member(label: &str) -> bool {
        Self::parse(label).is_some()
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
