//! Observable events
//!
//! Events are explicit and typed.

use std::fmt;

use super::logger::Severity;

/// Observable events in vidmeta
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Configuration loaded
    ConfigLoaded,
    /// HTTP listener bound, ready for requests
    ServerStart,

    // Video operations
    /// Record created
    VideoCreated,
    /// Record fields replaced
    VideoUpdated,
    /// Record removed
    VideoDeleted,
    /// Create or update failed validation
    VideoRejected,
    /// Operation targeted an unknown id
    VideoNotFound,
    /// Store cleared
    StoreReset,
    /// Store could not be read
    StoreUnavailable,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::ServerStart => "SERVER_START",
            Event::VideoCreated => "VIDEO_CREATED",
            Event::VideoUpdated => "VIDEO_UPDATED",
            Event::VideoDeleted => "VIDEO_DELETED",
            Event::VideoRejected => "VIDEO_REJECTED",
            Event::VideoNotFound => "VIDEO_NOT_FOUND",
            Event::StoreReset => "STORE_RESET",
            Event::StoreUnavailable => "STORE_UNAVAILABLE",
        }
    }

    /// Default severity for this event
    pub fn severity(&self) -> Severity {
        match self {
            Event::VideoRejected | Event::VideoNotFound => Severity::Warn,
            Event::StoreUnavailable => Severity::Error,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
