//! Observability for vidmeta
//!
//! Structured JSON logging of typed lifecycle events.
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on request handling
//! 3. No async or background threads
//!
//! # Usage
//!
//! ```ignore
//! use vidmeta::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::VideoCreated, &[("video_id", "42")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
