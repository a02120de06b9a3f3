//! Video metadata records.
//!
//! # Components
//!
//! - `resolution`: closed set of quality labels
//! - `validator`: field rules for create and update, all errors collected
//! - `store`: ordered in-memory record storage
//! - `service`: validate → mutate → project for each operation
//! - `view`: the shape returned to clients
//!
//! # Invariants
//!
//! - Exactly one record per id
//! - `createdAt` never changes after creation
//! - An update replaces every mutable field or none of them
//! - A rejected request never mutates the store

mod errors;
mod resolution;
mod service;
mod store;
mod types;
mod validator;
mod view;

pub use errors::{FieldError, ValidationErrors, VideoError, VideoResult};
pub use resolution::Resolution;
pub use service::{parse_id, IdGenerator, VideoService};
pub use store::{InMemoryVideoRepository, VideoRepository};
pub use types::{CreateVideoInput, UpdateVideoInput, Video, VideoCandidate};
pub use validator::{validate_create, validate_update, AUTHOR_MAX_LEN, TITLE_MAX_LEN};
pub use view::{format_timestamp, VideoView};
