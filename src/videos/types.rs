//! Video record and request candidate types.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use super::resolution::Resolution;

/// Stored video record
#[derive(Debug, Clone, PartialEq)]
pub struct Video {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub can_be_downloaded: bool,
    pub min_age_restriction: Option<u8>,
    pub created_at: DateTime<Utc>,
    /// Client-controlled after the first update, so kept as the raw string
    pub publication_date: String,
    pub available_resolutions: Vec<Resolution>,
}

/// Untyped request body as received at the boundary.
///
/// A field is `None` when the key is absent. An explicit JSON `null` is
/// kept as `Some(Value::Null)` so the validator can tell the two apart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VideoCandidate {
    pub title: Option<Value>,
    pub author: Option<Value>,
    pub available_resolutions: Option<Value>,
    pub can_be_downloaded: Option<Value>,
    pub min_age_restriction: Option<Value>,
    pub publication_date: Option<Value>,
}

impl VideoCandidate {
    /// Pulls the known keys out of a JSON body. Anything that is not an
    /// object yields an empty candidate.
    pub fn from_json(body: &Value) -> Self {
        let Some(obj) = body.as_object() else {
            return Self::default();
        };

        Self {
            title: obj.get("title").cloned(),
            author: obj.get("author").cloned(),
            available_resolutions: obj.get("availableResolutions").cloned(),
            can_be_downloaded: obj.get("canBeDownloaded").cloned(),
            min_age_restriction: obj.get("minAgeRestriction").cloned(),
            publication_date: obj.get("publicationDate").cloned(),
        }
    }
}

/// Validated create payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateVideoInput {
    pub title: String,
    pub author: String,
    pub available_resolutions: Vec<Resolution>,
}

/// Validated update payload. Replaces every mutable field of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateVideoInput {
    pub title: String,
    pub author: String,
    pub available_resolutions: Vec<Resolution>,
    pub can_be_downloaded: bool,
    pub min_age_restriction: u8,
    pub publication_date: String,
}

/// Creation time of the demo record, 2023-10-13T09:15:13.907Z
const DEMO_CREATED_AT_MILLIS: i64 = 1_697_188_513_907;

impl Video {
    /// Sample record served when the store is seeded at startup
    pub fn demo() -> Self {
        let created_at = Utc
            .timestamp_millis_opt(DEMO_CREATED_AT_MILLIS)
            .single()
            .unwrap_or_default();

        Self {
            id: 0,
            title: "string".to_string(),
            author: "string".to_string(),
            can_be_downloaded: true,
            min_age_restriction: None,
            created_at,
            publication_date: "2023-10-13T09:15:13.907Z".to_string(),
            available_resolutions: vec![Resolution::P144],
        }
    }

    /// Overwrites the mutable fields. `id` and `created_at` stay as they are.
    pub fn apply_update(&mut self, input: UpdateVideoInput) {
        self.title = input.title;
        self.author = input.author;
        self.available_resolutions = input.available_resolutions;
        self.can_be_downloaded = input.can_be_downloaded;
        self.min_age_restriction = Some(input.min_age_restriction);
        self.publication_date = input.publication_date;
    }
}
