//! External representation of a video record.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use super::resolution::Resolution;
use super::types::Video;

/// Video as returned to clients
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoView {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub can_be_downloaded: bool,
    pub min_age_restriction: Option<u8>,
    pub created_at: String,
    pub publication_date: String,
    pub available_resolutions: Vec<Resolution>,
}

impl From<&Video> for VideoView {
    fn from(video: &Video) -> Self {
        Self {
            id: video.id,
            title: video.title.clone(),
            author: video.author.clone(),
            can_be_downloaded: video.can_be_downloaded,
            min_age_restriction: video.min_age_restriction,
            created_at: format_timestamp(&video.created_at),
            publication_date: video.publication_date.clone(),
            available_resolutions: video.available_resolutions.clone(),
        }
    }
}

/// ISO-8601 with millisecond precision and a `Z` suffix
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}
