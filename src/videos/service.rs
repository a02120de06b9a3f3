//! Video lifecycle service.
//!
//! Orchestrates validate → mutate → project for every operation. Owns the
//! id and timestamp policy. Validation always completes before the store is
//! touched, so a rejected request never leaves a partial mutation behind.
//!
//! On update, validation runs before the existence check: a request that is
//! both malformed and aimed at an unknown id reports the validation errors.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Days, SubsecRound, Utc};

use crate::observability::{log_event_with_fields, Event};

use super::errors::{ValidationErrors, VideoError, VideoResult};
use super::store::VideoRepository;
use super::types::{Video, VideoCandidate};
use super::validator::{validate_create, validate_update};
use super::view::{format_timestamp, VideoView};

/// Hands out record ids.
///
/// Ids follow the wall clock in milliseconds but are strictly increasing, so
/// two creates in the same millisecond, or a clock that steps backwards,
/// still never produce a repeat. Reset does not rewind the sequence.
#[derive(Debug)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self {
            last: AtomicI64::new(i64::MIN),
        }
    }

    /// A generator whose first id is greater than `floor`
    pub fn starting_after(floor: Option<i64>) -> Self {
        Self {
            last: AtomicI64::new(floor.unwrap_or(i64::MIN)),
        }
    }

    /// Next id for a record created at `now`.
    ///
    /// Fails once the sequence has reached `i64::MAX`.
    pub fn next(&self, now: DateTime<Utc>) -> VideoResult<i64> {
        let candidate = now.timestamp_millis();
        let bump = move |last: i64| last.checked_add(1).map(|next| candidate.max(next));

        match self.last.fetch_update(Ordering::SeqCst, Ordering::SeqCst, bump) {
            Ok(previous) => bump(previous).ok_or(VideoError::IdsExhausted),
            Err(_) => Err(VideoError::IdsExhausted),
        }
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Video lifecycle controller
pub struct VideoService<R: VideoRepository> {
    repo: R,
    ids: IdGenerator,
}

impl<R: VideoRepository> VideoService<R> {
    /// Wraps a repository. Ids continue past whatever it already holds.
    ///
    /// If the current maximum cannot be read the failure is logged and the
    /// generator starts from the clock alone; `insert` still rejects a
    /// colliding id.
    pub fn new(repo: R) -> Self {
        let floor = match repo.max_id() {
            Ok(floor) => floor,
            Err(e) => {
                log_event_with_fields(Event::StoreUnavailable, &[("error", &e.to_string())]);
                None
            }
        };

        Self {
            repo,
            ids: IdGenerator::starting_after(floor),
        }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// All videos in stored order
    pub fn list(&self) -> VideoResult<Vec<VideoView>> {
        Ok(self.repo.list_all()?.iter().map(VideoView::from).collect())
    }

    pub fn get(&self, id: i64) -> VideoResult<VideoView> {
        match self.repo.find_by_id(id)? {
            Some(video) => Ok(VideoView::from(&video)),
            None => Err(not_found(id)),
        }
    }

    pub fn create(&self, candidate: &VideoCandidate) -> VideoResult<VideoView> {
        self.create_at(candidate, Utc::now())
    }

    /// Create with an explicit clock reading.
    ///
    /// `createdAt` is truncated to milliseconds so the stored value is exactly
    /// the one clients see. `publicationDate` is one calendar day later.
    pub fn create_at(&self, candidate: &VideoCandidate, now: DateTime<Utc>) -> VideoResult<VideoView> {
        let input = validate_create(candidate).map_err(|errors| rejected("create", "", errors))?;

        let created_at = now.trunc_subsecs(3);
        let publication_date = created_at
            .checked_add_days(Days::new(1))
            .ok_or_else(|| VideoError::Storage("publication date out of range".to_string()))?;

        let video = Video {
            id: self.ids.next(created_at)?,
            title: input.title,
            author: input.author,
            can_be_downloaded: false,
            min_age_restriction: None,
            created_at,
            publication_date: format_timestamp(&publication_date),
            available_resolutions: input.available_resolutions,
        };
        let view = VideoView::from(&video);

        self.repo.insert(video)?;

        log_event_with_fields(Event::VideoCreated, &[("video_id", &view.id.to_string())]);
        Ok(view)
    }

    pub fn update(&self, id: i64, candidate: &VideoCandidate) -> VideoResult<()> {
        let input = validate_update(candidate)
            .map_err(|errors| rejected("update", &id.to_string(), errors))?;

        match self.repo.replace_fields(id, input) {
            Ok(_) => {
                log_event_with_fields(Event::VideoUpdated, &[("video_id", &id.to_string())]);
                Ok(())
            }
            Err(VideoError::NotFound(id)) => Err(not_found(id)),
            Err(e) => Err(e),
        }
    }

    /// Update addressed by a raw path segment.
    ///
    /// The body is validated before the segment is parsed, so a malformed
    /// body is reported even when the segment names no record.
    pub fn update_raw(&self, raw_id: &str, candidate: &VideoCandidate) -> VideoResult<()> {
        match raw_id.parse::<i64>() {
            Ok(id) => self.update(id, candidate),
            Err(_) => {
                validate_update(candidate).map_err(|errors| rejected("update", raw_id, errors))?;
                Err(invalid_id(raw_id))
            }
        }
    }

    pub fn delete(&self, id: i64) -> VideoResult<()> {
        match self.repo.remove_by_id(id) {
            Ok(_) => {
                log_event_with_fields(Event::VideoDeleted, &[("video_id", &id.to_string())]);
                Ok(())
            }
            Err(VideoError::NotFound(id)) => Err(not_found(id)),
            Err(e) => Err(e),
        }
    }

    /// Empties the store. Test-support only.
    pub fn reset_all(&self) -> VideoResult<()> {
        let removed = self.repo.len()?;
        self.repo.clear()?;

        log_event_with_fields(Event::StoreReset, &[("removed", &removed.to_string())]);
        Ok(())
    }
}

fn not_found(id: i64) -> VideoError {
    log_event_with_fields(Event::VideoNotFound, &[("video_id", &id.to_string())]);
    VideoError::NotFound(id)
}

/// Parses a path segment into a record id.
///
/// A segment that is not an integer can never match a record and is reported
/// like an unknown id.
pub fn parse_id(raw: &str) -> VideoResult<i64> {
    raw.parse::<i64>().map_err(|_| invalid_id(raw))
}

fn invalid_id(raw: &str) -> VideoError {
    log_event_with_fields(Event::VideoNotFound, &[("video_id", raw)]);
    VideoError::InvalidId(raw.to_string())
}

fn rejected(operation: &str, id: &str, errors: ValidationErrors) -> VideoError {
    let fields = errors.fields().join(",");
    log_event_with_fields(
        Event::VideoRejected,
        &[("operation", operation), ("fields", &fields), ("video_id", id)],
    );
    VideoError::Validation(errors)
}
