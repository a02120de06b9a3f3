//! Video record storage.
//!
//! Records are kept in insertion order and looked up by linear scan on `id`.
//! Each mutating call holds the write lock for its whole critical section,
//! so a replace is never observed half-applied.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::errors::{VideoError, VideoResult};
use super::types::{UpdateVideoInput, Video};

/// Video repository trait
///
/// Abstracts storage operations for video records.
pub trait VideoRepository: Send + Sync {
    /// Append a record. Fails if the id is already stored.
    fn insert(&self, video: Video) -> VideoResult<()>;

    /// Find a record by its id
    fn find_by_id(&self, id: i64) -> VideoResult<Option<Video>>;

    /// Position of a record in stored order
    fn find_index_by_id(&self, id: i64) -> VideoResult<Option<usize>>;

    /// Replace every mutable field of a record in one step
    fn replace_fields(&self, id: i64, input: UpdateVideoInput) -> VideoResult<Video>;

    /// Remove a record, returning it
    fn remove_by_id(&self, id: i64) -> VideoResult<Video>;

    /// Drop every record
    fn clear(&self) -> VideoResult<()>;

    /// Every record, in insertion order
    fn list_all(&self) -> VideoResult<Vec<Video>>;

    /// Number of stored records
    fn len(&self) -> VideoResult<usize>;

    /// Largest stored id, if any
    fn max_id(&self) -> VideoResult<Option<i64>>;

    fn is_empty(&self) -> VideoResult<bool> {
        Ok(self.len()? == 0)
    }
}

/// In-memory video repository
#[derive(Debug, Default)]
pub struct InMemoryVideoRepository {
    videos: RwLock<Vec<Video>>,
}

impl InMemoryVideoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a repository pre-populated with the given records
    pub fn with_videos(videos: Vec<Video>) -> Self {
        Self {
            videos: RwLock::new(videos),
        }
    }

    fn read(&self) -> VideoResult<RwLockReadGuard<'_, Vec<Video>>> {
        self.videos
            .read()
            .map_err(|_| VideoError::Storage("Lock poisoned".to_string()))
    }

    fn write(&self) -> VideoResult<RwLockWriteGuard<'_, Vec<Video>>> {
        self.videos
            .write()
            .map_err(|_| VideoError::Storage("Lock poisoned".to_string()))
    }
}

impl VideoRepository for InMemoryVideoRepository {
    fn insert(&self, video: Video) -> VideoResult<()> {
        let mut videos = self.write()?;

        if videos.iter().any(|v| v.id == video.id) {
            return Err(VideoError::DuplicateId(video.id));
        }

        videos.push(video);
        Ok(())
    }

    fn find_by_id(&self, id: i64) -> VideoResult<Option<Video>> {
        let videos = self.read()?;
        Ok(videos.iter().find(|v| v.id == id).cloned())
    }

    fn find_index_by_id(&self, id: i64) -> VideoResult<Option<usize>> {
        let videos = self.read()?;
        Ok(videos.iter().position(|v| v.id == id))
    }

    fn replace_fields(&self, id: i64, input: UpdateVideoInput) -> VideoResult<Video> {
        let mut videos = self.write()?;

        let existing = videos
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or(VideoError::NotFound(id))?;

        existing.apply_update(input);
        Ok(existing.clone())
    }

    fn remove_by_id(&self, id: i64) -> VideoResult<Video> {
        let mut videos = self.write()?;

        let index = videos
            .iter()
            .position(|v| v.id == id)
            .ok_or(VideoError::NotFound(id))?;

        Ok(videos.remove(index))
    }

    fn clear(&self) -> VideoResult<()> {
        self.write()?.clear();
        Ok(())
    }

    fn list_all(&self) -> VideoResult<Vec<Video>> {
        Ok(self.read()?.clone())
    }

    fn len(&self) -> VideoResult<usize> {
        Ok(self.read()?.len())
    }

    fn max_id(&self) -> VideoResult<Option<i64>> {
        Ok(self.read()?.iter().map(|v| v.id).max())
    }
}
