//! In-memory video store
//!
//! Holds the authoritative ordered list of videos. Order is insertion order;
//! updates replace in place and deletes shift later entries down. The list
//! sits behind an async `RwLock` so each mutation is atomic across workers.

use chrono::{DateTime, TimeZone, Utc};
use tokio::sync::RwLock;
use video_core::{NewVideo, Resolution, Video, VideoUpdate};

use crate::error::{AppError, Result};

#[derive(Debug, Default)]
pub struct VideoStore {
    inner: RwLock<StoreInner>,
}

#[derive(Debug, Default)]
struct StoreInner {
    videos: Vec<Video>,
    last_id: i64,
}

impl StoreInner {
    /// Millisecond timestamp, bumped past the previous id when the clock
    /// has not moved forward.
    fn next_id(&mut self, now: DateTime<Utc>) -> i64 {
        let id = now.timestamp_millis().max(self.last_id + 1);
        self.last_id = id;
        id
    }

    fn position(&self, id: i64) -> Result<usize> {
        self.videos
            .iter()
            .position(|v| v.id == id)
            .ok_or_else(|| not_found(id))
    }
}

impl VideoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `videos`, in the given order.
    pub fn with_videos(videos: Vec<Video>) -> Self {
        let last_id = videos.iter().map(|v| v.id).max().unwrap_or(0);
        Self {
            inner: RwLock::new(StoreInner { videos, last_id }),
        }
    }

    /// Store holding the single sample video used for demos.
    pub fn seeded() -> Self {
        Self::with_videos(vec![sample_video()])
    }

    pub async fn list_all(&self) -> Vec<Video> {
        self.inner.read().await.videos.clone()
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Video> {
        let inner = self.inner.read().await;
        inner
            .videos
            .iter()
            .find(|v| v.id == id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    /// Append a new video with a freshly assigned id.
    pub async fn insert(&self, new: NewVideo) -> Video {
        let now = Utc::now();
        let mut inner = self.inner.write().await;
        let id = inner.next_id(now);
        let video = Video::create(id, new, now);
        inner.videos.push(video.clone());
        video
    }

    /// Replace the mutable fields of video `id` without moving it.
    pub async fn replace(&self, id: i64, update: VideoUpdate) -> Result<Video> {
        let mut inner = self.inner.write().await;
        let index = inner.position(id)?;
        let video = &mut inner.videos[index];
        video.apply_update(update, Utc::now());
        Ok(video.clone())
    }

    pub async fn remove(&self, id: i64) -> Result<Video> {
        let mut inner = self.inner.write().await;
        let index = inner.position(id)?;
        Ok(inner.videos.remove(index))
    }

    /// Drop every video; returns how many were removed.
    pub async fn clear(&self) -> usize {
        let mut inner = self.inner.write().await;
        let removed = inner.videos.len();
        inner.videos.clear();
        removed
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.videos.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("video {}", id))
}

pub fn sample_video() -> Video {
    let timestamp = Utc
        .timestamp_millis_opt(1_689_608_954_428)
        .single()
        .unwrap_or_default();

    Video {
        id: 1,
        title: "test".to_string(),
        author: "string".to_string(),
        can_be_downloaded: true,
        min_age_restriction: None,
        created_at: timestamp,
        publication_date: timestamp,
        available_resolutions: vec![Resolution::P144],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_video(title: &str) -> NewVideo {
        NewVideo {
            title: title.to_string(),
            author: "author".to_string(),
            available_resolutions: vec![],
        }
    }

    fn update(title: &str) -> VideoUpdate {
        VideoUpdate {
            title: title.to_string(),
            author: "editor".to_string(),
            available_resolutions: vec![Resolution::P480],
            can_be_downloaded: true,
            min_age_restriction: Some(12),
            publication_date: None,
        }
    }

    #[tokio::test]
    async fn test_insert_preserves_order() {
        let store = VideoStore::new();
        let a = store.insert(new_video("a")).await;
        let b = store.insert(new_video("b")).await;
        let c = store.insert(new_video("c")).await;

        let ids: Vec<i64> = store.list_all().await.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![a.id, b.id, c.id]);
    }

    #[tokio::test]
    async fn test_rapid_inserts_get_unique_increasing_ids() {
        let store = VideoStore::new();
        let mut ids = Vec::new();
        for i in 0..500 {
            ids.push(store.insert(new_video(&i.to_string())).await.id);
        }
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let store = VideoStore::new();
        let video = store.insert(new_video("a")).await;

        assert_eq!(store.find_by_id(video.id).await.unwrap(), video);
        assert!(matches!(
            store.find_by_id(video.id + 1).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_replace_in_place_keeps_id_and_created_at() {
        let store = VideoStore::new();
        let first = store.insert(new_video("first")).await;
        let second = store.insert(new_video("second")).await;

        let replaced = store.replace(first.id, update("renamed")).await.unwrap();
        assert_eq!(replaced.id, first.id);
        assert_eq!(replaced.created_at, first.created_at);

        let all = store.list_all().await;
        assert_eq!(all[0].title, "renamed");
        assert_eq!(all[0].min_age_restriction, Some(12));
        assert_eq!(all[1], second);
    }

    #[tokio::test]
    async fn test_replace_missing_is_not_found() {
        let store = VideoStore::new();
        store.insert(new_video("a")).await;
        let before = store.list_all().await;

        assert!(matches!(
            store.replace(1223, update("x")).await,
            Err(AppError::NotFound(_))
        ));
        assert_eq!(store.list_all().await, before);
    }

    #[tokio::test]
    async fn test_remove_shifts_later_entries() {
        let store = VideoStore::new();
        let a = store.insert(new_video("a")).await;
        let b = store.insert(new_video("b")).await;
        let c = store.insert(new_video("c")).await;

        assert_eq!(store.remove(b.id).await.unwrap(), b);
        assert_eq!(store.list_all().await, vec![a, c]);
        assert!(matches!(store.remove(b.id).await, Err(AppError::NotFound(_))));
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_clear() {
        let store = VideoStore::seeded();
        store.insert(new_video("a")).await;

        assert_eq!(store.clear().await, 2);
        assert!(store.is_empty().await);
        assert_eq!(store.clear().await, 0);
    }

    #[tokio::test]
    async fn test_seeded_sample() {
        let store = VideoStore::seeded();
        let sample = store.find_by_id(1).await.unwrap();
        assert_eq!(
            video_core::models::iso_millis::format(&sample.created_at),
            "2023-07-17T15:49:14.428Z"
        );
        assert!(store.insert(new_video("next")).await.id > 1);
    }
}
