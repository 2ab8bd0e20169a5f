//! Reading-progress bookmarks.
//!
//! The reader UI remembers where a visitor left off in each novel: the
//! scroll position per chapter, the last chapter opened, and when. The
//! store keeps that state in one JSON file.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ReaderError;

/// Positions at or below this are noise from opening the page; restoring
/// them would only fight the reader's own scrolling.
const RESTORE_THRESHOLD: u32 = 100;

/// Progress through one novel.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NovelProgress {
    /// Chapter most recently read.
    pub last_chapter: Option<String>,
    /// When the novel was last opened.
    pub last_visit: Option<DateTime<Utc>>,
    /// Saved scroll position per chapter.
    #[serde(default)]
    pub positions: HashMap<String, u32>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct BookmarkState {
    #[serde(default)]
    novels: HashMap<String, NovelProgress>,
}

/// File-backed bookmark store.
#[derive(Debug)]
pub struct BookmarkStore {
    path: PathBuf,
    state: BookmarkState,
}

impl BookmarkStore {
    /// Open the store at `path`. A missing file is an empty store; a
    /// malformed one is an error rather than silent data loss.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ReaderError> {
        let path = path.as_ref().to_path_buf();

        let state = if path.exists() {
            let raw = fs::read_to_string(&path).map_err(|e| ReaderError::Load {
                path: path.display().to_string(),
                source: e,
            })?;
            serde_json::from_str(&raw).map_err(|e| ReaderError::Corrupt {
                path: path.display().to_string(),
                source: e,
            })?
        } else {
            BookmarkState::default()
        };

        Ok(Self { path, state })
    }

    /// Record the reader's position in a chapter. Also marks the chapter
    /// as the novel's most recent one and stamps the visit time.
    pub fn save_position(&mut self, novel: &str, chapter: &str, position: u32) {
        let progress = self.state.novels.entry(novel.to_string()).or_default();
        progress.positions.insert(chapter.to_string(), position);
        progress.last_chapter = Some(chapter.to_string());
        progress.last_visit = Some(Utc::now());
    }

    /// Position to scroll back to, if one worth restoring was saved.
    pub fn restore_position(&self, novel: &str, chapter: &str) -> Option<u32> {
        let position = *self
            .state
            .novels
            .get(novel)?
            .positions
            .get(chapter)?;
        (position > RESTORE_THRESHOLD).then_some(position)
    }

    /// Chapter the reader most recently saved progress in.
    pub fn last_chapter(&self, novel: &str) -> Option<&str> {
        self.state
            .novels
            .get(novel)?
            .last_chapter
            .as_deref()
    }

    /// When the novel was last opened.
    pub fn last_visit(&self, novel: &str) -> Option<DateTime<Utc>> {
        self.state.novels.get(novel)?.last_visit
    }

    /// Progress for one novel, if any was recorded.
    pub fn progress(&self, novel: &str) -> Option<&NovelProgress> {
        self.state.novels.get(novel)
    }

    /// Persist the store to its file.
    pub fn flush(&self) -> Result<(), ReaderError> {
        let json = serde_json::to_string_pretty(&self.state).map_err(|e| ReaderError::Corrupt {
            path: self.path.display().to_string(),
            source: e,
        })?;
        fs::write(&self.path, json).map_err(|e| ReaderError::Store {
            path: self.path.display().to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_is_an_empty_store() {
        let temp = tempdir().unwrap();
        let store = BookmarkStore::open(temp.path().join("bookmarks.json")).unwrap();
        assert!(store.progress("arc-of-ash").is_none());
    }

    #[test]
    fn roundtrips_through_the_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("bookmarks.json");

        let mut store = BookmarkStore::open(&path).unwrap();
        store.save_position("arc-of-ash", "ch-03", 1840);
        store.flush().unwrap();

        let reopened = BookmarkStore::open(&path).unwrap();
        assert_eq!(reopened.restore_position("arc-of-ash", "ch-03"), Some(1840));
        assert_eq!(reopened.last_chapter("arc-of-ash"), Some("ch-03"));
        assert!(reopened.last_visit("arc-of-ash").is_some());
    }

    #[test]
    fn shallow_positions_are_not_restored() {
        let temp = tempdir().unwrap();
        let mut store = BookmarkStore::open(temp.path().join("b.json")).unwrap();

        store.save_position("arc-of-ash", "ch-01", 40);
        assert_eq!(store.restore_position("arc-of-ash", "ch-01"), None);

        store.save_position("arc-of-ash", "ch-01", 101);
        assert_eq!(store.restore_position("arc-of-ash", "ch-01"), Some(101));
    }

    #[test]
    fn last_chapter_follows_most_recent_save() {
        let temp = tempdir().unwrap();
        let mut store = BookmarkStore::open(temp.path().join("b.json")).unwrap();

        store.save_position("arc-of-ash", "ch-01", 500);
        store.save_position("arc-of-ash", "ch-02", 200);

        assert_eq!(store.last_chapter("arc-of-ash"), Some("ch-02"));
        // Both chapter positions are kept.
        assert_eq!(store.restore_position("arc-of-ash", "ch-01"), Some(500));
    }

    #[test]
    fn corrupt_file_is_reported() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("b.json");
        fs::write(&path, "{broken").unwrap();

        let err = BookmarkStore::open(&path).unwrap_err();
        assert!(matches!(err, ReaderError::Corrupt { .. }));
    }
}
