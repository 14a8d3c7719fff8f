//! JSON file implementation of the resolution storage interface
//!
//! The document is kept in a single pretty-printed JSON file. Every mutation
//! is a full read-modify-write under the store's lock, and every write goes
//! through a sibling temp file that is renamed over the target.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::domain::{
    Config, ConfigPatch, DomainError, Goal, GoalId, GoalPatch, LogEntry, NewGoal, NewLogEntry,
};
use crate::storage::cache::{DocumentCache, FileStamp};
use crate::storage::{Document, ResolutionStorage, StorageError};

/// JSON-file storage implementation
///
/// Holds the path of the data file and a cache of the last document read or
/// written. The file is not touched until the first operation.
#[derive(Debug)]
pub struct JsonStorage {
    path: PathBuf,
    cache: Mutex<DocumentCache>,
}

impl JsonStorage {
    /// Create a storage instance backed by `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        tracing::debug!("JSON storage using data file: {:?}", path);

        Self {
            path,
            cache: Mutex::new(DocumentCache::default()),
        }
    }

    /// Location of the data file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the data file so the next read starts from a fresh document
    pub fn reset(&self) -> Result<(), StorageError> {
        let mut cache = self.lock();
        cache.clear();
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::info!("Removed data file {:?}", self.path);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, DocumentCache> {
        // Every read re-validates the cache against the file, so a poisoned
        // lock is still usable.
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "data.json".to_string());
        self.path.with_file_name(format!(".{}.tmp", name))
    }

    /// Read the document, using the cache when the file is unchanged
    fn read_locked(&self, cache: &mut DocumentCache) -> Result<Document, StorageError> {
        let metadata = match fs::metadata(&self.path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                cache.clear();
                return Ok(Document::default());
            }
            Err(e) => return Err(e.into()),
        };

        let stamp = FileStamp::from_metadata(&metadata);
        if let Some(document) = stamp.and_then(|s| cache.get(s)) {
            return Ok(document.clone());
        }

        let content = fs::read_to_string(&self.path)?;
        let document = if content.trim().is_empty() {
            Document::default()
        } else {
            serde_json::from_str(&content).map_err(|source| StorageError::Parse {
                path: self.path.clone(),
                source,
            })?
        };

        tracing::debug!(
            "Loaded {} goals and {} logs from {:?}",
            document.goals.len(),
            document.logs.len(),
            self.path
        );

        match stamp {
            Some(stamp) => cache.put(stamp, document.clone()),
            None => cache.clear(),
        }
        Ok(document)
    }

    /// Write the document atomically and remember it
    fn write_locked(&self, cache: &mut DocumentCache, document: &Document) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(document)?;
        let tmp = self.temp_path();

        // Write the temp file fully, then swap it into place
        let written = File::create(&tmp).and_then(|mut file| {
            file.write_all(json.as_bytes())?;
            file.sync_all()
        });
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }

        match fs::metadata(&self.path).ok().and_then(|m| FileStamp::from_metadata(&m)) {
            Some(stamp) => cache.put(stamp, document.clone()),
            None => cache.clear(),
        }

        tracing::debug!("Saved data file {:?}", self.path);
        Ok(())
    }

    /// Run a read-modify-write cycle under the lock
    ///
    /// The closure returns the operation's result and whether the document
    /// changed; unchanged documents are not written back.
    fn mutate<T, F>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&mut Document) -> Result<(T, bool), DomainError>,
    {
        let mut cache = self.lock();
        let mut document = self.read_locked(&mut cache)?;
        let (result, changed) = f(&mut document)?;
        if changed {
            self.write_locked(&mut cache, &document)?;
        }
        Ok(result)
    }
}

impl ResolutionStorage for JsonStorage {
    fn load(&self) -> Result<Document, StorageError> {
        let mut cache = self.lock();
        self.read_locked(&mut cache)
    }

    fn save(&self, document: &Document) -> Result<(), StorageError> {
        let mut cache = self.lock();
        self.write_locked(&mut cache, document)
    }

    fn add_goal(&self, input: NewGoal) -> Result<Goal, StorageError> {
        let goal = self.mutate(|doc| doc.add_goal(input).map(|goal| (goal, true)))?;
        tracing::info!("Created goal {}: {}", goal.id, goal.title);
        Ok(goal)
    }

    fn goals(&self) -> Result<Vec<Goal>, StorageError> {
        Ok(self.load()?.goals)
    }

    fn goal(&self, id: GoalId) -> Result<Option<Goal>, StorageError> {
        Ok(self.load()?.goal(id).cloned())
    }

    fn update_goal(&self, id: GoalId, patch: GoalPatch) -> Result<Option<Goal>, StorageError> {
        let updated = self.mutate(|doc| {
            let updated = doc.update_goal(id, patch)?;
            let changed = updated.is_some();
            Ok((updated, changed))
        })?;

        if updated.is_some() {
            tracing::info!("Updated goal {}", id);
        }
        Ok(updated)
    }

    fn remove_goal(&self, id: GoalId) -> Result<bool, StorageError> {
        let removed = self.mutate(|doc| {
            let removed = doc.remove_goal(id);
            Ok((removed, removed))
        })?;

        if removed {
            tracing::info!("Removed goal {} and its logs", id);
        }
        Ok(removed)
    }

    fn add_log(&self, input: NewLogEntry) -> Result<Option<LogEntry>, StorageError> {
        let entry = self.mutate(|doc| {
            let entry = doc.add_log(input)?;
            let changed = entry.is_some();
            Ok((entry, changed))
        })?;

        match &entry {
            Some(entry) => tracing::info!("Logged progress {} for goal {}", entry.id, entry.goal_id),
            None => tracing::warn!("Refused log for a goal that does not exist"),
        }
        Ok(entry)
    }

    fn logs(&self, goal_id: Option<GoalId>) -> Result<Vec<LogEntry>, StorageError> {
        Ok(self.load()?.logs_for(goal_id))
    }

    fn config(&self) -> Result<Config, StorageError> {
        Ok(self.load()?.config)
    }

    fn update_config(&self, patch: ConfigPatch) -> Result<Config, StorageError> {
        self.mutate(|doc| {
            let changed = !patch.is_empty();
            doc.config.apply(patch)?;
            Ok((doc.config.clone(), changed))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_storage() -> (JsonStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = JsonStorage::new(temp_dir.path().join("data.json"));
        (storage, temp_dir)
    }

    #[test]
    fn test_absent_file_is_fresh_document() {
        let (storage, _temp_dir) = create_test_storage();

        let doc = storage.load().unwrap();
        assert_eq!(doc, Document::default());
        assert!(!storage.path().exists());
    }

    #[test]
    fn test_create_and_get_goal() {
        let (storage, _temp_dir) = create_test_storage();

        let goal = storage.add_goal(NewGoal::titled("Run 3x/week")).unwrap();
        assert_eq!(goal.id, GoalId(1));

        let fetched = storage.goal(goal.id).unwrap().unwrap();
        assert_eq!(fetched, goal);
        assert!(storage.goal(GoalId(2)).unwrap().is_none());
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let (storage, _temp_dir) = create_test_storage();
        fs::write(storage.path(), "{ not json").unwrap();

        let result = storage.goals();
        assert!(matches!(result, Err(StorageError::Parse { .. })));
    }

    #[test]
    fn test_creates_missing_parent_directory() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("data.json");
        let storage = JsonStorage::new(&path);

        storage.add_goal(NewGoal::titled("Meditate")).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let (storage, temp_dir) = create_test_storage();
        storage.add_goal(NewGoal::titled("Read")).unwrap();

        let names: Vec<String> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["data.json".to_string()]);
    }

    #[test]
    fn test_failed_validation_does_not_write() {
        let (storage, _temp_dir) = create_test_storage();

        let result = storage.add_goal(NewGoal::titled(""));
        assert!(matches!(result, Err(StorageError::Invalid(_))));
        assert!(!storage.path().exists());
    }

    #[test]
    fn test_update_missing_goal_returns_none() {
        let (storage, _temp_dir) = create_test_storage();

        let result = storage
            .update_goal(GoalId(5), GoalPatch { title: Some("x".into()), ..GoalPatch::default() })
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_update_config_validates_time() {
        let (storage, _temp_dir) = create_test_storage();

        let bad = ConfigPatch {
            preferred_time: Some("noon".to_string()),
            ..ConfigPatch::default()
        };
        assert!(storage.update_config(bad).is_err());

        let good = ConfigPatch {
            preferred_time: Some("07:30".to_string()),
            ..ConfigPatch::default()
        };
        assert_eq!(storage.update_config(good).unwrap().preferred_time, "07:30");
        assert_eq!(storage.config().unwrap().preferred_time, "07:30");
    }

    #[test]
    fn test_reset_removes_file() {
        let (storage, _temp_dir) = create_test_storage();
        storage.add_goal(NewGoal::titled("Journal")).unwrap();

        storage.reset().unwrap();
        assert!(!storage.path().exists());
        assert!(storage.goals().unwrap().is_empty());

        // Resetting twice is fine
        storage.reset().unwrap();
    }
}
