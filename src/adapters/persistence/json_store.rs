//! Implements ClassStore using a JSON snapshot file.
//!
//! The whole schedule is cached in memory and rewritten on every change.

use crate::domain::{ClassInfo, DomainError};
use crate::ports::ClassStore;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// On-disk layout: `{ "classes": [ ... ] }`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    #[serde(default)]
    classes: Vec<ClassInfo>,
}

/// JSON file-backed schedule.
pub struct JsonClassStore {
    path: PathBuf,
    cache: RwLock<Snapshot>,
}

impl JsonClassStore {
    /// Open the snapshot at `path`. A missing file is an empty schedule; a file
    /// that cannot be read or parsed is an error (it is never overwritten).
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref().to_path_buf();
        let snapshot = match fs::read_to_string(&path).await {
            Ok(s) => serde_json::from_str::<Snapshot>(&s).map_err(|e| {
                DomainError::Store(format!("corrupt schedule file {}: {}", path.display(), e))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Snapshot::default(),
            Err(e) => {
                return Err(DomainError::Store(format!(
                    "read {}: {}",
                    path.display(),
                    e
                )));
            }
        };
        info!(
            path = %path.display(),
            classes = snapshot.classes.len(),
            "schedule loaded"
        );
        Ok(Self {
            path,
            cache: RwLock::new(snapshot),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write-replace: temp file, fsync, rename over the target.
    async fn save(&self, data: &Snapshot) -> Result<(), DomainError> {
        let json =
            serde_json::to_string_pretty(data).map_err(|e| DomainError::Store(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DomainError::Store(format!("create data dir: {}", e)))?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        let mut f = fs::File::create(&temp_path)
            .await
            .map_err(|e| DomainError::Store(format!("create temp file: {}", e)))?;
        f.write_all(json.as_bytes())
            .await
            .map_err(|e| DomainError::Store(format!("write temp file: {}", e)))?;
        f.sync_all()
            .await
            .map_err(|e| DomainError::Store(format!("sync temp file: {}", e)))?;
        drop(f);

        fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| DomainError::Store(format!("atomic rename failed: {}", e)))?;

        debug!(path = %self.path.display(), classes = data.classes.len(), "schedule saved");
        Ok(())
    }
}

#[async_trait::async_trait]
impl ClassStore for JsonClassStore {
    async fn list(&self) -> Result<Vec<ClassInfo>, DomainError> {
        Ok(self.cache.read().await.classes.clone())
    }

    async fn get(&self, id: &str) -> Result<Option<ClassInfo>, DomainError> {
        let cache = self.cache.read().await;
        Ok(cache.classes.iter().find(|c| c.id == id).cloned())
    }

    // Writers keep the lock through the save so file order matches cache order.
    async fn insert(&self, class: ClassInfo) -> Result<(), DomainError> {
        let mut cache = self.cache.write().await;
        if cache.classes.iter().any(|c| c.id == class.id) {
            return Err(DomainError::Store(format!("duplicate class id {}", class.id)));
        }
        cache.classes.push(class);
        if let Err(e) = self.save(&cache).await {
            cache.classes.pop();
            return Err(e);
        }
        Ok(())
    }

    async fn update(&self, class: ClassInfo) -> Result<(), DomainError> {
        let mut cache = self.cache.write().await;
        let idx = cache
            .classes
            .iter()
            .position(|c| c.id == class.id)
            .ok_or_else(|| DomainError::NotFound(class.id.clone()))?;
        let previous = std::mem::replace(&mut cache.classes[idx], class);
        if let Err(e) = self.save(&cache).await {
            cache.classes[idx] = previous;
            return Err(e);
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        let mut cache = self.cache.write().await;
        let Some(idx) = cache.classes.iter().position(|c| c.id == id) else {
            return Ok(false);
        };
        let removed = cache.classes.remove(idx);
        if let Err(e) = self.save(&cache).await {
            cache.classes.insert(idx, removed);
            return Err(e);
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClockTime, Day, WeeklySlot};
    use chrono::{TimeZone, Utc};

    fn class(id: &str, name: &str) -> ClassInfo {
        ClassInfo {
            id: id.into(),
            name: name.into(),
            code: "BIO-110".into(),
            instructor: "Dr. Okafor".into(),
            location: "Science Center".into(),
            description: Some("Lab on Fridays".into()),
            accent_color: "#22C55E".into(),
            schedule: vec![WeeklySlot::new(
                [Day::Mon, Day::Thu],
                ClockTime::from_hm(9, 0).unwrap(),
                ClockTime::from_hm(10, 15).unwrap(),
            )],
            created_at: Utc.with_ymd_and_hms(2025, 9, 1, 12, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonClassStore::open(dir.path().join("classes.json")).await.unwrap();
        assert!(store.list().await.unwrap().is_empty());
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("classes.json");

        let store = JsonClassStore::open(&path).await.unwrap();
        store.insert(class("a", "Biology")).await.unwrap();
        store.insert(class("b", "History")).await.unwrap();
        let mut renamed = class("a", "Cell Biology");
        renamed.location = "Room 2".into();
        store.update(renamed).await.unwrap();
        assert!(store.delete("b").await.unwrap());
        assert!(!store.delete("b").await.unwrap());
        drop(store);

        let reopened = JsonClassStore::open(&path).await.unwrap();
        let classes = reopened.list().await.unwrap();
        assert_eq!(classes.len(), 1);
        assert_eq!(classes[0].name, "Cell Biology");
        assert_eq!(classes[0], reopened.get("a").await.unwrap().unwrap());
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn test_document_field_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("classes.json");
        let store = JsonClassStore::open(&path).await.unwrap();
        store.insert(class("a", "Biology")).await.unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"accentColor\": \"#22C55E\""));
        assert!(raw.contains("\"startTime\": \"09:00\""));
        assert!(raw.contains("\"Th\""));
        assert!(raw.contains("\"createdAt\""));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("classes.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            JsonClassStore::open(&path).await,
            Err(DomainError::Store(_))
        ));
    }

    #[tokio::test]
    async fn test_failed_save_restores_cache() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("data");
        let store = JsonClassStore::open(data_dir.join("classes.json")).await.unwrap();
        store.insert(class("a", "Biology")).await.unwrap();
        store.insert(class("b", "History")).await.unwrap();
        let before = store.list().await.unwrap();

        // A plain file where the data directory should be makes every save fail.
        std::fs::remove_dir_all(&data_dir).unwrap();
        std::fs::write(&data_dir, "").unwrap();

        assert!(matches!(
            store.insert(class("c", "Physics")).await,
            Err(DomainError::Store(_))
        ));
        assert!(matches!(
            store.update(class("a", "Cell Biology")).await,
            Err(DomainError::Store(_))
        ));
        assert!(matches!(store.delete("a").await, Err(DomainError::Store(_))));
        assert_eq!(store.list().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_duplicate_and_missing_ids() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonClassStore::open(dir.path().join("classes.json")).await.unwrap();
        store.insert(class("a", "Biology")).await.unwrap();
        assert!(matches!(
            store.insert(class("a", "Again")).await,
            Err(DomainError::Store(_))
        ));
        assert!(matches!(
            store.update(class("zzz", "Ghost")).await,
            Err(DomainError::NotFound(_))
        ));
        assert_eq!(store.list().await.unwrap().len(), 1);
    }
}
