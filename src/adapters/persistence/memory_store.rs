//! In-memory ClassStore. Used by tests and as a scratch schedule.

use crate::domain::{ClassInfo, DomainError};
use crate::ports::ClassStore;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct MemoryClassStore {
    classes: RwLock<Vec<ClassInfo>>,
}

impl MemoryClassStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_classes(classes: Vec<ClassInfo>) -> Self {
        Self {
            classes: RwLock::new(classes),
        }
    }
}

#[async_trait::async_trait]
impl ClassStore for MemoryClassStore {
    async fn list(&self) -> Result<Vec<ClassInfo>, DomainError> {
        Ok(self.classes.read().await.clone())
    }

    async fn get(&self, id: &str) -> Result<Option<ClassInfo>, DomainError> {
        Ok(self.classes.read().await.iter().find(|c| c.id == id).cloned())
    }

    async fn insert(&self, class: ClassInfo) -> Result<(), DomainError> {
        let mut classes = self.classes.write().await;
        if classes.iter().any(|c| c.id == class.id) {
            return Err(DomainError::Store(format!("duplicate class id {}", class.id)));
        }
        classes.push(class);
        Ok(())
    }

    async fn update(&self, class: ClassInfo) -> Result<(), DomainError> {
        let mut classes = self.classes.write().await;
        let slot = classes
            .iter_mut()
            .find(|c| c.id == class.id)
            .ok_or_else(|| DomainError::NotFound(class.id.clone()))?;
        *slot = class;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        let mut classes = self.classes.write().await;
        let before = classes.len();
        classes.retain(|c| c.id != id);
        Ok(classes.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn class(id: &str) -> ClassInfo {
        ClassInfo {
            id: id.into(),
            name: "Linear Algebra".into(),
            code: "MATH-221".into(),
            instructor: "Prof. Lind".into(),
            location: "Hall B".into(),
            description: None,
            accent_color: "#0EA5E9".into(),
            schedule: Vec::new(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_keeps_insertion_order() {
        let store = MemoryClassStore::new();
        for id in ["c", "a", "b"] {
            store.insert(class(id)).await.unwrap();
        }
        let ids: Vec<String> = store.list().await.unwrap().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let store = MemoryClassStore::with_classes(vec![class("a")]);
        let mut edited = class("a");
        edited.location = "Hall C".into();
        store.update(edited).await.unwrap();
        assert_eq!(store.get("a").await.unwrap().unwrap().location, "Hall C");
        assert!(matches!(store.update(class("x")).await, Err(DomainError::NotFound(_))));
        assert!(matches!(store.insert(class("a")).await, Err(DomainError::Store(_))));
        assert!(store.delete("a").await.unwrap());
        assert!(store.get("a").await.unwrap().is_none());
    }
}
