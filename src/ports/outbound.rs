//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{ClassInfo, DomainError};

/// Schedule store. Holds the user's classes; the application never sees how.
#[async_trait::async_trait]
pub trait ClassStore: Send + Sync {
    /// All classes, in insertion order.
    async fn list(&self) -> Result<Vec<ClassInfo>, DomainError>;

    async fn get(&self, id: &str) -> Result<Option<ClassInfo>, DomainError>;

    /// Add a new class. Fails if the id is already taken.
    async fn insert(&self, class: ClassInfo) -> Result<(), DomainError>;

    /// Replace the class with the same id. `DomainError::NotFound` if there is none.
    async fn update(&self, class: ClassInfo) -> Result<(), DomainError>;

    /// Remove a class. Returns false if the id was unknown.
    async fn delete(&self, id: &str) -> Result<bool, DomainError>;
}
