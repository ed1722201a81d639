use crate::DomainError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A project whose code prefixes every period code it owns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: i32,
    pub code: String,
    pub name: String,
    pub active: bool,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Project>, DomainError>;

    async fn find_active(&self) -> Result<Vec<Project>, DomainError>;

    /// Create a project. Codes are stored uppercased; a duplicate code is
    /// a conflict, not a storage failure.
    async fn create(&self, code: &str, name: &str) -> Result<Project, DomainError>;
}
