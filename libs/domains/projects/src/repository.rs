use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{ProjectError, ProjectResult};
use crate::mapper::StoredProject;

/// Repository trait for Project persistence
///
/// Absence is reported through `Option`/`bool`; errors are reserved for
/// store failures.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// All stored projects, in store-determined order
    async fn find_all(&self) -> ProjectResult<Vec<StoredProject>>;

    async fn find_by_id(&self, id: Uuid) -> ProjectResult<Option<StoredProject>>;

    async fn exists_by_id(&self, id: Uuid) -> ProjectResult<bool>;

    /// Insert when `project.id` is `None` (a new id is assigned), otherwise
    /// replace the stored record wholesale.
    async fn save(&self, project: StoredProject) -> ProjectResult<StoredProject>;

    /// Remove the record; `NotFound` when it is already gone.
    async fn delete(&self, project: &StoredProject) -> ProjectResult<()>;
}

/// In-memory implementation of ProjectRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProjectRepository {
    projects: Arc<RwLock<HashMap<Uuid, StoredProject>>>,
}

impl InMemoryProjectRepository {
    pub fn new() -> Self {
        Self {
            projects: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn find_all(&self) -> ProjectResult<Vec<StoredProject>> {
        let projects = self.projects.read().await;

        let mut result: Vec<StoredProject> = projects.values().cloned().collect();
        // v7 ids sort by creation time
        result.sort_by_key(|p| p.id);

        Ok(result)
    }

    async fn find_by_id(&self, id: Uuid) -> ProjectResult<Option<StoredProject>> {
        let projects = self.projects.read().await;
        Ok(projects.get(&id).cloned())
    }

    async fn exists_by_id(&self, id: Uuid) -> ProjectResult<bool> {
        let projects = self.projects.read().await;
        Ok(projects.contains_key(&id))
    }

    async fn save(&self, mut project: StoredProject) -> ProjectResult<StoredProject> {
        let mut projects = self.projects.write().await;

        let id = match project.id {
            Some(id) => {
                tracing::info!(project_id = %id, "Updated project");
                id
            }
            None => {
                let id = Uuid::now_v7();
                tracing::info!(project_id = %id, "Created project");
                id
            }
        };
        project.id = Some(id);
        projects.insert(id, project.clone());

        Ok(project)
    }

    async fn delete(&self, project: &StoredProject) -> ProjectResult<()> {
        let id = project.id.ok_or_else(|| {
            ProjectError::InvalidArgument("cannot delete a project without id".to_string())
        })?;

        let mut projects = self.projects.write().await;
        if projects.remove(&id).is_none() {
            return Err(ProjectError::NotFound(id));
        }

        tracing::info!(project_id = %id, "Deleted project");
        Ok(())
    }
}
