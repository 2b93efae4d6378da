use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ProjectError, ProjectResult};
use crate::identity;
use crate::mapper::ProjectMapper;
use crate::models::Project;
use crate::repository::ProjectRepository;
use crate::validation::validate_project;

/// Service layer for Project business logic
///
/// Every write runs identity checks, then field validation, and only then
/// touches the store, so rejected payloads never leave partial writes.
pub struct ProjectService<R: ProjectRepository> {
    repository: Arc<R>,
    mapper: ProjectMapper,
}

impl<R: ProjectRepository> Clone for ProjectService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            mapper: self.mapper,
        }
    }
}

impl<R: ProjectRepository> ProjectService<R> {
    pub fn new(repository: R) -> Self {
        Self::with_mapper(repository, ProjectMapper::new())
    }

    pub fn with_mapper(repository: R, mapper: ProjectMapper) -> Self {
        Self {
            repository: Arc::new(repository),
            mapper,
        }
    }

    /// List all projects
    #[instrument(skip(self))]
    pub async fn list_projects(&self) -> ProjectResult<Vec<Project>> {
        self.repository
            .find_all()
            .await?
            .into_iter()
            .map(|stored| self.mapper.to_external(Some(stored)))
            .collect()
    }

    /// Get a project by ID
    #[instrument(skip(self), fields(project_id = %id))]
    pub async fn get_project(&self, id: Uuid) -> ProjectResult<Project> {
        let stored = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(ProjectError::NotFound(id))?;

        self.mapper.to_external(Some(stored))
    }

    /// Create a project; the store assigns its id
    #[instrument(skip(self, input), fields(project_name = %input.name))]
    pub async fn create_project(&self, input: Project) -> ProjectResult<Project> {
        identity::check_create(input.id)?;
        validate_project(&input)?;

        let saved = self.repository.save(self.mapper.to_stored(input)).await?;
        self.mapper.to_external(Some(saved))
    }

    /// Replace an existing project with `input`
    #[instrument(skip(self, input), fields(project_id = %id))]
    pub async fn update_project(&self, id: Uuid, input: Project) -> ProjectResult<Project> {
        let id = identity::check_update(id, input.id)?;

        if !self.repository.exists_by_id(id).await? {
            return Err(ProjectError::NotFound(id));
        }
        validate_project(&input)?;

        let saved = self.repository.save(self.mapper.to_stored(input)).await?;
        self.mapper.to_external(Some(saved))
    }

    /// Delete a project, returning its last stored state
    #[instrument(skip(self), fields(project_id = %id))]
    pub async fn delete_project(&self, id: Uuid) -> ProjectResult<Project> {
        let stored = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(ProjectError::NotFound(id))?;

        self.repository.delete(&stored).await?;

        self.mapper.to_external(Some(stored))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::IdentityViolation;
    use crate::mapper::StoredProject;
    use crate::models::ProjectMember;
    use crate::repository::{InMemoryProjectRepository, MockProjectRepository};

    fn member() -> ProjectMember {
        ProjectMember {
            id: None,
            first_name: "Annie".to_string(),
            last_name: "Easley".to_string(),
            email: "annie@example.com".to_string(),
            pronouns: "she/her".to_string(),
            description: "Developed Centaur rocket software".to_string(),
            image_reference: "annie.png".to_string(),
        }
    }

    fn payload(id: Option<Uuid>) -> Project {
        Project {
            id,
            name: "Test Name".to_string(),
            description: "Test Description".to_string(),
            project_members: vec![member()],
        }
    }

    fn invalid_payload(id: Option<Uuid>) -> Project {
        Project {
            name: "x".to_string(),
            ..payload(id)
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_keeps_fields() {
        let service = ProjectService::new(InMemoryProjectRepository::new());

        let created = service.create_project(payload(None)).await.unwrap();

        assert!(created.id.is_some());
        assert_eq!(Project { id: None, ..created }, payload(None));
    }

    #[tokio::test]
    async fn test_create_with_id_never_touches_store() {
        // No expectations: any repository call panics
        let service = ProjectService::new(MockProjectRepository::new());
        let id = Uuid::now_v7();

        let err = service.create_project(payload(Some(id))).await.unwrap_err();

        assert!(matches!(
            err,
            ProjectError::IdentityConflict(IdentityViolation::PresentOnCreate(got)) if got == id
        ));
        assert!(err.to_string().contains("identifier shall not be set"));
    }

    #[tokio::test]
    async fn test_identity_check_precedes_validation() {
        let service = ProjectService::new(MockProjectRepository::new());

        let err = service
            .create_project(invalid_payload(Some(Uuid::now_v7())))
            .await
            .unwrap_err();

        assert!(matches!(err, ProjectError::IdentityConflict(_)));
    }

    #[tokio::test]
    async fn test_invalid_create_never_saves() {
        let service = ProjectService::new(MockProjectRepository::new());

        let err = service.create_project(invalid_payload(None)).await.unwrap_err();

        assert!(matches!(err, ProjectError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_with_mismatched_ids_is_conflict() {
        let service = ProjectService::new(MockProjectRepository::new());

        let err = service
            .update_project(Uuid::now_v7(), payload(Some(Uuid::now_v7())))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("identifiers do not match"));
    }

    #[tokio::test]
    async fn test_update_without_payload_id_is_conflict() {
        let service = ProjectService::new(MockProjectRepository::new());

        let err = service
            .update_project(Uuid::now_v7(), payload(None))
            .await
            .unwrap_err();

        assert!(matches!(err, ProjectError::IdentityConflict(_)));
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found_before_validation() {
        let id = Uuid::now_v7();
        let mut mock_repo = MockProjectRepository::new();
        mock_repo
            .expect_exists_by_id()
            .with(mockall::predicate::eq(id))
            .times(1)
            .returning(|_| Ok(false));

        let service = ProjectService::new(mock_repo);
        let err = service
            .update_project(id, invalid_payload(Some(id)))
            .await
            .unwrap_err();

        assert!(matches!(err, ProjectError::NotFound(missing) if missing == id));
    }

    #[tokio::test]
    async fn test_invalid_update_never_saves() {
        let id = Uuid::now_v7();
        let mut mock_repo = MockProjectRepository::new();
        mock_repo.expect_exists_by_id().returning(|_| Ok(true));
        mock_repo.expect_save().never();

        let service = ProjectService::new(mock_repo);
        let err = service
            .update_project(id, invalid_payload(Some(id)))
            .await
            .unwrap_err();

        assert!(matches!(err, ProjectError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_is_idempotent() {
        let repo = InMemoryProjectRepository::new();
        let service = ProjectService::new(repo.clone());
        let id = service.create_project(payload(None)).await.unwrap().id;

        let mut changed = payload(id);
        changed.name = "Renamed project".to_string();
        changed.project_members.clear();

        let first = service.update_project(id.unwrap(), changed.clone()).await.unwrap();
        let after_first = repo.find_all().await.unwrap();
        let second = service.update_project(id.unwrap(), changed.clone()).await.unwrap();
        let after_second = repo.find_all().await.unwrap();

        assert_eq!(first, changed);
        assert_eq!(second, changed);
        assert_eq!(after_first, after_second);
    }

    #[tokio::test]
    async fn test_get_unknown_is_not_found() {
        let service = ProjectService::new(InMemoryProjectRepository::new());

        let err = service.get_project(Uuid::now_v7()).await.unwrap_err();

        assert!(matches!(err, ProjectError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_empty_store() {
        let service = ProjectService::new(InMemoryProjectRepository::new());
        assert!(service.list_projects().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_returns_last_state() {
        let repo = InMemoryProjectRepository::new();
        let service = ProjectService::new(repo.clone());
        let created = service.create_project(payload(None)).await.unwrap();

        let deleted = service.delete_project(created.id.unwrap()).await.unwrap();

        assert_eq!(deleted, created);
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_unknown_leaves_store_unchanged() {
        let repo = InMemoryProjectRepository::new();
        let service = ProjectService::new(repo.clone());
        service.create_project(payload(None)).await.unwrap();

        let err = service.delete_project(Uuid::now_v7()).await.unwrap_err();

        assert!(matches!(err, ProjectError::NotFound(_)));
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_race_reports_not_found() {
        let id = Uuid::now_v7();
        let mut mock_repo = MockProjectRepository::new();
        mock_repo.expect_find_by_id().returning(move |_| {
            Ok(Some(StoredProject {
                id: Some(id),
                name: "Racing".to_string(),
                description: "Deleted concurrently".to_string(),
                members: vec![],
            }))
        });
        mock_repo
            .expect_delete()
            .returning(move |_| Err(ProjectError::NotFound(id)));

        let service = ProjectService::new(mock_repo);
        let err = service.delete_project(id).await.unwrap_err();

        assert!(matches!(err, ProjectError::NotFound(missing) if missing == id));
    }
}
