use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder};
use uuid::Uuid;

use crate::{
    entity,
    error::{ProjectError, ProjectResult},
    mapper::StoredProject,
    repository::ProjectRepository,
};

pub struct PgProjectRepository {
    db: DatabaseConnection,
}

impl PgProjectRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProjectRepository for PgProjectRepository {
    async fn find_all(&self) -> ProjectResult<Vec<StoredProject>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::CreatedAt)
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        models.into_iter().map(StoredProject::try_from).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> ProjectResult<Option<StoredProject>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;

        model.map(StoredProject::try_from).transpose()
    }

    async fn exists_by_id(&self, id: Uuid) -> ProjectResult<bool> {
        let count = entity::Entity::find_by_id(id).count(&self.db).await?;
        Ok(count > 0)
    }

    async fn save(&self, project: StoredProject) -> ProjectResult<StoredProject> {
        let (id, created) = match project.id {
            Some(id) => (id, false),
            None => (Uuid::now_v7(), true),
        };
        let active_model = entity::active_model(id, &project)?;

        // Single statement upsert; created_at is left alone on conflict
        let model = entity::Entity::insert(active_model)
            .on_conflict(
                OnConflict::column(entity::Column::Id)
                    .update_columns([
                        entity::Column::Name,
                        entity::Column::Description,
                        entity::Column::Members,
                        entity::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(&self.db)
            .await?;

        if created {
            tracing::info!(project_id = %model.id, "Created project");
        } else {
            tracing::info!(project_id = %model.id, "Updated project");
        }
        StoredProject::try_from(model)
    }

    async fn delete(&self, project: &StoredProject) -> ProjectResult<()> {
        let id = project.id.ok_or_else(|| {
            ProjectError::InvalidArgument("cannot delete a project without id".to_string())
        })?;

        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(ProjectError::NotFound(id));
        }

        tracing::info!(project_id = %id, "Deleted project");
        Ok(())
    }
}
