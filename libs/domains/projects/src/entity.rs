use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ProjectError;
use crate::mapper::{StoredMember, StoredProject};

/// Sea-ORM Entity for the project table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "project")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub members: Json, // JSONB array of members, in order
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub const TAG: &'static str = "project";
}

impl TryFrom<Model> for StoredProject {
    type Error = ProjectError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let members: Vec<StoredMember> = serde_json::from_value(model.members).map_err(|e| {
            ProjectError::Store(format!("project {} has unreadable members: {}", model.id, e))
        })?;

        Ok(Self {
            id: Some(model.id),
            name: model.name,
            description: model.description,
            members,
        })
    }
}

/// Build the row for `project` under `id`, stamping both timestamps with now.
///
/// On conflict only `updated_at` is overwritten, so `created_at` survives updates.
pub(crate) fn active_model(id: Uuid, project: &StoredProject) -> Result<ActiveModel, ProjectError> {
    let members = serde_json::to_value(&project.members)
        .map_err(|e| ProjectError::Store(format!("failed to encode members: {}", e)))?;
    let now: DateTimeWithTimeZone = chrono::Utc::now().into();

    Ok(ActiveModel {
        id: Set(id),
        name: Set(project.name.clone()),
        description: Set(project.description.clone()),
        members: Set(members),
        created_at: Set(now),
        updated_at: Set(now),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn model(members: Json) -> Model {
        Model {
            id: Uuid::now_v7(),
            name: "Apollo".to_string(),
            description: "Guidance computer software".to_string(),
            members,
            created_at: chrono::Utc::now().into(),
            updated_at: chrono::Utc::now().into(),
        }
    }

    #[test]
    fn test_model_converts_to_stored_project() {
        let row = model(json!([{
            "id": null,
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": "ada@example.com",
            "pronouns": "she/her",
            "description": "Wrote the first program",
            "image_reference": "ada.png"
        }]));
        let id = row.id;

        let stored = StoredProject::try_from(row).unwrap();

        assert_eq!(stored.id, Some(id));
        assert_eq!(stored.members.len(), 1);
        assert_eq!(stored.members[0].email, "ada@example.com");
    }

    #[test]
    fn test_unreadable_members_are_a_store_error() {
        let err = StoredProject::try_from(model(json!({"not": "a list"}))).unwrap_err();
        assert!(matches!(err, ProjectError::Store(_)));
    }
}
