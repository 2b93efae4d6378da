//! Conversion between the client-facing [`Project`] and the stored form.
//!
//! Nothing else in the crate builds one shape from the other, so a field
//! added to either side only needs to be wired up here.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ProjectError, ProjectResult};
use crate::models::{Project, ProjectMember};

/// Project as persisted; the store owns `id` once it is assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredProject {
    pub id: Option<Uuid>,
    pub name: String,
    pub description: String,
    pub members: Vec<StoredMember>,
}

/// Member value object, embedded in its project's `members` column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredMember {
    pub id: Option<Uuid>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub pronouns: String,
    pub description: String,
    pub image_reference: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectMapper;

impl ProjectMapper {
    pub fn new() -> Self {
        Self
    }

    /// Carries the payload id over unchanged; `None` asks the store for a new one.
    pub fn to_stored(&self, project: Project) -> StoredProject {
        StoredProject {
            id: project.id,
            name: project.name,
            description: project.description,
            members: project.project_members.into_iter().map(member_to_stored).collect(),
        }
    }

    pub fn to_external(&self, stored: Option<StoredProject>) -> ProjectResult<Project> {
        let stored = stored.ok_or_else(|| {
            ProjectError::InvalidArgument("stored project is required for mapping".to_string())
        })?;

        Ok(Project {
            id: stored.id,
            name: stored.name,
            description: stored.description,
            project_members: stored.members.into_iter().map(member_to_external).collect(),
        })
    }
}

fn member_to_stored(member: ProjectMember) -> StoredMember {
    StoredMember {
        id: member.id,
        first_name: member.first_name,
        last_name: member.last_name,
        email: member.email,
        pronouns: member.pronouns,
        description: member.description,
        image_reference: member.image_reference,
    }
}

fn member_to_external(member: StoredMember) -> ProjectMember {
    ProjectMember {
        id: member.id,
        first_name: member.first_name,
        last_name: member.last_name,
        email: member.email,
        pronouns: member.pronouns,
        description: member.description,
        image_reference: member.image_reference,
    }
}
