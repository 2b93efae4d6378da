use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumIter, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::validation::{validate_not_blank, validate_pronouns};

/// Pronouns a project member may declare.
///
/// The wire format is the display form (`"he/him"`), so parsing goes through
/// `FromStr` rather than serde.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
pub enum Pronouns {
    #[strum(serialize = "he/him")]
    HeHim,
    #[strum(serialize = "she/her")]
    SheHer,
    #[strum(serialize = "they/their")]
    TheyTheir,
}

/// Reads `null` the same as an absent field.
///
/// Required fields still go through the validators as empty values, so a
/// payload missing `name` is judged on its identity first and then gets a
/// field violation instead of a body rejection.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Project as exchanged with API clients.
///
/// `projectId` is absent on create and required (and equal to the path id)
/// on update. Missing or `null` members read as an empty list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Project {
    #[serde(rename = "projectId", default)]
    pub id: Option<Uuid>,
    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(length(min = 2, max = 256))]
    #[schema(min_length = 2, max_length = 256, example = "Test Name")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(length(min = 10, max = 256))]
    #[schema(min_length = 10, max_length = 256, example = "Test Description")]
    pub description: String,
    #[serde(rename = "projectMembers", default, deserialize_with = "null_as_default")]
    #[validate(nested)]
    pub project_members: Vec<ProjectMember>,
}

/// Member of a project, embedded in its project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct ProjectMember {
    #[serde(rename = "projectMemberId", default)]
    pub id: Option<Uuid>,
    #[serde(rename = "firstName", default, deserialize_with = "null_as_default")]
    #[validate(length(min = 2, max = 255))]
    pub first_name: String,
    #[serde(rename = "lastName", default, deserialize_with = "null_as_default")]
    #[validate(length(min = 2, max = 255))]
    pub last_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(email)]
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// One of `he/him`, `she/her`, `they/their`
    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(custom(function = "validate_pronouns"))]
    #[schema(example = "they/their")]
    pub pronouns: String,
    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(length(min = 10, max = 255))]
    pub description: String,
    #[serde(rename = "imageReference", default, deserialize_with = "null_as_default")]
    #[validate(custom(function = "validate_not_blank"))]
    pub image_reference: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_pronouns_parse_display_form() {
        assert_eq!(Pronouns::from_str("she/her").unwrap(), Pronouns::SheHer);
        assert_eq!(Pronouns::TheyTheir.to_string(), "they/their");
        assert!(Pronouns::from_str("it/its").is_err());
        assert!(Pronouns::from_str("He/Him").is_err());
        assert_eq!(Pronouns::iter().count(), 3);
    }

    #[test]
    fn test_project_uses_camel_case_wire_names() {
        let project: Project = serde_json::from_value(json!({
            "name": "Apollo",
            "description": "Moon landing programme",
            "projectMembers": [{
                "projectMemberId": null,
                "firstName": "Ada",
                "lastName": "Lovelace",
                "email": "ada@example.com",
                "pronouns": "she/her",
                "description": "Wrote the first program",
                "imageReference": "ada.png"
            }]
        }))
        .unwrap();

        assert_eq!(project.id, None);
        assert_eq!(project.project_members.len(), 1);
        assert_eq!(project.project_members[0].first_name, "Ada");

        let value = serde_json::to_value(&project).unwrap();
        assert!(value.get("projectId").is_some());
        assert_eq!(value["projectMembers"][0]["imageReference"], "ada.png");
        assert_eq!(value["projectMembers"][0]["lastName"], "Lovelace");
    }

    #[test]
    fn test_missing_members_default_to_empty() {
        let project: Project = serde_json::from_value(json!({
            "name": "Apollo",
            "description": "Moon landing programme"
        }))
        .unwrap();

        assert!(project.project_members.is_empty());
    }

    #[test]
    fn test_null_and_missing_fields_read_as_empty() {
        let project: Project = serde_json::from_value(json!({
            "projectId": null,
            "description": null,
            "projectMembers": [{"firstName": "Ada", "pronouns": null}]
        }))
        .unwrap();

        assert_eq!(project.name, "");
        assert_eq!(project.description, "");
        let member = &project.project_members[0];
        assert_eq!(member.first_name, "Ada");
        assert_eq!(member.pronouns, "");
        assert_eq!(member.image_reference, "");

        let project: Project =
            serde_json::from_value(json!({"name": "Apollo", "projectMembers": null})).unwrap();
        assert!(project.project_members.is_empty());
    }

    #[test]
    fn test_wrong_types_are_still_rejected() {
        let result = serde_json::from_value::<Project>(json!({"name": 42}));
        assert!(result.is_err());
    }
}
