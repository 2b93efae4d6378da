//! Field rules for project payloads that the `validator` built-ins don't cover.
//!
//! Each rule records the rejected value as the `value` param so it shows up
//! in the 400 response next to the field path.

use std::borrow::Cow;
use std::str::FromStr;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::{Project, Pronouns};

pub(crate) fn validate_pronouns(pronouns: &str) -> Result<(), ValidationError> {
    if Pronouns::from_str(pronouns).is_ok() {
        return Ok(());
    }

    Err(rejected("pronouns", pronouns)
        .with_message(Cow::Borrowed("must be one of he/him, she/her, they/their")))
}

pub(crate) fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(rejected("not_blank", value).with_message(Cow::Borrowed("must not be blank")));
    }
    Ok(())
}

fn rejected(code: &'static str, value: &str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.add_param(Cow::Borrowed("value"), &value);
    error
}

/// Run every field rule on a project and its members.
pub fn validate_project(project: &Project) -> Result<(), ValidationErrors> {
    project.validate()
}
