//! Validated text values for project and task fields.

use super::{TodoDomainError, TodoLimits};
use std::fmt;

/// Returns the character count when it fits within `max`.
fn char_count_within(value: &str, max: usize) -> Result<usize, usize> {
    let count = value.chars().count();
    if count > max { Err(count) } else { Ok(count) }
}

/// Project display name, trimmed and non-empty.
///
/// Uniqueness is case-insensitive; use [`ProjectName::folded`] when
/// comparing names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectName(String);

impl ProjectName {
    /// Creates a validated project name.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::EmptyProjectName`] when the value is blank
    /// or [`TodoDomainError::ProjectNameTooLong`] when it exceeds
    /// `limits.max_project_name_length`.
    pub fn new(value: impl Into<String>, limits: &TodoLimits) -> Result<Self, TodoDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TodoDomainError::EmptyProjectName);
        }
        let max = limits.max_project_name_length;
        char_count_within(trimmed, max)
            .map_err(|actual| TodoDomainError::ProjectNameTooLong { max, actual })?;
        Ok(Self(trimmed.to_owned()))
    }

    /// Wraps a name loaded from storage without re-validating it.
    #[must_use]
    pub const fn from_persisted(value: String) -> Self {
        Self(value)
    }

    /// Returns the lowercase form used for uniqueness checks.
    #[must_use]
    pub fn folded(&self) -> String {
        self.0.to_lowercase()
    }

    /// Returns `true` when both names collide ignoring case.
    #[must_use]
    pub fn eq_ignore_case(&self, other: &Self) -> bool {
        self.folded() == other.folded()
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Free-form project description, possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ProjectDescription(String);

impl ProjectDescription {
    /// Creates a validated project description.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::ProjectDescriptionTooLong`] when the value
    /// exceeds `limits.max_project_description_length`.
    pub fn new(value: impl Into<String>, limits: &TodoLimits) -> Result<Self, TodoDomainError> {
        let raw = value.into();
        let max = limits.max_project_description_length;
        char_count_within(&raw, max)
            .map_err(|actual| TodoDomainError::ProjectDescriptionTooLong { max, actual })?;
        Ok(Self(raw))
    }

    /// Wraps a description loaded from storage without re-validating it.
    #[must_use]
    pub const fn from_persisted(value: String) -> Self {
        Self(value)
    }

    /// Returns the description as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Task title, trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Creates a validated task title.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::EmptyTaskTitle`] when the value is blank
    /// or [`TodoDomainError::TaskTitleTooLong`] when it exceeds
    /// `limits.max_task_title_length`.
    pub fn new(value: impl Into<String>, limits: &TodoLimits) -> Result<Self, TodoDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TodoDomainError::EmptyTaskTitle);
        }
        let max = limits.max_task_title_length;
        char_count_within(trimmed, max)
            .map_err(|actual| TodoDomainError::TaskTitleTooLong { max, actual })?;
        Ok(Self(trimmed.to_owned()))
    }

    /// Wraps a title loaded from storage without re-validating it.
    #[must_use]
    pub const fn from_persisted(value: String) -> Self {
        Self(value)
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Free-form task description, possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TaskDescription(String);

impl TaskDescription {
    /// Creates a validated task description.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::TaskDescriptionTooLong`] when the value
    /// exceeds `limits.max_task_description_length`.
    pub fn new(value: impl Into<String>, limits: &TodoLimits) -> Result<Self, TodoDomainError> {
        let raw = value.into();
        let max = limits.max_task_description_length;
        char_count_within(&raw, max)
            .map_err(|actual| TodoDomainError::TaskDescriptionTooLong { max, actual })?;
        Ok(Self(raw))
    }

    /// Wraps a description loaded from storage without re-validating it.
    #[must_use]
    pub const fn from_persisted(value: String) -> Self {
        Self(value)
    }

    /// Returns the description as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
