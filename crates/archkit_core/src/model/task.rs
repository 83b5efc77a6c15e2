//! Task entity.
//!
//! # Invariants
//! - `title` is non-blank and at most `MAX_TITLE_CHARS` characters.
//! - `description` is at most `MAX_DESCRIPTION_CHARS` characters.
//! - `updated_at` is never earlier than `created_at`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;

pub const MAX_TITLE_CHARS: usize = 200;
pub const MAX_DESCRIPTION_CHARS: usize = 1000;

/// Row identifier assigned by storage.
///
/// Unsaved tasks carry `TaskId::UNSAVED` until the repository hands out an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub i64);

impl TaskId {
    pub const UNSAVED: TaskId = TaskId(0);
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskValidationError {
    #[error("task title cannot be empty")]
    EmptyTitle,
    #[error("task title cannot exceed {MAX_TITLE_CHARS} characters")]
    TitleTooLong,
    #[error("task description cannot exceed {MAX_DESCRIPTION_CHARS} characters")]
    DescriptionTooLong,
    #[error("task updated_at is earlier than created_at")]
    TimestampOrder,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a validated, not yet persisted task.
    ///
    /// # Errors
    /// Returns the first failing field rule.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, TaskValidationError> {
        let title = title.into();
        let description = description.into();
        validate_title(&title)?;
        validate_description(&description)?;

        let now = super::now();
        Ok(Self {
            id: TaskId::UNSAVED,
            title,
            description,
            completed: false,
            created_at: now,
            updated_at: now,
        })
    }

    /// Checks all field invariants; used by repositories on write and read.
    ///
    /// # Errors
    /// Returns the first failing rule.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        validate_title(&self.title)?;
        validate_description(&self.description)?;
        if self.updated_at < self.created_at {
            return Err(TaskValidationError::TimestampOrder);
        }
        Ok(())
    }

    pub fn mark_completed(&mut self) {
        self.completed = true;
        self.touch();
    }

    pub fn mark_incomplete(&mut self) {
        self.completed = false;
        self.touch();
    }

    /// Replaces all editable fields.
    ///
    /// Nothing changes when validation fails.
    ///
    /// # Errors
    /// Returns the first failing field rule.
    pub fn update(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        completed: bool,
    ) -> Result<(), TaskValidationError> {
        let title = title.into();
        let description = description.into();
        validate_title(&title)?;
        validate_description(&description)?;

        self.title = title;
        self.description = description;
        self.completed = completed;
        self.touch();
        Ok(())
    }

    pub fn is_persisted(&self) -> bool {
        self.id != TaskId::UNSAVED
    }

    fn touch(&mut self) {
        self.updated_at = super::now().max(self.created_at);
    }
}

/// Title must contain a non-whitespace character and fit the length cap.
///
/// # Errors
/// `EmptyTitle` or `TitleTooLong`.
pub fn validate_title(title: &str) -> Result<(), TaskValidationError> {
    if title.trim().is_empty() {
        return Err(TaskValidationError::EmptyTitle);
    }
    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(TaskValidationError::TitleTooLong);
    }
    Ok(())
}

/// # Errors
/// `DescriptionTooLong` past the cap.
pub fn validate_description(description: &str) -> Result<(), TaskValidationError> {
    if description.chars().count() > MAX_DESCRIPTION_CHARS {
        return Err(TaskValidationError::DescriptionTooLong);
    }
    Ok(())
}
