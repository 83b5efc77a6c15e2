//! Task use-case service.
//!
//! # Responsibility
//! - Provide create/get/list/update/delete/complete entry points for tasks.
//! - Translate repository outcomes into task-level errors.
//!
//! # Invariants
//! - Mutations look the task up first; a missing id is `NotFound`, never a silent no-op.
//! - Domain validation runs before any SQL mutation.

use crate::model::task::{Task, TaskId, TaskValidationError};
use crate::repo::task_repo::TaskRepository;
use crate::repo::RepoError;
use log::info;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskServiceError {
    #[error(transparent)]
    Validation(#[from] TaskValidationError),
    #[error("task not found: {0}")]
    NotFound(TaskId),
    #[error(transparent)]
    Repo(RepoError),
}

impl From<RepoError> for TaskServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::TaskValidation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskInput {
    pub title: String,
    pub description: String,
}

/// Full replacement of a task's editable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskInput {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub completed: bool,
}

pub struct TaskService<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates, persists and returns the stored task with its id.
    pub fn create_task(&self, input: CreateTaskInput) -> TaskServiceResult<Task> {
        let mut task = Task::new(input.title, input.description)?;
        task.id = self.repo.create(&task)?;
        info!(
            "event=task_create module=service status=ok task_id={}",
            task.id
        );
        Ok(task)
    }

    pub fn get_task(&self, id: TaskId) -> TaskServiceResult<Task> {
        self.repo.get(id)?.ok_or(TaskServiceError::NotFound(id))
    }

    pub fn list_tasks(&self) -> TaskServiceResult<Vec<Task>> {
        Ok(self.repo.list()?)
    }

    pub fn update_task(&self, input: UpdateTaskInput) -> TaskServiceResult<Task> {
        let mut task = self.get_task(input.id)?;
        task.update(input.title, input.description, input.completed)?;
        self.persist(&task)?;
        Ok(task)
    }

    pub fn delete_task(&self, id: TaskId) -> TaskServiceResult<()> {
        self.get_task(id)?;
        self.repo
            .delete(id)
            .map_err(|err| not_found_or(err, id))?;
        info!("event=task_delete module=service status=ok task_id={id}");
        Ok(())
    }

    pub fn complete_task(&self, id: TaskId) -> TaskServiceResult<Task> {
        let mut task = self.get_task(id)?;
        task.mark_completed();
        self.persist(&task)?;
        Ok(task)
    }

    pub fn reopen_task(&self, id: TaskId) -> TaskServiceResult<Task> {
        let mut task = self.get_task(id)?;
        task.mark_incomplete();
        self.persist(&task)?;
        Ok(task)
    }

    fn persist(&self, task: &Task) -> TaskServiceResult<()> {
        self.repo
            .update(task)
            .map_err(|err| not_found_or(err, task.id))
    }
}

fn not_found_or(err: RepoError, id: TaskId) -> TaskServiceError {
    match err {
        RepoError::NotFound { .. } => TaskServiceError::NotFound(id),
        other => other.into(),
    }
}
