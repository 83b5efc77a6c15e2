//! Task repository contract and SQLite implementation.

use super::{bool_to_int, from_epoch_ms, to_epoch_ms, RepoError, RepoResult};
use crate::model::task::{Task, TaskId};
use rusqlite::{params, Connection, OptionalExtension, Row};

const TASK_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    completed,
    created_at,
    updated_at
FROM tasks";

/// Persistence contract for task use cases.
pub trait TaskRepository {
    /// Inserts a new task and returns the storage-assigned id.
    fn create(&self, task: &Task) -> RepoResult<TaskId>;
    fn get(&self, id: TaskId) -> RepoResult<Option<Task>>;
    /// All tasks, newest first.
    fn list(&self) -> RepoResult<Vec<Task>>;
    fn update(&self, task: &Task) -> RepoResult<()>;
    fn delete(&self, id: TaskId) -> RepoResult<()>;
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn create(&self, task: &Task) -> RepoResult<TaskId> {
        task.validate()?;

        self.conn.execute(
            "INSERT INTO tasks (title, description, completed, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                task.title.as_str(),
                task.description.as_str(),
                bool_to_int(task.completed),
                to_epoch_ms(task.created_at),
                to_epoch_ms(task.updated_at),
            ],
        )?;

        Ok(TaskId(self.conn.last_insert_rowid()))
    }

    fn get(&self, id: TaskId) -> RepoResult<Option<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} WHERE id = ?1;"))?;
        let columns = stmt.query_row([id.0], read_task_columns).optional()?;

        columns.map(TaskColumns::into_task).transpose()
    }

    fn list(&self) -> RepoResult<Vec<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} ORDER BY created_at DESC, id DESC;"))?;
        let mut rows = stmt.query([])?;
        let mut tasks = Vec::new();

        while let Some(row) = rows.next()? {
            tasks.push(read_task_columns(row)?.into_task()?);
        }

        Ok(tasks)
    }

    fn update(&self, task: &Task) -> RepoResult<()> {
        task.validate()?;

        let changed = self.conn.execute(
            "UPDATE tasks
             SET
                title = ?1,
                description = ?2,
                completed = ?3,
                updated_at = ?4
             WHERE id = ?5;",
            params![
                task.title.as_str(),
                task.description.as_str(),
                bool_to_int(task.completed),
                to_epoch_ms(task.updated_at),
                task.id.0,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::not_found("task", task.id));
        }

        Ok(())
    }

    fn delete(&self, id: TaskId) -> RepoResult<()> {
        let changed = self.conn.execute("DELETE FROM tasks WHERE id = ?1;", [id.0])?;

        if changed == 0 {
            return Err(RepoError::not_found("task", id));
        }

        Ok(())
    }
}

struct TaskColumns {
    id: i64,
    title: String,
    description: String,
    completed: i64,
    created_at: i64,
    updated_at: i64,
}

fn read_task_columns(row: &Row<'_>) -> rusqlite::Result<TaskColumns> {
    Ok(TaskColumns {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        completed: row.get("completed")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

impl TaskColumns {
    fn into_task(self) -> RepoResult<Task> {
        let completed = match self.completed {
            0 => false,
            1 => true,
            other => {
                return Err(RepoError::InvalidData(format!(
                    "invalid completed value `{other}` in tasks.completed"
                )));
            }
        };

        let task = Task {
            id: TaskId(self.id),
            title: self.title,
            description: self.description,
            completed,
            created_at: from_epoch_ms(self.created_at, "tasks.created_at")?,
            updated_at: from_epoch_ms(self.updated_at, "tasks.updated_at")?,
        };
        task.validate()?;
        Ok(task)
    }
}
