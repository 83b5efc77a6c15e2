use archkit_core::db::open_db_in_memory;
use archkit_core::{
    CreateTaskInput, RepoError, SqliteTaskRepository, Task, TaskId, TaskRepository, TaskService,
    TaskServiceError, TaskValidationError, UpdateTaskInput,
};

fn create_input(title: &str) -> CreateTaskInput {
    CreateTaskInput {
        title: title.to_string(),
        description: format!("{title} description"),
    }
}

#[test]
fn repository_create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let task = Task::new("first task", "body").unwrap();
    let id = repo.create(&task).unwrap();
    assert_ne!(id, TaskId::UNSAVED);

    let loaded = repo.get(id).unwrap().unwrap();
    assert_eq!(loaded.id, id);
    assert_eq!(loaded.title, "first task");
    assert_eq!(loaded.description, "body");
    assert!(!loaded.completed);
    assert_eq!(loaded.created_at, task.created_at);
    assert_eq!(loaded.updated_at, task.updated_at);
}

#[test]
fn repository_get_missing_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);
    assert!(repo.get(TaskId(42)).unwrap().is_none());
}

#[test]
fn repository_update_and_delete_missing_return_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let mut task = Task::new("ghost", "").unwrap();
    task.id = TaskId(7);
    assert!(matches!(
        repo.update(&task).unwrap_err(),
        RepoError::NotFound { entity: "task", .. }
    ));
    assert!(matches!(
        repo.delete(TaskId(7)).unwrap_err(),
        RepoError::NotFound { entity: "task", .. }
    ));
}

#[test]
fn repository_rejects_invalid_rows_on_read() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO tasks (title, description, completed, created_at, updated_at)
         VALUES ('', '', 0, 1, 1);",
        [],
    )
    .unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let err = repo.list().unwrap_err();
    assert!(matches!(
        err,
        RepoError::TaskValidation(TaskValidationError::EmptyTitle)
    ));
}

#[test]
fn list_returns_newest_first() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "INSERT INTO tasks (title, description, completed, created_at, updated_at)
         VALUES ('old', '', 0, 1000, 1000), ('new', '', 0, 3000, 3000), ('mid', '', 1, 2000, 2000);",
    )
    .unwrap();
    let service = TaskService::new(SqliteTaskRepository::new(&conn));

    let titles: Vec<String> = service
        .list_tasks()
        .unwrap()
        .into_iter()
        .map(|task| task.title)
        .collect();
    assert_eq!(titles, vec!["new", "mid", "old"]);
}

#[test]
fn create_task_with_empty_title_returns_empty_title_error() {
    let conn = open_db_in_memory().unwrap();
    let service = TaskService::new(SqliteTaskRepository::new(&conn));

    let err = service.create_task(create_input("")).unwrap_err();
    assert!(matches!(
        err,
        TaskServiceError::Validation(TaskValidationError::EmptyTitle)
    ));
    assert!(service.list_tasks().unwrap().is_empty());
}

#[test]
fn create_task_with_long_title_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let service = TaskService::new(SqliteTaskRepository::new(&conn));

    let err = service.create_task(create_input(&"t".repeat(201))).unwrap_err();
    assert!(matches!(
        err,
        TaskServiceError::Validation(TaskValidationError::TitleTooLong)
    ));
}

#[test]
fn update_task_replaces_fields() {
    let conn = open_db_in_memory().unwrap();
    let service = TaskService::new(SqliteTaskRepository::new(&conn));
    let created = service.create_task(create_input("draft")).unwrap();

    let updated = service
        .update_task(UpdateTaskInput {
            id: created.id,
            title: "final".to_string(),
            description: String::new(),
            completed: true,
        })
        .unwrap();
    assert_eq!(updated.title, "final");
    assert!(updated.completed);

    let loaded = service.get_task(created.id).unwrap();
    assert_eq!(loaded, updated);
    assert!(loaded.updated_at >= loaded.created_at);
}

#[test]
fn update_with_invalid_title_keeps_stored_task() {
    let conn = open_db_in_memory().unwrap();
    let service = TaskService::new(SqliteTaskRepository::new(&conn));
    let created = service.create_task(create_input("stable")).unwrap();

    let err = service
        .update_task(UpdateTaskInput {
            id: created.id,
            title: "x".repeat(300),
            description: String::new(),
            completed: false,
        })
        .unwrap_err();
    assert!(matches!(
        err,
        TaskServiceError::Validation(TaskValidationError::TitleTooLong)
    ));
    assert_eq!(service.get_task(created.id).unwrap().title, "stable");
}

#[test]
fn missing_task_operations_return_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = TaskService::new(SqliteTaskRepository::new(&conn));
    let missing = TaskId(999);

    assert!(matches!(
        service.get_task(missing),
        Err(TaskServiceError::NotFound(id)) if id == missing
    ));
    assert!(matches!(
        service.delete_task(missing),
        Err(TaskServiceError::NotFound(_))
    ));
    assert!(matches!(
        service.complete_task(missing),
        Err(TaskServiceError::NotFound(_))
    ));
    assert!(matches!(
        service.update_task(UpdateTaskInput {
            id: missing,
            title: "x".to_string(),
            description: String::new(),
            completed: false,
        }),
        Err(TaskServiceError::NotFound(_))
    ));
}

#[test]
fn complete_reopen_and_delete_flow() {
    let conn = open_db_in_memory().unwrap();
    let service = TaskService::new(SqliteTaskRepository::new(&conn));
    let created = service.create_task(create_input("ship it")).unwrap();

    assert!(service.complete_task(created.id).unwrap().completed);
    assert!(service.get_task(created.id).unwrap().completed);
    assert!(!service.reopen_task(created.id).unwrap().completed);

    service.delete_task(created.id).unwrap();
    assert!(matches!(
        service.get_task(created.id),
        Err(TaskServiceError::NotFound(_))
    ));
}
