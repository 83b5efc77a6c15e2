use crate::dto::{CreateTaskRequest, TaskDto, UpdateTaskRequest};
use crate::error::ApiError;
use crate::state::AppState;
use archkit_core::{SqliteTaskRepository, TaskId, TaskService, TaskServiceError, UpdateTaskInput};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

/// Runs one task use case against the shared connection.
async fn run<T: Send + 'static>(
    state: &AppState,
    f: impl FnOnce(TaskService<SqliteTaskRepository<'_>>) -> Result<T, TaskServiceError>
        + Send
        + 'static,
) -> Result<T, ApiError> {
    state
        .with_conn(move |conn| Ok(f(TaskService::new(SqliteTaskRepository::new(conn)))?))
        .await
}

/// Task ids are positive row ids.
fn task_id(raw: &str) -> Result<TaskId, ApiError> {
    match super::parse_id::<i64>(raw, "task")? {
        id if id > 0 => Ok(TaskId(id)),
        _ => Err(ApiError::BadRequest("invalid task id".to_string())),
    }
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TaskDto>), ApiError> {
    let Json(request) = payload?;
    let task = run(&state, move |service| service.create_task(request.into())).await?;
    Ok((StatusCode::CREATED, Json(task.into())))
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<TaskDto>>, ApiError> {
    let tasks = run(&state, |service| service.list_tasks()).await?;
    Ok(Json(tasks.into_iter().map(TaskDto::from).collect()))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TaskDto>, ApiError> {
    let id = task_id(&id)?;
    let task = run(&state, move |service| service.get_task(id)).await?;
    Ok(Json(task.into()))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> Result<Json<TaskDto>, ApiError> {
    let id = task_id(&id)?;
    let Json(request) = payload?;
    let input = UpdateTaskInput {
        id,
        title: request.title,
        description: request.description,
        completed: request.completed,
    };
    let task = run(&state, move |service| service.update_task(input)).await?;
    Ok(Json(task.into()))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = task_id(&id)?;
    run(&state, move |service| service.delete_task(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn complete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TaskDto>, ApiError> {
    let id = task_id(&id)?;
    let task = run(&state, move |service| service.complete_task(id)).await?;
    Ok(Json(task.into()))
}

pub async fn reopen(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TaskDto>, ApiError> {
    let id = task_id(&id)?;
    let task = run(&state, move |service| service.reopen_task(id)).await?;
    Ok(Json(task.into()))
}
