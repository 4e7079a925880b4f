use axum::{
    extract::{State, Path, Form},
    response::{Html, IntoResponse, Redirect, Response},
};
use crate::state::TodoState;
use crate::api::dtos::requests::TaskForm;
use crate::domain::services::validation;
use crate::error::AppError;
use std::sync::Arc;
use tera::{Context, Tera};
use tracing::{debug, info};

pub async fn index(
    State(state): State<Arc<TodoState>>,
) -> Result<Html<String>, AppError> {
    let tasks = state.task_repo.list().await;
    let mut context = Context::new();
    context.insert("tasks", &tasks);
    render(&state.templates, "index.html", &context)
}

pub async fn add_task(
    State(state): State<Arc<TodoState>>,
    Form(form): Form<TaskForm>,
) -> Redirect {
    match validation::required_text("task", &form.task) {
        Ok(text) => {
            let task = state.task_repo.add(text).await;
            info!("Added task {}", task.id);
        }
        Err(_) => debug!("Ignoring blank task submission"),
    }
    Redirect::to("/")
}

pub async fn delete_task(
    State(state): State<Arc<TodoState>>,
    Path(id): Path<String>,
) -> Redirect {
    if let Some(id) = parse_id(&id) {
        if state.task_repo.delete(id).await {
            info!("Deleted task {}", id);
        }
    }
    Redirect::to("/")
}

pub async fn edit_form(
    State(state): State<Arc<TodoState>>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let task = match parse_id(&id) {
        Some(id) => state.task_repo.find(id).await,
        None => None,
    };

    let Some(task) = task else {
        return Ok(Redirect::to("/").into_response());
    };

    let mut context = Context::new();
    context.insert("task", &task);
    Ok(render(&state.templates, "edit.html", &context)?.into_response())
}

pub async fn edit_task(
    State(state): State<Arc<TodoState>>,
    Path(id): Path<String>,
    Form(form): Form<TaskForm>,
) -> Redirect {
    if let (Some(id), Ok(text)) = (parse_id(&id), validation::required_text("task", &form.task)) {
        if state.task_repo.update(id, text).await.is_some() {
            info!("Edited task {}", id);
        }
    }
    Redirect::to("/")
}

fn parse_id(raw: &str) -> Option<u64> {
    raw.trim().parse().ok()
}

fn render(templates: &Tera, name: &str, context: &Context) -> Result<Html<String>, AppError> {
    templates.render(name, context)
        .map(Html)
        .map_err(|e| AppError::InternalWithMsg(format!("Tera render error: {:?}", e)))
}
