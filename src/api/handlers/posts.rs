use axum::{extract::{State, Path, Query}, http::StatusCode, response::IntoResponse, Json};
use crate::state::BlogState;
use crate::api::dtos::{requests::{PostRequest, ListPostsQuery}, responses::DeletedResponse};
use crate::domain::models::post::Post;
use crate::domain::ports::{PostFilter, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::domain::services::validation;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn create_post(
    State(state): State<Arc<BlogState>>,
    Json(payload): Json<PostRequest>,
) -> Result<impl IntoResponse, AppError> {
    let title = validation::required_text("title", &payload.title)?;
    let content = validation::required_text("content", &payload.content)?;

    let post = Post::new(title, content, validation::optional_text(payload.author), validation::tags(payload.tags));
    let created = state.post_repo.create(&post).await?;

    info!("Created post: {}", created.id);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_posts(
    State(state): State<Arc<BlogState>>,
    Query(query): Query<ListPostsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filter = PostFilter {
        author: validation::optional_text(query.author),
        limit: query.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
        offset: query.offset.unwrap_or(0).max(0),
    };
    let posts = state.post_repo.list(&filter).await?;
    Ok(Json(posts))
}

pub async fn get_post(
    State(state): State<Arc<BlogState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let post = state.post_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Post not found".into()))?;
    Ok(Json(post))
}

pub async fn update_post(
    State(state): State<Arc<BlogState>>,
    Path(id): Path<String>,
    Json(payload): Json<PostRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut post = state.post_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Post not found".into()))?;

    let title = validation::required_text("title", &payload.title)?;
    let content = validation::required_text("content", &payload.content)?;
    post.replace(title, content, validation::optional_text(payload.author), validation::tags(payload.tags));

    let updated = state.post_repo.update(&post).await?;
    info!("Updated post: {}", updated.id);
    Ok(Json(updated))
}

pub async fn delete_post(
    State(state): State<Arc<BlogState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.post_repo.delete(&id).await?;
    info!("Deleted post: {}", id);
    Ok(Json(DeletedResponse::new()))
}
