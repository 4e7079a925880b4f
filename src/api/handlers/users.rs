use axum::{extract::{State, Path, Query}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AdminState;
use crate::api::dtos::{requests::{UserRequest, ListUsersQuery}, responses::DeletedResponse};
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::{Status, user::{NewUserParams, Role, User}};
use crate::domain::ports::UserFilter;
use crate::domain::services::{auth_service::AuthService, validation};
use crate::error::AppError;
use std::sync::Arc;
use tracing::{info, error};

pub async fn list_users(
    State(state): State<Arc<AdminState>>,
    _user: AuthUser,
    Query(query): Query<ListUsersQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filter = UserFilter { role: query.role, status: query.status };
    let users = state.user_repo.list(&filter).await?;
    Ok(Json(users))
}

pub async fn create_user(
    State(state): State<Arc<AdminState>>,
    admin: AuthUser,
    Json(payload): Json<UserRequest>,
) -> Result<impl IntoResponse, AppError> {
    admin.require_admin()?;

    let name = validation::required_text("name", &payload.name)?;
    let email = validation::email(&payload.email)?;

    if state.user_repo.find_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict("Email already exists".into()));
    }

    let password_hash = match payload.password.as_deref() {
        Some(password) => Some(AuthService::hash_password(validation::password(password)?)?),
        None => None,
    };

    let user = User::new(NewUserParams {
        name,
        email,
        role: payload.role,
        status: payload.status,
        avatar: validation::optional_text(payload.avatar),
        password_hash,
    });
    let created = state.user_repo.create(&user).await?;

    info!("Created user: {} ({})", created.id, created.role);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_user(
    State(state): State<Arc<AdminState>>,
    _user: AuthUser,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.user_repo.find_by_id(&user_id).await?
        .ok_or(AppError::NotFound("User not found".into()))?;
    Ok(Json(user))
}

pub async fn update_user(
    State(state): State<Arc<AdminState>>,
    admin: AuthUser,
    Path(user_id): Path<String>,
    Json(payload): Json<UserRequest>,
) -> Result<impl IntoResponse, AppError> {
    admin.require_admin()?;

    let mut user = state.user_repo.find_by_id(&user_id).await?
        .ok_or(AppError::NotFound("User not found".into()))?;

    let name = validation::required_text("name", &payload.name)?;
    let email = validation::email(&payload.email)?;

    if email != user.email {
        if let Some(other) = state.user_repo.find_by_email(&email).await? {
            if other.id != user.id {
                return Err(AppError::Conflict("Email already exists".into()));
            }
        }
    }

    // Self-demotion and self-deactivation are refused.
    if admin.0.id == user.id && (payload.role != Role::Admin || payload.status != Status::Active) {
        return Err(AppError::Conflict("Cannot demote or deactivate yourself".into()));
    }

    if let Some(password) = payload.password.as_deref() {
        user.password_hash = Some(AuthService::hash_password(validation::password(password)?)?);
    }

    user.name = name;
    user.email = email;
    user.role = payload.role;
    user.status = payload.status;
    user.avatar = validation::optional_text(payload.avatar);

    let updated = state.user_repo.update(&user).await?;
    info!("Updated user: {}", updated.id);
    Ok(Json(updated))
}

pub async fn delete_user(
    State(state): State<Arc<AdminState>>,
    admin: AuthUser,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    admin.require_admin()?;

    if admin.0.id == user_id {
        return Err(AppError::Conflict("Cannot delete yourself".into()));
    }

    match state.user_repo.delete(&user_id).await {
        Ok(_) => {
            info!("Deleted user {}", user_id);
            Ok(Json(DeletedResponse::new()))
        },
        Err(e) => {
            error!("Failed to delete user {}: {:?}", user_id, e);
            Err(e)
        }
    }
}
