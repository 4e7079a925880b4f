use axum::{extract::State, response::IntoResponse, Json, http::StatusCode};
use crate::state::AdminState;
use crate::api::dtos::requests::LoginRequest;
use crate::api::extractors::auth::{AuthUser, ACCESS_TOKEN_COOKIE};
use crate::domain::models::auth::{AuthProfile, AuthResponse};
use crate::domain::services::{auth_service::{AuthService, ACCESS_TOKEN_MINUTES}, validation};
use crate::error::AppError;
use chrono::Utc;
use std::sync::Arc;
use tower_cookies::{Cookies, Cookie};
use tower_cookies::cookie::SameSite;
use time::Duration;
use tracing::{info, warn};

pub async fn login(
    State(state): State<Arc<AdminState>>,
    cookies: Cookies,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let email = validation::email(&payload.email).map_err(|_| AppError::Unauthorized)?;

    let mut user = state.user_repo.find_by_email(&email).await?
        .ok_or(AppError::Unauthorized)?;

    if !user.can_log_in() {
        warn!("Login refused for inactive or password-less user: {}", user.id);
        return Err(AppError::Unauthorized);
    }

    let hash = user.password_hash.as_deref().unwrap_or_default();
    if !AuthService::verify_password(hash, &payload.password) {
        return Err(AppError::Unauthorized);
    }

    let (access_jwt, csrf_token) = state.auth_service.issue_token(&user)?;
    set_access_cookie(&cookies, &access_jwt);

    let now = Utc::now();
    state.user_repo.record_login(&user.id, now).await?;
    user.last_login = Some(now);

    info!("User logged in: {}", user.id);

    Ok(Json(AuthResponse {
        csrf_token,
        user: AuthProfile::from(&user),
    }))
}

pub async fn logout(cookies: Cookies) -> impl IntoResponse {
    cookies.remove(Cookie::build((ACCESS_TOKEN_COOKIE, "")).path("/").into());
    info!("User logged out");
    StatusCode::OK
}

pub async fn me(AuthUser(user): AuthUser) -> impl IntoResponse {
    Json(AuthProfile::from(&user))
}

fn set_access_cookie(cookies: &Cookies, access: &str) {
    let mut access_c = Cookie::new(ACCESS_TOKEN_COOKIE, access.to_string());
    access_c.set_http_only(true);
    access_c.set_secure(true);
    access_c.set_same_site(SameSite::Strict);
    access_c.set_path("/");
    access_c.set_max_age(Duration::minutes(ACCESS_TOKEN_MINUTES));
    cookies.add(access_c);
}
