use axum::{
    extract::FromRequestParts,
    http::{request::Parts, Method},
};
use crate::state::AdminState;
use crate::domain::models::{Status, user::{Role, User}};
use crate::error::AppError;
use std::sync::Arc;
use tower_cookies::Cookies;
use tracing::Span;

pub const ACCESS_TOKEN_COOKIE: &str = "access_token";
pub const CSRF_HEADER: &str = "X-CSRF-Token";

/// The signed-in panel user, re-read from the store on every request so
/// role and status changes apply immediately.
pub struct AuthUser(pub User);

impl AuthUser {
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.0.role != Role::Admin {
            return Err(AppError::Forbidden("Admin role required".into()));
        }
        Ok(())
    }

    pub fn require_catalog_manager(&self) -> Result<(), AppError> {
        if !self.0.role.can_manage_catalog() {
            return Err(AppError::Forbidden("Admin or manager role required".into()));
        }
        Ok(())
    }
}

impl FromRequestParts<Arc<AdminState>> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AdminState>) -> Result<Self, Self::Rejection> {
        let cookies = parts.extensions.get::<Cookies>()
            .ok_or(AppError::InternalWithMsg("CookieManagerLayer missing".into()))?;

        let access_token = cookies.get(ACCESS_TOKEN_COOKIE)
            .ok_or(AppError::Unauthorized)?
            .value()
            .to_string();

        let claims = state.auth_service.verify_token(&access_token)?;

        let method = &parts.method;
        if method != Method::GET && method != Method::HEAD && method != Method::OPTIONS {
            let csrf_header_val = parts.headers.get(CSRF_HEADER)
                .ok_or(AppError::Forbidden("Missing CSRF token".into()))?
                .to_str()
                .map_err(|_| AppError::Forbidden("Invalid CSRF token".into()))?;

            if csrf_header_val != claims.csrf_token {
                return Err(AppError::Forbidden("Invalid CSRF token".into()));
            }
        }

        let user = state.user_repo.find_by_id(&claims.sub).await?
            .ok_or(AppError::Unauthorized)?;

        if user.status != Status::Active {
            return Err(AppError::Unauthorized);
        }

        Span::current().record("user_id", user.id.as_str());

        Ok(AuthUser(user))
    }
}
