use serde::{Deserialize, Serialize};
use super::user::{Role, User};

pub const TOKEN_AUDIENCE: &str = "admin-panel";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub sub: String,
    pub aud: String,
    pub exp: usize,
    pub iat: usize,
    pub jti: String,

    #[serde(rename = "https://crud-showcase.local/claims/role")]
    pub role: Role,

    #[serde(rename = "https://crud-showcase.local/claims/csrf")]
    pub csrf_token: String,
}

/// What the panel's auth context keeps about the signed-in user.
#[derive(Debug, Serialize)]
pub struct AuthProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub avatar: Option<String>,
}

impl From<&User> for AuthProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            avatar: user.avatar.clone(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub csrf_token: String,
    pub user: AuthProfile,
}
