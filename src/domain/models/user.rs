use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use super::Status;

string_enum!(
    Role {
        Admin => "admin",
        Manager => "manager",
        User => "user",
    }
);

impl Role {
    /// Admins and managers may change the catalogue and orders.
    pub fn can_manage_catalog(&self) -> bool {
        matches!(self, Role::Admin | Role::Manager)
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
    #[sqlx(try_from = "String")]
    pub status: Status,
    pub avatar: Option<String>,
    #[serde(skip)]
    pub password_hash: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

pub struct NewUserParams {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub status: Status,
    pub avatar: Option<String>,
    pub password_hash: Option<String>,
}

impl User {
    pub fn new(params: NewUserParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: params.name,
            email: params.email,
            role: params.role,
            status: params.status,
            avatar: params.avatar,
            password_hash: params.password_hash,
            created_at: Utc::now(),
            last_login: None,
        }
    }

    pub fn can_log_in(&self) -> bool {
        self.status == Status::Active && self.password_hash.is_some()
    }
}
