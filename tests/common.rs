use crud_showcase::{
    api::router::{create_admin_router, create_blog_router, create_todo_router},
    config::{AdminConfig, BlogConfig},
    infra::factory::{bootstrap_admin_state, bootstrap_blog_state, bootstrap_todo_state},
    state::{AdminState, BlogState},
};
use axum::{
    body::Body,
    http::{header, Request},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "admin-password";

pub struct AuthHeaders {
    pub access_token: String,
    pub csrf_token: String,
}

fn test_db() -> (String, String) {
    let db_filename = format!("test_{}.db", Uuid::new_v4());
    let db_url = format!("sqlite://{}?mode=rwc", db_filename);
    (db_filename, db_url)
}

fn remove_db(db_filename: &str) {
    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{}{}", db_filename, suffix));
    }
}

#[allow(dead_code)]
pub struct BlogTestApp {
    pub router: Router,
    pub db_filename: String,
    pub state: Arc<BlogState>,
}

#[allow(dead_code)]
impl BlogTestApp {
    pub async fn new() -> Self {
        let (db_filename, db_url) = test_db();
        let config = BlogConfig { database_url: db_url, port: 0 };

        let state = Arc::new(bootstrap_blog_state(&config).await.expect("Failed to bootstrap blog state"));
        let router = create_blog_router(state.clone());

        Self { router, db_filename, state }
    }
}

impl Drop for BlogTestApp {
    fn drop(&mut self) {
        remove_db(&self.db_filename);
    }
}

#[allow(dead_code)]
pub struct TodoTestApp {
    pub router: Router,
}

#[allow(dead_code)]
impl TodoTestApp {
    pub fn new() -> Self {
        let state = Arc::new(bootstrap_todo_state().expect("Failed to bootstrap todo state"));
        Self { router: create_todo_router(state) }
    }
}

#[allow(dead_code)]
pub struct AdminTestApp {
    pub router: Router,
    pub db_filename: String,
    pub state: Arc<AdminState>,
}

#[allow(dead_code)]
impl AdminTestApp {
    /// Boots the admin backend on a fresh database with the seeded admin account.
    pub async fn new() -> Self {
        let (db_filename, db_url) = test_db();

        let config = AdminConfig {
            database_url: db_url,
            port: 0,
            jwt_secret_key: include_str!("../tests/keys/test_private.pem").to_string(),
            jwt_public_key: include_str!("../tests/keys/test_public.pem").to_string(),
            auth_issuer: "test-issuer".to_string(),
            admin_email: Some(ADMIN_EMAIL.to_string()),
            admin_password: Some(ADMIN_PASSWORD.to_string()),
        };

        let state = Arc::new(bootstrap_admin_state(&config).await.expect("Failed to bootstrap admin state"));
        let router = create_admin_router(state.clone());

        Self { router, db_filename, state }
    }

    pub async fn login_admin(&self) -> AuthHeaders {
        self.login(ADMIN_EMAIL, ADMIN_PASSWORD).await
    }

    pub async fn login(&self, email: &str, password: &str) -> AuthHeaders {
        let payload = serde_json::json!({
            "email": email,
            "password": password
        });

        let response = self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await.unwrap();

        if !response.status().is_success() {
            panic!("Login failed in test helper: status {}", response.status());
        }

        let cookies: Vec<String> = response.headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|h| h.to_str().unwrap().to_string())
            .collect();

        let access_token_cookie = cookies.iter()
            .find(|c| c.contains("access_token="))
            .expect("No access_token cookie returned");

        let start = access_token_cookie.find("access_token=").unwrap() + 13;
        let end = access_token_cookie[start..].find(';').unwrap_or(access_token_cookie.len() - start);
        let access_token = access_token_cookie[start..start + end].to_string();

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body_json: Value = serde_json::from_slice(&body_bytes).unwrap();
        let csrf_token = body_json["csrfToken"].as_str().expect("No csrfToken in body").to_string();

        AuthHeaders {
            access_token,
            csrf_token,
        }
    }

    /// Sends an authenticated JSON request and returns the raw response.
    pub async fn call(&self, method: &str, uri: &str, auth: &AuthHeaders, body: Option<Value>) -> axum::response::Response {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header("X-CSRF-Token", &auth.csrf_token);

        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        self.router.clone().oneshot(builder.body(body).unwrap()).await.unwrap()
    }
}

impl Drop for AdminTestApp {
    fn drop(&mut self) {
        remove_db(&self.db_filename);
    }
}
