use std::env;
use crate::error::AppError;

/// Settings for the blog API process.
#[derive(Clone)]
pub struct BlogConfig {
    pub database_url: String,
    pub port: u16,
}

/// Settings for the to-do list process. It has no backing store.
#[derive(Clone)]
pub struct TodoConfig {
    pub port: u16,
}

/// Settings for the admin panel backend.
#[derive(Clone)]
pub struct AdminConfig {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret_key: String, // Ed25519 private key (PEM)
    pub jwt_public_key: String, // Ed25519 public key (PEM)
    pub auth_issuer: String,
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

impl BlogConfig {
    pub fn from_env() -> Result<Self, AppError> {
        dotenv::dotenv().ok();
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            port: port_or("PORT", 5000)?,
        })
    }
}

impl TodoConfig {
    pub fn from_env() -> Result<Self, AppError> {
        dotenv::dotenv().ok();
        Ok(Self {
            port: port_or("PORT", 3000)?,
        })
    }
}

impl AdminConfig {
    pub fn from_env() -> Result<Self, AppError> {
        dotenv::dotenv().ok();
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            port: port_or("PORT", 4000)?,
            jwt_secret_key: required("JWT_SECRET_KEY")?,
            jwt_public_key: required("JWT_PUBLIC_KEY")?,
            auth_issuer: env::var("AUTH_ISSUER").unwrap_or_else(|_| "https://admin.crud-showcase.local".to_string()),
            admin_email: env::var("ADMIN_EMAIL").ok().filter(|v| !v.trim().is_empty()),
            admin_password: env::var("ADMIN_PASSWORD").ok().filter(|v| !v.is_empty()),
        })
    }
}

fn required(key: &str) -> Result<String, AppError> {
    env::var(key).map_err(|_| AppError::Config(format!("{} must be set", key)))
}

fn port_or(key: &str, default: u16) -> Result<u16, AppError> {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|_| AppError::Config(format!("{} must be a number, got '{}'", key, raw))),
        Err(_) => Ok(default),
    }
}
