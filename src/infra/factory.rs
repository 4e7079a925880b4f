use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::{error, info, warn};
use tracing::log::LevelFilter;
use tera::Tera;

use crate::config::{AdminConfig, BlogConfig};
use crate::error::AppError;
use crate::state::{AdminState, BlogState, TodoState};
use crate::domain::models::{Status, user::{NewUserParams, Role, User}};
use crate::domain::services::{auth_service::AuthService, validation};
use crate::infra::repositories::{
    memory_task_repo::InMemoryTaskRepo,
    postgres_order_repo::PostgresOrderRepo, postgres_post_repo::PostgresPostRepo,
    postgres_product_repo::PostgresProductRepo, postgres_user_repo::PostgresUserRepo,
    sqlite_order_repo::SqliteOrderRepo, sqlite_post_repo::SqlitePostRepo,
    sqlite_product_repo::SqliteProductRepo, sqlite_user_repo::SqliteUserRepo,
};

pub enum DbPool {
    Postgres(PgPool),
    Sqlite(SqlitePool),
}

/// `postgres://` and `postgresql://` URLs select PostgreSQL; anything else is
/// handed to SQLite.
pub async fn connect(database_url: &str) -> Result<DbPool, AppError> {
    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse()
            .map_err(|e| AppError::Config(format!("Invalid Postgres URL: {}", e)))?;
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .map_err(|e| {
                error!("Failed to connect to Postgres: {}", e);
                AppError::Database(e)
            })?;

        Ok(DbPool::Postgres(pool))
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| AppError::Config(format!("Invalid SQLite connection string: {}", e)))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .map_err(|e| {
                error!("Failed to connect to SQLite: {}", e);
                AppError::Database(e)
            })?;

        Ok(DbPool::Sqlite(pool))
    }
}

pub async fn bootstrap_blog_state(config: &BlogConfig) -> Result<BlogState, AppError> {
    let state = match connect(&config.database_url).await? {
        DbPool::Postgres(pool) => {
            sqlx::migrate!("./migrations/blog/postgres").run(&pool).await?;
            BlogState {
                config: config.clone(),
                post_repo: Arc::new(PostgresPostRepo::new(pool)),
            }
        }
        DbPool::Sqlite(pool) => {
            sqlx::migrate!("./migrations/blog/sqlite").run(&pool).await?;
            BlogState {
                config: config.clone(),
                post_repo: Arc::new(SqlitePostRepo::new(pool)),
            }
        }
    };

    info!("Blog store ready");
    Ok(state)
}

pub fn bootstrap_todo_state() -> Result<TodoState, AppError> {
    Ok(TodoState {
        task_repo: Arc::new(InMemoryTaskRepo::new()),
        templates: Arc::new(load_todo_templates()?),
    })
}

pub fn load_todo_templates() -> Result<Tera, AppError> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        ("index.html", include_str!("../../templates/todo/index.html")),
        ("edit.html", include_str!("../../templates/todo/edit.html")),
    ])
    .map_err(|e| AppError::InternalWithMsg(format!("Tera parse error: {:?}", e)))?;
    Ok(tera)
}

pub async fn bootstrap_admin_state(config: &AdminConfig) -> Result<AdminState, AppError> {
    let auth_service = Arc::new(AuthService::new(config)?);

    let state = match connect(&config.database_url).await? {
        DbPool::Postgres(pool) => {
            sqlx::migrate!("./migrations/admin/postgres").run(&pool).await?;
            AdminState {
                config: config.clone(),
                user_repo: Arc::new(PostgresUserRepo::new(pool.clone())),
                product_repo: Arc::new(PostgresProductRepo::new(pool.clone())),
                order_repo: Arc::new(PostgresOrderRepo::new(pool)),
                auth_service,
            }
        }
        DbPool::Sqlite(pool) => {
            sqlx::migrate!("./migrations/admin/sqlite").run(&pool).await?;
            AdminState {
                config: config.clone(),
                user_repo: Arc::new(SqliteUserRepo::new(pool.clone())),
                product_repo: Arc::new(SqliteProductRepo::new(pool.clone())),
                order_repo: Arc::new(SqliteOrderRepo::new(pool)),
                auth_service,
            }
        }
    };

    seed_admin(&state).await?;
    Ok(state)
}

/// Creates the first admin from `ADMIN_EMAIL`/`ADMIN_PASSWORD` on an empty store.
pub async fn seed_admin(state: &AdminState) -> Result<(), AppError> {
    let (Some(email), Some(password)) = (&state.config.admin_email, &state.config.admin_password) else {
        return Ok(());
    };

    if state.user_repo.count().await? > 0 {
        return Ok(());
    }

    let email = validation::email(email)?;
    let password_hash = AuthService::hash_password(validation::password(password)?)?;

    let admin = User::new(NewUserParams {
        name: "Administrator".to_string(),
        email,
        role: Role::Admin,
        status: Status::Active,
        avatar: None,
        password_hash: Some(password_hash),
    });
    let created = state.user_repo.create(&admin).await?;

    warn!("Seeded initial admin account {} ({})", created.email, created.id);
    Ok(())
}
