pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod infra;
pub mod state;

use crate::config::{AdminConfig, BlogConfig, TodoConfig};
use crate::error::AppError;
use crate::infra::factory::{bootstrap_admin_state, bootstrap_blog_state, bootstrap_todo_state};
use api::router::{create_admin_router, create_blog_router, create_todo_router};
use axum::Router;
use std::future::Future;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

pub fn init_logging(service: &str) -> WorkerGuard {
    let file_appender = tracing_appender::rolling::daily("./logs", format!("{}.log", service));
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .json()
        .with_writer(non_blocking)
        .with_filter(EnvFilter::new("info,crud_showcase=debug"));

    let stdout_layer = tracing_subscriber::fmt::layer()
        .pretty()
        .with_target(false)
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()));

    tracing_subscriber::registry()
        .with(stdout_layer)
        .with(file_layer)
        .init();

    info!("Logging initialized. Writing JSON logs to ./logs/{}.log", service);
    guard
}

pub async fn run_blog() {
    run_service("blog-api", async {
        let config = BlogConfig::from_env()?;
        let state = bootstrap_blog_state(&config).await?;
        serve(create_blog_router(Arc::new(state)), config.port).await
    }).await
}

pub async fn run_todo() {
    run_service("todo-app", async {
        let config = TodoConfig::from_env()?;
        let state = bootstrap_todo_state()?;
        serve(create_todo_router(Arc::new(state)), config.port).await
    }).await
}

pub async fn run_admin() {
    run_service("admin-api", async {
        let config = AdminConfig::from_env()?;
        let state = bootstrap_admin_state(&config).await?;
        serve(create_admin_router(Arc::new(state)), config.port).await
    }).await
}

/// Startup or serve failures are logged and end the process with status 1.
async fn run_service(name: &str, service: impl Future<Output = Result<(), AppError>>) {
    let guard = init_logging(name);

    if let Err(e) = service.await {
        error!("{} stopped: {}", name, e);
        drop(guard);
        std::process::exit(1);
    }
}

async fn serve(app: Router, port: u16) -> Result<(), AppError> {
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .map_err(|e| AppError::InternalWithMsg(format!("Failed to bind port {}: {}", port, e)))?;

    info!("🚀 Server running on http://localhost:{}", port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::InternalWithMsg(format!("Server error: {}", e)))?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
