use std::sync::Arc;
use crate::domain::ports::{
    OrderRepository, PostRepository, ProductRepository, TaskRepository, UserRepository,
};
use crate::domain::services::auth_service::AuthService;
use crate::config::{AdminConfig, BlogConfig};
use tera::Tera;

#[derive(Clone)]
pub struct BlogState {
    pub config: BlogConfig,
    pub post_repo: Arc<dyn PostRepository>,
}

#[derive(Clone)]
pub struct TodoState {
    pub task_repo: Arc<dyn TaskRepository>,
    pub templates: Arc<Tera>,
}

#[derive(Clone)]
pub struct AdminState {
    pub config: AdminConfig,
    pub user_repo: Arc<dyn UserRepository>,
    pub product_repo: Arc<dyn ProductRepository>,
    pub order_repo: Arc<dyn OrderRepository>,
    pub auth_service: Arc<AuthService>,
}
