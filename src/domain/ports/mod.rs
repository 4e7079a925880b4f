use crate::domain::models::{
    Status, post::Post, task::Task, user::{Role, User}, product::Product,
    order::{Order, OrderStatus},
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub const DEFAULT_PAGE_SIZE: i64 = 50;
pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Clone)]
pub struct PostFilter {
    pub author: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

impl Default for PostFilter {
    fn default() -> Self {
        Self { author: None, limit: DEFAULT_PAGE_SIZE, offset: 0 }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub role: Option<Role>,
    pub status: Option<Status>,
}

#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub status: Option<Status>,
}

#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
}

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn create(&self, post: &Post) -> Result<Post, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Post>, AppError>;
    async fn list(&self, filter: &PostFilter) -> Result<Vec<Post>, AppError>;
    async fn update(&self, post: &Post) -> Result<Post, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

/// Process-local task list behind the to-do pages.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn list(&self) -> Vec<Task>;
    async fn add(&self, text: String) -> Task;
    async fn find(&self, id: u64) -> Option<Task>;
    async fn update(&self, id: u64, text: String) -> Option<Task>;
    async fn delete(&self, id: u64) -> bool;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<User, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn list(&self, filter: &UserFilter) -> Result<Vec<User>, AppError>;
    async fn count(&self) -> Result<i64, AppError>;
    async fn update(&self, user: &User) -> Result<User, AppError>;
    async fn record_login(&self, id: &str, at: DateTime<Utc>) -> Result<(), AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create(&self, product: &Product) -> Result<Product, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Product>, AppError>;
    async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, AppError>;
    async fn update(&self, product: &Product) -> Result<Product, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn create(&self, order: &Order) -> Result<Order, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Order>, AppError>;
    async fn list(&self, filter: &OrderFilter) -> Result<Vec<Order>, AppError>;
    /// Writes only while the stored status still equals `expected`.
    /// A moved status is a `Conflict`, a missing order `NotFound`.
    async fn update(&self, order: &Order, expected: OrderStatus) -> Result<Order, AppError>;
    async fn update_status(&self, id: &str, from: OrderStatus, to: OrderStatus) -> Result<Order, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}
