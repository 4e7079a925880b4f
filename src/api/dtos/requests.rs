use crate::domain::models::{
    Status,
    order::{OrderItem, OrderStatus},
    user::Role,
};
use serde::Deserialize;

// Blog

#[derive(Deserialize)]
pub struct PostRequest {
    pub title: String,
    pub content: String,
    pub author: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Deserialize, Default)]
pub struct ListPostsQuery {
    pub author: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// To-do

#[derive(Deserialize)]
pub struct TaskForm {
    #[serde(default)]
    pub task: String,
}

// Admin

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct UserRequest {
    pub name: String,
    pub email: String,
    #[serde(default = "default_role")]
    pub role: Role,
    #[serde(default = "default_status")]
    pub status: Status,
    pub avatar: Option<String>,
    pub password: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct ListUsersQuery {
    pub role: Option<Role>,
    pub status: Option<Status>,
}

#[derive(Deserialize)]
pub struct ProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub category: String,
    pub stock: i32,
    #[serde(default = "default_status")]
    pub status: Status,
    pub image: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct ListProductsQuery {
    pub category: Option<String>,
    pub status: Option<Status>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub user_id: String,
    pub user_name: String,
    pub products: Vec<OrderItem>,
    #[serde(default = "default_order_status")]
    pub status: OrderStatus,
}

#[derive(Deserialize)]
pub struct OrderStatusRequest {
    pub status: OrderStatus,
}

#[derive(Deserialize, Default)]
pub struct ListOrdersQuery {
    pub status: Option<OrderStatus>,
}

fn default_role() -> Role {
    Role::User
}

fn default_status() -> Status {
    Status::Active
}

fn default_order_status() -> OrderStatus {
    OrderStatus::Pending
}
