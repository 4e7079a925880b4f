pub mod auth;
pub mod dashboard;
pub mod health;
pub mod orders;
pub mod posts;
pub mod products;
pub mod todos;
pub mod users;
