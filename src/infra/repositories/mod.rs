pub mod memory_task_repo;

pub mod sqlite_post_repo;
pub mod sqlite_user_repo;
pub mod sqlite_product_repo;
pub mod sqlite_order_repo;

pub mod postgres_post_repo;
pub mod postgres_user_repo;
pub mod postgres_product_repo;
pub mod postgres_order_repo;
