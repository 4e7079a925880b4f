use crate::domain::{models::order::{Order, OrderStatus}, ports::{OrderFilter, OrderRepository}};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{types::Json, SqlitePool};

pub struct SqliteOrderRepo {
    pool: SqlitePool,
}

impl SqliteOrderRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Explains a guarded write that matched no row: either the order is gone
    /// or its status moved since it was read.
    async fn stale_write_error(&self, id: &str) -> Result<AppError, AppError> {
        Ok(match self.find_by_id(id).await? {
            Some(current) => AppError::Conflict(format!("Order status changed to {} by another request", current.status)),
            None => AppError::NotFound("Order not found".into()),
        })
    }
}

#[async_trait]
impl OrderRepository for SqliteOrderRepo {
    async fn create(&self, order: &Order) -> Result<Order, AppError> {
        sqlx::query_as::<_, Order>(
            "INSERT INTO orders (id, user_id, user_name, products, total, status, created_at) VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING *"
        )
            .bind(&order.id)
            .bind(&order.user_id)
            .bind(&order.user_name)
            .bind(Json(&order.products))
            .bind(order.total)
            .bind(order.status.as_str())
            .bind(order.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Order>, AppError> {
        sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self, filter: &OrderFilter) -> Result<Vec<Order>, AppError> {
        let status = filter.status.map(|s| s.as_str());
        sqlx::query_as::<_, Order>(
            "SELECT * FROM orders WHERE (? IS NULL OR status = ?) ORDER BY created_at ASC"
        )
            .bind(status)
            .bind(status)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, order: &Order, expected: OrderStatus) -> Result<Order, AppError> {
        let updated = sqlx::query_as::<_, Order>(
            "UPDATE orders SET user_id=?, user_name=?, products=?, total=?, status=? WHERE id=? AND status=? RETURNING *"
        )
            .bind(&order.user_id)
            .bind(&order.user_name)
            .bind(Json(&order.products))
            .bind(order.total)
            .bind(order.status.as_str())
            .bind(&order.id)
            .bind(expected.as_str())
            .fetch_optional(&self.pool)
            .await?;

        match updated {
            Some(order) => Ok(order),
            None => Err(self.stale_write_error(&order.id).await?),
        }
    }

    async fn update_status(&self, id: &str, from: OrderStatus, to: OrderStatus) -> Result<Order, AppError> {
        let updated = sqlx::query_as::<_, Order>("UPDATE orders SET status=? WHERE id=? AND status=? RETURNING *")
            .bind(to.as_str())
            .bind(id)
            .bind(from.as_str())
            .fetch_optional(&self.pool)
            .await?;

        match updated {
            Some(order) => Ok(order),
            None => Err(self.stale_write_error(id).await?),
        }
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM orders WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Order not found".into()));
        }
        Ok(())
    }
}
