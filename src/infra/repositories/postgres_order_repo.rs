use crate::domain::{models::order::{Order, OrderStatus}, ports::{OrderFilter, OrderRepository}};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{types::Json, PgPool};

pub struct PostgresOrderRepo {
    pool: PgPool,
}

impl PostgresOrderRepo {
    pub fn new(pool: PgPool) -> Self {
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
impl OrderRepository for PostgresOrderRepo {
    async fn create(&self, order: &Order) -> Result<Order, AppError> {
        sqlx::query_as::<_, Order>(
            "INSERT INTO orders (id, user_id, user_name, products, total, status, created_at) VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *"
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
        sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self, filter: &OrderFilter) -> Result<Vec<Order>, AppError> {
        sqlx::query_as::<_, Order>(
            "SELECT * FROM orders WHERE ($1::text IS NULL OR status = $1) ORDER BY created_at ASC"
        )
            .bind(filter.status.map(|s| s.as_str()))
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, order: &Order, expected: OrderStatus) -> Result<Order, AppError> {
        let updated = sqlx::query_as::<_, Order>(
            "UPDATE orders SET user_id=$1, user_name=$2, products=$3, total=$4, status=$5 WHERE id=$6 AND status=$7 RETURNING *"
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
        let updated = sqlx::query_as::<_, Order>("UPDATE orders SET status=$1 WHERE id=$2 AND status=$3 RETURNING *")
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
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
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
