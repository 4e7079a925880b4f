use crate::domain::{models::post::Post, ports::{PostFilter, PostRepository}};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{types::Json, SqlitePool};

pub struct SqlitePostRepo {
    pool: SqlitePool,
}

impl SqlitePostRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for SqlitePostRepo {
    async fn create(&self, post: &Post) -> Result<Post, AppError> {
        sqlx::query_as::<_, Post>(
            "INSERT INTO posts (id, title, content, author, tags, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING *"
        )
            .bind(&post.id)
            .bind(&post.title)
            .bind(&post.content)
            .bind(&post.author)
            .bind(Json(&post.tags))
            .bind(post.created_at)
            .bind(post.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Post>, AppError> {
        sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self, filter: &PostFilter) -> Result<Vec<Post>, AppError> {
        sqlx::query_as::<_, Post>(
            "SELECT * FROM posts WHERE (? IS NULL OR author = ?) ORDER BY created_at DESC LIMIT ? OFFSET ?"
        )
            .bind(&filter.author)
            .bind(&filter.author)
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, post: &Post) -> Result<Post, AppError> {
        sqlx::query_as::<_, Post>(
            "UPDATE posts SET title=?, content=?, author=?, tags=?, updated_at=? WHERE id=? RETURNING *"
        )
            .bind(&post.title)
            .bind(&post.content)
            .bind(&post.author)
            .bind(Json(&post.tags))
            .bind(post.updated_at)
            .bind(&post.id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Post not found".into()))
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Post not found".into()));
        }
        Ok(())
    }
}
