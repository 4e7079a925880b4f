use crate::domain::{models::post::Post, ports::{PostFilter, PostRepository}};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{types::Json, PgPool};

pub struct PostgresPostRepo {
    pool: PgPool,
}

impl PostgresPostRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepo {
    async fn create(&self, post: &Post) -> Result<Post, AppError> {
        sqlx::query_as::<_, Post>(
            "INSERT INTO posts (id, title, content, author, tags, created_at, updated_at) VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *"
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
        sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self, filter: &PostFilter) -> Result<Vec<Post>, AppError> {
        sqlx::query_as::<_, Post>(
            "SELECT * FROM posts WHERE ($1::text IS NULL OR author = $1) ORDER BY created_at DESC LIMIT $2 OFFSET $3"
        )
            .bind(&filter.author)
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, post: &Post) -> Result<Post, AppError> {
        sqlx::query_as::<_, Post>(
            "UPDATE posts SET title=$1, content=$2, author=$3, tags=$4, updated_at=$5 WHERE id=$6 RETURNING *"
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
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
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
