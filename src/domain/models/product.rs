use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use super::Status;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub stock: i32,
    #[sqlx(try_from = "String")]
    pub status: Status,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub struct NewProductParams {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub stock: i32,
    pub status: Status,
    pub image: Option<String>,
}

impl Product {
    pub fn new(params: NewProductParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: params.name,
            description: params.description,
            price: params.price,
            category: params.category,
            stock: params.stock,
            status: params.status,
            image: params.image,
            created_at: Utc::now(),
        }
    }
}
