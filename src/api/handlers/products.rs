use axum::{extract::{State, Path, Query}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AdminState;
use crate::api::dtos::{requests::{ProductRequest, ListProductsQuery}, responses::DeletedResponse};
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::product::{NewProductParams, Product};
use crate::domain::ports::ProductFilter;
use crate::domain::services::validation;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

fn validated(payload: ProductRequest) -> Result<NewProductParams, AppError> {
    Ok(NewProductParams {
        name: validation::required_text("name", &payload.name)?,
        description: payload.description.trim().to_string(),
        price: validation::non_negative_price("price", payload.price)?,
        category: validation::required_text("category", &payload.category)?,
        stock: validation::non_negative_count("stock", payload.stock)?,
        status: payload.status,
        image: validation::optional_text(payload.image),
    })
}

pub async fn list_products(
    State(state): State<Arc<AdminState>>,
    _user: AuthUser,
    Query(query): Query<ListProductsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filter = ProductFilter {
        category: validation::optional_text(query.category),
        status: query.status,
    };
    let products = state.product_repo.list(&filter).await?;
    Ok(Json(products))
}

pub async fn create_product(
    State(state): State<Arc<AdminState>>,
    user: AuthUser,
    Json(payload): Json<ProductRequest>,
) -> Result<impl IntoResponse, AppError> {
    user.require_catalog_manager()?;

    let product = Product::new(validated(payload)?);
    let created = state.product_repo.create(&product).await?;

    info!("Created product: {} ({})", created.id, created.name);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_product(
    State(state): State<Arc<AdminState>>,
    _user: AuthUser,
    Path(product_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let product = state.product_repo.find_by_id(&product_id).await?
        .ok_or(AppError::NotFound("Product not found".into()))?;
    Ok(Json(product))
}

pub async fn update_product(
    State(state): State<Arc<AdminState>>,
    user: AuthUser,
    Path(product_id): Path<String>,
    Json(payload): Json<ProductRequest>,
) -> Result<impl IntoResponse, AppError> {
    user.require_catalog_manager()?;

    let mut product = state.product_repo.find_by_id(&product_id).await?
        .ok_or(AppError::NotFound("Product not found".into()))?;

    let params = validated(payload)?;
    product.name = params.name;
    product.description = params.description;
    product.price = params.price;
    product.category = params.category;
    product.stock = params.stock;
    product.status = params.status;
    product.image = params.image;

    let updated = state.product_repo.update(&product).await?;
    info!("Updated product: {}", updated.id);
    Ok(Json(updated))
}

pub async fn delete_product(
    State(state): State<Arc<AdminState>>,
    user: AuthUser,
    Path(product_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    user.require_catalog_manager()?;

    state.product_repo.delete(&product_id).await?;
    info!("Deleted product: {}", product_id);
    Ok(Json(DeletedResponse::new()))
}
