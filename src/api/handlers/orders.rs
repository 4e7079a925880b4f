use axum::{extract::{State, Path, Query}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AdminState;
use crate::api::dtos::{
    requests::{OrderRequest, OrderStatusRequest, ListOrdersQuery},
    responses::DeletedResponse,
};
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::order::{order_total, Order, OrderItem, OrderStatus};
use crate::domain::ports::OrderFilter;
use crate::domain::services::validation;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

fn validated_items(items: Vec<OrderItem>) -> Result<Vec<OrderItem>, AppError> {
    if items.is_empty() {
        return Err(AppError::Validation("an order needs at least one product".into()));
    }

    items.into_iter()
        .map(|item| {
            if item.quantity < 1 {
                return Err(AppError::Validation("quantity must be at least 1".into()));
            }
            Ok(OrderItem {
                id: validation::required_text("product id", &item.id)?,
                name: validation::required_text("product name", &item.name)?,
                quantity: item.quantity,
                price: validation::non_negative_price("price", item.price)?,
            })
        })
        .collect()
}

fn check_transition(from: OrderStatus, to: OrderStatus) -> Result<(), AppError> {
    if !from.can_transition_to(to) {
        return Err(AppError::Conflict(format!("Cannot move order from {} to {}", from, to)));
    }
    Ok(())
}

pub async fn list_orders(
    State(state): State<Arc<AdminState>>,
    _user: AuthUser,
    Query(query): Query<ListOrdersQuery>,
) -> Result<impl IntoResponse, AppError> {
    let orders = state.order_repo.list(&OrderFilter { status: query.status }).await?;
    Ok(Json(orders))
}

pub async fn create_order(
    State(state): State<Arc<AdminState>>,
    user: AuthUser,
    Json(payload): Json<OrderRequest>,
) -> Result<impl IntoResponse, AppError> {
    user.require_catalog_manager()?;

    let order = Order::new(
        validation::required_text("userId", &payload.user_id)?,
        validation::required_text("userName", &payload.user_name)?,
        validated_items(payload.products)?,
        payload.status,
    );
    let created = state.order_repo.create(&order).await?;

    info!("Created order: {} total {:.2}", created.id, created.total);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_order(
    State(state): State<Arc<AdminState>>,
    _user: AuthUser,
    Path(order_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let order = state.order_repo.find_by_id(&order_id).await?
        .ok_or(AppError::NotFound("Order not found".into()))?;
    Ok(Json(order))
}

pub async fn update_order(
    State(state): State<Arc<AdminState>>,
    user: AuthUser,
    Path(order_id): Path<String>,
    Json(payload): Json<OrderRequest>,
) -> Result<impl IntoResponse, AppError> {
    user.require_catalog_manager()?;

    let mut order = state.order_repo.find_by_id(&order_id).await?
        .ok_or(AppError::NotFound("Order not found".into()))?;

    let previous = order.status;
    check_transition(previous, payload.status)?;

    order.user_id = validation::required_text("userId", &payload.user_id)?;
    order.user_name = validation::required_text("userName", &payload.user_name)?;
    order.products = validated_items(payload.products)?;
    order.total = order_total(&order.products);
    order.status = payload.status;

    let updated = state.order_repo.update(&order, previous).await?;
    info!("Updated order: {}", updated.id);
    Ok(Json(updated))
}

pub async fn update_order_status(
    State(state): State<Arc<AdminState>>,
    user: AuthUser,
    Path(order_id): Path<String>,
    Json(payload): Json<OrderStatusRequest>,
) -> Result<impl IntoResponse, AppError> {
    user.require_catalog_manager()?;

    let order = state.order_repo.find_by_id(&order_id).await?
        .ok_or(AppError::NotFound("Order not found".into()))?;

    check_transition(order.status, payload.status)?;

    let updated = state.order_repo.update_status(&order.id, order.status, payload.status).await?;
    info!("Order {} moved from {} to {}", updated.id, order.status, updated.status);
    Ok(Json(updated))
}

pub async fn delete_order(
    State(state): State<Arc<AdminState>>,
    user: AuthUser,
    Path(order_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    user.require_catalog_manager()?;

    state.order_repo.delete(&order_id).await?;
    info!("Deleted order: {}", order_id);
    Ok(Json(DeletedResponse::new()))
}
