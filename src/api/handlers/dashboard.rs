use axum::{extract::State, response::IntoResponse, Json};
use crate::state::AdminState;
use crate::api::extractors::auth::AuthUser;
use crate::domain::ports::{OrderFilter, ProductFilter, UserFilter};
use crate::domain::services::dashboard::compute_stats;
use crate::error::AppError;
use chrono::Utc;
use std::sync::Arc;

pub async fn get_stats(
    State(state): State<Arc<AdminState>>,
    _user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let (user_filter, product_filter, order_filter) =
        (UserFilter::default(), ProductFilter::default(), OrderFilter::default());

    let (users, products, orders) = tokio::try_join!(
        state.user_repo.list(&user_filter),
        state.product_repo.list(&product_filter),
        state.order_repo.list(&order_filter),
    )?;

    Ok(Json(compute_stats(&users, &products, &orders, Utc::now())))
}
