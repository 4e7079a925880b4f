use axum::{
    body::Body,
    extract::Request,
    http::{header::CONTENT_TYPE, HeaderName, Method},
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::{AdminState, BlogState, TodoState};
use crate::api::handlers::{auth, dashboard, health, orders, posts, products, todos, users};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tower_cookies::CookieManagerLayer;
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_blog_router(state: Arc<BlogState>) -> Router {
    let router = Router::new()
        .route("/health", get(health::health_check))
        .route("/api/posts", post(posts::create_post).get(posts::list_posts))
        .route("/api/posts/{id}", get(posts::get_post).put(posts::update_post).delete(posts::delete_post))
        .with_state(state);

    with_request_tracing(router)
}

pub fn create_todo_router(state: Arc<TodoState>) -> Router {
    let router = Router::new()
        .route("/", get(todos::index))
        .route("/add", post(todos::add_task))
        .route("/delete/{id}", get(todos::delete_task))
        .route("/edit/{id}", get(todos::edit_form).post(todos::edit_task))
        .route("/health", get(health::health_check))
        .with_state(state);

    with_request_tracing(router)
}

pub fn create_admin_router(state: Arc<AdminState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, HeaderName::from_static("x-csrf-token")])
        .max_age(Duration::from_secs(60 * 60));

    let router = Router::new()
        .route("/health", get(health::health_check))

        // Auth
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/logout", post(auth::logout))
        .route("/api/v1/auth/me", get(auth::me))

        // Dashboard
        .route("/api/v1/dashboard/stats", get(dashboard::get_stats))

        // Users
        .route("/api/v1/users", get(users::list_users).post(users::create_user))
        .route("/api/v1/users/{user_id}", get(users::get_user).put(users::update_user).delete(users::delete_user))

        // Products
        .route("/api/v1/products", get(products::list_products).post(products::create_product))
        .route("/api/v1/products/{product_id}", get(products::get_product).put(products::update_product).delete(products::delete_product))

        // Orders
        .route("/api/v1/orders", get(orders::list_orders).post(orders::create_order))
        .route("/api/v1/orders/{order_id}", get(orders::get_order).put(orders::update_order).delete(orders::delete_order))
        .route("/api/v1/orders/{order_id}/status", patch(orders::update_order_status))

        .layer(CookieManagerLayer::new())
        .with_state(state);

    with_request_tracing(router).layer(cors)
}

fn with_request_tracing(router: Router) -> Router {
    router.layer(
        TraceLayer::new_for_http()
            .make_span_with(|request: &Request<Body>| {
                let request_id = Uuid::new_v4().to_string();
                info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = ?request.method(),
                    uri = ?request.uri(),
                    version = ?request.version(),
                    user_id = tracing::field::Empty,
                )
            })
            .on_request(|request: &Request<Body>, _span: &Span| {
                info!("started processing request: {} {}", request.method(), request.uri().path());
            })
            .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "finished processing request"
                );
            })
            .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                error!("request failed: {:?}", error);
            })
    )
}
