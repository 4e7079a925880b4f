mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use common::AdminTestApp;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_stats_require_login() {
    let app = AdminTestApp::new().await;

    let res = app.router.clone().oneshot(
        Request::builder().uri("/api/v1/dashboard/stats").body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_stats_on_fresh_store() {
    let app = AdminTestApp::new().await;
    let admin = app.login_admin().await;

    let res = app.call("GET", "/api/v1/dashboard/stats", &admin, None).await;
    assert_eq!(res.status(), StatusCode::OK);
    let stats = parse_body(res).await;

    assert_eq!(stats["totalUsers"], 1);
    assert_eq!(stats["totalProducts"], 0);
    assert_eq!(stats["totalOrders"], 0);
    assert_eq!(stats["totalRevenue"], 0.0);
    assert_eq!(stats["userGrowth"], 100.0);
    assert_eq!(stats["revenueGrowth"], 0.0);
    assert_eq!(stats["orderGrowth"], 0.0);
}

#[tokio::test]
async fn test_stats_exclude_cancelled_revenue() {
    let app = AdminTestApp::new().await;
    let admin = app.login_admin().await;

    let res = app.call("POST", "/api/v1/users", &admin, Some(json!({"name": "C", "email": "c@example.com"}))).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = app.call("POST", "/api/v1/products", &admin, Some(json!({
        "name": "Lamp", "price": 20.0, "category": "home", "stock": 5
    }))).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    for (price, status) in [(20.0, "delivered"), (15.5, "processing"), (99.0, "cancelled")] {
        let res = app.call("POST", "/api/v1/orders", &admin, Some(json!({
            "userId": "c", "userName": "C",
            "products": [{"id": "p", "name": "Lamp", "quantity": 1, "price": price}],
            "status": status
        }))).await;
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    let stats = parse_body(app.call("GET", "/api/v1/dashboard/stats", &admin, None).await).await;

    assert_eq!(stats["totalUsers"], 2);
    assert_eq!(stats["totalProducts"], 1);
    assert_eq!(stats["totalOrders"], 3);
    assert_eq!(stats["totalRevenue"], 35.5);
    assert_eq!(stats["revenueGrowth"], 100.0);
    assert_eq!(stats["orderGrowth"], 100.0);
}
