mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::{AdminTestApp, AuthHeaders};
use crud_showcase::{
    domain::{models::order::OrderStatus, ports::OrderRepository},
    error::AppError,
};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn order_payload(status: &str) -> Value {
    json!({
        "userId": "cust-1",
        "userName": "Casey Customer",
        "products": [
            {"id": "p-1", "name": "Lamp", "quantity": 2, "price": 19.99},
            {"id": "p-2", "name": "Mug", "quantity": 1, "price": 0.1}
        ],
        "status": status
    })
}

async fn create_order(app: &AdminTestApp, auth: &AuthHeaders, status: &str) -> Value {
    let res = app.call("POST", "/api/v1/orders", auth, Some(order_payload(status))).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    parse_body(res).await
}

async fn set_status(app: &AdminTestApp, auth: &AuthHeaders, id: &str, status: &str) -> axum::response::Response {
    app.call("PATCH", &format!("/api/v1/orders/{}/status", id), auth, Some(json!({"status": status}))).await
}

#[tokio::test]
async fn test_order_crud_lifecycle() {
    let app = AdminTestApp::new().await;
    let admin = app.login_admin().await;

    let order = create_order(&app, &admin, "pending").await;
    let id = order["id"].as_str().unwrap().to_string();
    assert_eq!(order["userId"], "cust-1");
    assert_eq!(order["userName"], "Casey Customer");
    assert_eq!(order["total"], 40.08);
    assert_eq!(order["products"].as_array().unwrap().len(), 2);
    assert_eq!(order["products"][0]["quantity"], 2);

    let res = app.call("GET", &format!("/api/v1/orders/{}", id), &admin, None).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await["total"], 40.08);

    // Replacing the lines recomputes the total
    let res = app.call("PUT", &format!("/api/v1/orders/{}", id), &admin, Some(json!({
        "userId": "cust-1",
        "userName": "Casey Customer",
        "products": [{"id": "p-3", "name": "Chair", "quantity": 4, "price": 25.0}],
        "status": "processing"
    }))).await;
    assert_eq!(res.status(), StatusCode::OK);
    let updated = parse_body(res).await;
    assert_eq!(updated["total"], 100.0);
    assert_eq!(updated["status"], "processing");
    assert_eq!(updated["createdAt"], order["createdAt"]);

    let res = app.call("DELETE", &format!("/api/v1/orders/{}", id), &admin, None).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.call("GET", &format!("/api/v1/orders/{}", id), &admin, None).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_order_validation() {
    let app = AdminTestApp::new().await;
    let admin = app.login_admin().await;

    let mut empty = order_payload("pending");
    empty["products"] = json!([]);
    let res = app.call("POST", "/api/v1/orders", &admin, Some(empty)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let mut zero_qty = order_payload("pending");
    zero_qty["products"][0]["quantity"] = json!(0);
    let res = app.call("POST", "/api/v1/orders", &admin, Some(zero_qty)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(parse_body(res).await["error"], "quantity must be at least 1");

    let mut negative = order_payload("pending");
    negative["products"][1]["price"] = json!(-1.0);
    let res = app.call("POST", "/api/v1/orders", &admin, Some(negative)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let mut no_customer = order_payload("pending");
    no_customer["userName"] = json!("  ");
    let res = app.call("POST", "/api/v1/orders", &admin, Some(no_customer)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app.call("POST", "/api/v1/orders", &admin, Some(order_payload("lost"))).await;
    assert!(res.status().is_client_error());
}

#[tokio::test]
async fn test_status_moves_forward_and_may_skip() {
    let app = AdminTestApp::new().await;
    let admin = app.login_admin().await;

    let order = create_order(&app, &admin, "pending").await;
    let id = order["id"].as_str().unwrap();

    let res = set_status(&app, &admin, id, "shipped").await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await["status"], "shipped");

    // Same status is accepted
    let res = set_status(&app, &admin, id, "shipped").await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = set_status(&app, &admin, id, "processing").await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    assert_eq!(parse_body(res).await["error"], "Cannot move order from shipped to processing");

    let res = set_status(&app, &admin, id, "delivered").await;
    assert_eq!(res.status(), StatusCode::OK);

    // Delivered is terminal
    let res = set_status(&app, &admin, id, "cancelled").await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_cancelled_orders_are_frozen() {
    let app = AdminTestApp::new().await;
    let admin = app.login_admin().await;

    let order = create_order(&app, &admin, "processing").await;
    let id = order["id"].as_str().unwrap();

    let res = set_status(&app, &admin, id, "cancelled").await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = set_status(&app, &admin, id, "pending").await;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    // A full update cannot sneak the status back either
    let res = app.call("PUT", &format!("/api/v1/orders/{}", id), &admin, Some(order_payload("processing"))).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let res = set_status(&app, &admin, "missing", "shipped").await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_orders_by_status_and_role() {
    let app = AdminTestApp::new().await;
    let admin = app.login_admin().await;

    create_order(&app, &admin, "pending").await;
    create_order(&app, &admin, "pending").await;
    create_order(&app, &admin, "shipped").await;

    let pending = parse_body(app.call("GET", "/api/v1/orders?status=pending", &admin, None).await).await;
    assert_eq!(pending.as_array().unwrap().len(), 2);

    let all = parse_body(app.call("GET", "/api/v1/orders", &admin, None).await).await;
    assert_eq!(all.as_array().unwrap().len(), 3);

    let res = app.call("POST", "/api/v1/users", &admin, Some(json!({
        "name": "Viewer", "email": "viewer@example.com", "password": "viewer-password"
    }))).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let viewer = app.login("viewer@example.com", "viewer-password").await;

    let res = app.call("GET", "/api/v1/orders", &viewer, None).await;
    assert_eq!(res.status(), StatusCode::OK);

    let first = all[0]["id"].as_str().unwrap();
    let res = set_status(&app, &viewer, first, "cancelled").await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = app.call("POST", "/api/v1/orders", &viewer, Some(order_payload("pending"))).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

async fn send_status(router: axum::Router, access_token: String, csrf_token: String, id: String, status: &'static str) -> StatusCode {
    let request = Request::builder()
        .method("PATCH")
        .uri(format!("/api/v1/orders/{}/status", id))
        .header(header::COOKIE, format!("access_token={}", access_token))
        .header("X-CSRF-Token", csrf_token)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({"status": status}).to_string()))
        .unwrap();
    router.oneshot(request).await.unwrap().status()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_racing_terminal_transitions_have_one_winner() {
    let app = AdminTestApp::new().await;
    let admin = app.login_admin().await;

    let mut ids = Vec::new();
    for _ in 0..40 {
        let order = create_order(&app, &admin, "pending").await;
        ids.push(order["id"].as_str().unwrap().to_string());
    }

    let mut races = Vec::new();
    for id in &ids {
        let cancel = tokio::spawn(send_status(
            app.router.clone(), admin.access_token.clone(), admin.csrf_token.clone(), id.clone(), "cancelled",
        ));
        let deliver = tokio::spawn(send_status(
            app.router.clone(), admin.access_token.clone(), admin.csrf_token.clone(), id.clone(), "delivered",
        ));
        races.push((id.clone(), cancel, deliver));
    }

    for (id, cancel, deliver) in races {
        let cancel = cancel.await.unwrap();
        let deliver = deliver.await.unwrap();

        let winner = match (cancel, deliver) {
            (StatusCode::OK, StatusCode::CONFLICT) => "cancelled",
            (StatusCode::CONFLICT, StatusCode::OK) => "delivered",
            other => panic!("order {} expected one winner, got {:?}", id, other),
        };

        let stored = parse_body(app.call("GET", &format!("/api/v1/orders/{}", id), &admin, None).await).await;
        assert_eq!(stored["status"], winner, "order {} kept a status its winner did not write", id);
    }
}

#[tokio::test]
async fn test_guarded_status_write_rejects_stale_reads() {
    let app = AdminTestApp::new().await;
    let admin = app.login_admin().await;

    let order = create_order(&app, &admin, "pending").await;
    let id = order["id"].as_str().unwrap();
    let repo = &app.state.order_repo;

    let shipped = repo.update_status(id, OrderStatus::Pending, OrderStatus::Shipped).await.unwrap();
    assert_eq!(shipped.status, OrderStatus::Shipped);

    // A writer that still believes the order is pending loses
    let stale = repo.update_status(id, OrderStatus::Pending, OrderStatus::Cancelled).await;
    assert!(matches!(stale, Err(AppError::Conflict(_))));

    let mut full = repo.find_by_id(id).await.unwrap().unwrap();
    full.status = OrderStatus::Cancelled;
    let stale = repo.update(&full, OrderStatus::Processing).await;
    assert!(matches!(stale, Err(AppError::Conflict(_))));

    let current = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(current.status, OrderStatus::Shipped);

    let missing = repo.update_status("missing", OrderStatus::Pending, OrderStatus::Shipped).await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));
}
