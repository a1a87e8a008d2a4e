//! End-to-end tests over the full router with an in-memory SQLite database.

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use bookstall_api::{
    construct_router,
    entity::{
        book, error_report, sale, sale_item, setting, student, supplier, supplier_payment, user,
    },
    sea_orm::{
        ColumnTrait, ConnectOptions, ConnectionTrait, Database, DbBackend, EntityTrait,
        QueryFilter, Schema, prelude::Expr,
    },
    state::{AppState, State},
};
use chrono::NaiveDate;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn setup() -> (Router, AppState) {
    let mut opt = ConnectOptions::new("sqlite::memory:".to_string());
    opt.max_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await.expect("sqlite connect");

    let backend = db.get_database_backend();
    let schema = Schema::new(DbBackend::Sqlite);
    db.execute(backend.build(&schema.create_table_from_entity(user::Entity)))
        .await
        .expect("create user table");
    db.execute(backend.build(&schema.create_table_from_entity(book::Entity)))
        .await
        .expect("create book table");
    db.execute(backend.build(&schema.create_table_from_entity(student::Entity)))
        .await
        .expect("create student table");
    db.execute(backend.build(&schema.create_table_from_entity(sale::Entity)))
        .await
        .expect("create sale table");
    db.execute(backend.build(&schema.create_table_from_entity(sale_item::Entity)))
        .await
        .expect("create sale_item table");
    db.execute(backend.build(&schema.create_table_from_entity(supplier::Entity)))
        .await
        .expect("create supplier table");
    db.execute(backend.build(&schema.create_table_from_entity(supplier_payment::Entity)))
        .await
        .expect("create supplier_payment table");
    db.execute(backend.build(&schema.create_table_from_entity(setting::Entity)))
        .await
        .expect("create setting table");
    db.execute(backend.build(&schema.create_table_from_entity(error_report::Entity)))
        .await
        .expect("create error_report table");

    let state = Arc::new(State::with_db(db, "test-secret"));
    (construct_router(state.clone()), state)
}

async fn request(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };

    let response = router.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn signup(router: &Router) -> String {
    let (status, body) = request(
        router,
        "POST",
        "/api/v1/auth/signup",
        Some(json!({
            "name": "clerk",
            "email": "clerk@example.com",
            "password": "secret123"
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["token"].as_str().expect("token").to_string()
}

async fn create_book(
    router: &Router,
    token: &str,
    title: &str,
    price: i64,
    stock: i32,
) -> String {
    let (status, body) = request(
        router,
        "POST",
        "/api/v1/books",
        Some(json!({
            "title": title,
            "subject": "Mathematics",
            "class_level": "Basic 2",
            "price": price,
            "stock": stock
        })),
        Some(token),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().expect("book id").to_string()
}

fn sale_body(book_id: &str, quantity: i32) -> Value {
    json!({
        "student_name": "Ama",
        "student_class": "Basic 2",
        "items": [{"book_id": book_id, "quantity": quantity}]
    })
}

#[tokio::test]
async fn test_signup_and_login() {
    let (router, _state) = setup().await;

    let token = signup(&router).await;
    assert!(!token.is_empty());

    // Duplicate name is a conflict
    let (status, body) = request(
        &router,
        "POST",
        "/api/v1/auth/signup",
        Some(json!({
            "name": "clerk",
            "email": "other@example.com",
            "password": "secret123"
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFLICT");

    let (status, body) = request(
        &router,
        "POST",
        "/api/v1/auth/login",
        Some(json!({"name": "clerk", "password": "secret123"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["name"], "clerk");
    assert!(body["token"].as_str().is_some());

    let (status, _) = request(
        &router,
        "POST",
        "/api/v1/auth/login",
        Some(json!({"name": "clerk", "password": "wrong"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = request(
        &router,
        "POST",
        "/api/v1/auth/login",
        Some(json!({"name": "nobody", "password": "secret123"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_endpoints_require_authentication() {
    let (router, _state) = setup().await;

    let (status, body) = request(&router, "GET", "/api/v1/books", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");

    let (status, _) = request(
        &router,
        "GET",
        "/api/v1/sales/report",
        None,
        Some("not-a-real-token"),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_book_crud() {
    let (router, _state) = setup().await;
    let token = signup(&router).await;

    let book_id = create_book(&router, &token, "Primary Maths 2", 1500, 10).await;

    let (status, body) = request(&router, "GET", "/api/v1/books", None, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    let books = body.as_array().expect("book list");
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["title"], "Primary Maths 2");
    assert_eq!(books[0]["class_level"], "Basic 2");

    let (status, body) = request(
        &router,
        "PATCH",
        &format!("/api/v1/books/{}/stock", book_id),
        Some(json!({"stock": 25})),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stock"], 25);

    let (status, _) = request(
        &router,
        "PATCH",
        &format!("/api/v1/books/{}/stock", book_id),
        Some(json!({"stock": -1})),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = request(
        &router,
        "PATCH",
        &format!("/api/v1/books/{}/price", book_id),
        Some(json!({"price": 1800})),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["price"], 1800);

    let (status, _) = request(
        &router,
        "PATCH",
        &format!("/api/v1/books/{}/price", book_id),
        Some(json!({"price": 0})),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = request(
        &router,
        "PATCH",
        "/api/v1/books/missing/stock",
        Some(json!({"stock": 5})),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = request(
        &router,
        "DELETE",
        &format!("/api/v1/books/{}", book_id),
        None,
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = request(
        &router,
        "DELETE",
        &format!("/api/v1/books/{}", book_id),
        None,
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_book_validation() {
    let (router, _state) = setup().await;
    let token = signup(&router).await;

    let (status, _) = request(
        &router,
        "POST",
        "/api/v1/books",
        Some(json!({
            "title": "  ",
            "subject": "Maths",
            "class_level": "Basic 1",
            "price": 100,
            "stock": 1
        })),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = request(
        &router,
        "POST",
        "/api/v1/books",
        Some(json!({
            "title": "English",
            "subject": "English",
            "class_level": "Basic 1",
            "price": -5,
            "stock": 1
        })),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_sale_happy_path_then_oversell() {
    let (router, _state) = setup().await;
    let token = signup(&router).await;

    // Book A: stock 5, price 10.00 (1000 minor units)
    let book_id = create_book(&router, &token, "Book A", 1000, 5).await;

    let (status, body) = request(
        &router,
        "POST",
        "/api/v1/sales",
        Some(sale_body(&book_id, 3)),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["total_amount"], 3000);
    assert_eq!(body["student"]["name"], "Ama");
    assert_eq!(body["student"]["class_level"], "Basic 2");
    assert_eq!(body["items"][0]["quantity"], 3);
    assert_eq!(body["items"][0]["price_at_sale"], 1000);
    assert_eq!(body["items"][0]["book"]["stock"], 2);

    // Second sale of 3 must fail: only 2 left
    let (status, body) = request(
        &router,
        "POST",
        "/api/v1/sales",
        Some(sale_body(&book_id, 3)),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "INSUFFICIENT_STOCK");
    let message = body["error"]["message"].as_str().expect("message");
    assert!(message.contains("requested 3, available 2"), "{}", message);

    // Stock untouched by the failed sale, ledger has exactly one entry
    let (_, body) = request(&router, "GET", "/api/v1/books", None, Some(&token)).await;
    assert_eq!(body[0]["stock"], 2);

    let (_, body) = request(&router, "GET", "/api/v1/sales/report", None, Some(&token)).await;
    assert_eq!(body.as_array().expect("sales").len(), 1);

    // Draining the shelf exactly works; the next request sees zero
    let (status, _) = request(
        &router,
        "POST",
        "/api/v1/sales",
        Some(sale_body(&book_id, 2)),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = request(
        &router,
        "POST",
        "/api/v1/sales",
        Some(sale_body(&book_id, 1)),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(
        body["error"]["message"]
            .as_str()
            .expect("message")
            .contains("requested 1, available 0")
    );
}

#[tokio::test]
async fn test_sale_validation_failures() {
    let (router, _state) = setup().await;
    let token = signup(&router).await;
    let book_id = create_book(&router, &token, "Book A", 1000, 5).await;

    // Empty cart
    let (status, _) = request(
        &router,
        "POST",
        "/api/v1/sales",
        Some(json!({"student_name": "Ama", "student_class": "Basic 2", "items": []})),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Non-positive quantity
    let (status, _) = request(
        &router,
        "POST",
        "/api/v1/sales",
        Some(json!({
            "student_name": "Ama",
            "student_class": "Basic 2",
            "items": [{"book_id": book_id, "quantity": 0}]
        })),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // No student identity at all
    let (status, _) = request(
        &router,
        "POST",
        "/api/v1/sales",
        Some(json!({"items": [{"book_id": book_id, "quantity": 1}]})),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Nothing was written anywhere
    let (_, body) = request(&router, "GET", "/api/v1/books", None, Some(&token)).await;
    assert_eq!(body[0]["stock"], 5);
    let (_, body) = request(&router, "GET", "/api/v1/sales/report", None, Some(&token)).await;
    assert!(body.as_array().expect("sales").is_empty());
    let (_, body) = request(&router, "GET", "/api/v1/students", None, Some(&token)).await;
    assert!(body.as_array().expect("students").is_empty());
}

#[tokio::test]
async fn test_failed_sale_rolls_back_student_creation() {
    let (router, _state) = setup().await;
    let token = signup(&router).await;

    // Unknown book: fails after the student row would have been inserted
    let (status, _) = request(
        &router,
        "POST",
        "/api/v1/sales",
        Some(sale_body("no-such-book", 1)),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = request(&router, "GET", "/api/v1/students", None, Some(&token)).await;
    assert!(body.as_array().expect("students").is_empty());
}

#[tokio::test]
async fn test_sale_with_unknown_student_id() {
    let (router, _state) = setup().await;
    let token = signup(&router).await;
    let book_id = create_book(&router, &token, "Book A", 1000, 5).await;

    let (status, _) = request(
        &router,
        "POST",
        "/api/v1/sales",
        Some(json!({
            "student_id": "no-such-student",
            "items": [{"book_id": book_id, "quantity": 1}]
        })),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = request(&router, "GET", "/api/v1/books", None, Some(&token)).await;
    assert_eq!(body[0]["stock"], 5);
}

#[tokio::test]
async fn test_price_snapshot_survives_reprice() {
    let (router, _state) = setup().await;
    let token = signup(&router).await;
    let book_id = create_book(&router, &token, "Book A", 1000, 10).await;

    let (status, body) = request(
        &router,
        "POST",
        "/api/v1/sales",
        Some(sale_body(&book_id, 2)),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["total_amount"], 2000);

    let (status, _) = request(
        &router,
        "PATCH",
        &format!("/api/v1/books/{}/price", book_id),
        Some(json!({"price": 9999})),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Historical sale keeps the old price
    let (_, body) = request(&router, "GET", "/api/v1/sales/report", None, Some(&token)).await;
    assert_eq!(body[0]["items"][0]["price_at_sale"], 1000);
    assert_eq!(body[0]["total_amount"], 2000);

    // New sales pick up the new price
    let (_, body) = request(
        &router,
        "POST",
        "/api/v1/sales",
        Some(sale_body(&book_id, 1)),
        Some(&token),
    )
    .await;
    assert_eq!(body["items"][0]["price_at_sale"], 9999);
}

#[tokio::test]
async fn test_deleting_book_keeps_sale_history() {
    let (router, _state) = setup().await;
    let token = signup(&router).await;
    let book_id = create_book(&router, &token, "Book A", 1000, 5).await;

    let (status, _) = request(
        &router,
        "POST",
        "/api/v1/sales",
        Some(sale_body(&book_id, 2)),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = request(
        &router,
        "DELETE",
        &format!("/api/v1/books/{}", book_id),
        None,
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Report still returns the sale; book detail degrades to the snapshot
    let (status, body) = request(&router, "GET", "/api/v1/sales/report", None, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    let sales = body.as_array().expect("sales");
    assert_eq!(sales.len(), 1);
    assert_eq!(sales[0]["total_amount"], 2000);
    assert_eq!(sales[0]["items"][0]["book_title"], "Book A");
    assert_eq!(sales[0]["items"][0]["book_id"], book_id);
    assert!(sales[0]["items"][0]["book"].is_null());
}

#[tokio::test]
async fn test_report_date_boundaries() {
    let (router, state) = setup().await;
    let token = signup(&router).await;
    let book_id = create_book(&router, &token, "Book A", 1000, 50).await;

    for _ in 0..2 {
        let (status, _) = request(
            &router,
            "POST",
            "/api/v1/sales",
            Some(sale_body(&book_id, 1)),
            Some(&token),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let sales = sale::Entity::find().all(&state.db).await.expect("sales");
    assert_eq!(sales.len(), 2);

    // Pin one sale to the last second of March 15 and the other to the
    // first second of March 16
    let last_second = NaiveDate::from_ymd_opt(2024, 3, 15)
        .expect("date")
        .and_hms_opt(23, 59, 59)
        .expect("time");
    let next_midnight = NaiveDate::from_ymd_opt(2024, 3, 16)
        .expect("date")
        .and_hms_opt(0, 0, 0)
        .expect("time");

    sale::Entity::update_many()
        .col_expr(sale::Column::CreatedAt, Expr::value(last_second))
        .filter(sale::Column::Id.eq(&sales[0].id))
        .exec(&state.db)
        .await
        .expect("backdate");
    sale::Entity::update_many()
        .col_expr(sale::Column::CreatedAt, Expr::value(next_midnight))
        .filter(sale::Column::Id.eq(&sales[1].id))
        .exec(&state.db)
        .await
        .expect("backdate");

    let (status, body) = request(
        &router,
        "GET",
        "/api/v1/sales/report?start_date=2024-03-15&end_date=2024-03-15",
        None,
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let day_sales = body.as_array().expect("sales");
    assert_eq!(day_sales.len(), 1);
    assert_eq!(day_sales[0]["id"], sales[0].id.as_str());

    let (_, body) = request(
        &router,
        "GET",
        "/api/v1/sales/report?start_date=2024-03-16&end_date=2024-03-16",
        None,
        Some(&token),
    )
    .await;
    let day_sales = body.as_array().expect("sales");
    assert_eq!(day_sales.len(), 1);
    assert_eq!(day_sales[0]["id"], sales[1].id.as_str());

    // Open-ended range covers both, newest first
    let (_, body) = request(&router, "GET", "/api/v1/sales/report", None, Some(&token)).await;
    let all_sales = body.as_array().expect("sales");
    assert_eq!(all_sales.len(), 2);
    assert_eq!(all_sales[0]["id"], sales[1].id.as_str());

    let (status, _) = request(
        &router,
        "GET",
        "/api/v1/sales/report?start_date=garbage",
        None,
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_totals_split_today_from_all_time() {
    let (router, state) = setup().await;
    let token = signup(&router).await;
    let book_id = create_book(&router, &token, "Book A", 1000, 50).await;

    for _ in 0..2 {
        let (status, _) = request(
            &router,
            "POST",
            "/api/v1/sales",
            Some(sale_body(&book_id, 1)),
            Some(&token),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = request(&router, "GET", "/api/v1/sales/totals", None, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["today"], 2000);
    assert_eq!(body["all_time"], 2000);

    // Backdate one sale a week; it leaves today but stays in all-time
    let sales = sale::Entity::find().all(&state.db).await.expect("sales");
    let old = chrono::Utc::now().naive_utc() - chrono::Duration::days(7);
    sale::Entity::update_many()
        .col_expr(sale::Column::CreatedAt, Expr::value(old))
        .filter(sale::Column::Id.eq(&sales[0].id))
        .exec(&state.db)
        .await
        .expect("backdate");

    let (_, body) = request(&router, "GET", "/api/v1/sales/totals", None, Some(&token)).await;
    assert_eq!(body["today"], 1000);
    assert_eq!(body["all_time"], 2000);
}

#[tokio::test]
async fn test_recent_sales_limit_and_order() {
    let (router, _state) = setup().await;
    let token = signup(&router).await;
    let book_id = create_book(&router, &token, "Book A", 500, 50).await;

    let mut sale_ids = Vec::new();
    for quantity in 1..=3 {
        let (status, body) = request(
            &router,
            "POST",
            "/api/v1/sales",
            Some(sale_body(&book_id, quantity)),
            Some(&token),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        sale_ids.push(body["id"].as_str().expect("sale id").to_string());
    }

    let (status, body) = request(
        &router,
        "GET",
        "/api/v1/sales/recent?limit=2",
        None,
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let recent = body.as_array().expect("sales");
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0]["id"], sale_ids[2].as_str());
    assert_eq!(recent[1]["id"], sale_ids[1].as_str());
}

#[tokio::test]
async fn test_student_summaries_group_by_identity() {
    let (router, _state) = setup().await;
    let token = signup(&router).await;

    // 30.00 for 3 books, then 15.00 for 2 books, both "Ama"/"Basic 2"
    let book_a = create_book(&router, &token, "Book A", 1000, 10).await;
    let book_b = create_book(&router, &token, "Book B", 750, 10).await;

    let (status, _) = request(
        &router,
        "POST",
        "/api/v1/sales",
        Some(sale_body(&book_a, 3)),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = request(
        &router,
        "POST",
        "/api/v1/sales",
        Some(sale_body(&book_b, 2)),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // Each sale created its own student row (no dedup)...
    let (_, body) = request(&router, "GET", "/api/v1/students", None, Some(&token)).await;
    assert_eq!(body.as_array().expect("students").len(), 2);

    // ...but the summary collapses them into one line
    let (status, body) = request(
        &router,
        "GET",
        "/api/v1/students/summaries",
        None,
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let summaries = body.as_array().expect("summaries");
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0]["student_name"], "Ama");
    assert_eq!(summaries[0]["class_level"], "Basic 2");
    assert_eq!(summaries[0]["total_spent"], 4500);
    assert_eq!(summaries[0]["purchase_count"], 2);
    assert_eq!(summaries[0]["book_count"], 5);
}

#[tokio::test]
async fn test_low_stock_uses_settings_threshold() {
    let (router, _state) = setup().await;
    let token = signup(&router).await;

    create_book(&router, &token, "Nearly out", 1000, 3).await;
    create_book(&router, &token, "Well stocked", 1000, 50).await;

    // Defaults materialize on first read
    let (status, body) = request(&router, "GET", "/api/v1/settings", None, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["currency"], "GHS");
    assert_eq!(body["low_stock_threshold"], 10);

    let (status, body) = request(&router, "GET", "/api/v1/books/low-stock", None, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["threshold"], 10);
    let books = body["books"].as_array().expect("books");
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["title"], "Nearly out");

    // Raising the threshold pulls the second book in immediately
    let (status, _) = request(
        &router,
        "PUT",
        "/api/v1/settings",
        Some(json!({
            "store_name": "Test Bookshop",
            "currency": "USD",
            "low_stock_threshold": 60
        })),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = request(&router, "GET", "/api/v1/books/low-stock", None, Some(&token)).await;
    assert_eq!(body["threshold"], 60);
    assert_eq!(body["books"].as_array().expect("books").len(), 2);
}

#[tokio::test]
async fn test_supplier_payments_floor_debt_at_zero() {
    let (router, _state) = setup().await;
    let token = signup(&router).await;

    let (status, body) = request(
        &router,
        "POST",
        "/api/v1/suppliers",
        Some(json!({"name": "Acme Books", "total_debt": 5000})),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let supplier_id = body["id"].as_str().expect("supplier id").to_string();

    let (status, body) = request(
        &router,
        "POST",
        &format!("/api/v1/suppliers/{}/payments", supplier_id),
        Some(json!({"amount": 2000})),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_debt"], 3000);

    // Overpayment floors at zero
    let (status, body) = request(
        &router,
        "POST",
        &format!("/api/v1/suppliers/{}/payments", supplier_id),
        Some(json!({"amount": 4000})),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_debt"], 0);

    let (status, _) = request(
        &router,
        "POST",
        &format!("/api/v1/suppliers/{}/payments", supplier_id),
        Some(json!({"amount": -5})),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = request(
        &router,
        "POST",
        "/api/v1/suppliers/missing/payments",
        Some(json!({"amount": 100})),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Both payments embedded in the listing
    let (status, body) = request(&router, "GET", "/api/v1/suppliers", None, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    let suppliers = body.as_array().expect("suppliers");
    assert_eq!(suppliers.len(), 1);
    assert_eq!(suppliers[0]["payments"].as_array().expect("payments").len(), 2);
}

#[tokio::test]
async fn test_student_directory_crud() {
    let (router, _state) = setup().await;
    let token = signup(&router).await;

    let (status, body) = request(
        &router,
        "POST",
        "/api/v1/students",
        Some(json!({"name": "Kofi", "class_level": "Basic 3"})),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let student_id = body["id"].as_str().expect("student id").to_string();

    let (status, body) = request(
        &router,
        "PUT",
        &format!("/api/v1/students/{}", student_id),
        Some(json!({"name": "Kofi Mensah", "class_level": "Basic 4"})),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Kofi Mensah");
    assert_eq!(body["class_level"], "Basic 4");

    let (status, _) = request(
        &router,
        "PUT",
        "/api/v1/students/missing",
        Some(json!({"name": "X", "class_level": "Basic 1"})),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Existing students can be referenced by id in a sale
    let book_id = create_book(&router, &token, "Book A", 1000, 5).await;
    let (status, body) = request(
        &router,
        "POST",
        "/api/v1/sales",
        Some(json!({
            "student_id": student_id,
            "items": [{"book_id": book_id, "quantity": 1}]
        })),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["student"]["id"], student_id.as_str());
}

#[tokio::test]
async fn test_multi_item_sale_totals_and_decrements() {
    let (router, _state) = setup().await;
    let token = signup(&router).await;

    let book_a = create_book(&router, &token, "Book A", 1000, 5).await;
    let book_b = create_book(&router, &token, "Book B", 250, 8).await;

    let (status, body) = request(
        &router,
        "POST",
        "/api/v1/sales",
        Some(json!({
            "student_name": "Esi",
            "student_class": "Basic 5",
            "items": [
                {"book_id": book_a, "quantity": 2},
                {"book_id": book_b, "quantity": 4}
            ]
        })),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["total_amount"], 2 * 1000 + 4 * 250);
    assert_eq!(body["items"].as_array().expect("items").len(), 2);

    // One item short on stock aborts the whole cart, including already
    // decremented lines
    let (status, body) = request(
        &router,
        "POST",
        "/api/v1/sales",
        Some(json!({
            "student_name": "Esi",
            "student_class": "Basic 5",
            "items": [
                {"book_id": book_a, "quantity": 1},
                {"book_id": book_b, "quantity": 100}
            ]
        })),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "INSUFFICIENT_STOCK");

    let (_, body) = request(&router, "GET", "/api/v1/books", None, Some(&token)).await;
    let books = body.as_array().expect("books");
    let stock_of = |title: &str| {
        books
            .iter()
            .find(|b| b["title"] == title)
            .map(|b| b["stock"].as_i64().expect("stock"))
            .expect("book")
    };
    assert_eq!(stock_of("Book A"), 3);
    assert_eq!(stock_of("Book B"), 4);
}
