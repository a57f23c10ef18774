//! End-to-end checks through the router: session enforcement, the
//! login flow, form validation and CSV downloads.

mod common;

use axum::http::{header, Method, StatusCode};
use common::{body_bytes, body_json, TestApp, TEST_PASSWORD, TEST_USERNAME};
use farmledger_api::auth::SESSION_COOKIE;
use serde_json::json;

#[tokio::test]
async fn anonymous_requests_are_sent_to_login() {
    let app = TestApp::new().await;

    let response = app.request(Method::GET, "/sales", None, None).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert_eq!(location, "/login?next=/sales");
}

#[tokio::test]
async fn login_redirect_keeps_the_query_string() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::GET,
            "/profit_loss?start_date=2026-01-01&end_date=2026-02-01",
            None,
            None,
        )
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert_eq!(
        location,
        "/login?next=/profit_loss?start_date=2026-01-01%26end_date=2026-02-01"
    );
}

#[tokio::test]
async fn login_sets_a_session_cookie_and_redirects_back() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/login",
            Some(&[
                ("username", TEST_USERNAME),
                ("password", TEST_PASSWORD),
                ("next", "/customers"),
            ]),
            None,
        )
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(set_cookie.starts_with(SESSION_COOKIE));
    assert!(set_cookie.contains("HttpOnly"));
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert_eq!(location, "/customers");
}

#[tokio::test]
async fn wrong_password_is_rejected_without_detail() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/login",
            Some(&[("username", TEST_USERNAME), ("password", "wrong")]),
            None,
        )
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(
        body["message"],
        json!("Authentication error: Invalid username or password")
    );
}

#[tokio::test]
async fn logout_clears_the_session() {
    let app = TestApp::new().await;
    let cookie = app.session_cookie().to_string();

    let response = app
        .request(Method::POST, "/logout", None, Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    // The old cookie no longer grants access.
    let followup = app.request(Method::GET, "/sales", None, Some(&cookie)).await;
    assert_eq!(followup.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn customer_crud_through_forms() {
    let app = TestApp::new().await;

    let created = app
        .request_authenticated(
            Method::POST,
            "/customers/add",
            Some(&[("name", "Hill Dairy"), ("contact_info", "0712 000 111")]),
        )
        .await;
    assert_eq!(created.status(), StatusCode::SEE_OTHER);

    let listing = app
        .request_authenticated(Method::GET, "/customers", None)
        .await;
    assert_eq!(listing.status(), StatusCode::OK);
    let body = body_json(listing).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"][0]["name"], json!("Hill Dairy"));
    assert_eq!(body["data"][0]["balance"], json!("0"));
}

#[tokio::test]
async fn invalid_sale_form_persists_nothing() {
    let app = TestApp::new().await;
    app.request_authenticated(
        Method::POST,
        "/customers/add",
        Some(&[("name", "Only Customer")]),
    )
    .await;

    let response = app
        .request_authenticated(
            Method::POST,
            "/sales/add",
            Some(&[
                ("customer_id", "1"),
                ("date", "not-a-date"),
                ("quantity_liters", "10"),
                ("unit_price", "50"),
            ]),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let sales = app.request_authenticated(Method::GET, "/sales", None).await;
    let body = body_json(sales).await;
    assert_eq!(body["data"], json!([]));

    // The customer's balance is untouched.
    let customers = app
        .request_authenticated(Method::GET, "/customers", None)
        .await;
    let body = body_json(customers).await;
    assert_eq!(body["data"][0]["balance"], json!("0"));
}

#[tokio::test]
async fn sales_export_is_a_csv_attachment() {
    let app = TestApp::new().await;
    app.request_authenticated(
        Method::POST,
        "/customers/add",
        Some(&[("name", "CSV Customer")]),
    )
    .await;
    app.request_authenticated(
        Method::POST,
        "/sales/add",
        Some(&[
            ("customer_id", "1"),
            ("date", "2026-04-01"),
            ("quantity_liters", "12"),
            ("unit_price", "55"),
            ("is_paid", "on"),
        ]),
    )
    .await;

    let response = app
        .request_authenticated(Method::GET, "/export/sales", None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/csv"));
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(disposition.contains("attachment"));
    assert!(disposition.contains("sales_history_"));

    let bytes = body_bytes(response).await;
    let text = String::from_utf8(bytes).expect("csv is utf-8");
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("Date,Customer Name,Milk Qty (L),Price/L,Total Amount,Is Paid,Logged At")
    );
    let row = lines.next().expect("one data row");
    assert!(row.starts_with("2026-04-01,CSV Customer,12,55,660,Yes"));
}

#[tokio::test]
async fn health_probe_is_public() {
    let app = TestApp::new().await;
    let response = app.request(Method::GET, "/health", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], json!("ok"));
}
