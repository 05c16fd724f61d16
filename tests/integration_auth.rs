mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{
    TEST_PASSWORD, generate_unique_email, login, register, register_and_login, request, send,
    setup_test_app,
};

#[tokio::test]
async fn test_first_registration_is_admin() {
    let app = setup_test_app();

    let response = send(
        &app,
        request(
            Method::POST,
            "/api/v1/auth/register",
            Some(json!({
                "name": "Ana",
                "lastName": "Silva",
                "email": "ana@example.com",
                "location": "Lisbon",
                "password": "secret123",
            })),
            None,
        ),
    )
    .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["msg"], "user created");
    assert_eq!(response.body["user"]["role"], "admin");
    assert_eq!(response.body["user"]["email"], "ana@example.com");
    assert_eq!(response.body["user"]["lastName"], "Silva");
    assert!(response.body["user"].get("password").is_none());

    let second = register(&app, &generate_unique_email()).await;
    assert_eq!(second.status, StatusCode::CREATED);
    assert_eq!(second.body["user"]["role"], "user");
}

#[tokio::test]
async fn test_register_missing_password() {
    let app = setup_test_app();

    let response = send(
        &app,
        request(
            Method::POST,
            "/api/v1/auth/register",
            Some(json!({
                "name": "Ana",
                "lastName": "Silva",
                "email": "ana@example.com",
                "location": "Lisbon",
            })),
            None,
        ),
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["errors"], json!(["password is required"]));
    assert_eq!(response.body["msg"], "password is required");
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = setup_test_app();
    let email = generate_unique_email();
    assert_eq!(register(&app, &email).await.status, StatusCode::CREATED);

    let response = register(&app, &email.to_uppercase()).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["msg"], "email already exists");
}

#[tokio::test]
async fn test_register_malformed_json() {
    let app = setup_test_app();
    let mut req = request(Method::POST, "/api/v1/auth/register", None, None);
    *req.body_mut() = axum::body::Body::from("{not json");
    req.headers_mut()
        .insert("content-type", "application/json".parse().unwrap());

    let response = send(&app, req).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["msg"].is_string());
}

#[tokio::test]
async fn test_login_sets_session_cookie() {
    let app = setup_test_app();
    let email = generate_unique_email();
    register(&app, &email).await;

    let response = login(&app, &email, TEST_PASSWORD).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["msg"], "user logged in");
    assert_eq!(response.body["user"]["email"], email);
    assert!(response.body["user"].get("password").is_none());

    let set_cookie = response.set_cookie().unwrap();
    assert!(set_cookie.starts_with("token="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Strict"));
    assert!(set_cookie.contains("Path=/"));
    assert!(set_cookie.contains("Expires="));
    assert!(!set_cookie.contains("Secure"));
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = setup_test_app();
    let email = generate_unique_email();
    register(&app, &email).await;

    let wrong_password = login(&app, &email, "not-the-password").await;
    let unknown_email = login(&app, "nobody@example.com", TEST_PASSWORD).await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body, json!({ "msg": "invalid credentials" }));
    assert_eq!(wrong_password.body, unknown_email.body);
    assert!(wrong_password.set_cookie().is_none());
}

#[tokio::test]
async fn test_login_validation() {
    let app = setup_test_app();

    let response = login(&app, "", "").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body["errors"],
        json!(["email is required", "password is required"])
    );
}

#[tokio::test]
async fn test_logout_twice() {
    let app = setup_test_app();
    let cookie = register_and_login(&app, &generate_unique_email()).await;

    for cookie in [Some(cookie.as_str()), None] {
        let response = send(&app, request(Method::GET, "/api/v1/auth/logout", None, cookie)).await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, json!({ "msg": "user logged out!" }));
        assert_eq!(response.cookie_pair().as_deref(), Some("token=logout"));
        let set_cookie = response.set_cookie().unwrap();
        assert!(set_cookie.contains("HttpOnly"));
        assert!(set_cookie.contains("Expires="));
    }
}

#[tokio::test]
async fn test_logged_out_cookie_is_rejected() {
    let app = setup_test_app();

    let response = send(
        &app,
        request(Method::GET, "/api/v1/users/current-user", None, Some("token=logout")),
    )
    .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["msg"], "authentication invalid");
}

#[tokio::test]
async fn test_health() {
    let app = setup_test_app();
    let response = send(&app, request(Method::GET, "/health", None, None)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!("ok"));
}
