mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{
    create_job, generate_unique_email, login, register_and_login, request, send, setup_test_app,
    TEST_PASSWORD,
};

#[tokio::test]
async fn test_current_user() {
    let app = setup_test_app();
    let email = generate_unique_email();
    let cookie = register_and_login(&app, &email).await;

    let response = send(
        &app,
        request(Method::GET, "/api/v1/users/current-user", None, Some(&cookie)),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["user"]["email"], email);
    assert_eq!(response.body["user"]["role"], "admin");
    assert!(response.body["user"].get("password").is_none());
}

#[tokio::test]
async fn test_update_user() {
    let app = setup_test_app();
    let cookie = register_and_login(&app, &generate_unique_email()).await;
    let new_email = generate_unique_email();

    let response = send(
        &app,
        request(
            Method::PATCH,
            "/api/v1/users/update-user",
            Some(json!({
                "name": "Janet",
                "lastName": "Doe",
                "email": new_email,
                "location": "Porto",
                "role": "admin",
                "password": "ignored-entirely",
            })),
            Some(&cookie),
        ),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "msg": "update user" }));

    let response = send(
        &app,
        request(Method::GET, "/api/v1/users/current-user", None, Some(&cookie)),
    )
    .await;
    assert_eq!(response.body["user"]["name"], "Janet");
    assert_eq!(response.body["user"]["location"], "Porto");
    assert_eq!(response.body["user"]["email"], new_email);

    // The password did not change.
    assert_eq!(login(&app, &new_email, TEST_PASSWORD).await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_update_user_email_taken() {
    let app = setup_test_app();
    let taken = generate_unique_email();
    register_and_login(&app, &taken).await;
    let cookie = register_and_login(&app, &generate_unique_email()).await;

    let response = send(
        &app,
        request(
            Method::PATCH,
            "/api/v1/users/update-user",
            Some(json!({
                "name": "Janet",
                "lastName": "Doe",
                "email": taken,
                "location": "Porto",
            })),
            Some(&cookie),
        ),
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["msg"], "email already exists");
}

#[tokio::test]
async fn test_app_stats_admin_only() {
    let app = setup_test_app();
    let admin = register_and_login(&app, &generate_unique_email()).await;
    let user = register_and_login(&app, &generate_unique_email()).await;
    create_job(&app, &user, "Acme").await;
    create_job(&app, &admin, "Globex").await;

    let response = send(
        &app,
        request(Method::GET, "/api/v1/users/admin/app-stats", None, Some(&admin)),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "users": 2, "jobs": 2 }));

    let response = send(
        &app,
        request(Method::GET, "/api/v1/users/admin/app-stats", None, Some(&user)),
    )
    .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["msg"], "not authorized to access this route");

    let response = send(
        &app,
        request(Method::GET, "/api/v1/users/admin/app-stats", None, None),
    )
    .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
