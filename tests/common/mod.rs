#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use jobify::router::init_router;
use jobify::state::AppState;
use jobify_config::{JwtConfig, RateLimitConfig};

pub const TEST_PASSWORD: &str = "secret123";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret".to_string(),
        expires_in: 3600,
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

pub fn setup_test_app() -> TestApp {
    setup_test_app_with_rate_limit(RateLimitConfig::default())
}

pub fn setup_test_app_with_rate_limit(rate_limit_config: RateLimitConfig) -> TestApp {
    let state = AppState::in_memory(&test_jwt_config(), rate_limit_config);
    TestApp {
        router: init_router(state.clone()),
        state,
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    /// `name=value` of the `Set-Cookie` header, without attributes.
    pub fn cookie_pair(&self) -> Option<String> {
        self.set_cookie()
            .and_then(|raw| raw.split(';').next())
            .map(|pair| pair.trim().to_string())
    }

    pub fn set_cookie(&self) -> Option<&str> {
        self.headers
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
    }
}

pub fn request(method: Method, uri: &str, body: Option<Value>, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn send(app: &TestApp, request: Request<Body>) -> TestResponse {
    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };

    TestResponse {
        status,
        headers,
        body,
    }
}

pub fn register_body(email: &str) -> Value {
    json!({
        "name": "Jane",
        "lastName": "Doe",
        "email": email,
        "location": "Lisbon",
        "password": TEST_PASSWORD,
    })
}

pub async fn register(app: &TestApp, email: &str) -> TestResponse {
    send(
        app,
        request(Method::POST, "/api/v1/auth/register", Some(register_body(email)), None),
    )
    .await
}

pub async fn login(app: &TestApp, email: &str, password: &str) -> TestResponse {
    send(
        app,
        request(
            Method::POST,
            "/api/v1/auth/login",
            Some(json!({ "email": email, "password": password })),
            None,
        ),
    )
    .await
}

/// Registers `email` and returns its session cookie pair.
pub async fn register_and_login(app: &TestApp, email: &str) -> String {
    let registered = register(app, email).await;
    assert_eq!(registered.status, StatusCode::CREATED, "{}", registered.body);

    let logged_in = login(app, email, TEST_PASSWORD).await;
    assert_eq!(logged_in.status, StatusCode::OK, "{}", logged_in.body);
    logged_in.cookie_pair().expect("login sets the session cookie")
}

pub fn job_body(company: &str) -> Value {
    json!({
        "company": company,
        "position": "Backend Engineer",
        "jobStatus": "pending",
        "jobType": "full-time",
        "jobLocation": "Remote",
    })
}

pub async fn create_job(app: &TestApp, cookie: &str, company: &str) -> Value {
    let response = send(
        app,
        request(Method::POST, "/api/v1/jobs", Some(job_body(company)), Some(cookie)),
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
    response.body["job"].clone()
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", uuid::Uuid::new_v4())
}
