mod common;

use std::net::SocketAddr;

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{Method, Request, StatusCode};
use serde_json::json;

use common::{request, send, setup_test_app, setup_test_app_with_rate_limit};
use jobify_config::RateLimitConfig;

fn from_peer(mut req: Request<Body>, peer: [u8; 4]) -> Request<Body> {
    req.extensions_mut()
        .insert(ConnectInfo(SocketAddr::from((peer, 51000))));
    req
}

fn login_from(peer: [u8; 4]) -> Request<Body> {
    from_peer(
        request(
            Method::POST,
            "/api/v1/auth/login",
            Some(json!({ "email": "nobody@example.com", "password": "whatever1" })),
            None,
        ),
        peer,
    )
}

fn with_forwarded_for(mut req: Request<Body>, ip: &str) -> Request<Body> {
    req.headers_mut()
        .insert("x-forwarded-for", ip.parse().unwrap());
    req
}

#[tokio::test]
async fn test_twenty_first_request_is_limited() {
    let app = setup_test_app();

    for _ in 0..20 {
        let response = send(&app, login_from([203, 0, 113, 10])).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    }

    let response = send(&app, login_from([203, 0, 113, 10])).await;
    assert_eq!(response.status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(
        response.body,
        json!({ "msg": "IP rate limit exceeded, retry in 15 minutes." })
    );

    // A different client still has its own budget.
    let response = send(&app, login_from([203, 0, 113, 11])).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_rotating_forwarded_for_does_not_reset_budget() {
    let app = setup_test_app();

    let mut limited = 0;
    for i in 0..30 {
        let req = with_forwarded_for(login_from([192, 0, 2, 50]), &format!("10.0.0.{}", i));
        if send(&app, req).await.status == StatusCode::TOO_MANY_REQUESTS {
            limited += 1;
        }
    }

    assert_eq!(limited, 10);
}

#[tokio::test]
async fn test_trusted_proxy_keys_on_forwarded_for() {
    let app = setup_test_app_with_rate_limit(RateLimitConfig {
        auth_max_requests: 1,
        trust_proxy: true,
        ..RateLimitConfig::default()
    });

    // Both requests arrive from the proxy's address.
    let first = with_forwarded_for(login_from([10, 1, 1, 1]), "198.51.100.20");
    let second = with_forwarded_for(login_from([10, 1, 1, 1]), "198.51.100.21");
    let repeat = with_forwarded_for(login_from([10, 1, 1, 1]), "198.51.100.20");

    assert_eq!(send(&app, first).await.status, StatusCode::UNAUTHORIZED);
    assert_eq!(send(&app, second).await.status, StatusCode::UNAUTHORIZED);
    assert_eq!(send(&app, repeat).await.status, StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_register_and_login_share_budget() {
    let app = setup_test_app_with_rate_limit(RateLimitConfig {
        auth_max_requests: 1,
        ..RateLimitConfig::default()
    });

    let response = send(&app, login_from([198, 51, 100, 5])).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let register = from_peer(
        request(Method::POST, "/api/v1/auth/register", Some(json!({})), None),
        [198, 51, 100, 5],
    );
    let response = send(&app, register).await;
    assert_eq!(response.status, StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_logout_is_not_limited() {
    let app = setup_test_app_with_rate_limit(RateLimitConfig {
        auth_max_requests: 1,
        ..RateLimitConfig::default()
    });

    for _ in 0..3 {
        let req = from_peer(
            request(Method::GET, "/api/v1/auth/logout", None, None),
            [198, 51, 100, 9],
        );
        assert_eq!(send(&app, req).await.status, StatusCode::OK);
    }
}
