//! Behaviour of the assembled server app: probes, session cookies, trace
//! identifiers, and the OpenAPI endpoint.

mod support;

use actix_web::cookie::time::Duration as CookieDuration;
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use craftycrib::domain::TRACE_ID_HEADER;
use rstest::rstest;
use serde_json::json;

use support::{Marketplace, PASSWORD, register, send, session_cookie};

#[actix_web::test]
async fn readiness_follows_the_health_state() {
    let market = Marketplace::new();
    let app = actix_test::init_service(market.app()).await;

    let (status, _) = send(&app, actix_test::TestRequest::get().uri("/health/ready")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    let (status, _) = send(&app, actix_test::TestRequest::get().uri("/health/live")).await;
    assert_eq!(status, StatusCode::OK);

    market.health.mark_ready();
    let (status, _) = send(&app, actix_test::TestRequest::get().uri("/health/ready")).await;
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn session_cookie_is_private_and_lasts_two_weeks() {
    let market = Marketplace::new();
    let app = actix_test::init_service(market.app()).await;
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/auth/register")
            .set_json(json!({
                "firstName": "Grace",
                "lastName": "Hopper",
                "email": "grace@example.com",
                "password": PASSWORD,
                "confirmPassword": PASSWORD,
            }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let cookie = session_cookie(&res).expect("session cookie");
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.path(), Some("/"));
    assert_eq!(cookie.max_age(), Some(CookieDuration::days(14)));
    assert!(
        !cookie.value().contains("user_id"),
        "cookie content should be encrypted"
    );
}

#[rstest]
#[case("/api/health")]
#[case("/pricing")]
#[case("/projects")]
#[case("/no-such-page")]
#[actix_web::test]
async fn every_response_carries_a_trace_id(#[case] uri: &str) {
    let market = Marketplace::new();
    let app = actix_test::init_service(market.app()).await;
    let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request()).await;
    assert!(res.headers().contains_key(TRACE_ID_HEADER), "{uri}");
}

#[actix_web::test]
async fn sessions_end_at_logout() {
    let market = Marketplace::new();
    let app = actix_test::init_service(market.app()).await;
    let cookie = register(&app, "grace@example.com", "client").await;

    let (status, me) = send(
        &app,
        actix_test::TestRequest::get().uri("/auth/me").cookie(cookie.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["email"], "grace@example.com");

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/auth/logout")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let cleared = session_cookie(&res).expect("removal cookie");
    assert_eq!(cleared.value(), "");
}

#[cfg(debug_assertions)]
#[actix_web::test]
async fn openapi_document_is_served_in_debug_builds() {
    let market = Marketplace::new();
    let app = actix_test::init_service(market.app()).await;
    let (status, doc) = send(
        &app,
        actix_test::TestRequest::get().uri("/api-docs/openapi.json"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(doc["info"]["title"], "CraftyCrib API");
    assert!(doc["paths"]["/projects/{id}/publish"].is_object());
}
