//! 게이트웨이 라우팅, 프록시, CORS 테스트
//!
//! 업스트림 인증 서비스는 httpmock 서버로 대체합니다.

use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App};
use httpmock::prelude::*;
use serde_json::{json, Value};

use labzang_auth::config::{ConfigSource, GatewayConfig};
use labzang_auth::gateway::{build_cors, configure_gateway_routes, GatewayState};

fn gateway_config(upstream: &str) -> GatewayConfig {
    GatewayConfig::from_source(&ConfigSource::from_pairs([
        ("AUTH_SERVICE_URI", upstream),
        ("CORS_ALLOWED_ORIGINS", "http://localhost:3000"),
        ("GATEWAY_UPSTREAM_TIMEOUT_SECS", "5"),
    ]))
}

#[actix_web::test]
async fn test_auth_prefix_is_stripped_before_forwarding() {
    let server = MockServer::start_async().await;
    let upstream = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/kakao/token")
                .header("content-type", "application/json")
                .json_body(json!({ "code": "abc" }));
            then.status(200)
                .header("content-type", "application/json")
                .header("set-cookie", "refresh_token=r.s.t; HttpOnly; Path=/")
                .json_body(json!({ "success": true, "access_token": "a.b.c" }));
        })
        .await;

    let state = GatewayState::from_config(&gateway_config(&server.base_url())).unwrap();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(configure_gateway_routes),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/auth/kakao/token")
            .set_json(json!({ "code": "abc" }))
            .to_request(),
    )
    .await;

    upstream.assert_async().await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().get(header::SET_COOKIE).is_some());
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["access_token"], "a.b.c");
}

#[actix_web::test]
async fn test_query_string_and_redirect_pass_through() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/kakao/callback")
                .query_param("code", "xyz");
            then.status(302)
                .header("location", "http://localhost:3000/login/callback#access_token=a.b.c");
        })
        .await;

    let state = GatewayState::from_config(&gateway_config(&server.base_url())).unwrap();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(configure_gateway_routes),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/auth/kakao/callback?code=xyz")
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        "http://localhost:3000/login/callback#access_token=a.b.c"
    );
}

#[actix_web::test]
async fn test_unmapped_path_is_not_found() {
    let state = GatewayState::from_config(&gateway_config("http://127.0.0.1:9")).unwrap();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(configure_gateway_routes),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/unmapped/path").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "no_route");
}

#[actix_web::test]
async fn test_unreachable_upstream_is_network_error() {
    // 포트 9(discard)는 열려 있지 않습니다
    let state = GatewayState::from_config(&gateway_config("http://127.0.0.1:9")).unwrap();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(configure_gateway_routes),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/auth/kakao/auth-url").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "network_error");
}

#[actix_web::test]
async fn test_cors_allows_configured_origin_with_credentials() {
    let config = gateway_config("http://127.0.0.1:9");
    let state = GatewayState::from_config(&config).unwrap();
    let app = test::init_service(
        App::new()
            .wrap(build_cors(&config.cors))
            .app_data(web::Data::new(state))
            .configure(configure_gateway_routes),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/health")
            .insert_header((header::ORIGIN, "http://localhost:3000"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://localhost:3000"
    );
    assert_eq!(
        resp.headers().get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
        "true"
    );

    // Preflight
    let resp = test::call_service(
        &app,
        test::TestRequest::default()
            .method(actix_web::http::Method::OPTIONS)
            .uri("/api/auth/kakao/token")
            .insert_header((header::ORIGIN, "http://localhost:3000"))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "POST"))
            .to_request(),
    )
    .await;
    assert!(resp.status().is_success());
    assert_eq!(
        resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://localhost:3000"
    );
}

#[actix_web::test]
async fn test_cors_rejects_unknown_origin() {
    let config = gateway_config("http://127.0.0.1:9");
    let state = GatewayState::from_config(&config).unwrap();
    let app = test::init_service(
        App::new()
            .wrap(build_cors(&config.cors))
            .app_data(web::Data::new(state))
            .configure(configure_gateway_routes),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/health")
        .insert_header((header::ORIGIN, "http://evil.example"))
        .to_request();

    match test::try_call_service(&app, req).await {
        Ok(resp) => {
            assert!(!resp.status().is_success());
            assert!(resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
        }
        Err(err) => {
            assert!(err.as_response_error().status_code().is_client_error());
        }
    }
}
