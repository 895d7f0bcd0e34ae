use axum::{
    body::{Body, to_bytes},
    extract::{Query, State},
    http::{Request, StatusCode, header},
    response::Response,
};
use chat_portal::{
    AppConfig, AppState,
    auth::AuthFlag,
    create_router,
    error::NavigationError,
    handlers::{self, NavigateQuery},
    models::{NavigationOutcome, RouteSummary, View},
};
use tower::util::ServiceExt;

// --- TEST UTILITIES ---

fn test_state() -> AppState {
    AppState::new(AppConfig::default())
}

fn mounted_state(base_url: &str) -> AppState {
    AppState::new(AppConfig {
        base_url: base_url.to_string(),
        ..AppConfig::default()
    })
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::COOKIE, format!("access_token={token}"));
    }
    builder.body(Body::empty()).unwrap()
}

async fn body_string(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn location_header(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

// --- DIRECT HANDLER TESTS ---

#[tokio::test]
async fn test_list_routes_returns_declared_table() {
    let routes = handlers::list_routes(State(test_state())).await.0;

    let names: Vec<_> = routes.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["Home", "UserLogin", "UserDashboard", "ChatBot"]);
    assert_eq!(
        routes[0],
        RouteSummary {
            path: "/".to_string(),
            name: "Home".to_string(),
            view: None,
            requires_auth: false,
            redirect: Some("/login".to_string()),
        }
    );
    assert!(routes[2].requires_auth && routes[3].requires_auth);
}

#[tokio::test]
async fn test_navigate_handler_anonymous_is_redirected() {
    let result = handlers::navigate(
        State(test_state()),
        AuthFlag(false),
        Query(NavigateQuery {
            to: "/dashboard".to_string(),
        }),
    )
    .await;

    let outcome = result.unwrap().0;
    assert_eq!(outcome.requested, "/dashboard");
    assert_eq!(outcome.location.path, "/login");
    assert_eq!(outcome.view, Some(View::UserLogin));
    assert!(outcome.redirected);
}

#[tokio::test]
async fn test_navigate_handler_unknown_path() {
    let result = handlers::navigate(
        State(test_state()),
        AuthFlag(true),
        Query(NavigateQuery {
            to: "/settings".to_string(),
        }),
    )
    .await;

    assert_eq!(
        result.err(),
        Some(NavigationError::NotFound("/settings".to_string()))
    );
}

// --- ROUTER TESTS ---

#[tokio::test]
async fn test_health_check() {
    let response = create_router(test_state())
        .oneshot(get("/health", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ok");
}

#[tokio::test]
async fn test_api_navigate_uses_cookie_flag() {
    let app = create_router(test_state());

    let response = app
        .clone()
        .oneshot(get("/api/navigate?to=/chatbot", Some("abc123")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let outcome: NavigationOutcome = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(outcome.location.path, "/chatbot");
    assert_eq!(outcome.view, Some(View::ChatBot));
    assert!(!outcome.redirected);

    let response = app
        .oneshot(get("/api/navigate?to=/chatbot", None))
        .await
        .unwrap();
    let outcome: NavigationOutcome = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(outcome.location.path, "/login");
    assert!(outcome.redirected);
}

#[tokio::test]
async fn test_api_navigate_unknown_path_is_404_json() {
    let response = create_router(test_state())
        .oneshot(get("/api/navigate?to=/nowhere", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["error"], "no route matches /nowhere");
}

#[tokio::test]
async fn test_page_dashboard_without_token_redirects_to_login() {
    let response = create_router(test_state())
        .oneshot(get("/dashboard", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location_header(&response), "/login");
}

#[tokio::test]
async fn test_page_chatbot_with_token_renders_view() {
    let response = create_router(test_state())
        .oneshot(get("/chatbot", Some("abc123")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("data-view=\"ChatBot\""));
    assert!(body.contains("data-route=\"ChatBot\""));
}

#[tokio::test]
async fn test_page_root_redirects_even_when_signed_in() {
    let response = create_router(test_state())
        .oneshot(get("/", Some("abc123")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location_header(&response), "/login");
}

#[tokio::test]
async fn test_page_login_renders_without_token() {
    let response = create_router(test_state())
        .oneshot(get("/login", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("data-view=\"UserLogin\""));
}

#[tokio::test]
async fn test_page_empty_cookie_is_anonymous() {
    let response = create_router(test_state())
        .oneshot(get("/chatbot", Some("")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location_header(&response), "/login");
}

#[tokio::test]
async fn test_page_quoted_empty_cookie_is_anonymous() {
    let app = create_router(test_state());

    for path in ["/chatbot", "/dashboard"] {
        let response = app
            .clone()
            .oneshot(get(path, Some("\"\"")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER, "visiting {path}");
        assert_eq!(location_header(&response), "/login");
    }
}

#[tokio::test]
async fn test_page_root_redirect_keeps_query() {
    let response = create_router(test_state())
        .oneshot(get("/?next=/chatbot", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location_header(&response), "/login?next=/chatbot");
}

#[tokio::test]
async fn test_page_unknown_path_is_404() {
    let response = create_router(test_state())
        .oneshot(get("/missing", Some("abc123")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_page_post_is_rejected() {
    let request = Request::builder()
        .method("POST")
        .uri("/login")
        .body(Body::empty())
        .unwrap();
    let response = create_router(test_state()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_page_under_base_url() {
    let app = create_router(mounted_state("/portal"));

    let response = app
        .clone()
        .oneshot(get("/portal/dashboard", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location_header(&response), "/portal/login");

    let response = app
        .clone()
        .oneshot(get("/portal/chatbot", Some("abc123")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Outside the base nothing matches.
    let response = app.oneshot(get("/chatbot", Some("abc123"))).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let response = create_router(test_state())
        .oneshot(get("/health", None))
        .await
        .unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}
