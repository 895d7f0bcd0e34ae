use axum::{
    Router,
    http::{HeaderName, HeaderValue},
    routing::get,
};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Navigation core: declarations, matching, the guard, and its auth capability.
pub mod auth;
pub mod error;
pub mod guard;
pub mod models;
pub mod navigation;
pub mod routes;
pub mod storage;

// HTTP front door.
pub mod config;
pub mod handlers;

// --- Public Re-exports ---

pub use config::AppConfig;
pub use guard::{AuthCheck, before_each};
pub use navigation::{Navigator, RouteTable};

/// ApiDoc
///
/// OpenAPI document for the JSON endpoints, served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(handlers::list_routes, handlers::navigate),
    components(
        schemas(
            models::RouteSummary, models::NavigationOutcome, models::Location,
            models::View, models::ErrorBody,
        )
    ),
    tags(
        (name = "chat-portal", description = "Chat portal navigation API")
    )
)]
struct ApiDoc;

/// AppState
///
/// Shared by every request: the immutable route table and the loaded
/// configuration. Navigators are built per request on top of it.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable>,
    pub config: AppConfig,
}

impl AppState {
    /// State over the application's own route table.
    pub fn new(config: AppConfig) -> Self {
        Self {
            routes: routes::route_table(),
            config,
        }
    }
}

/// create_router
///
/// Assembles the API routes, the page-navigation fallback, and the
/// observability layers.
pub fn create_router(state: AppState) -> Router {
    // 1. CORS Configuration
    // Only the configured frontend origins may call the JSON API from a browser.
    let cors = cors_layer(&state.config);

    // Header name constant for Request Correlation.
    let x_request_id = HeaderName::from_static("x-request-id");

    // 2. Base Router Assembly
    let base_router = Router::new()
        // Documentation: Swagger UI over the generated OpenAPI document.
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Liveness check for load balancers.
        .route("/health", get(|| async { "ok" }))
        // Navigation API: the declared table, and where a navigation would settle.
        .route("/api/routes", get(handlers::list_routes))
        .route("/api/navigate", get(handlers::navigate))
        // Page Navigations: every other path goes through the table and the guard.
        // No auth layer here; the guard itself decides between render and redirect.
        .fallback(handlers::serve_page)
        .with_state(state);

    // 3. Observability and Correlation Layers (Applied outermost/first)
    base_router
        .layer(
            ServiceBuilder::new()
                // 3a. Request ID Generation: a UUID for every incoming request.
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                // 3b. Request Tracing: one span per request, tagged with the request ID.
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                // 3c. Request ID Propagation: echoes x-request-id back to the client.
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        // 4. CORS Layer (Applied last)
        .layer(cors)
}

/// CORS for the configured frontend origins.
fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .allow_origin(AllowOrigin::list(origins))
}

/// trace_span_logger
///
/// Span for `TraceLayer`, correlated by the `x-request-id` header.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
