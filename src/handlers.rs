use crate::{
    AppState,
    auth::AuthFlag,
    error::NavigationError,
    models::{ErrorBody, NavigationOutcome, RouteSummary, View},
    navigation::{BasePath, Navigator, Settled},
};
use axum::{
    Json,
    extract::{Query, State},
    http::{Method, StatusCode, Uri},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

// --- Query Structs ---

/// NavigateQuery
///
/// Query parameters for `GET /api/navigate`.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct NavigateQuery {
    /// Application path to navigate to, e.g. `/chatbot`. Query and fragment allowed.
    pub to: String,
}

// --- API Handlers ---

/// list_routes
///
/// [Public Route] The declared navigation table, in declaration order.
#[utoipa::path(
    get,
    path = "/api/routes",
    responses((status = 200, description = "Declared routes", body = [RouteSummary]))
)]
pub async fn list_routes(State(state): State<AppState>) -> Json<Vec<RouteSummary>> {
    let routes = state.routes.routes().iter().map(RouteSummary::from).collect();
    Json(routes)
}

/// navigate
///
/// [Public Route] Runs a navigation for the calling client without recording it
/// and reports where it settles. The AuthFlag comes from the `access_token`
/// cookie, so the same request answers differently before and after login.
#[utoipa::path(
    get,
    path = "/api/navigate",
    params(NavigateQuery),
    responses(
        (status = 200, description = "Settled navigation", body = NavigationOutcome),
        (status = 404, description = "No matching route", body = ErrorBody)
    )
)]
pub async fn navigate(
    State(state): State<AppState>,
    auth: AuthFlag,
    Query(query): Query<NavigateQuery>,
) -> Result<Json<NavigationOutcome>, NavigationError> {
    let navigator = Navigator::new(state.routes.clone(), auth);
    let settled = navigator.resolve(&query.to)?;

    Ok(Json(NavigationOutcome {
        requested: query.to,
        location: settled.location(),
        view: settled.view(),
        redirected: settled.redirected,
    }))
}

// --- Page Navigation ---

/// serve_page
///
/// Fallback for every path the API does not own. A browser request for an
/// application path is settled through the table and guard: a redirected
/// navigation answers `303 See Other` to the settled location, anything else
/// gets the application shell tagged with the view to mount.
pub async fn serve_page(
    State(state): State<AppState>,
    auth: AuthFlag,
    method: Method,
    uri: Uri,
) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    let base = BasePath::new(&state.config.base_url);
    let requested = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());

    let Some(path) = base.strip(requested) else {
        return not_found_page(requested);
    };

    let navigator = Navigator::new(state.routes.clone(), auth);
    match navigator.resolve(&path) {
        Ok(settled) if settled.redirected => {
            let location = base.href(&settled.location().full_path);
            tracing::info!(requested = %path, settled = %location, "page navigation redirected");
            Redirect::to(&location).into_response()
        }
        Ok(settled) => app_shell(&settled),
        Err(NavigationError::NotFound(_)) => not_found_page(requested),
        Err(err) => err.into_response(),
    }
}

fn app_shell(settled: &Settled) -> Response {
    let location = settled.location();
    let view = settled.view().map(View::component_name).unwrap_or_default();

    Html(format!(
        "<!doctype html>\n<html>\n<head><meta charset=\"utf-8\"><title>{name}</title></head>\n\
         <body><main id=\"app\" data-route=\"{name}\" data-view=\"{view}\"></main></body>\n</html>\n",
        name = location.name,
    ))
    .into_response()
}

fn not_found_page(requested: &str) -> Response {
    tracing::debug!(%requested, "no route matched");
    (
        StatusCode::NOT_FOUND,
        Html("<!doctype html>\n<html>\n<body><main id=\"app\" data-view=\"\">Not Found</main></body>\n</html>\n"),
    )
        .into_response()
}
