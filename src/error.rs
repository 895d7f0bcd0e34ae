use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::models::ErrorBody;

/// NavigationError
///
/// Failures of the navigation engine itself. An unauthenticated visit to a
/// protected route is not one of them: that is a redirect.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    #[error("no route matches {0}")]
    NotFound(String),
    #[error("no route named {0}")]
    UnknownName(String),
    #[error("redirect limit exceeded while navigating to {0}")]
    RedirectLoop(String),
}

impl NavigationError {
    pub fn status(&self) -> StatusCode {
        match self {
            NavigationError::NotFound(_) | NavigationError::UnknownName(_) => StatusCode::NOT_FOUND,
            NavigationError::RedirectLoop(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for NavigationError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "navigation failed");
        }
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
