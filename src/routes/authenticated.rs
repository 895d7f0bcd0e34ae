use crate::models::{Route, View};

/// Authenticated Routes
///
/// Every entry here carries `requires_auth`. The global `before_each` guard
/// redirects to `/login` when the client holds no access token.
pub fn authenticated_routes() -> Vec<Route> {
    vec![
        // /dashboard
        Route::view("/dashboard", "UserDashboard", View::UserDashboard).requires_auth(),
        // /chatbot
        Route::view("/chatbot", "ChatBot", View::ChatBot).requires_auth(),
    ]
}
