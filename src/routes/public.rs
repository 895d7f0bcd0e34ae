use crate::{guard::LOGIN_PATH, models::Route, models::View};

/// Public Routes
///
/// Entries reachable without a stored access token. The root path renders
/// nothing and forwards straight to the login page.
pub fn public_routes() -> Vec<Route> {
    vec![
        // / -> /login
        Route::redirect("/", "Home", LOGIN_PATH),
        // /login
        // Must stay open: it is where the guard sends everyone else.
        Route::view(LOGIN_PATH, "UserLogin", View::UserLogin),
    ]
}
