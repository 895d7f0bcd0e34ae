//! Route Table Index
//!
//! The application's navigation table, split by access level the same way the
//! guard sees it. Declaration order is significant: public routes first, then
//! the protected ones, and the matcher takes the first hit.

use std::sync::Arc;

use crate::{models::Route, navigation::RouteTable};

/// Routes any visitor may enter.
pub mod public;

/// Routes flagged `requires_auth`; the global guard sends anonymous visitors to login.
pub mod authenticated;

/// app_routes
///
/// The full, ordered declaration list.
pub fn app_routes() -> Vec<Route> {
    let mut routes = public::public_routes();
    routes.extend(authenticated::authenticated_routes());
    routes
}

/// The shared, immutable table built from `app_routes`.
pub fn route_table() -> Arc<RouteTable> {
    Arc::new(RouteTable::new(app_routes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::View;

    #[test]
    fn table_matches_the_declared_layout() {
        let routes = app_routes();
        let rows: Vec<(&str, &str, Option<View>, bool, Option<&str>)> = routes
            .iter()
            .map(|r| {
                (
                    r.path.as_str(),
                    r.name.as_str(),
                    r.view,
                    r.meta.requires_auth,
                    r.redirect.as_deref(),
                )
            })
            .collect();

        assert_eq!(
            rows,
            vec![
                ("/", "Home", None, false, Some("/login")),
                ("/login", "UserLogin", Some(View::UserLogin), false, None),
                ("/dashboard", "UserDashboard", Some(View::UserDashboard), true, None),
                ("/chatbot", "ChatBot", Some(View::ChatBot), true, None),
            ]
        );
    }
}
