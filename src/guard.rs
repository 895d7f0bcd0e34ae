use crate::models::{GuardDecision, NavigationRequest, Route};

/// Where unauthenticated users are sent.
pub const LOGIN_PATH: &str = "/login";

/// AuthCheck
///
/// The capability a guard consults to learn whether the current client counts
/// as authenticated. Injected rather than read from a global so the guard can be
/// driven deterministically.
pub trait AuthCheck {
    fn is_authenticated(&self) -> bool;
}

impl<F> AuthCheck for F
where
    F: Fn() -> bool,
{
    fn is_authenticated(&self) -> bool {
        self()
    }
}

/// requires_auth
///
/// True when any record in the matched chain (parents included) is flagged.
/// Stops at the first flagged record.
pub fn requires_auth(matched: &[Route]) -> bool {
    matched.iter().any(|record| record.meta.requires_auth)
}

/// before_each
///
/// The global navigation guard. Protected targets redirect to the login page
/// when the client is not authenticated; every other transition proceeds
/// unmodified. The auth check is only consulted for protected targets.
pub fn before_each<A>(request: NavigationRequest<'_>, auth: &A) -> GuardDecision
where
    A: AuthCheck + ?Sized,
{
    if requires_auth(&request.to.matched) && !auth.is_authenticated() {
        GuardDecision::Redirect(LOGIN_PATH.to_string())
    } else {
        GuardDecision::Proceed
    }
}
