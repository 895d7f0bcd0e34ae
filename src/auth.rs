use axum::{extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;

use crate::{
    guard::AuthCheck,
    storage::{CookieStorage, KeyValueStore},
};

/// The storage key whose presence marks a client as signed in.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// has_access_token
///
/// Derives the AuthFlag: true when the store holds a non-empty value under
/// `access_token`. The value is never decoded, validated, or checked for expiry.
pub fn has_access_token<S>(store: &S) -> bool
where
    S: KeyValueStore + ?Sized,
{
    store
        .get_item(ACCESS_TOKEN_KEY)
        .is_some_and(|token| !token.is_empty())
}

/// TokenPresence
///
/// Adapts any `KeyValueStore` into the guard's `AuthCheck` capability.
/// The store is read on every check, so a login or logout between two
/// navigations is picked up by the next one.
#[derive(Debug, Clone)]
pub struct TokenPresence<S>(pub S);

impl<S> AuthCheck for TokenPresence<S>
where
    S: std::ops::Deref,
    S::Target: KeyValueStore,
{
    fn is_authenticated(&self) -> bool {
        has_access_token(&*self.0)
    }
}

/// AuthFlag Extractor
///
/// The AuthFlag of an HTTP request, read from the `access_token` cookie.
/// Never rejects: an anonymous request simply yields `AuthFlag(false)` and the
/// guard decides what that means for the requested route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthFlag(pub bool);

impl<S> FromRequestParts<S> for AuthFlag
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let cookies = CookieStorage::from_headers(&parts.headers);
        Ok(AuthFlag(has_access_token(&cookies)))
    }
}

impl AuthCheck for AuthFlag {
    fn is_authenticated(&self) -> bool {
        self.0
    }
}
