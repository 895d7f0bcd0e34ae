use std::sync::Arc;

use crate::{
    error::NavigationError,
    guard::{AuthCheck, before_each},
    models::{GuardDecision, Location, NavigationRequest, Route, RouteMatch, View},
};

/// Upper bound on redirects followed by a single navigation.
pub const MAX_REDIRECTS: usize = 10;

// --- Route Table ---

/// A flattened, matchable route record.
#[derive(Debug, Clone)]
struct MatchRecord {
    // Declared absolute path, as written (parent segments joined).
    path: String,
    // Lowercased path used for comparison.
    key: String,
    // Ancestors first, leaf last. Children are stripped from every entry.
    chain: Vec<Route>,
}

/// RouteTable
///
/// The immutable navigation table. Nested declarations are flattened once at
/// construction, parents ahead of their children, and lookups take the first
/// record in declaration order.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
    records: Vec<MatchRecord>,
}

impl RouteTable {
    pub fn new(routes: Vec<Route>) -> Self {
        let mut records = Vec::new();
        flatten(&routes, "", &[], &mut records);
        Self { routes, records }
    }

    /// Top-level routes in declaration order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// resolve
    ///
    /// Matches `raw` against the table. Query strings and fragments are kept in
    /// the returned `full_path` but ignored for matching, as are a trailing slash
    /// and letter case. Returns `None` for unmatched paths.
    pub fn resolve(&self, raw: &str) -> Option<RouteMatch> {
        let (path, suffix) = split_path(raw);
        let key = path.to_ascii_lowercase();

        self.records
            .iter()
            .find(|record| record.key == key)
            .map(|record| record.to_match(suffix))
    }

    /// Resolves a route by its declared name.
    pub fn by_name(&self, name: &str) -> Option<RouteMatch> {
        self.records
            .iter()
            .find(|record| record.chain.last().is_some_and(|leaf| leaf.name == name))
            .map(|record| record.to_match(""))
    }
}

impl MatchRecord {
    fn to_match(&self, suffix: &str) -> RouteMatch {
        RouteMatch {
            path: self.path.clone(),
            full_path: format!("{}{}", self.path, suffix),
            matched: self.chain.clone(),
        }
    }
}

fn flatten(routes: &[Route], parent_path: &str, parent_chain: &[Route], out: &mut Vec<MatchRecord>) {
    for route in routes {
        let path = join_paths(parent_path, &route.path);

        let mut chain = parent_chain.to_vec();
        chain.push(Route {
            children: Vec::new(),
            ..route.clone()
        });

        out.push(MatchRecord {
            key: path.to_ascii_lowercase(),
            path: path.clone(),
            chain: chain.clone(),
        });

        if !route.children.is_empty() {
            flatten(&route.children, &path, &chain, out);
        }
    }
}

/// Joins a child segment onto its parent. Absolute children ignore the parent.
fn join_paths(parent: &str, child: &str) -> String {
    let joined = if child.starts_with('/') {
        child.to_string()
    } else if child.is_empty() {
        parent.to_string()
    } else {
        format!("{}/{}", parent.trim_end_matches('/'), child)
    };
    normalize(&joined)
}

/// Leading slash enforced, trailing slash dropped (except for the root).
fn normalize(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// A route-level redirect keeps the requested query and fragment unless it
/// names its own.
fn carry_suffix(redirect: &str, from: &RouteMatch) -> String {
    if redirect.contains(['?', '#']) {
        return redirect.to_string();
    }
    let suffix = from.full_path.get(from.path.len()..).unwrap_or_default();
    format!("{redirect}{suffix}")
}

/// Splits `raw` into its normalized path and the untouched query/fragment suffix.
fn split_path(raw: &str) -> (String, &str) {
    let cut = raw.find(['?', '#']).unwrap_or(raw.len());
    let (path, suffix) = raw.split_at(cut);
    (normalize(path), suffix)
}

// --- Base Path ---

/// BasePath
///
/// The public prefix the application is mounted under (`BASE_URL`). Route paths
/// never include it; browser-facing paths always do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasePath(String);

impl BasePath {
    pub fn new(base: &str) -> Self {
        let normalized = normalize(base);
        if normalized == "/" {
            Self(String::new())
        } else {
            Self(normalized)
        }
    }

    /// Strips the base from a browser path. `None` when the path lies outside it.
    pub fn strip(&self, path: &str) -> Option<String> {
        if self.0.is_empty() {
            return Some(path.to_string());
        }
        let rest = path.strip_prefix(&self.0)?;
        match rest.chars().next() {
            None => Some("/".to_string()),
            Some('/') => Some(rest.to_string()),
            Some('?') | Some('#') => Some(format!("/{rest}")),
            Some(_) => None,
        }
    }

    /// The browser-facing href for an application path.
    pub fn href(&self, path: &str) -> String {
        if self.0.is_empty() {
            path.to_string()
        } else if path == "/" {
            format!("{}/", self.0)
        } else {
            format!("{}{}", self.0, path)
        }
    }
}

impl Default for BasePath {
    fn default() -> Self {
        Self::new("/")
    }
}

// --- Navigator ---

/// Settled
///
/// A navigation after every route-level and guard redirect has been followed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settled {
    pub target: RouteMatch,
    pub redirected: bool,
}

impl Settled {
    pub fn location(&self) -> Location {
        self.target.location()
    }

    pub fn view(&self) -> Option<View> {
        self.target.leaf().and_then(|leaf| leaf.view)
    }
}

/// Navigator
///
/// Drives navigations against a shared table: resolves targets, applies
/// route-level redirects, runs the global guard, and records settled locations
/// in a linear history.
pub struct Navigator<A> {
    table: Arc<RouteTable>,
    auth: A,
    history: Vec<Location>,
    cursor: Option<usize>,
}

impl<A: AuthCheck> Navigator<A> {
    pub fn new(table: Arc<RouteTable>, auth: A) -> Self {
        Self {
            table,
            auth,
            history: Vec::new(),
            cursor: None,
        }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// The settled location, `None` before the first navigation.
    pub fn current(&self) -> Option<&Location> {
        self.cursor.and_then(|index| self.history.get(index))
    }

    pub fn history(&self) -> &[Location] {
        &self.history
    }

    /// resolve
    ///
    /// Computes where a navigation to `to` would settle without recording it.
    pub fn resolve(&self, to: &str) -> Result<Settled, NavigationError> {
        let mut target = self
            .table
            .resolve(to)
            .ok_or_else(|| NavigationError::NotFound(to.to_string()))?;
        let mut redirected = false;

        for _ in 0..=MAX_REDIRECTS {
            let next = match target.leaf().and_then(|leaf| leaf.redirect.clone()) {
                Some(redirect) => {
                    let next = carry_suffix(&redirect, &target);
                    tracing::debug!(from = %target.path, to = %next, "route redirect");
                    next
                }
                None => {
                    let request = NavigationRequest {
                        to: &target,
                        from: self.current(),
                    };
                    match before_each(request, &self.auth) {
                        GuardDecision::Proceed => return Ok(Settled { target, redirected }),
                        GuardDecision::Redirect(next) => {
                            tracing::debug!(from = %target.path, to = %next, "guard redirect");
                            next
                        }
                    }
                }
            };

            target = self
                .table
                .resolve(&next)
                .ok_or(NavigationError::NotFound(next))?;
            redirected = true;
        }

        Err(NavigationError::RedirectLoop(to.to_string()))
    }

    /// Navigates to `to` and appends the settled location to history, dropping
    /// any forward entries. Navigating to the current location changes nothing.
    pub fn push(&mut self, to: &str) -> Result<Location, NavigationError> {
        let location = self.resolve(to)?.location();
        if self.current() == Some(&location) {
            return Ok(location);
        }

        let next = self.cursor.map_or(0, |index| index + 1);
        self.history.truncate(next);
        self.history.push(location.clone());
        self.cursor = Some(next);
        Ok(location)
    }

    /// Navigates to `to`, overwriting the current history entry.
    pub fn replace(&mut self, to: &str) -> Result<Location, NavigationError> {
        let location = self.resolve(to)?.location();
        match self.cursor {
            Some(index) => self.history[index] = location.clone(),
            None => {
                self.history.push(location.clone());
                self.cursor = Some(0);
            }
        }
        Ok(location)
    }

    /// Navigates to the route declared under `name`.
    pub fn push_named(&mut self, name: &str) -> Result<Location, NavigationError> {
        let target = self
            .table
            .by_name(name)
            .ok_or_else(|| NavigationError::UnknownName(name.to_string()))?;
        self.push(&target.full_path)
    }

    /// Steps back through history. Traversal restores settled entries and does
    /// not re-run the guard.
    pub fn back(&mut self) -> Option<&Location> {
        match self.cursor {
            Some(index) if index > 0 => {
                self.cursor = Some(index - 1);
                self.current()
            }
            _ => None,
        }
    }

    pub fn forward(&mut self) -> Option<&Location> {
        match self.cursor {
            Some(index) if index + 1 < self.history.len() => {
                self.cursor = Some(index + 1);
                self.current()
            }
            _ => None,
        }
    }
}
