use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

// --- Route Declarations ---

/// View
///
/// The renderable units a route can point at. Rendering itself belongs to the
/// frontend; the navigation layer only carries the component identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub enum View {
    UserLogin,
    UserDashboard,
    ChatBot,
}

impl View {
    /// The component name the frontend mounts for this view.
    pub fn component_name(self) -> &'static str {
        match self {
            View::UserLogin => "UserLogin",
            View::UserDashboard => "UserDashboard",
            View::ChatBot => "ChatBot",
        }
    }
}

/// RouteMeta
///
/// Access metadata attached to a route record. Guards read it from every record
/// in the matched chain, so a flag on a parent covers all of its children.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteMeta {
    pub requires_auth: bool,
}

/// Route
///
/// A single declared path-to-view mapping. Routes are built once at startup
/// through the constructors below and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    // Absolute for top-level routes. Children may use a relative segment.
    pub path: String,
    pub name: String,
    pub view: Option<View>,
    pub meta: RouteMeta,
    // Route-level redirect, applied before any guard runs.
    pub redirect: Option<String>,
    pub children: Vec<Route>,
}

impl Route {
    /// A route that renders `view`.
    pub fn view(path: &str, name: &str, view: View) -> Self {
        Self {
            path: path.to_string(),
            name: name.to_string(),
            view: Some(view),
            meta: RouteMeta::default(),
            redirect: None,
            children: Vec::new(),
        }
    }

    /// A route that renders nothing and forwards to `to`.
    pub fn redirect(path: &str, name: &str, to: &str) -> Self {
        Self {
            path: path.to_string(),
            name: name.to_string(),
            view: None,
            meta: RouteMeta::default(),
            redirect: Some(to.to_string()),
            children: Vec::new(),
        }
    }

    /// Marks the route (and therefore every child nested under it) as protected.
    pub fn requires_auth(mut self) -> Self {
        self.meta.requires_auth = true;
        self
    }

    pub fn with_children(mut self, children: Vec<Route>) -> Self {
        self.children = children;
        self
    }
}

// --- Navigation Values ---

/// Location
///
/// Where a navigation settled: the matched record's path and name plus the
/// full requested path (query and fragment preserved).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct Location {
    pub path: String,
    pub name: String,
    pub full_path: String,
}

/// RouteMatch
///
/// The result of resolving a path against the table. `matched` lists every
/// record entered, outermost parent first, leaf last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub path: String,
    pub full_path: String,
    pub matched: Vec<Route>,
}

impl RouteMatch {
    /// The leaf record, i.e. the route actually being entered.
    pub fn leaf(&self) -> Option<&Route> {
        self.matched.last()
    }

    pub fn location(&self) -> Location {
        Location {
            path: self.path.clone(),
            name: self.leaf().map(|r| r.name.clone()).unwrap_or_default(),
            full_path: self.full_path.clone(),
        }
    }
}

/// NavigationRequest
///
/// The (to, from) pair handed to a navigation guard.
#[derive(Debug, Clone, Copy)]
pub struct NavigationRequest<'a> {
    pub to: &'a RouteMatch,
    pub from: Option<&'a Location>,
}

/// GuardDecision
///
/// What a guard decided for a single transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Proceed,
    Redirect(String),
}

// --- API Payloads ---

/// RouteSummary
///
/// Public description of a declared route, served by `GET /api/routes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct RouteSummary {
    pub path: String,
    pub name: String,
    pub view: Option<View>,
    pub requires_auth: bool,
    pub redirect: Option<String>,
}

impl From<&Route> for RouteSummary {
    fn from(route: &Route) -> Self {
        Self {
            path: route.path.clone(),
            name: route.name.clone(),
            view: route.view,
            requires_auth: route.meta.requires_auth,
            redirect: route.redirect.clone(),
        }
    }
}

/// NavigationOutcome
///
/// Response of `GET /api/navigate`: where a navigation to `requested` settles
/// for the calling client, and whether any redirect happened on the way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct NavigationOutcome {
    pub requested: String,
    pub location: Location,
    pub view: Option<View>,
    pub redirected: bool,
}

/// ErrorBody
///
/// JSON error envelope returned by the API endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct ErrorBody {
    pub error: String,
}
