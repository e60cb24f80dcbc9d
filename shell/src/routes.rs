use gymauth::{AccessRequirement, Fallback, Role};

//--------------------------------------------------------------------------------------------------
// Canonical destinations
//--------------------------------------------------------------------------------------------------

pub const LOGIN: &str = "/login";
pub const SIGNUP: &str = "/signup";
pub const HOME: &str = "/home";
pub const ADMIN_HOME: &str = "/admin-home";
pub const CLIENT_HOME: &str = "/client-home";

/// Map an abstract guard fallback to its destination. The role homes carry
/// their own role requirement, so a wrong-role denial can never loop.
pub fn fallback_path(fallback: Fallback) -> &'static str {
    match fallback {
        Fallback::Login => LOGIN,
        Fallback::AdminHome => ADMIN_HOME,
        Fallback::ClientHome => CLIENT_HOME,
    }
}

//--------------------------------------------------------------------------------------------------
// Route table
//--------------------------------------------------------------------------------------------------

// Static configuration consumed by the guard, not computed logic. Patterns
// support single `:param` segments; lookup returns the first match, so
// literal routes are listed before their parameterized siblings.

struct Route {
    pattern: &'static str,
    requirement: AccessRequirement,
}

impl Route {
    const fn new(pattern: &'static str, requirement: AccessRequirement) -> Self {
        Route {
            pattern,
            requirement,
        }
    }

    fn matches(&self, path: &str) -> bool {
        let pattern: Vec<&str> = self.pattern.split('/').collect();
        let segments: Vec<&str> = path.split('/').collect();

        pattern.len() == segments.len()
            && pattern
                .iter()
                .zip(&segments)
                .all(|(p, s)| (p.starts_with(':') && !s.is_empty()) || p == s)
    }
}

pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// The app's navigable destinations and who may enter them.
    pub fn product_routes() -> Self {
        RouteTable {
            routes: vec![
                Route::new(LOGIN, AccessRequirement::Public),
                Route::new(SIGNUP, AccessRequirement::Public),
                Route::new(HOME, AccessRequirement::Public),
                Route::new(ADMIN_HOME, AccessRequirement::Role(Role::Admin)),
                Route::new(CLIENT_HOME, AccessRequirement::Role(Role::Client)),
                Route::new("/members", AccessRequirement::Authenticated),
                Route::new("/members/:id", AccessRequirement::Authenticated),
                Route::new("/add-member", AccessRequirement::Role(Role::Admin)),
                Route::new("/offers", AccessRequirement::Authenticated),
                Route::new("/offers/new", AccessRequirement::Role(Role::Admin)),
                Route::new("/offers/:id", AccessRequirement::Authenticated),
                Route::new("/offers/:id/edit", AccessRequirement::Role(Role::Admin)),
                Route::new("/profile", AccessRequirement::Authenticated),
            ],
        }
    }

    pub fn requirement(&self, path: &str) -> Option<AccessRequirement> {
        self.routes
            .iter()
            .find(|route| route.matches(path))
            .map(|route| route.requirement)
    }

    pub fn patterns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.routes.iter().map(|route| route.pattern)
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::product_routes()
    }
}

//--------------------------------------------------------------------------------------------------


//--------------------------------------------------------------------------------------------------
