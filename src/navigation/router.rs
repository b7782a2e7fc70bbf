//! Host routing: resolves locations against the route table and runs the
//! guard before every transition.

use crate::navigation::{
    Error, GuardDecision, NavigationGuard, NavigationRequest, Result, RouteDescriptor, RouteTable,
    SessionTokenProvider, HOME_PATH,
};
use tracing::{debug, info, instrument};
use url::Url;

/// Redirect hops allowed for a single navigation before giving up.
pub const MAX_REDIRECTS: usize = 8;

const APP_BASE: &str = "http://app.local/";

/// A completed transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Navigation {
    /// Path as requested, after normalization.
    pub requested: String,
    /// Route the transition ended on.
    pub route: RouteDescriptor,
    /// Redirect paths taken, in order.
    pub redirects: Vec<String>,
    pub query: Option<String>,
    pub fragment: Option<String>,
}

impl Navigation {
    #[must_use]
    pub fn redirected(&self) -> bool {
        !self.redirects.is_empty()
    }
}

struct Location {
    path: String,
    query: Option<String>,
    fragment: Option<String>,
}

/// Routes navigations through the guard. Navigations are serialized by
/// `&mut self`; the current route is the origin of the next request.
#[derive(Debug)]
pub struct Router<P> {
    table: RouteTable,
    guard: NavigationGuard,
    tokens: P,
    current: Option<usize>,
}

impl<P: SessionTokenProvider> Router<P> {
    pub fn new(table: RouteTable, tokens: P) -> Self {
        let guard = NavigationGuard::for_table(&table);
        Self::with_guard(table, guard, tokens)
    }

    pub fn with_guard(table: RouteTable, guard: NavigationGuard, tokens: P) -> Self {
        Self {
            table,
            guard,
            tokens,
            current: None,
        }
    }

    #[must_use]
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    #[must_use]
    pub fn guard(&self) -> &NavigationGuard {
        &self.guard
    }

    #[must_use]
    pub fn tokens(&self) -> &P {
        &self.tokens
    }

    /// Route of the last completed navigation.
    #[must_use]
    pub fn current(&self) -> Option<&RouteDescriptor> {
        self.current.map(|index| &self.table.routes()[index])
    }

    /// Guard decision for `route` from the current route, without navigating.
    #[must_use]
    pub fn check(&self, route: &RouteDescriptor) -> GuardDecision {
        let request = NavigationRequest::new(route, self.current());
        self.guard.decide(&request, &self.tokens)
    }

    /// Navigates to `location` (a path, optionally with query and fragment).
    ///
    /// Redirects are re-evaluated by the guard, up to [`MAX_REDIRECTS`] hops.
    ///
    /// # Errors
    /// Returns [`Error::InvalidLocation`] if `location` can't be parsed or
    /// leaves the application, [`Error::RouteNotFound`] if no route matches,
    /// or [`Error::RedirectLoop`] when redirects don't settle.
    #[instrument(skip(self))]
    pub fn navigate(&mut self, location: &str) -> Result<Navigation> {
        let target = parse_location(location)?;
        let mut to = self.resolve(&target.path)?;
        let mut redirects = Vec::new();

        loop {
            let route = &self.table.routes()[to];
            let decision = self.check(route);
            debug!(
                to = %route.path,
                from = self.current().map(|r| r.path.as_str()),
                ?decision,
                "guard decision"
            );

            let Some(path) = decision.redirect_path(&self.guard) else {
                break;
            };

            if redirects.len() >= MAX_REDIRECTS {
                return Err(Error::RedirectLoop(target.path));
            }

            info!("redirecting {} to {path}", route.path);
            redirects.push(path.to_string());
            to = self.resolve(path)?;
        }

        self.current = Some(to);
        let route = self.table.routes()[to].clone();
        debug!("navigated to {}", route.path);

        Ok(Navigation {
            requested: target.path,
            route,
            redirects,
            query: target.query,
            fragment: target.fragment,
        })
    }

    /// Paths match ignoring ASCII case. Percent-encoded segments are compared
    /// as written.
    fn resolve(&self, path: &str) -> Result<usize> {
        self.table
            .routes()
            .iter()
            .position(|route| route.path.eq_ignore_ascii_case(path))
            .ok_or_else(|| Error::RouteNotFound(path.to_string()))
    }
}

fn parse_location(location: &str) -> Result<Location> {
    let invalid = |reason: String| Error::InvalidLocation {
        location: location.to_string(),
        reason,
    };

    let base = Url::parse(APP_BASE).map_err(|e| invalid(e.to_string()))?;
    let url = base.join(location.trim()).map_err(|e| invalid(e.to_string()))?;

    if url.origin() != base.origin() {
        return Err(invalid("location leaves the application".to_string()));
    }

    let path = match url.path().trim_end_matches('/') {
        "" => HOME_PATH.to_string(),
        trimmed => trimmed.to_string(),
    };

    Ok(Location {
        path,
        query: url.query().map(ToString::to_string),
        fragment: url.fragment().map(ToString::to_string),
    })
}
