//! The navigation authorization guard.
//!
//! UX-only: it keeps logged-out users off protected views and logged-in users
//! off the login view. Real access control must live on the API.

use crate::navigation::{RouteDescriptor, RouteTable, SessionTokenProvider, HOME_PATH};

/// Any route mounted here is treated as the login route, whatever its flags.
pub const LOGIN_PATH: &str = "/login";

/// A pending transition, discarded once a decision is made.
#[derive(Clone, Copy, Debug)]
pub struct NavigationRequest<'a> {
    pub to: &'a RouteDescriptor,
    pub from: Option<&'a RouteDescriptor>,
}

impl<'a> NavigationRequest<'a> {
    #[must_use]
    pub const fn new(to: &'a RouteDescriptor, from: Option<&'a RouteDescriptor>) -> Self {
        Self { to, from }
    }
}

/// Outcome of the guard; exactly one per request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Proceed,
    RedirectToLogin,
    RedirectToHome,
}

impl GuardDecision {
    /// Where the navigation is sent instead, if anywhere.
    #[must_use]
    pub fn redirect_path<'g>(&self, guard: &'g NavigationGuard) -> Option<&'g str> {
        match self {
            Self::Proceed => None,
            Self::RedirectToLogin => Some(guard.entry_path()),
            Self::RedirectToHome => Some(guard.home_path()),
        }
    }
}

/// Redirects logged-out users to `entry_path` and logged-in users away from
/// the login route to `home_path`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationGuard {
    entry_path: String,
    home_path: String,
}

impl NavigationGuard {
    pub fn new(entry_path: impl Into<String>, home_path: impl Into<String>) -> Self {
        Self {
            entry_path: entry_path.into(),
            home_path: home_path.into(),
        }
    }

    /// Guard redirecting to the table's auth entry point and home route.
    #[must_use]
    pub fn for_table(table: &RouteTable) -> Self {
        Self::new(table.entry_point().path.clone(), table.home().path.clone())
    }

    /// Where logged-out users are sent.
    #[must_use]
    pub fn entry_path(&self) -> &str {
        &self.entry_path
    }

    #[must_use]
    pub fn home_path(&self) -> &str {
        &self.home_path
    }

    /// A route is the login route if it is flagged as the auth entry point or
    /// if it is mounted at [`LOGIN_PATH`]. The latter holds even when the
    /// table's entry point lives elsewhere.
    #[must_use]
    pub fn is_login_route(&self, route: &RouteDescriptor) -> bool {
        route.auth_entry_point || route.path.eq_ignore_ascii_case(LOGIN_PATH)
    }

    /// Decides the request, first match wins:
    ///
    /// 1. protected target, no token: [`GuardDecision::RedirectToLogin`]
    /// 2. login target, token present: [`GuardDecision::RedirectToHome`]
    /// 3. anything else: [`GuardDecision::Proceed`]
    ///
    /// Reads the token once; never writes, never fails.
    pub fn decide(
        &self,
        request: &NavigationRequest<'_>,
        tokens: &dyn SessionTokenProvider,
    ) -> GuardDecision {
        Self::evaluate(
            request.to.requires_auth,
            self.is_login_route(request.to),
            tokens.session_token().is_some(),
        )
    }

    const fn evaluate(requires_auth: bool, login_route: bool, has_token: bool) -> GuardDecision {
        if requires_auth && !has_token {
            GuardDecision::RedirectToLogin
        } else if login_route && has_token {
            GuardDecision::RedirectToHome
        } else {
            GuardDecision::Proceed
        }
    }
}

impl Default for NavigationGuard {
    fn default() -> Self {
        Self::new(LOGIN_PATH, HOME_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::SessionToken;

    const ABSENT: Option<SessionToken> = None;

    fn present() -> Option<SessionToken> {
        Some(SessionToken::new("abc123"))
    }

    #[test]
    fn evaluate_truth_table() {
        use GuardDecision::{Proceed, RedirectToHome, RedirectToLogin};

        // (requires_auth, login_route, has_token) -> decision
        let cases = [
            (false, false, false, Proceed),
            (false, false, true, Proceed),
            (false, true, false, Proceed),
            (false, true, true, RedirectToHome),
            (true, false, false, RedirectToLogin),
            (true, false, true, Proceed),
            (true, true, false, RedirectToLogin),
            (true, true, true, RedirectToHome),
        ];

        for (requires_auth, login_route, has_token, expected) in cases {
            assert_eq!(
                NavigationGuard::evaluate(requires_auth, login_route, has_token),
                expected,
                "requires_auth={requires_auth} login_route={login_route} has_token={has_token}"
            );
        }
    }

    #[test]
    fn login_route_by_flag_or_path() {
        let guard = NavigationGuard::default();
        let flagged = RouteDescriptor::new("/signin", "signin", "AuthView").entry_point();
        let by_path = RouteDescriptor::new("/login", "legacyLogin", "LegacyAuthView");
        let other = RouteDescriptor::new("/about", "about", "AboutView");

        assert!(guard.is_login_route(&flagged));
        assert!(guard.is_login_route(&by_path));
        assert!(!guard.is_login_route(&other));
    }

    #[test]
    fn decide_ignores_origin() {
        let guard = NavigationGuard::default();
        let home = RouteDescriptor::new("/", "home", "HomeView").protected();
        let about = RouteDescriptor::new("/about", "about", "AboutView");

        let fresh = NavigationRequest::new(&home, None);
        let from_about = NavigationRequest::new(&home, Some(&about));

        assert_eq!(guard.decide(&fresh, &ABSENT), GuardDecision::RedirectToLogin);
        assert_eq!(
            guard.decide(&from_about, &ABSENT),
            GuardDecision::RedirectToLogin
        );
        assert_eq!(guard.decide(&from_about, &present()), GuardDecision::Proceed);
    }

    #[test]
    fn redirect_paths_follow_table() {
        let table = RouteTable::new(vec![
            RouteDescriptor::new("/signin", "signin", "AuthView").entry_point(),
            RouteDescriptor::new("/", "home", "HomeView").protected(),
        ])
        .unwrap();
        let guard = NavigationGuard::for_table(&table);

        assert_eq!(GuardDecision::Proceed.redirect_path(&guard), None);
        assert_eq!(
            GuardDecision::RedirectToLogin.redirect_path(&guard),
            Some("/signin")
        );
        assert_eq!(GuardDecision::RedirectToHome.redirect_path(&guard), Some("/"));
    }

    #[test]
    fn login_path_keeps_rule_when_entry_point_moves() {
        let table = RouteTable::new(vec![
            RouteDescriptor::new("/signin", "signin", "AuthView").entry_point(),
            RouteDescriptor::new("/", "home", "HomeView").protected(),
            RouteDescriptor::new("/login", "legacyLogin", "LegacyAuthView"),
        ])
        .unwrap();
        let guard = NavigationGuard::for_table(&table);
        let legacy = table.by_path("/login").unwrap();
        let request = NavigationRequest::new(legacy, None);

        assert_eq!(guard.entry_path(), "/signin");
        assert_eq!(guard.decide(&request, &present()), GuardDecision::RedirectToHome);
        assert_eq!(guard.decide(&request, &ABSENT), GuardDecision::Proceed);
    }
}
