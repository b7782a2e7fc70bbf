//! Route descriptors and the validated route table.

use crate::navigation::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fs, path::Path};
use tracing::{debug, instrument};

/// Path of the home route every table must declare.
pub const HOME_PATH: &str = "/";

/// How the view behind a route is loaded by the host application.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewLoading {
    #[default]
    Eager,
    Lazy,
}

/// Static metadata describing one navigable view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDescriptor {
    pub path: String,
    pub name: String,
    pub view: String,
    #[serde(default)]
    pub loading: ViewLoading,
    #[serde(default)]
    pub requires_auth: bool,
    #[serde(default)]
    pub auth_entry_point: bool,
}

impl RouteDescriptor {
    /// Public, eagerly loaded route.
    pub fn new(path: impl Into<String>, name: impl Into<String>, view: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            view: view.into(),
            loading: ViewLoading::Eager,
            requires_auth: false,
            auth_entry_point: false,
        }
    }

    #[must_use]
    pub fn lazy(mut self) -> Self {
        self.loading = ViewLoading::Lazy;
        self
    }

    #[must_use]
    pub fn protected(mut self) -> Self {
        self.requires_auth = true;
        self
    }

    /// Marks the route users are sent to when they need to authenticate.
    #[must_use]
    pub fn entry_point(mut self) -> Self {
        self.auth_entry_point = true;
        self
    }
}

/// Ordered set of route descriptors, immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
    entry_point: usize,
    home: usize,
}

impl RouteTable {
    /// Validates `routes` and builds a table.
    ///
    /// # Errors
    /// Returns [`Error::InvalidRoutes`] when a path or name is duplicated or
    /// malformed, when there is not exactly one auth entry point, when no
    /// route is mounted at `/`, or when the entry point requires auth or is
    /// the home route.
    pub fn new(routes: Vec<RouteDescriptor>) -> Result<Self> {
        let mut paths = HashSet::new();
        let mut names = HashSet::new();

        for route in &routes {
            if !valid_path(&route.path) {
                return Err(Error::InvalidRoutes(format!(
                    "malformed path: {:?}",
                    route.path
                )));
            }
            if route.name.trim().is_empty() {
                return Err(Error::InvalidRoutes(format!(
                    "route {} has an empty name",
                    route.path
                )));
            }
            // Paths are matched ignoring case, so `/About` duplicates `/about`.
            if !paths.insert(route.path.to_ascii_lowercase()) {
                return Err(Error::InvalidRoutes(format!(
                    "duplicate path: {}",
                    route.path
                )));
            }
            if !names.insert(route.name.as_str()) {
                return Err(Error::InvalidRoutes(format!(
                    "duplicate name: {}",
                    route.name
                )));
            }
        }

        let entry_points: Vec<usize> = routes
            .iter()
            .enumerate()
            .filter(|(_, route)| route.auth_entry_point)
            .map(|(index, _)| index)
            .collect();

        let entry_point = match entry_points.as_slice() {
            [index] => *index,
            [] => return Err(Error::InvalidRoutes("no auth entry point".to_string())),
            _ => {
                return Err(Error::InvalidRoutes(
                    "more than one auth entry point".to_string(),
                ))
            }
        };

        if routes[entry_point].requires_auth {
            return Err(Error::InvalidRoutes(format!(
                "auth entry point {} must not require auth",
                routes[entry_point].path
            )));
        }

        let home = routes
            .iter()
            .position(|route| route.path == HOME_PATH)
            .ok_or_else(|| Error::InvalidRoutes(format!("no route mounted at {HOME_PATH}")))?;

        if home == entry_point {
            return Err(Error::InvalidRoutes(
                "auth entry point can't be the home route".to_string(),
            ));
        }

        Ok(Self {
            routes,
            entry_point,
            home,
        })
    }

    /// The reimbursement frontend's routes.
    #[must_use]
    pub fn reimbursement() -> Self {
        Self {
            routes: vec![
                RouteDescriptor::new("/login", "login", "AuthView")
                    .lazy()
                    .entry_point(),
                RouteDescriptor::new(HOME_PATH, "home", "HomeView").protected(),
                RouteDescriptor::new("/my-reimbursements", "myReimbursements", "MyReimbursements")
                    .lazy()
                    .protected(),
                RouteDescriptor::new("/about", "about", "AboutView").lazy(),
            ],
            entry_point: 0,
            home: 1,
        }
    }

    /// Parses a JSON array of descriptors and validates it.
    ///
    /// # Errors
    /// Returns [`Error::Json`] on malformed input or [`Error::InvalidRoutes`]
    /// when validation fails.
    pub fn from_json(json: &str) -> Result<Self> {
        let routes: Vec<RouteDescriptor> = serde_json::from_str(json)?;
        Self::new(routes)
    }

    /// Reads a route table from a JSON file.
    ///
    /// # Errors
    /// Returns [`Error::Store`] if the file can't be read, otherwise as
    /// [`RouteTable::from_json`].
    #[instrument]
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        let table = Self::from_json(&json)?;
        debug!("loaded {} routes", table.routes.len());
        Ok(table)
    }

    #[must_use]
    pub fn by_path(&self, path: &str) -> Option<&RouteDescriptor> {
        self.routes
            .iter()
            .find(|route| route.path.eq_ignore_ascii_case(path))
    }

    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&RouteDescriptor> {
        self.routes.iter().find(|route| route.name == name)
    }

    #[must_use]
    pub fn routes(&self) -> &[RouteDescriptor] {
        &self.routes
    }

    #[must_use]
    pub fn entry_point(&self) -> &RouteDescriptor {
        &self.routes[self.entry_point]
    }

    #[must_use]
    pub fn home(&self) -> &RouteDescriptor {
        &self.routes[self.home]
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::reimbursement()
    }
}

fn valid_path(path: &str) -> bool {
    Regex::new(r"^/([A-Za-z0-9._~:@!$&'()*+,;=-]+(/[A-Za-z0-9._~:@!$&'()*+,;=-]+)*)?$")
        .map_or(false, |re| re.is_match(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn login() -> RouteDescriptor {
        RouteDescriptor::new("/login", "login", "AuthView").entry_point()
    }

    fn home() -> RouteDescriptor {
        RouteDescriptor::new("/", "home", "HomeView").protected()
    }

    #[test]
    fn reimbursement_table_passes_validation() {
        let table = RouteTable::reimbursement();
        let rebuilt = RouteTable::new(table.routes().to_vec()).unwrap();
        assert_eq!(rebuilt, table);
        assert_eq!(table.entry_point().path, "/login");
        assert_eq!(table.home().name, "home");
    }

    #[test]
    fn reimbursement_table_flags() {
        let table = RouteTable::reimbursement();
        let protected: Vec<&str> = table
            .routes()
            .iter()
            .filter(|route| route.requires_auth)
            .map(|route| route.path.as_str())
            .collect();
        assert_eq!(protected, vec!["/", "/my-reimbursements"]);
        assert_eq!(table.home().loading, ViewLoading::Eager);
        assert_eq!(
            table.by_name("myReimbursements").map(|r| r.loading),
            Some(ViewLoading::Lazy)
        );
    }

    #[test]
    fn lookup_by_path_and_name() {
        let table = RouteTable::reimbursement();
        assert_eq!(table.by_path("/about").map(|r| r.name.as_str()), Some("about"));
        assert_eq!(table.by_name("login").map(|r| r.path.as_str()), Some("/login"));
        assert!(table.by_path("/missing").is_none());
        assert!(table.by_name("missing").is_none());
    }

    #[test]
    fn rejects_duplicate_path() {
        let result = RouteTable::new(vec![
            login(),
            home(),
            RouteDescriptor::new("/", "dashboard", "DashboardView"),
        ]);
        assert!(matches!(result, Err(Error::InvalidRoutes(msg)) if msg.contains("duplicate path")));
    }

    #[test]
    fn rejects_path_differing_only_in_case() {
        let result = RouteTable::new(vec![
            login(),
            home(),
            RouteDescriptor::new("/about", "about", "AboutView"),
            RouteDescriptor::new("/About", "aboutUpper", "AboutView"),
        ]);
        assert!(matches!(result, Err(Error::InvalidRoutes(msg)) if msg.contains("duplicate path")));
        assert_eq!(
            RouteTable::reimbursement()
                .by_path("/ABOUT")
                .map(|r| r.name.as_str()),
            Some("about")
        );
    }

    #[test]
    fn rejects_duplicate_name() {
        let result = RouteTable::new(vec![
            login(),
            home(),
            RouteDescriptor::new("/about", "home", "AboutView"),
        ]);
        assert!(matches!(result, Err(Error::InvalidRoutes(msg)) if msg.contains("duplicate name")));
    }

    #[test]
    fn requires_single_entry_point() {
        let none = RouteTable::new(vec![home()]);
        assert!(matches!(none, Err(Error::InvalidRoutes(msg)) if msg.contains("no auth entry point")));

        let two = RouteTable::new(vec![
            login(),
            home(),
            RouteDescriptor::new("/signin", "signin", "AuthView").entry_point(),
        ]);
        assert!(matches!(two, Err(Error::InvalidRoutes(msg)) if msg.contains("more than one")));
    }

    #[test]
    fn entry_point_must_be_public() {
        let result = RouteTable::new(vec![login().protected(), home()]);
        assert!(matches!(result, Err(Error::InvalidRoutes(msg)) if msg.contains("must not require auth")));
    }

    #[test]
    fn entry_point_must_not_be_home() {
        let result = RouteTable::new(vec![RouteDescriptor::new("/", "home", "HomeView").entry_point()]);
        assert!(matches!(result, Err(Error::InvalidRoutes(msg)) if msg.contains("can't be the home route")));
    }

    #[test]
    fn requires_home_route() {
        let result = RouteTable::new(vec![login()]);
        assert!(matches!(result, Err(Error::InvalidRoutes(msg)) if msg.contains("no route mounted")));
    }

    #[test]
    fn valid_path_cases() {
        assert!(valid_path("/"));
        assert!(valid_path("/login"));
        assert!(valid_path("/my-reimbursements"));
        assert!(valid_path("/a/b/c"));
        assert!(!valid_path(""));
        assert!(!valid_path("login"));
        assert!(!valid_path("/login/"));
        assert!(!valid_path("/a//b"));
        assert!(!valid_path("/about?x=1"));
        assert!(!valid_path("/about#top"));
        assert!(!valid_path("/with space"));
    }

    #[test]
    fn from_json_applies_defaults() {
        let table = RouteTable::from_json(
            r#"[
                {"path": "/login", "name": "login", "view": "AuthView", "loading": "lazy", "auth_entry_point": true},
                {"path": "/", "name": "home", "view": "HomeView", "requires_auth": true},
                {"path": "/about", "name": "about", "view": "AboutView"}
            ]"#,
        )
        .unwrap();

        let about = table.by_path("/about").unwrap();
        assert!(!about.requires_auth);
        assert!(!about.auth_entry_point);
        assert_eq!(about.loading, ViewLoading::Eager);
        assert_eq!(table.entry_point().loading, ViewLoading::Lazy);
    }

    #[test]
    fn from_json_rejects_malformed() {
        assert!(matches!(RouteTable::from_json("{"), Err(Error::Json(_))));
    }
}
