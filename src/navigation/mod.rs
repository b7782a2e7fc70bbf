//! Route table, session token lookup, the navigation guard and the router
//! that runs it. The guard is pure; the router owns the only mutable state
//! (the current route) and serializes navigations through `&mut self`.

mod error;
pub mod guard;
pub mod route;
pub mod router;
pub mod token;

pub use error::Error;
pub use guard::{GuardDecision, NavigationGuard, NavigationRequest, LOGIN_PATH};
pub use route::{RouteDescriptor, RouteTable, ViewLoading, HOME_PATH};
pub use router::{Navigation, Router, MAX_REDIRECTS};
pub use token::{
    clear_token, store_token, FileStore, KeyValueStore, MemoryStore, SessionToken,
    SessionTokenProvider, StoredToken, ACCESS_TOKEN_KEY,
};

#[cfg(target_arch = "wasm32")]
pub use token::LocalStorage;

pub type Result<T> = std::result::Result<T, Error>;
