//! # Reimburse Guard (Frontend Navigation Authorization)
//!
//! `reimburse-guard` decides, before every navigation in the reimbursement
//! frontend, whether the transition may proceed or must be redirected.
//!
//! ## Routes
//!
//! The built-in route table has four entries: `/login` (public, the auth entry
//! point), `/` (home, protected), `/my-reimbursements` (protected) and `/about`
//! (public). Tables can also be loaded from JSON; every table is validated so
//! that each path and name resolves to exactly one descriptor.
//!
//! ## Decision
//!
//! The guard reads one key from a persisted key-value store and evaluates, in
//! order, first match wins:
//!
//! 1. protected target and no token: redirect to login;
//! 2. login target and a token: redirect to home;
//! 3. otherwise proceed.
//!
//! Token presence is the only signal. The guard is a UX gate; real access
//! control must live on the API.

pub mod cli;
pub mod navigation;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
