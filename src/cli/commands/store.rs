use crate::navigation::{FileStore, RouteTable, ACCESS_TOKEN_KEY};
use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use std::path::PathBuf;

pub const ARG_STORE: &str = "store";
pub const ARG_TOKEN_KEY: &str = "token-key";
pub const ARG_ROUTES: &str = "routes";

pub const DEFAULT_STORE_PATH: &str = ".reimburse/storage.json";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_STORE)
                .long("store")
                .help("Persisted key-value store holding the session token")
                .env("REIMBURSE_STORE_PATH")
                .global(true)
                .default_value(DEFAULT_STORE_PATH)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new(ARG_TOKEN_KEY)
                .long("token-key")
                .help("Store key the session token lives under")
                .env("REIMBURSE_TOKEN_KEY")
                .global(true)
                .default_value(ACCESS_TOKEN_KEY),
        )
        .arg(
            Arg::new(ARG_ROUTES)
                .long("routes")
                .help("JSON route table to use instead of the built-in routes")
                .env("REIMBURSE_ROUTES")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
}

/// Store and route table settings shared by every subcommand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    pub store_path: PathBuf,
    pub token_key: String,
    pub routes_path: Option<PathBuf>,
}

impl Options {
    /// # Errors
    /// Returns an error if a defaulted argument is missing or the token key is blank.
    pub fn parse(matches: &ArgMatches) -> Result<Self> {
        let store_path = matches
            .get_one::<PathBuf>(ARG_STORE)
            .cloned()
            .context("missing required argument: --store")?;

        let token_key = matches
            .get_one::<String>(ARG_TOKEN_KEY)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .context("--token-key must not be empty")?;

        Ok(Self {
            store_path,
            token_key,
            routes_path: matches.get_one::<PathBuf>(ARG_ROUTES).cloned(),
        })
    }

    #[must_use]
    pub fn store(&self) -> FileStore {
        FileStore::new(&self.store_path)
    }

    /// The configured route table, or the built-in one.
    ///
    /// # Errors
    /// Returns an error if the route file can't be read or is invalid.
    pub fn route_table(&self) -> Result<RouteTable> {
        match &self.routes_path {
            Some(path) => RouteTable::load(path)
                .with_context(|| format!("Failed to load routes: {}", path.display())),
            None => Ok(RouteTable::reimbursement()),
        }
    }
}
