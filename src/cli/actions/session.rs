//! Login/logout bookkeeping for the persisted store. These are the only
//! writers of the session token; the guard just reads it.

use crate::cli::commands::store::Options;
use crate::navigation::{
    clear_token, store_token, SessionToken, SessionTokenProvider, StoredToken,
};
use anyhow::{Context, Result};
use std::io::Write;
use tracing::info;

#[derive(Debug)]
pub struct LoginArgs {
    pub options: Options,
    pub token: SessionToken,
}

/// # Errors
/// Returns an error if the store can't be written.
pub fn login(args: &LoginArgs, out: &mut impl Write) -> Result<()> {
    let store = args.options.store();
    store_token(&store, &args.options.token_key, &args.token)
        .with_context(|| format!("Failed to write {}", store.path().display()))?;

    info!("session token stored under {}", args.options.token_key);
    writeln!(out, "logged in")?;

    Ok(())
}

/// # Errors
/// Returns an error if the store can't be written.
pub fn logout(options: &Options, out: &mut impl Write) -> Result<()> {
    let store = options.store();
    clear_token(&store, &options.token_key)
        .with_context(|| format!("Failed to write {}", store.path().display()))?;

    info!("session token {} cleared", options.token_key);
    writeln!(out, "logged out")?;

    Ok(())
}

/// Reports presence only; the token value is never printed.
///
/// # Errors
/// Returns an error if the report can't be written.
pub fn status(options: &Options, out: &mut impl Write) -> Result<()> {
    let tokens = StoredToken::with_key(options.store(), options.token_key.clone());

    if tokens.session_token().is_some() {
        writeln!(out, "authenticated")?;
    } else {
        writeln!(out, "anonymous")?;
    }

    Ok(())
}
