use crate::cli::commands::store::Options;
use crate::navigation::{Navigation, Router, SessionToken, SessionTokenProvider, StoredToken};
use anyhow::{Context, Result};
use std::io::Write;
use tracing::debug;

#[derive(Debug)]
pub struct Args {
    pub options: Options,
    pub locations: Vec<String>,
    /// Overrides the persisted token for this run.
    pub token: Option<SessionToken>,
}

/// Navigate to each location in turn, each starting from where the previous
/// one landed, and write one line per navigation.
///
/// # Errors
/// Returns an error if the route table can't be loaded or a navigation fails.
pub fn execute(args: &Args, out: &mut impl Write) -> Result<()> {
    let table = args.options.route_table()?;

    let tokens: Box<dyn SessionTokenProvider> = match &args.token {
        Some(token) => Box::new(Some(token.clone())),
        None => {
            debug!(
                "reading {} from {}",
                args.options.token_key,
                args.options.store_path.display()
            );
            Box::new(StoredToken::with_key(
                args.options.store(),
                args.options.token_key.clone(),
            ))
        }
    };

    let mut router = Router::new(table, tokens);

    for location in &args.locations {
        let navigation = router
            .navigate(location)
            .with_context(|| format!("Navigation to {location} failed"))?;
        writeln!(out, "{}", render(&navigation))?;
    }

    Ok(())
}

/// One-line report, e.g. `/ -> /login (login) redirected via /login`.
#[must_use]
pub fn render(navigation: &Navigation) -> String {
    let mut line = format!(
        "{} -> {} ({})",
        navigation.requested, navigation.route.path, navigation.route.name
    );
    if navigation.redirected() {
        line.push_str(" redirected via ");
        line.push_str(&navigation.redirects.join(", "));
    }
    line
}
