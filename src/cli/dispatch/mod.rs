//! Maps validated CLI matches to an [`Action`].

use crate::cli::actions::{navigate, routes, session, Action};
use crate::cli::commands::{self, store};
use crate::navigation::SessionToken;
use anyhow::{anyhow, Context, Result};

/// Map validated CLI matches to an action.
///
/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let (name, sub) = matches
        .subcommand()
        .ok_or_else(|| anyhow!("missing subcommand"))?;

    // Global args are propagated to the subcommand matches.
    let options = store::Options::parse(sub)?;

    match name {
        commands::CMD_NAVIGATE => {
            let locations: Vec<String> = sub
                .get_many::<String>(commands::ARG_LOCATION)
                .context("missing required argument: <location>")?
                .cloned()
                .collect();

            Ok(Action::Navigate(navigate::Args {
                options,
                locations,
                token: sub
                    .get_one::<String>(commands::ARG_TOKEN)
                    .map(|token| SessionToken::new(token.as_str())),
            }))
        }
        commands::CMD_ROUTES => Ok(Action::Routes(routes::Args {
            options,
            json: sub.get_flag(commands::ARG_JSON),
        })),
        commands::CMD_LOGIN => {
            let token = sub
                .get_one::<String>(commands::ARG_TOKEN)
                .context("missing required argument: --token")?;

            Ok(Action::Login(session::LoginArgs {
                options,
                token: SessionToken::new(token.as_str()),
            }))
        }
        commands::CMD_LOGOUT => Ok(Action::Logout(options)),
        commands::CMD_STATUS => Ok(Action::Status(options)),
        other => Err(anyhow!("unknown subcommand: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn dispatch(args: &[&str]) -> Result<Action> {
        temp_env::with_vars(
            [
                ("REIMBURSE_STORE_PATH", None::<&str>),
                ("REIMBURSE_TOKEN_KEY", None::<&str>),
                ("REIMBURSE_ROUTES", None::<&str>),
            ],
            || {
                let mut argv = vec!["reimburse-guard"];
                argv.extend_from_slice(args);
                let matches = commands::new().get_matches_from(argv);
                handler(&matches)
            },
        )
    }

    #[test]
    fn navigate_action() {
        let action = dispatch(&["navigate", "/", "/login", "--token", "abc123"]).unwrap();
        let Action::Navigate(args) = action else {
            panic!("expected navigate action");
        };
        assert_eq!(args.locations, vec!["/".to_string(), "/login".to_string()]);
        assert_eq!(args.token.as_ref().map(SessionToken::expose), Some("abc123"));
        assert_eq!(args.options.token_key, "access_token");
        assert_eq!(
            args.options.store_path,
            PathBuf::from(store::DEFAULT_STORE_PATH)
        );
    }

    #[test]
    fn navigate_without_token_uses_store() {
        let Action::Navigate(args) = dispatch(&["navigate", "/about"]).unwrap() else {
            panic!("expected navigate action");
        };
        assert!(args.token.is_none());
    }

    #[test]
    fn global_args_after_subcommand() {
        let action = dispatch(&[
            "routes",
            "--json",
            "--store",
            "/tmp/s.json",
            "--routes",
            "/tmp/routes.json",
        ])
        .unwrap();
        let Action::Routes(args) = action else {
            panic!("expected routes action");
        };
        assert!(args.json);
        assert_eq!(args.options.store_path, PathBuf::from("/tmp/s.json"));
        assert_eq!(
            args.options.routes_path,
            Some(PathBuf::from("/tmp/routes.json"))
        );
    }

    #[test]
    fn login_logout_status_actions() {
        let Action::Login(args) = dispatch(&["login", "--token", "t0k"]).unwrap() else {
            panic!("expected login action");
        };
        assert_eq!(args.token.expose(), "t0k");

        assert!(matches!(dispatch(&["logout"]).unwrap(), Action::Logout(_)));
        assert!(matches!(dispatch(&["status"]).unwrap(), Action::Status(_)));
    }

    #[test]
    fn blank_token_key_is_rejected() {
        let result = dispatch(&["status", "--token-key", "  "]);
        assert!(result.is_err());
        if let Err(err) = result {
            assert!(err.to_string().contains("--token-key must not be empty"));
        }
    }
}
