pub mod navigate;
pub mod routes;
pub mod session;

use crate::cli::commands::store::Options;
use anyhow::Result;

#[derive(Debug)]
pub enum Action {
    Navigate(navigate::Args),
    Routes(routes::Args),
    Login(session::LoginArgs),
    Logout(Options),
    Status(Options),
}

impl Action {
    /// Execute the action, writing its report to stdout.
    ///
    /// # Errors
    /// Returns an error if the action fails.
    pub fn execute(self) -> Result<()> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();

        match self {
            Self::Navigate(args) => navigate::execute(&args, &mut out),
            Self::Routes(args) => routes::execute(&args, &mut out),
            Self::Login(args) => session::login(&args, &mut out),
            Self::Logout(options) => session::logout(&options, &mut out),
            Self::Status(options) => session::status(&options, &mut out),
        }
    }
}
