pub mod logging;
pub mod store;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ArgAction, ColorChoice, Command,
};

pub const CMD_NAVIGATE: &str = "navigate";
pub const CMD_ROUTES: &str = "routes";
pub const CMD_LOGIN: &str = "login";
pub const CMD_LOGOUT: &str = "logout";
pub const CMD_STATUS: &str = "status";

pub const ARG_LOCATION: &str = "location";
pub const ARG_TOKEN: &str = "token";
pub const ARG_JSON: &str = "json";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let command = Command::new("reimburse-guard")
        .about("Navigation authorization guard for the reimbursement frontend")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(navigate())
        .subcommand(
            Command::new(CMD_ROUTES).about("List the route table").arg(
                Arg::new(ARG_JSON)
                    .long("json")
                    .help("Print the table as JSON")
                    .action(ArgAction::SetTrue),
            ),
        )
        .subcommand(
            Command::new(CMD_LOGIN)
                .about("Persist a session token, as a successful login does")
                .arg(
                    Arg::new(ARG_TOKEN)
                        .long("token")
                        .help("Access token to store")
                        .required(true),
                ),
        )
        .subcommand(Command::new(CMD_LOGOUT).about("Clear the persisted session token"))
        .subcommand(
            Command::new(CMD_STATUS).about("Report whether a session token is present"),
        );

    let command = store::with_args(command);
    logging::with_args(command)
}

fn navigate() -> Command {
    Command::new(CMD_NAVIGATE)
        .about("Run locations through the guard, in order")
        .arg(
            Arg::new(ARG_LOCATION)
                .help("Location to navigate to, e.g. /my-reimbursements")
                .required(true)
                .num_args(1..)
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new(ARG_TOKEN)
                .long("token")
                .help("Use this token instead of the persisted one"),
        )
}
