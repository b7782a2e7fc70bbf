use crate::cli::commands::store::Options;
use crate::navigation::{RouteDescriptor, RouteTable, ViewLoading};
use anyhow::Result;
use std::io::Write;

#[derive(Debug)]
pub struct Args {
    pub options: Options,
    pub json: bool,
}

/// Write the route table, as aligned text or as JSON.
///
/// # Errors
/// Returns an error if the route table can't be loaded or written.
pub fn execute(args: &Args, out: &mut impl Write) -> Result<()> {
    let table = args.options.route_table()?;

    if args.json {
        serde_json::to_writer_pretty(&mut *out, table.routes())?;
        writeln!(out)?;
    } else {
        write_table(&table, out)?;
    }

    Ok(())
}

fn write_table(table: &RouteTable, out: &mut impl Write) -> Result<()> {
    for route in table.routes() {
        writeln!(
            out,
            "{:<24} {:<20} {:<20} {:<6} {}",
            route.path,
            route.name,
            route.view,
            loading(route),
            access(route)
        )?;
    }
    Ok(())
}

fn loading(route: &RouteDescriptor) -> &'static str {
    match route.loading {
        ViewLoading::Eager => "eager",
        ViewLoading::Lazy => "lazy",
    }
}

fn access(route: &RouteDescriptor) -> &'static str {
    if route.auth_entry_point {
        "public, auth entry point"
    } else if route.requires_auth {
        "requires auth"
    } else {
        "public"
    }
}
