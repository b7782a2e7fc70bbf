use anyhow::Result;
use reimburse_guard::cli;

// Main function
fn main() -> Result<()> {
    let action = cli::start()?;

    action.execute()?;

    Ok(())
}
