//! Status handler

use anyhow::Result;

use sgpt_setup::{logging, Config, Installer, SystemRunner};

/// Show what is currently installed. Does not require root.
pub fn handle(config: Config, verbose: bool) -> Result<()> {
    // Console logging only; the status check never writes the run log.
    let _ = logging::init(None, verbose);

    let installer = Installer::new(config, SystemRunner, false);
    let status = installer.status()?;
    println!("{}", status.summary());
    Ok(())
}
