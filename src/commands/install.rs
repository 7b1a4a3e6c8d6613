//! Install handler

use anyhow::Result;
use tracing::info;

use sgpt_setup::Config;

/// Install or update sgpt and its shell integration.
#[cfg(not(tarpaulin_include))]
pub fn handle(config: Config, force: bool, verbose: bool) -> Result<()> {
    let installer = super::privileged_installer(config, verbose)?;

    if force {
        println!("--force-install enabled: sgpt will be reinstalled.");
        info!("--force-install enabled");
    }

    installer.install(force)?;

    println!("Open a new terminal or re-login to activate the configuration.");
    Ok(())
}
