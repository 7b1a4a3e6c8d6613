//! Uninstall handler

use anyhow::Result;

use sgpt_setup::Config;

/// Remove sgpt, its generated files and the managed shell blocks.
#[cfg(not(tarpaulin_include))]
pub fn handle(config: Config, verbose: bool) -> Result<()> {
    let installer = super::privileged_installer(config, verbose)?;
    let report = installer.uninstall()?;

    if !report.package_removed {
        println!("Package was not removed by dpkg (it may not have been installed).");
    }
    if report.profile_cleaned || report.bashrc_cleaned {
        println!("Restart your shell to complete the removal.");
    }
    Ok(())
}
