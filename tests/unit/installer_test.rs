//! Unit tests for install/uninstall orchestration with a fake command runner

use crate::helpers::{read, seed_system, test_config, write, FakeRunner};
use sgpt_setup::installer::{InstallError, Installer};
use sgpt_setup::package::PackageError;
use std::fs;
use tempfile::TempDir;

const START: &str = "# *** sgpt settings begin ***";
const END: &str = "# *** sgpt settings end ***";

#[test]
fn install_refuses_without_privileges_and_touches_nothing() {
    let temp = TempDir::new().unwrap();
    let config = test_config(&temp);
    let paths = config.paths.clone();
    let installer = Installer::new(config, FakeRunner::with_versions(None), false);

    let err = installer.install(false).unwrap_err();

    assert!(matches!(err, InstallError::NotPrivileged));
    assert!(installer.runner().calls().is_empty());
    assert!(!paths.profile.exists());
    assert!(!paths.bashrc.exists());
    assert!(!paths.api_key_file.exists());
    assert!(!paths.log_file.exists());
}

#[test]
fn uninstall_refuses_without_privileges() {
    let temp = TempDir::new().unwrap();
    let config = test_config(&temp);
    seed_system(&config, "sk-test");
    let profile_before = read(&config.paths.profile);
    let profile = config.paths.profile.clone();
    let installer = Installer::new(config, FakeRunner::new(), false);

    assert!(matches!(
        installer.uninstall(),
        Err(InstallError::NotPrivileged)
    ));
    assert!(installer.runner().calls().is_empty());
    assert_eq!(read(&profile), profile_before);
}

#[test]
fn fresh_install_sets_everything_up() {
    let temp = TempDir::new().unwrap();
    let config = test_config(&temp);
    seed_system(&config, "sk-test-123");
    let paths = config.paths.clone();
    let installer = Installer::new(config, FakeRunner::with_versions(None), true);

    let report = installer.install(false).unwrap();

    assert_eq!(report.previous_version, None);
    assert_eq!(report.version, "2.17.1");
    assert!(report.package_installed);
    assert!(report.profile_changed);
    assert!(report.bashrc_changed);

    let runner = installer.runner();
    assert!(runner.called("curl -fL https://github.com/tbckr/sgpt/releases/download/v2.17.1/sgpt_2.17.1_linux_amd64.deb -o"));
    assert!(runner.called("dpkg -i"));
    assert!(!paths.install_dir.exists());

    assert_eq!(
        read(&paths.api_key_file),
        "export OPENAI_API_KEY=\"sk-test-123\"\n"
    );
    let bind = read(&paths.bind_script);
    assert!(bind.contains(&paths.api_key_file.display().to_string()));
    assert!(bind.contains("_sgpt_bash"));

    let profile = read(&paths.profile);
    assert!(profile.starts_with("# /etc/profile\nexport PATH=/usr/bin:/bin\n"));
    assert!(profile.ends_with(&format!(
        "{START}\nif [ -f {bashrc} ]; then\n    . {bashrc}\nfi\n{END}\n",
        bashrc = paths.bashrc.display()
    )));

    let bashrc = read(&paths.bashrc);
    assert!(bashrc.contains(&format!("source {}", paths.bind_script.display())));
    assert_eq!(bashrc.matches(START).count(), 1);
}

#[test]
fn up_to_date_package_is_not_reinstalled() {
    let temp = TempDir::new().unwrap();
    let config = test_config(&temp);
    seed_system(&config, "sk-test");
    let installer = Installer::new(config, FakeRunner::with_versions(Some("2.17.1")), true);

    let report = installer.install(false).unwrap();

    assert!(!report.package_installed);
    assert_eq!(report.previous_version.as_deref(), Some("2.17.1"));
    assert!(!installer.runner().called("dpkg -i"));
    assert!(!installer.runner().called("curl -fL"));
}

#[test]
fn force_install_reinstalls_current_version() {
    let temp = TempDir::new().unwrap();
    let config = test_config(&temp);
    seed_system(&config, "sk-test");
    let installer = Installer::new(config, FakeRunner::with_versions(Some("2.17.1")), true);

    let report = installer.install(true).unwrap();

    assert!(report.package_installed);
    assert!(installer.runner().called("dpkg -i"));
}

#[test]
fn outdated_package_is_updated() {
    let temp = TempDir::new().unwrap();
    let config = test_config(&temp);
    seed_system(&config, "sk-test");
    let installer = Installer::new(config, FakeRunner::with_versions(Some("2.16.0")), true);

    let report = installer.install(false).unwrap();

    assert!(report.package_installed);
    assert_eq!(report.previous_version.as_deref(), Some("2.16.0"));
}

#[test]
fn repeated_install_is_idempotent() {
    let temp = TempDir::new().unwrap();
    let config = test_config(&temp);
    seed_system(&config, "sk-test");
    let paths = config.paths.clone();
    let installer = Installer::new(config, FakeRunner::with_versions(Some("2.17.1")), true);

    installer.install(false).unwrap();
    let profile_once = read(&paths.profile);
    let bashrc_once = read(&paths.bashrc);

    let report = installer.install(false).unwrap();

    assert!(!report.profile_changed);
    assert!(!report.bashrc_changed);
    assert_eq!(read(&paths.profile), profile_once);
    assert_eq!(read(&paths.bashrc), bashrc_once);
}

#[test]
fn missing_credentials_abort_before_shell_changes() {
    let temp = TempDir::new().unwrap();
    let config = test_config(&temp);
    seed_system(&config, "sk-test");
    fs::remove_file(&config.paths.source_credential_file).unwrap();
    let paths = config.paths.clone();
    let profile_before = read(&paths.profile);
    let installer = Installer::new(config, FakeRunner::with_versions(Some("2.17.1")), true);

    let err = installer.install(false).unwrap_err();

    assert!(matches!(err, InstallError::Credential(_)));
    assert!(!paths.bind_script.exists());
    assert_eq!(read(&paths.profile), profile_before);
}

#[test]
fn failed_package_install_stops_the_run() {
    let temp = TempDir::new().unwrap();
    let config = test_config(&temp);
    seed_system(&config, "sk-test");
    let paths = config.paths.clone();
    let runner = FakeRunner::with_versions(None).reply("dpkg -i", false, "");
    let installer = Installer::new(config, runner, true);

    let err = installer.install(false).unwrap_err();

    assert!(matches!(err, InstallError::Package(PackageError::Command(_))));
    assert!(!paths.install_dir.exists());
    assert!(!paths.api_key_file.exists());
    assert!(!read(&paths.profile).contains(START));
}

#[test]
fn unreachable_release_api_stops_the_run() {
    let temp = TempDir::new().unwrap();
    let config = test_config(&temp);
    seed_system(&config, "sk-test");
    let runner = FakeRunner::new()
        .reply("dpkg-query", false, "")
        .reply("curl -fsSL", false, "");
    let installer = Installer::new(config, runner, true);

    let err = installer.install(false).unwrap_err();

    assert!(err.to_string().contains("curl -fsSL"));
    assert!(!installer.runner().called("dpkg -i"));
}

#[test]
fn uninstall_after_install_restores_shell_files() {
    let temp = TempDir::new().unwrap();
    let config = test_config(&temp);
    seed_system(&config, "sk-test");
    let paths = config.paths.clone();
    let profile_before = read(&paths.profile);
    let bashrc_before = read(&paths.bashrc);
    let installer = Installer::new(config, FakeRunner::with_versions(None), true);

    installer.install(false).unwrap();
    let report = installer.uninstall().unwrap();

    assert!(report.bind_script_removed);
    assert!(report.api_key_removed);
    assert!(report.package_removed);
    assert!(report.profile_cleaned);
    assert!(report.bashrc_cleaned);
    assert!(installer.runner().called("dpkg -r sgpt"));

    assert!(!paths.bind_script.exists());
    assert!(!paths.api_key_file.exists());
    assert_eq!(read(&paths.profile), profile_before);
    assert_eq!(read(&paths.bashrc), bashrc_before);
}

#[test]
fn uninstall_on_fresh_system_succeeds() {
    let temp = TempDir::new().unwrap();
    let config = test_config(&temp);
    let paths = config.paths.clone();
    let runner = FakeRunner::new().reply("dpkg -r", false, "");
    let installer = Installer::new(config, runner, true);

    let report = installer.uninstall().unwrap();

    assert_eq!(report, Default::default());
    assert!(!paths.profile.exists());
    assert!(!paths.bashrc.exists());
}

#[test]
fn uninstall_keeps_surrounding_content() {
    let temp = TempDir::new().unwrap();
    let config = test_config(&temp);
    let paths = config.paths.clone();
    write(
        &paths.bashrc,
        &format!("A\n{START}\nsource /old/path\n{END}\nB\n"),
    );
    let installer = Installer::new(config, FakeRunner::new(), true);

    installer.uninstall().unwrap();

    assert_eq!(read(&paths.bashrc), "A\nB\n");
}

#[test]
fn status_reflects_installation() {
    let temp = TempDir::new().unwrap();
    let config = test_config(&temp);
    seed_system(&config, "sk-test");
    let runner = FakeRunner::with_versions(Some("2.17.1"));

    let before = Installer::new(config.clone(), FakeRunner::with_versions(None), false)
        .status()
        .unwrap();
    assert!(!before.is_complete());
    assert!(!before.profile.1);

    let installer = Installer::new(config.clone(), runner, true);
    installer.install(false).unwrap();

    let after = Installer::new(config, FakeRunner::with_versions(Some("2.17.1")), false)
        .status()
        .unwrap();
    assert!(after.is_complete());
    assert_eq!(after.installed_version.as_deref(), Some("2.17.1"));
}

#[test]
fn shared_install_dir_keeps_unrelated_files() {
    let temp = TempDir::new().unwrap();
    let mut config = test_config(&temp);
    let shared = temp.path().join("tmp");
    write(&shared.join("other-tool.lock"), "1234\n");
    config.paths.install_dir = shared.clone();
    seed_system(&config, "sk-test");
    let installer = Installer::new(config, FakeRunner::with_versions(None), true);

    installer.install(false).unwrap();

    let deb = shared.join("sgpt").join("sgpt-latest.deb");
    assert!(installer
        .runner()
        .calls()
        .iter()
        .any(|c| c.starts_with("curl -fL") && c.ends_with(&format!("-o {}", deb.display()))));
    assert!(!shared.join("sgpt").exists());
    assert_eq!(read(&shared.join("other-tool.lock")), "1234\n");
}
