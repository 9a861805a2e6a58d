use std::path::Path;
use std::sync::Mutex;
use tempfile::tempdir;
use turix::app::{cli_help_lines, parse_cli_verb, run_cli, CliVerb};
use turix::config::mark_setup_completed;

static ENV_LOCK: Mutex<()> = Mutex::new(());

struct HomeGuard {
    old_home: Option<std::ffi::OsString>,
}

impl HomeGuard {
    fn set(home: &Path) -> Self {
        let old_home = std::env::var_os("HOME");
        std::env::set_var("HOME", home);
        Self { old_home }
    }
}

impl Drop for HomeGuard {
    fn drop(&mut self) {
        if let Some(old_home) = self.old_home.take() {
            std::env::set_var("HOME", old_home);
        } else {
            std::env::remove_var("HOME");
        }
    }
}

#[test]
fn app_cli_module_parses_the_command_surface() {
    assert_eq!(parse_cli_verb("run"), CliVerb::Run);
    assert_eq!(parse_cli_verb("setup"), CliVerb::Setup);
    assert_eq!(parse_cli_verb("reset-setup"), CliVerb::ResetSetup);
    assert_eq!(parse_cli_verb("status"), CliVerb::Status);
    assert_eq!(parse_cli_verb("help"), CliVerb::Help);
    assert_eq!(parse_cli_verb("doctor"), CliVerb::Unknown);
}

#[test]
fn app_cli_module_help_covers_every_command() {
    let help = cli_help_lines().join("\n");
    for verb in ["run", "setup", "reset-setup", "status", "help"] {
        assert!(help.contains(verb), "help misses `{verb}`");
    }
}

#[test]
fn app_cli_module_status_reports_unconfigured_state() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|err| err.into_inner());
    let temp = tempdir().expect("temp dir");
    let _home = HomeGuard::set(temp.path());

    let output = run_cli(vec!["status".to_string()]).expect("status succeeds");
    assert!(output.contains("configuration: absent"));
    assert!(output.contains("setup completed: false"));
    assert!(output.contains(".turix/config.json"));
}

#[test]
fn app_cli_module_status_reflects_the_marker() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|err| err.into_inner());
    let temp = tempdir().expect("temp dir");
    let _home = HomeGuard::set(temp.path());

    mark_setup_completed().expect("mark setup");
    let output = run_cli(vec!["status".to_string()]).expect("status succeeds");
    assert!(output.contains("setup completed: true"));
}

#[test]
fn app_cli_module_reset_setup_clears_the_marker() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|err| err.into_inner());
    let temp = tempdir().expect("temp dir");
    let _home = HomeGuard::set(temp.path());

    mark_setup_completed().expect("mark setup");
    let output = run_cli(vec!["reset-setup".to_string()]).expect("reset succeeds");
    assert!(output.contains("setup reset"));

    let status = run_cli(vec!["status".to_string()]).expect("status succeeds");
    assert!(status.contains("setup completed: false"));

    // A second reset with no marker present still succeeds.
    run_cli(vec!["reset-setup".to_string()]).expect("reset when absent");
}

#[test]
fn app_cli_module_interactive_commands_refuse_non_terminals() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|err| err.into_inner());
    let temp = tempdir().expect("temp dir");
    let _home = HomeGuard::set(temp.path());

    // Test binaries run without a tty, so the TUI commands must bail out
    // before touching the terminal.
    let err = run_cli(Vec::new()).expect_err("default run needs a terminal");
    assert!(err.contains("interactive terminal"));
    let err = run_cli(vec!["setup".to_string()]).expect_err("setup needs a terminal");
    assert!(err.contains("interactive terminal"));
}
