use crate::chat::{run_chat_tui, AgentStub, ChatSession};
use crate::config::{
    config_file_path, is_setup_completed, load_configuration, reset_setup, setup_marker_path,
};
use crate::host::EnvPermissionProbe;
use crate::setup::{run_setup_wizard, SimulatedProbe, WizardExit};
use std::io::IsTerminal;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliVerb {
    Run,
    Setup,
    ResetSetup,
    Status,
    Help,
    Unknown,
}

pub fn parse_cli_verb(input: &str) -> CliVerb {
    match input {
        "run" => CliVerb::Run,
        "setup" => CliVerb::Setup,
        "reset-setup" => CliVerb::ResetSetup,
        "status" => CliVerb::Status,
        "help" | "--help" | "-h" => CliVerb::Help,
        _ => CliVerb::Unknown,
    }
}

pub fn cli_help_lines() -> Vec<String> {
    vec![
        "Commands:".to_string(),
        "  run          Open the chat window, or the setup wizard on first launch (default)"
            .to_string(),
        "  setup        Run the setup wizard again and overwrite the saved configuration"
            .to_string(),
        "  reset-setup  Forget setup completion; the wizard runs on next launch".to_string(),
        "  status       Show configuration file location and setup state".to_string(),
        "  help         Show this help".to_string(),
    ]
}

pub fn run_cli(args: Vec<String>) -> Result<String, String> {
    let verb = match args.first() {
        Some(raw) => parse_cli_verb(raw),
        None => CliVerb::Run,
    };
    match verb {
        CliVerb::Run => cmd_run(),
        CliVerb::Setup => cmd_setup(),
        CliVerb::ResetSetup => cmd_reset_setup(),
        CliVerb::Status => cmd_status(),
        CliVerb::Help => Ok(cli_help_lines().join("\n")),
        CliVerb::Unknown => Err(format!(
            "unknown command `{}`\n{}",
            args.first().map(String::as_str).unwrap_or(""),
            cli_help_lines().join("\n")
        )),
    }
}

fn cmd_run() -> Result<String, String> {
    require_interactive_terminal()?;
    if !is_setup_completed() {
        match launch_wizard()? {
            WizardExit::Canceled => return Ok("setup canceled".to_string()),
            WizardExit::Saved => {}
        }
    }
    launch_chat()
}

fn cmd_setup() -> Result<String, String> {
    require_interactive_terminal()?;
    match launch_wizard()? {
        WizardExit::Canceled => Ok("setup canceled".to_string()),
        WizardExit::Saved => {
            let path = config_file_path().map_err(|err| err.to_string())?;
            Ok(format!("setup complete\nconfig={}", path.display()))
        }
    }
}

fn cmd_reset_setup() -> Result<String, String> {
    reset_setup().map_err(|err| err.to_string())?;
    Ok("setup reset; the wizard will run on next launch".to_string())
}

fn cmd_status() -> Result<String, String> {
    let config_path = config_file_path().map_err(|err| err.to_string())?;
    let marker_path = setup_marker_path().map_err(|err| err.to_string())?;
    let configured = match load_configuration() {
        Some(config) => format!(
            "present (brain: {} / {})",
            config.brain_llm.provider, config.brain_llm.model_name
        ),
        None => "absent".to_string(),
    };
    Ok(format!(
        "config={}\nconfiguration: {}\nsetup marker={}\nsetup completed: {}",
        config_path.display(),
        configured,
        marker_path.display(),
        is_setup_completed()
    ))
}

fn launch_wizard() -> Result<WizardExit, String> {
    run_setup_wizard(Arc::new(SimulatedProbe::new()), &EnvPermissionProbe)
}

fn launch_chat() -> Result<String, String> {
    let session = ChatSession::new();
    run_chat_tui(session, Arc::new(AgentStub::new()))?;
    Ok("chat session ended".to_string())
}

fn require_interactive_terminal() -> Result<(), String> {
    if std::io::stdout().is_terminal() {
        Ok(())
    } else {
        Err("this command requires an interactive terminal".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbs_parse_to_their_commands() {
        assert_eq!(parse_cli_verb("run"), CliVerb::Run);
        assert_eq!(parse_cli_verb("setup"), CliVerb::Setup);
        assert_eq!(parse_cli_verb("reset-setup"), CliVerb::ResetSetup);
        assert_eq!(parse_cli_verb("status"), CliVerb::Status);
        assert_eq!(parse_cli_verb("--help"), CliVerb::Help);
        assert_eq!(parse_cli_verb("bogus"), CliVerb::Unknown);
    }

    #[test]
    fn unknown_command_reports_help() {
        let err = run_cli(vec!["bogus".to_string()]).expect_err("unknown verb fails");
        assert!(err.contains("unknown command `bogus`"));
        assert!(err.contains("Commands:"));
    }

    #[test]
    fn help_lists_every_verb() {
        let output = run_cli(vec!["help".to_string()]).expect("help succeeds");
        for verb in ["run", "setup", "reset-setup", "status"] {
            assert!(output.contains(verb), "missing `{verb}` in help");
        }
    }
}
