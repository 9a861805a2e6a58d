use crate::config::{
    mark_setup_completed, save_configuration, ModelRole, ProviderKind, ALL_MODEL_ROLES,
};
use crate::host::PermissionProbe;
use crate::setup::flow::{continue_gate, FlowEffect, Gate, SetupFlow, SetupStep};
use crate::setup::probe::{ConnectionProbe, ProbeReport};
use crate::setup::state::{
    SetupState, ALL_SETUP_MODES, DEFAULT_LOCAL_MODEL, GOOGLE_MODEL_CATALOG,
};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{cursor, execute};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const UI_POLL_INTERVAL: Duration = Duration::from_millis(60);

const HINT_TEXT: &str = "Up/Down move | Enter activate | Esc back | Ctrl-C cancel";
const WELCOME_HINT_TEXT: &str = "Up/Down move | Enter activate | Ctrl-C cancel";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardExit {
    Saved,
    Canceled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProbeTarget {
    Ollama,
    Google,
}

struct ProbeWorker {
    target: ProbeTarget,
    result_rx: Receiver<ProbeReport>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditTarget {
    OllamaHost,
    OllamaPort,
    GoogleApiKey,
}

struct EditField {
    target: EditTarget,
    buffer: String,
}

struct WizardUi {
    flow: SetupFlow,
    state: SetupState,
    selected: usize,
    editing: Option<EditField>,
    feedback: Option<String>,
    probe_worker: Option<ProbeWorker>,
}

impl WizardUi {
    fn new(state: SetupState) -> Self {
        Self {
            flow: SetupFlow::new(),
            state,
            selected: 0,
            editing: None,
            feedback: None,
            probe_worker: None,
        }
    }

    fn row_count(&self) -> usize {
        match self.flow.current() {
            SetupStep::Welcome => 2,
            SetupStep::Permissions => 2,
            SetupStep::LlmChoice => ALL_SETUP_MODES.len(),
            SetupStep::OllamaConfig => 6,
            SetupStep::GoogleConfig => 4,
            // One row per role, apply-recommended, continue.
            SetupStep::ModelAssignment => ALL_MODEL_ROLES.len() + 2,
            SetupStep::OptionalFeatures => 5,
            SetupStep::Summary => 1,
            SetupStep::Completed => 0,
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.row_count();
        if len == 0 {
            self.selected = 0;
            return;
        }
        let current = self.selected as isize;
        let next = (current + delta).clamp(0, len as isize - 1);
        self.selected = next as usize;
    }

    fn enter_step(&mut self, permissions: &dyn PermissionProbe) {
        self.selected = 0;
        self.feedback = None;
        if self.flow.current() == SetupStep::Permissions {
            self.state.permissions = permissions.current();
        }
    }

    fn advance(&mut self, permissions: &dyn PermissionProbe) -> Option<WizardExit> {
        match self.flow.advance(&self.state) {
            FlowEffect::Moved(_) => {
                self.enter_step(permissions);
                None
            }
            FlowEffect::Blocked(reason) => {
                self.feedback = Some(reason.to_string());
                None
            }
            FlowEffect::Finish => match self.persist() {
                Ok(()) => {
                    self.flow.complete();
                    Some(WizardExit::Saved)
                }
                Err(message) => {
                    self.feedback = Some(message);
                    None
                }
            },
        }
    }

    /// Welcome-screen shortcut: persist the untouched defaults and jump
    /// straight to the terminal step.
    fn skip_with_defaults(&mut self) -> Option<WizardExit> {
        match self.persist() {
            Ok(()) => {
                self.flow.complete();
                Some(WizardExit::Saved)
            }
            Err(message) => {
                self.feedback = Some(message);
                None
            }
        }
    }

    fn persist(&self) -> Result<(), String> {
        let configuration = self.state.build_configuration();
        save_configuration(&configuration)
            .map_err(|err| format!("failed to save configuration: {err}"))?;
        mark_setup_completed().map_err(|err| format!("failed to record setup completion: {err}"))
    }

    fn begin_probe(&mut self, target: ProbeTarget, probe: &Arc<dyn ConnectionProbe>) {
        let in_flight = match target {
            ProbeTarget::Ollama => self.state.ollama_status.is_testing(),
            ProbeTarget::Google => self.state.google_status.is_testing(),
        };
        if in_flight {
            return;
        }

        let (tx, rx) = mpsc::channel();
        let worker_probe = Arc::clone(probe);
        match target {
            ProbeTarget::Ollama => {
                self.state.begin_ollama_test();
                let base_url = self.state.ollama_base_url();
                thread::spawn(move || {
                    let _ = tx.send(worker_probe.probe_ollama(&base_url));
                });
            }
            ProbeTarget::Google => {
                self.state.begin_google_test();
                let api_key = self.state.google_api_key.clone();
                thread::spawn(move || {
                    let _ = tx.send(worker_probe.probe_google(&api_key));
                });
            }
        }
        self.probe_worker = Some(ProbeWorker {
            target,
            result_rx: rx,
        });
    }

    fn poll_probe(&mut self) {
        let Some(worker) = self.probe_worker.take() else {
            return;
        };
        match worker.result_rx.try_recv() {
            Ok(report) => match worker.target {
                ProbeTarget::Ollama => self.state.apply_ollama_probe(report),
                ProbeTarget::Google => self.state.apply_google_probe(report),
            },
            Err(mpsc::TryRecvError::Empty) => self.probe_worker = Some(worker),
            // A dead worker resolves like a failed test; re-running it is
            // always possible.
            Err(mpsc::TryRecvError::Disconnected) => match worker.target {
                ProbeTarget::Ollama => self.state.apply_ollama_probe(ProbeReport::failed(
                    "connection test worker exited unexpectedly",
                )),
                ProbeTarget::Google => self.state.apply_google_probe(ProbeReport::failed(
                    "connection test worker exited unexpectedly",
                )),
            },
        }
    }

    fn start_edit(&mut self, target: EditTarget) {
        let buffer = match target {
            EditTarget::OllamaHost => self.state.ollama_host.clone(),
            EditTarget::OllamaPort => self.state.ollama_port.clone(),
            EditTarget::GoogleApiKey => self.state.google_api_key.clone(),
        };
        self.editing = Some(EditField { target, buffer });
    }

    fn commit_edit(&mut self) {
        if let Some(edit) = self.editing.take() {
            match edit.target {
                EditTarget::OllamaHost => self.state.ollama_host = edit.buffer,
                EditTarget::OllamaPort => self.state.ollama_port = edit.buffer,
                EditTarget::GoogleApiKey => self.state.google_api_key = edit.buffer,
            }
        }
    }

    fn cycle_ollama_model(&mut self) {
        if self.state.ollama_models.is_empty() {
            return;
        }
        let models = &self.state.ollama_models;
        let next = match models
            .iter()
            .position(|model| *model == self.state.selected_ollama_model)
        {
            Some(index) => (index + 1) % models.len(),
            None => 0,
        };
        self.state.selected_ollama_model = models[next].clone();
    }

    fn cycle_google_model(&mut self) {
        let names: Vec<&str> = GOOGLE_MODEL_CATALOG.iter().map(|(name, _)| *name).collect();
        let next = match names
            .iter()
            .position(|name| *name == self.state.selected_google_model)
        {
            Some(index) => (index + 1) % names.len(),
            None => 0,
        };
        self.state.selected_google_model = names[next].to_string();
    }

    fn cycle_assignment(&mut self, role: ModelRole) {
        let options = assignment_options(&self.state);
        let current = self.state.assignment(role).clone();
        let next = match options
            .iter()
            .position(|(provider, model)| *provider == current.provider && *model == current.model)
        {
            Some(index) => (index + 1) % options.len(),
            None => 0,
        };
        let (provider, model) = &options[next];
        self.state.assign(role, *provider, model);
    }
}

/// Every (provider, model) pair the assignment screen can cycle through:
/// discovered Ollama models (or the baseline local model when none were
/// discovered) followed by the Google catalog.
fn assignment_options(state: &SetupState) -> Vec<(ProviderKind, String)> {
    let mut options = Vec::new();
    if state.ollama_models.is_empty() {
        options.push((ProviderKind::Ollama, DEFAULT_LOCAL_MODEL.to_string()));
    } else {
        for model in &state.ollama_models {
            options.push((ProviderKind::Ollama, model.clone()));
        }
    }
    for (name, _) in GOOGLE_MODEL_CATALOG {
        options.push((ProviderKind::GoogleFlash, name.to_string()));
    }
    options
}

fn mask_api_key(key: &str) -> String {
    if key.is_empty() {
        "<not set>".to_string()
    } else {
        "*".repeat(key.chars().count())
    }
}

pub fn run_setup_wizard(
    probe: Arc<dyn ConnectionProbe>,
    permissions: &dyn PermissionProbe,
) -> Result<WizardExit, String> {
    let mut terminal = setup_terminal()?;
    let mut ui = WizardUi::new(SetupState::new());

    let result = run_event_loop(&mut terminal, &mut ui, probe, permissions);
    teardown_terminal(&mut terminal)?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ui: &mut WizardUi,
    probe: Arc<dyn ConnectionProbe>,
    permissions: &dyn PermissionProbe,
) -> Result<WizardExit, String> {
    loop {
        ui.poll_probe();
        draw_wizard(terminal, ui)?;

        if !event::poll(UI_POLL_INTERVAL).map_err(|e| format!("failed to poll events: {e}"))? {
            continue;
        }
        let Event::Key(key) = event::read().map_err(|e| format!("failed to read event: {e}"))?
        else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(WizardExit::Canceled);
        }

        if ui.editing.is_some() {
            handle_edit_key(ui, key.code);
            continue;
        }

        match key.code {
            KeyCode::Up => ui.move_selection(-1),
            KeyCode::Down => ui.move_selection(1),
            KeyCode::Esc => {
                if ui.flow.current() == SetupStep::Welcome {
                    return Ok(WizardExit::Canceled);
                }
                if ui.flow.back() {
                    ui.enter_step(permissions);
                }
            }
            KeyCode::Enter => {
                if let Some(exit) = activate_row(ui, &probe, permissions) {
                    return Ok(exit);
                }
            }
            _ => {}
        }
    }
}

fn handle_edit_key(ui: &mut WizardUi, code: KeyCode) {
    match code {
        KeyCode::Enter => ui.commit_edit(),
        KeyCode::Esc => ui.editing = None,
        KeyCode::Backspace => {
            if let Some(edit) = ui.editing.as_mut() {
                edit.buffer.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(edit) = ui.editing.as_mut() {
                edit.buffer.push(c);
            }
        }
        _ => {}
    }
}

fn activate_row(
    ui: &mut WizardUi,
    probe: &Arc<dyn ConnectionProbe>,
    permissions: &dyn PermissionProbe,
) -> Option<WizardExit> {
    match ui.flow.current() {
        SetupStep::Welcome => match ui.selected {
            0 => ui.advance(permissions),
            _ => ui.skip_with_defaults(),
        },
        SetupStep::Permissions => match ui.selected {
            0 => {
                ui.state.permissions = permissions.current();
                ui.feedback = Some("permissions refreshed".to_string());
                None
            }
            _ => ui.advance(permissions),
        },
        SetupStep::LlmChoice => {
            ui.state.mode = ALL_SETUP_MODES[ui.selected.min(ALL_SETUP_MODES.len() - 1)];
            ui.advance(permissions)
        }
        SetupStep::OllamaConfig => match ui.selected {
            0 => {
                ui.state.ollama_connection = ui.state.ollama_connection.toggled();
                None
            }
            1 => {
                ui.start_edit(EditTarget::OllamaHost);
                None
            }
            2 => {
                ui.start_edit(EditTarget::OllamaPort);
                None
            }
            3 => {
                ui.begin_probe(ProbeTarget::Ollama, probe);
                None
            }
            4 => {
                ui.cycle_ollama_model();
                None
            }
            _ => ui.advance(permissions),
        },
        SetupStep::GoogleConfig => match ui.selected {
            0 => {
                ui.start_edit(EditTarget::GoogleApiKey);
                None
            }
            1 => {
                ui.cycle_google_model();
                None
            }
            2 => {
                ui.begin_probe(ProbeTarget::Google, probe);
                None
            }
            _ => ui.advance(permissions),
        },
        SetupStep::ModelAssignment => {
            let roles = ALL_MODEL_ROLES.len();
            if ui.selected < roles {
                ui.cycle_assignment(ALL_MODEL_ROLES[ui.selected]);
                None
            } else if ui.selected == roles {
                ui.state.apply_recommended_models(ui.state.mode);
                ui.feedback = Some("recommended models applied".to_string());
                None
            } else {
                ui.advance(permissions)
            }
        }
        SetupStep::OptionalFeatures => match ui.selected {
            0 => {
                ui.state.enable_discord = !ui.state.enable_discord;
                None
            }
            1 => {
                ui.state.enable_notifications = !ui.state.enable_notifications;
                None
            }
            2 => {
                ui.state.start_minimized = !ui.state.start_minimized;
                None
            }
            3 => {
                ui.state.launch_at_login = !ui.state.launch_at_login;
                None
            }
            _ => ui.advance(permissions),
        },
        SetupStep::Summary => ui.advance(permissions),
        SetupStep::Completed => None,
    }
}

fn draw_wizard(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ui: &WizardUi,
) -> Result<(), String> {
    terminal
        .draw(|frame| {
            let sections = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Min(8),
                    Constraint::Length(3),
                    Constraint::Length(3),
                ])
                .split(frame.area());

            let step = ui.flow.current();
            let header = Paragraph::new(vec![
                Line::raw("TuriX Setup"),
                Line::raw(format!("step: {}", step.title())),
            ])
            .block(
                Block::default()
                    .title("Setup")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            );
            frame.render_widget(header, sections[0]);

            let body = Paragraph::new(step_rows(ui))
                .block(Block::default().title(step.title()).borders(Borders::ALL))
                .wrap(Wrap { trim: false });
            frame.render_widget(body, sections[1]);

            let status = Paragraph::new(status_line(ui)).block(
                Block::default()
                    .title("Status")
                    .borders(Borders::ALL)
                    .border_style(if ui.feedback.is_some() {
                        Style::default()
                            .fg(Color::Magenta)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default()
                    }),
            );
            frame.render_widget(status, sections[2]);

            let hint = if step == SetupStep::Welcome {
                WELCOME_HINT_TEXT
            } else {
                HINT_TEXT
            };
            let hint_widget =
                Paragraph::new(hint).block(Block::default().title("Keys").borders(Borders::ALL));
            frame.render_widget(hint_widget, sections[3]);
        })
        .map_err(|e| format!("failed to render setup UI: {e}"))?;
    Ok(())
}

fn status_line(ui: &WizardUi) -> String {
    if let Some(edit) = &ui.editing {
        let shown = match edit.target {
            EditTarget::GoogleApiKey => mask_api_key(&edit.buffer),
            _ => edit.buffer.clone(),
        };
        return format!("editing: {shown}█ (Enter saves, Esc cancels)");
    }
    if let Some(feedback) = &ui.feedback {
        return feedback.clone();
    }
    match continue_gate(ui.flow.current(), &ui.state) {
        Gate::Open => "Enter on the last row continues.".to_string(),
        Gate::Closed(reason) => reason.to_string(),
    }
}

fn step_rows(ui: &WizardUi) -> Vec<Line<'static>> {
    let state = &ui.state;
    let labels: Vec<String> = match ui.flow.current() {
        SetupStep::Welcome => vec![
            "Get Started".to_string(),
            "Skip Setup (use default configuration)".to_string(),
        ],
        SetupStep::Permissions => vec![
            format!(
                "Refresh permissions  [screen recording: {} | accessibility: {} | notifications: {}]",
                grant_mark(state.permissions.screen_recording),
                grant_mark(state.permissions.accessibility),
                grant_mark(state.permissions.notifications),
            ),
            "Continue".to_string(),
        ],
        SetupStep::LlmChoice => ALL_SETUP_MODES
            .iter()
            .map(|mode| {
                let marker = if *mode == state.mode { "(x)" } else { "( )" };
                format!("{marker} {}: {}", mode.display_name(), mode.summary())
            })
            .collect(),
        SetupStep::OllamaConfig => vec![
            format!(
                "Connection: {}",
                state.ollama_connection.display_name()
            ),
            format!("Host: {}", render_or_placeholder(&state.ollama_host)),
            format!("Port: {}", state.ollama_port),
            format!(
                "Test connection  {} {}",
                state.ollama_status.icon(),
                state.ollama_status.message()
            ),
            format!(
                "Model: {}  ({} discovered)",
                render_or_placeholder(&state.selected_ollama_model),
                state.ollama_models.len()
            ),
            "Continue".to_string(),
        ],
        SetupStep::GoogleConfig => vec![
            format!("API key: {}", mask_api_key(&state.google_api_key)),
            format!("Model: {}", google_model_label(&state.selected_google_model)),
            format!(
                "Test connection  {} {}",
                state.google_status.icon(),
                state.google_status.message()
            ),
            "Continue".to_string(),
        ],
        SetupStep::ModelAssignment => {
            let mut rows: Vec<String> = ALL_MODEL_ROLES
                .iter()
                .map(|role| {
                    let assignment = state.assignment(*role);
                    format!(
                        "{:<8} {} / {}  ({})",
                        role.display_name(),
                        assignment.provider.display_name(),
                        assignment.model,
                        role.summary()
                    )
                })
                .collect();
            rows.push(format!(
                "Use recommended models for {}",
                state.mode.display_name()
            ));
            rows.push("Continue".to_string());
            rows
        }
        SetupStep::OptionalFeatures => vec![
            format!("[{}] Discord integration", toggle_mark(state.enable_discord)),
            format!(
                "[{}] Desktop notifications",
                toggle_mark(state.enable_notifications)
            ),
            format!("[{}] Start minimized", toggle_mark(state.start_minimized)),
            format!("[{}] Launch at login", toggle_mark(state.launch_at_login)),
            "Continue".to_string(),
        ],
        SetupStep::Summary => vec![format!(
            "Finish Setup  (mode: {}, estimated RAM: {})",
            state.mode.display_name(),
            estimated_ram(state)
        )],
        SetupStep::Completed => Vec::new(),
    };

    let mut lines: Vec<Line<'static>> = labels
        .into_iter()
        .enumerate()
        .map(|(index, label)| {
            if index == ui.selected {
                Line::styled(
                    format!("> {label}"),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Line::raw(format!("  {label}"))
            }
        })
        .collect();

    if ui.flow.current() == SetupStep::Summary {
        lines.push(Line::raw(String::new()));
        for role in ALL_MODEL_ROLES {
            let assignment = ui.state.assignment(role);
            lines.push(Line::raw(format!(
                "  {:<8} {} / {}",
                role.display_name(),
                assignment.provider,
                assignment.model
            )));
        }
    }
    lines
}

fn grant_mark(granted: bool) -> &'static str {
    if granted {
        "granted"
    } else {
        "missing"
    }
}

fn toggle_mark(enabled: bool) -> &'static str {
    if enabled {
        "x"
    } else {
        " "
    }
}

fn render_or_placeholder(value: &str) -> String {
    if value.is_empty() {
        "<not set>".to_string()
    } else {
        value.to_string()
    }
}

fn google_model_label(name: &str) -> String {
    GOOGLE_MODEL_CATALOG
        .iter()
        .find(|(wire, _)| *wire == name)
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| name.to_string())
}

/// Rough memory estimate shown on the summary: each locally-hosted role
/// costs about 4GB of resident model weights.
fn estimated_ram(state: &SetupState) -> String {
    let local_roles = ALL_MODEL_ROLES
        .iter()
        .filter(|role| state.assignment(**role).provider == ProviderKind::Ollama)
        .count();
    if local_roles > 0 {
        format!("~{}GB", local_roles * 4)
    } else {
        "Minimal".to_string()
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, String> {
    enable_raw_mode().map_err(|e| format!("failed to enable raw mode: {e}"))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, cursor::Hide)
        .map_err(|e| format!("failed to enter alternate screen: {e}"))?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(|e| format!("failed to initialize terminal: {e}"))
}

fn teardown_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<(), String> {
    disable_raw_mode().map_err(|e| format!("failed to disable raw mode: {e}"))?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, cursor::Show)
        .map_err(|e| format!("failed to leave alternate screen: {e}"))?;
    terminal
        .show_cursor()
        .map_err(|e| format!("failed to restore cursor: {e}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::state::ConnectionStatus;

    #[test]
    fn mask_api_key_hides_every_character() {
        assert_eq!(mask_api_key(""), "<not set>");
        assert_eq!(mask_api_key("abc"), "***");
    }

    #[test]
    fn assignment_options_fall_back_to_baseline_local_model() {
        let state = SetupState::new();
        let options = assignment_options(&state);
        assert_eq!(options[0], (ProviderKind::Ollama, DEFAULT_LOCAL_MODEL.to_string()));
        assert_eq!(options.len(), 1 + GOOGLE_MODEL_CATALOG.len());
    }

    #[test]
    fn assignment_options_list_discovered_models_first() {
        let mut state = SetupState::new();
        state.ollama_models = vec!["qwen2.5:latest".to_string(), "mistral:latest".to_string()];
        let options = assignment_options(&state);
        assert_eq!(options[0].1, "qwen2.5:latest");
        assert_eq!(options[1].1, "mistral:latest");
        assert_eq!(options.len(), 2 + GOOGLE_MODEL_CATALOG.len());
    }

    #[test]
    fn cycling_a_role_walks_all_options() {
        let mut ui = WizardUi::new(SetupState::new());
        let options = assignment_options(&ui.state);
        let start = ui.state.assignment(ModelRole::Planner).clone();
        for _ in 0..options.len() {
            ui.cycle_assignment(ModelRole::Planner);
        }
        assert_eq!(*ui.state.assignment(ModelRole::Planner), start);
    }

    #[test]
    fn selection_clamps_to_row_count() {
        let mut ui = WizardUi::new(SetupState::new());
        ui.move_selection(-1);
        assert_eq!(ui.selected, 0);
        for _ in 0..10 {
            ui.move_selection(1);
        }
        assert_eq!(ui.selected, ui.row_count() - 1);
    }

    #[test]
    fn estimated_ram_counts_local_roles() {
        let mut state = SetupState::new();
        // Hybrid default: three local roles.
        assert_eq!(estimated_ram(&state), "~12GB");
        state.apply_recommended_models(crate::setup::state::SetupMode::Cloud);
        assert_eq!(estimated_ram(&state), "Minimal");
    }

    #[test]
    fn probe_worker_gate_blocks_double_start() {
        let mut ui = WizardUi::new(SetupState::new());
        ui.state.ollama_status = ConnectionStatus::Testing;
        let probe: Arc<dyn ConnectionProbe> =
            Arc::new(crate::setup::probe::SimulatedProbe::immediate());
        ui.begin_probe(ProbeTarget::Ollama, &probe);
        assert!(ui.probe_worker.is_none());
    }
}
