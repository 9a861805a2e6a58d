use crate::chat::session::{is_chat_exit_command, AgentBackend, ChatSession};
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
use std::time::{Duration, Instant};

const PROCESSING_FRAMES: [&str; 4] = ["|", "/", "-", "\\"];
const UI_POLL_INTERVAL: Duration = Duration::from_millis(60);
const SPINNER_TICK_INTERVAL: Duration = Duration::from_millis(120);
const CURSOR_BLINK_INTERVAL: Duration = Duration::from_millis(500);

struct ReplyWorker {
    result_rx: Receiver<String>,
}

struct TuiState {
    input: String,
    processing: Option<ReplyWorker>,
    spinner_index: usize,
    last_spinner_tick: Instant,
    cursor_visible: bool,
    last_cursor_tick: Instant,
}

impl TuiState {
    fn new() -> Self {
        Self {
            input: String::new(),
            processing: None,
            spinner_index: 0,
            last_spinner_tick: Instant::now(),
            cursor_visible: true,
            last_cursor_tick: Instant::now(),
        }
    }

    fn spinner_frame(&self) -> &'static str {
        PROCESSING_FRAMES[self.spinner_index % PROCESSING_FRAMES.len()]
    }

    fn advance_spinner_if_needed(&mut self) {
        if self.processing.is_some() && self.last_spinner_tick.elapsed() >= SPINNER_TICK_INTERVAL {
            self.spinner_index = (self.spinner_index + 1) % PROCESSING_FRAMES.len();
            self.last_spinner_tick = Instant::now();
        }
    }

    fn status_line(&self) -> String {
        if self.processing.is_some() {
            return format!("agent> thinking {}", self.spinner_frame());
        }
        "enter text and press Enter; use /exit to quit".to_string()
    }

    fn advance_cursor_blink_if_needed(&mut self) {
        if self.last_cursor_tick.elapsed() >= CURSOR_BLINK_INTERVAL {
            self.cursor_visible = !self.cursor_visible;
            self.last_cursor_tick = Instant::now();
        }
    }

    fn cursor_suffix(&self) -> &'static str {
        if self.cursor_visible {
            "█"
        } else {
            " "
        }
    }
}

pub fn run_chat_tui(
    mut session: ChatSession,
    backend: Arc<dyn AgentBackend>,
) -> Result<(), String> {
    let mut terminal = setup_terminal()?;
    let mut state = TuiState::new();

    let result = run_event_loop(&mut terminal, &mut session, &mut state, backend);
    teardown_terminal(&mut terminal)?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    session: &mut ChatSession,
    state: &mut TuiState,
    backend: Arc<dyn AgentBackend>,
) -> Result<(), String> {
    loop {
        state.advance_spinner_if_needed();
        state.advance_cursor_blink_if_needed();
        check_reply(session, state)?;
        draw_chat_ui(terminal, session, state)?;

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
            break;
        }

        match key.code {
            KeyCode::Esc => break,
            KeyCode::Enter => {
                let message = state.input.trim().to_string();
                state.input.clear();
                if message.is_empty() {
                    continue;
                }
                if is_chat_exit_command(&message) {
                    break;
                }
                // The input stays disabled until the pending reply lands.
                if state.processing.is_some() {
                    continue;
                }

                session.push_user(&message);

                let worker_backend = Arc::clone(&backend);
                let (tx, rx) = mpsc::channel();
                thread::spawn(move || {
                    let _ = tx.send(worker_backend.respond(&message));
                });

                state.processing = Some(ReplyWorker { result_rx: rx });
                state.spinner_index = 0;
                state.last_spinner_tick = Instant::now();
            }
            KeyCode::Backspace => {
                state.input.pop();
            }
            KeyCode::Char(c) => {
                if state.processing.is_none() {
                    state.input.push(c);
                }
            }
            _ => {}
        }
    }

    Ok(())
}

fn check_reply(session: &mut ChatSession, state: &mut TuiState) -> Result<(), String> {
    let Some(worker) = state.processing.take() else {
        return Ok(());
    };

    match worker.result_rx.try_recv() {
        Ok(reply) => {
            session.push_agent(&reply);
        }
        Err(mpsc::TryRecvError::Empty) => {
            state.processing = Some(worker);
        }
        Err(mpsc::TryRecvError::Disconnected) => {
            return Err("agent reply worker disconnected unexpectedly".to_string());
        }
    }

    Ok(())
}

fn draw_chat_ui(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    session: &ChatSession,
    state: &TuiState,
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

            let header = Paragraph::new(vec![
                Line::raw("TuriX"),
                Line::raw(format!("conversation_id={}", session.conversation_id)),
            ])
            .block(
                Block::default()
                    .title("Chat")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            );
            frame.render_widget(header, sections[0]);

            let transcript = session
                .messages()
                .iter()
                .map(|message| {
                    let stamp = message.sent_at.format("%H:%M");
                    if message.from_user {
                        Line::styled(
                            format!("[{stamp}] you> {}", message.content),
                            Style::default().fg(Color::Yellow),
                        )
                    } else {
                        Line::styled(
                            format!("[{stamp}] agent> {}", message.content),
                            Style::default().fg(Color::Green),
                        )
                    }
                })
                .collect::<Vec<_>>();
            let transcript_widget = Paragraph::new(transcript)
                .block(Block::default().title("Transcript").borders(Borders::ALL))
                .wrap(Wrap { trim: false });
            frame.render_widget(transcript_widget, sections[1]);

            let status_widget = Paragraph::new(state.status_line()).block(
                Block::default()
                    .title("Status")
                    .borders(Borders::ALL)
                    .border_style(if state.processing.is_some() {
                        Style::default()
                            .fg(Color::Magenta)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default()
                    }),
            );
            frame.render_widget(status_widget, sections[2]);

            let input_widget =
                Paragraph::new(format!("you> {}{}", state.input, state.cursor_suffix()))
                    .block(Block::default().title("Input").borders(Borders::ALL));
            frame.render_widget(input_widget, sections[3]);
        })
        .map_err(|e| format!("failed to render chat UI: {e}"))?;

    Ok(())
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
    use super::{TuiState, CURSOR_BLINK_INTERVAL, PROCESSING_FRAMES};
    use std::time::Instant;

    #[test]
    fn spinner_frame_cycles_across_ascii_frames() {
        let mut state = TuiState::new();
        assert_eq!(state.spinner_frame(), PROCESSING_FRAMES[0]);
        state.spinner_index = 1;
        assert_eq!(state.spinner_frame(), PROCESSING_FRAMES[1]);
        state.spinner_index = 3;
        assert_eq!(state.spinner_frame(), PROCESSING_FRAMES[3]);
    }

    #[test]
    fn cursor_blink_toggles_visibility_after_interval() {
        let mut state = TuiState::new();
        assert_eq!(state.cursor_suffix(), "█");

        state.last_cursor_tick = Instant::now() - CURSOR_BLINK_INTERVAL;
        state.advance_cursor_blink_if_needed();
        assert_eq!(state.cursor_suffix(), " ");
    }

    #[test]
    fn idle_status_line_prompts_for_input() {
        let state = TuiState::new();
        assert!(state.status_line().contains("/exit"));
    }
}
