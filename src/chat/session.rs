use chrono::{DateTime, Local};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

pub const CHAT_EXIT_COMMANDS: &[&str] = &["/exit", "exit", "quit"];

pub const AGENT_REPLY_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub content: String,
    pub from_user: bool,
    pub sent_at: DateTime<Local>,
}

/// Transcript for one chat window. The agent side is a stub until the
/// external agent process is wired in; the session only records messages.
#[derive(Debug, Clone)]
pub struct ChatSession {
    pub conversation_id: String,
    messages: Vec<ChatMessage>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            conversation_id: format!("chat-{}", now_nanos()),
            messages: Vec::new(),
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn push_user(&mut self, content: &str) {
        self.messages.push(ChatMessage {
            content: content.to_string(),
            from_user: true,
            sent_at: Local::now(),
        });
    }

    pub fn push_agent(&mut self, content: &str) {
        self.messages.push(ChatMessage {
            content: content.to_string(),
            from_user: false,
            sent_at: Local::now(),
        });
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

pub fn is_chat_exit_command(message: &str) -> bool {
    CHAT_EXIT_COMMANDS
        .iter()
        .any(|command| message.eq_ignore_ascii_case(command))
}

/// Seam for the agent process the chat window is meant to drive. Only the
/// stub exists in this repository.
pub trait AgentBackend: Send + Sync {
    fn respond(&self, prompt: &str) -> String;
}

/// Placeholder backend: waits a moment, then explains that no agent is
/// connected yet.
#[derive(Debug, Clone)]
pub struct AgentStub {
    delay: Duration,
}

impl AgentStub {
    pub fn new() -> Self {
        Self {
            delay: AGENT_REPLY_DELAY,
        }
    }

    pub fn immediate() -> Self {
        Self {
            delay: Duration::ZERO,
        }
    }
}

impl Default for AgentStub {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentBackend for AgentStub {
    fn respond(&self, prompt: &str) -> String {
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        format!(
            "I understand you want me to: {prompt}\n\nThis is a placeholder interface. \
             To execute tasks, the agent backend needs to be running; see the \
             documentation for connecting TuriX to the agent process."
        )
    }
}

fn now_nanos() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_commands_match_case_insensitively() {
        assert!(is_chat_exit_command("/exit"));
        assert!(is_chat_exit_command("EXIT"));
        assert!(is_chat_exit_command("Quit"));
        assert!(!is_chat_exit_command("hello"));
    }

    #[test]
    fn session_records_both_sides_of_the_transcript() {
        let mut session = ChatSession::new();
        session.push_user("open my calendar");
        session.push_agent("done");
        assert_eq!(session.messages().len(), 2);
        assert!(session.messages()[0].from_user);
        assert!(!session.messages()[1].from_user);
        assert!(session.conversation_id.starts_with("chat-"));
    }

    #[test]
    fn stub_reply_echoes_the_prompt() {
        let reply = AgentStub::immediate().respond("open my calendar");
        assert!(reply.contains("open my calendar"));
        assert!(reply.contains("placeholder"));
    }
}
