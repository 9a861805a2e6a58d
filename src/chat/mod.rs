pub mod session;
pub mod tui;

pub use session::{
    is_chat_exit_command, AgentBackend, AgentStub, ChatMessage, ChatSession, CHAT_EXIT_COMMANDS,
};
pub use tui::run_chat_tui;
