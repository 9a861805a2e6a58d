pub mod flow;
pub mod probe;
pub mod state;
pub mod tui;

pub use flow::{continue_gate, next_step, FlowEffect, Gate, SetupFlow, SetupStep};
pub use probe::{ConnectionProbe, ProbeReport, SimulatedProbe};
pub use state::{
    ConnectionStatus, ModelAssignment, OllamaConnectionKind, SetupMode, SetupState,
    ALL_SETUP_MODES, DEFAULT_GOOGLE_MODEL, DEFAULT_LOCAL_MODEL, DEFAULT_OLLAMA_PORT,
    GOOGLE_MODEL_CATALOG,
};
pub use tui::{run_setup_wizard, WizardExit};
