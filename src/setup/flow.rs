use crate::setup::state::{SetupMode, SetupState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupStep {
    Welcome,
    Permissions,
    LlmChoice,
    OllamaConfig,
    GoogleConfig,
    ModelAssignment,
    OptionalFeatures,
    Summary,
    Completed,
}

impl SetupStep {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Welcome => "welcome",
            Self::Permissions => "permissions",
            Self::LlmChoice => "llm_choice",
            Self::OllamaConfig => "ollama_config",
            Self::GoogleConfig => "google_config",
            Self::ModelAssignment => "model_assignment",
            Self::OptionalFeatures => "optional_features",
            Self::Summary => "summary",
            Self::Completed => "completed",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Welcome => "Welcome to TuriX",
            Self::Permissions => "Permissions",
            Self::LlmChoice => "Choose Your Setup",
            Self::OllamaConfig => "Ollama Connection",
            Self::GoogleConfig => "Google AI Connection",
            Self::ModelAssignment => "Model Assignments",
            Self::OptionalFeatures => "Optional Features",
            Self::Summary => "Summary",
            Self::Completed => "Setup Complete",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Open,
    Closed(&'static str),
}

/// Continue gate for a step against the current working set. Backward
/// navigation is never gated; only the forward control consults this.
pub fn continue_gate(step: SetupStep, state: &SetupState) -> Gate {
    match step {
        SetupStep::Permissions => {
            if state.permissions.required_granted() {
                Gate::Open
            } else {
                Gate::Closed("grant screen recording and accessibility to continue")
            }
        }
        SetupStep::OllamaConfig => {
            if state.ollama_status.is_success() && !state.selected_ollama_model.is_empty() {
                Gate::Open
            } else {
                Gate::Closed("test the Ollama connection and select a model to continue")
            }
        }
        SetupStep::GoogleConfig => {
            if state.google_status.is_success() && !state.google_api_key.is_empty() {
                Gate::Open
            } else {
                Gate::Closed("test the Google AI connection with an API key to continue")
            }
        }
        _ => Gate::Open,
    }
}

/// Successor of a non-terminal step on the forward path. The llm-choice
/// branch and the ollama-config join both depend on the chosen mode.
pub fn next_step(step: SetupStep, state: &SetupState) -> Option<SetupStep> {
    match step {
        SetupStep::Welcome => Some(SetupStep::Permissions),
        SetupStep::Permissions => Some(SetupStep::LlmChoice),
        SetupStep::LlmChoice => Some(if state.mode == SetupMode::Cloud {
            SetupStep::GoogleConfig
        } else {
            SetupStep::OllamaConfig
        }),
        SetupStep::OllamaConfig => Some(if state.mode == SetupMode::Hybrid {
            SetupStep::GoogleConfig
        } else {
            SetupStep::ModelAssignment
        }),
        SetupStep::GoogleConfig => Some(SetupStep::ModelAssignment),
        SetupStep::ModelAssignment => Some(SetupStep::OptionalFeatures),
        SetupStep::OptionalFeatures => Some(SetupStep::Summary),
        SetupStep::Summary => Some(SetupStep::Completed),
        SetupStep::Completed => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowEffect {
    Moved(SetupStep),
    Blocked(&'static str),
    /// The summary gate is open; the caller must persist the derived
    /// configuration and then call `complete()`.
    Finish,
}

/// History-backed cursor over the wizard steps. All gating decisions live
/// in `continue_gate`/`next_step`; this type only records where the user
/// is and how they got there.
#[derive(Debug, Clone)]
pub struct SetupFlow {
    current: SetupStep,
    history: Vec<SetupStep>,
}

impl SetupFlow {
    pub fn new() -> Self {
        Self {
            current: SetupStep::Welcome,
            history: Vec::new(),
        }
    }

    pub fn current(&self) -> SetupStep {
        self.current
    }

    pub fn is_complete(&self) -> bool {
        self.current == SetupStep::Completed
    }

    pub fn advance(&mut self, state: &SetupState) -> FlowEffect {
        if let Gate::Closed(reason) = continue_gate(self.current, state) {
            return FlowEffect::Blocked(reason);
        }
        match self.current {
            SetupStep::Summary => FlowEffect::Finish,
            SetupStep::Completed => FlowEffect::Blocked("setup is already complete"),
            step => {
                let next = next_step(step, state).expect("non-terminal steps have a successor");
                self.history.push(step);
                self.current = next;
                FlowEffect::Moved(next)
            }
        }
    }

    /// Pops to the immediately preceding step. Always permitted from any
    /// non-terminal, non-welcome step, regardless of gates.
    pub fn back(&mut self) -> bool {
        if self.current == SetupStep::Completed {
            return false;
        }
        match self.history.pop() {
            Some(previous) => {
                self.current = previous;
                true
            }
            None => false,
        }
    }

    /// Enters the terminal state. Reached exactly once per wizard pass,
    /// after the caller has persisted the configuration (from the summary,
    /// or directly from the welcome skip).
    pub fn complete(&mut self) {
        self.history.push(self.current);
        self.current = SetupStep::Completed;
    }
}

impl Default for SetupFlow {
    fn default() -> Self {
        Self::new()
    }
}
