use crate::config::{
    AgentSettings, Configuration, LlmConfig, ModelRole, ProviderKind, ALL_MODEL_ROLES,
};
use crate::host::PermissionFlags;
use crate::setup::probe::ProbeReport;
use std::collections::BTreeMap;

pub const DEFAULT_OLLAMA_PORT: &str = "11434";
pub const DEFAULT_LOCAL_MODEL: &str = "qwen2.5:latest";
pub const DEFAULT_GOOGLE_MODEL: &str = "gemini-2.0-flash";

/// Google model catalog offered by the cloud screen: (wire name, label).
pub const GOOGLE_MODEL_CATALOG: [(&str, &str); 4] = [
    ("gemini-2.0-flash", "Gemini 2.0 Flash (Recommended)"),
    ("gemini-2.0-pro", "Gemini 2.0 Pro"),
    ("gemini-1.5-flash", "Gemini 1.5 Flash"),
    ("gemini-1.5-pro", "Gemini 1.5 Pro"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupMode {
    Local,
    Cloud,
    Hybrid,
}

pub const ALL_SETUP_MODES: [SetupMode; 3] = [SetupMode::Local, SetupMode::Cloud, SetupMode::Hybrid];

impl SetupMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Cloud => "cloud",
            Self::Hybrid => "hybrid",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Local => "Local Only (Ollama)",
            Self::Cloud => "Cloud (Google AI)",
            Self::Hybrid => "Hybrid",
        }
    }

    pub fn summary(self) -> &'static str {
        match self {
            Self::Local => "Free, private, requires ~16GB RAM",
            Self::Cloud => "Best performance, API costs",
            Self::Hybrid => "Mix of local and cloud models (Recommended)",
        }
    }

    pub fn uses_ollama(self) -> bool {
        matches!(self, Self::Local | Self::Hybrid)
    }

    pub fn uses_google(self) -> bool {
        matches!(self, Self::Cloud | Self::Hybrid)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OllamaConnectionKind {
    Local,
    Remote,
}

impl OllamaConnectionKind {
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Local => "Local",
            Self::Remote => "Remote IP",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Local => Self::Remote,
            Self::Remote => Self::Local,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionStatus {
    NotTested,
    Testing,
    Success,
    Failed(String),
}

impl ConnectionStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    pub fn is_testing(&self) -> bool {
        matches!(self, Self::Testing)
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::NotTested => "⚪️",
            Self::Testing => "⏳",
            Self::Success => "🟢",
            Self::Failed(_) => "🔴",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::NotTested => "Not tested".to_string(),
            Self::Testing => "Testing...".to_string(),
            Self::Success => "Connected".to_string(),
            Self::Failed(reason) => format!("Failed: {reason}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelAssignment {
    pub provider: ProviderKind,
    pub model: String,
}

impl ModelAssignment {
    pub fn new(provider: ProviderKind, model: &str) -> Self {
        Self {
            provider,
            model: model.to_string(),
        }
    }
}

/// Working set for one wizard pass. Created fresh on wizard entry and
/// discarded after the configuration is derived and saved; nothing in here
/// is persisted directly.
#[derive(Debug, Clone)]
pub struct SetupState {
    pub mode: SetupMode,
    pub ollama_connection: OllamaConnectionKind,
    pub ollama_host: String,
    pub ollama_port: String,
    pub ollama_models: Vec<String>,
    pub ollama_status: ConnectionStatus,
    pub selected_ollama_model: String,
    pub google_api_key: String,
    pub selected_google_model: String,
    pub google_status: ConnectionStatus,
    pub assignments: BTreeMap<ModelRole, ModelAssignment>,
    pub enable_discord: bool,
    pub enable_notifications: bool,
    pub start_minimized: bool,
    pub launch_at_login: bool,
    pub permissions: PermissionFlags,
}

impl SetupState {
    pub fn new() -> Self {
        Self {
            mode: SetupMode::Hybrid,
            ollama_connection: OllamaConnectionKind::Local,
            ollama_host: String::new(),
            ollama_port: DEFAULT_OLLAMA_PORT.to_string(),
            ollama_models: Vec::new(),
            ollama_status: ConnectionStatus::NotTested,
            selected_ollama_model: String::new(),
            google_api_key: String::new(),
            selected_google_model: DEFAULT_GOOGLE_MODEL.to_string(),
            google_status: ConnectionStatus::NotTested,
            assignments: default_assignments(),
            enable_discord: false,
            enable_notifications: true,
            start_minimized: false,
            launch_at_login: false,
            permissions: PermissionFlags::default(),
        }
    }

    /// No host/port validation happens here; malformed input flows through
    /// to the (stubbed) connection attempt unchanged.
    pub fn ollama_base_url(&self) -> String {
        if self.ollama_connection == OllamaConnectionKind::Local {
            format!("http://localhost:{}", self.ollama_port)
        } else {
            format!("http://{}:{}", self.ollama_host, self.ollama_port)
        }
    }

    pub fn assignment(&self, role: ModelRole) -> &ModelAssignment {
        self.assignments
            .get(&role)
            .expect("role assignments are seeded at creation")
    }

    pub fn assign(&mut self, role: ModelRole, provider: ProviderKind, model: &str) {
        self.assignments
            .insert(role, ModelAssignment::new(provider, model));
    }

    /// Overwrites all four role slots with the fixed preset for `mode`.
    /// These presets are user-visible defaults; the tables are deliberate,
    /// not derived.
    pub fn apply_recommended_models(&mut self, mode: SetupMode) {
        match mode {
            SetupMode::Local => {
                for role in ALL_MODEL_ROLES {
                    self.assign(role, ProviderKind::Ollama, DEFAULT_LOCAL_MODEL);
                }
            }
            SetupMode::Cloud => {
                self.assign(ModelRole::Brain, ProviderKind::GoogleFlash, "gemini-2.0-pro");
                self.assign(
                    ModelRole::Actor,
                    ProviderKind::GoogleFlash,
                    "gemini-2.0-flash",
                );
                self.assign(
                    ModelRole::Planner,
                    ProviderKind::GoogleFlash,
                    "gemini-2.0-flash",
                );
                self.assign(
                    ModelRole::Memory,
                    ProviderKind::GoogleFlash,
                    "gemini-1.5-flash",
                );
            }
            SetupMode::Hybrid => {
                self.assign(
                    ModelRole::Brain,
                    ProviderKind::GoogleFlash,
                    DEFAULT_GOOGLE_MODEL,
                );
                self.assign(ModelRole::Actor, ProviderKind::Ollama, DEFAULT_LOCAL_MODEL);
                self.assign(
                    ModelRole::Planner,
                    ProviderKind::Ollama,
                    DEFAULT_LOCAL_MODEL,
                );
                self.assign(ModelRole::Memory, ProviderKind::Ollama, DEFAULT_LOCAL_MODEL);
            }
        }
    }

    /// Total transform from the four role assignments into a persistable
    /// Configuration with a freshly-defaulted agent block.
    pub fn build_configuration(&self) -> Configuration {
        Configuration {
            logging_level: "DEBUG".to_string(),
            output_dir: ".turix_tmp".to_string(),
            brain_llm: self.llm_for(self.assignment(ModelRole::Brain)),
            actor_llm: self.llm_for(self.assignment(ModelRole::Actor)),
            planner_llm: self.llm_for(self.assignment(ModelRole::Planner)),
            memory_llm: self.llm_for(self.assignment(ModelRole::Memory)),
            agent: AgentSettings::default(),
        }
    }

    fn llm_for(&self, assignment: &ModelAssignment) -> LlmConfig {
        if assignment.provider.is_cloud() {
            LlmConfig::cloud(
                assignment.provider,
                assignment.model.clone(),
                self.google_api_key.clone(),
            )
        } else {
            LlmConfig::local(
                assignment.provider,
                assignment.model.clone(),
                self.ollama_base_url(),
            )
        }
    }

    pub fn begin_ollama_test(&mut self) {
        self.ollama_status = ConnectionStatus::Testing;
    }

    pub fn begin_google_test(&mut self) {
        self.google_status = ConnectionStatus::Testing;
    }

    /// Applies a finished Ollama probe. Last write wins when tests overlap;
    /// the surface keeps the control disabled while one is in flight.
    pub fn apply_ollama_probe(&mut self, report: ProbeReport) {
        if report.status.is_success() {
            self.ollama_models = report.models;
            if self.selected_ollama_model.is_empty() {
                if let Some(first) = self.ollama_models.first() {
                    self.selected_ollama_model = first.clone();
                }
            }
        }
        self.ollama_status = report.status;
    }

    pub fn apply_google_probe(&mut self, report: ProbeReport) {
        self.google_status = report.status;
    }
}

impl Default for SetupState {
    fn default() -> Self {
        Self::new()
    }
}

fn default_assignments() -> BTreeMap<ModelRole, ModelAssignment> {
    BTreeMap::from_iter([
        (
            ModelRole::Brain,
            ModelAssignment::new(ProviderKind::GoogleFlash, DEFAULT_GOOGLE_MODEL),
        ),
        (
            ModelRole::Actor,
            ModelAssignment::new(ProviderKind::Ollama, DEFAULT_LOCAL_MODEL),
        ),
        (
            ModelRole::Planner,
            ModelAssignment::new(ProviderKind::Ollama, DEFAULT_LOCAL_MODEL),
        ),
        (
            ModelRole::Memory,
            ModelAssignment::new(ProviderKind::Ollama, DEFAULT_LOCAL_MODEL),
        ),
    ])
}
