use serde::{Deserialize, Serialize};

/// Backends the setup flow can hand a model role to. The wire names are part
/// of the persisted config contract and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    Ollama,
    GoogleFlash,
}

impl ProviderKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ollama => "ollama",
            Self::GoogleFlash => "google_flash",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, String> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "ollama" => Ok(Self::Ollama),
            "google_flash" => Ok(Self::GoogleFlash),
            _ => Err("provider must be one of: ollama, google_flash".to_string()),
        }
    }

    /// Cloud providers carry an API key; local providers carry a base URL.
    pub fn is_cloud(self) -> bool {
        matches!(self, Self::GoogleFlash)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Ollama => "Ollama (Local)",
            Self::GoogleFlash => "Google AI (Cloud)",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ModelRole {
    Brain,
    Actor,
    Planner,
    Memory,
}

pub const ALL_MODEL_ROLES: [ModelRole; 4] = [
    ModelRole::Brain,
    ModelRole::Actor,
    ModelRole::Planner,
    ModelRole::Memory,
];

impl ModelRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Brain => "brain",
            Self::Actor => "actor",
            Self::Planner => "planner",
            Self::Memory => "memory",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Brain => "Brain",
            Self::Actor => "Actor",
            Self::Planner => "Planner",
            Self::Memory => "Memory",
        }
    }

    pub fn summary(self) -> &'static str {
        match self {
            Self::Brain => "Main reasoning",
            Self::Actor => "Action execution",
            Self::Planner => "Task planning",
            Self::Memory => "Context management",
        }
    }
}

impl std::fmt::Display for ModelRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One model-role slot in the persisted configuration. Exactly one of
/// `api_key`/`base_url` is populated, decided by the provider kind; the
/// constructors are the only way setup code builds these.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LlmConfig {
    pub provider: ProviderKind,
    pub model_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl LlmConfig {
    pub fn cloud(provider: ProviderKind, model_name: String, api_key: String) -> Self {
        Self {
            provider,
            model_name,
            api_key: Some(api_key),
            base_url: None,
        }
    }

    pub fn local(provider: ProviderKind, model_name: String, base_url: String) -> Self {
        Self {
            provider,
            model_name,
            api_key: None,
            base_url: Some(base_url),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Configuration {
    #[serde(default = "default_logging_level")]
    pub logging_level: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    pub brain_llm: LlmConfig,
    pub actor_llm: LlmConfig,
    pub planner_llm: LlmConfig,
    pub memory_llm: LlmConfig,
    #[serde(default)]
    pub agent: AgentSettings,
}

impl Configuration {
    pub fn llm_for_role(&self, role: ModelRole) -> &LlmConfig {
        match role {
            ModelRole::Brain => &self.brain_llm,
            ModelRole::Actor => &self.actor_llm,
            ModelRole::Planner => &self.planner_llm,
            ModelRole::Memory => &self.memory_llm,
        }
    }
}

fn default_logging_level() -> String {
    "DEBUG".to_string()
}

fn default_output_dir() -> String {
    ".turix_tmp".to_string()
}

/// Agent behavior block persisted under the `agent` key. Field names and
/// defaults mirror what the agent backend expects to read.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AgentSettings {
    #[serde(default)]
    pub task: String,
    #[serde(default = "default_memory_budget")]
    pub memory_budget: u32,
    #[serde(default = "default_summary_memory_budget")]
    pub summary_memory_budget: u32,
    #[serde(default)]
    pub use_ui: bool,
    #[serde(default)]
    pub use_search: bool,
    #[serde(default = "default_true")]
    pub use_skills: bool,
    #[serde(default = "default_skills_dir")]
    pub skills_dir: String,
    #[serde(default = "default_skills_max_chars")]
    pub skills_max_chars: u32,
    #[serde(default = "default_true")]
    pub use_plan: bool,
    #[serde(default = "default_max_actions_per_step")]
    pub max_actions_per_step: u32,
    #[serde(default = "default_max_steps")]
    pub max_steps: u32,
    #[serde(default = "default_force_stop_hotkey")]
    pub force_stop_hotkey: String,
    #[serde(default = "default_true")]
    pub use_turix: bool,
    #[serde(default)]
    pub resume: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
    #[serde(default = "default_brain_conversation_path")]
    pub save_brain_conversation_path: String,
    #[serde(default = "default_actor_conversation_path")]
    pub save_actor_conversation_path: String,
    #[serde(default = "default_planner_conversation_path")]
    pub save_planner_conversation_path: String,
    #[serde(default = "default_conversation_encoding")]
    pub save_brain_conversation_path_encoding: String,
    #[serde(default = "default_conversation_encoding")]
    pub save_actor_conversation_path_encoding: String,
    #[serde(default = "default_conversation_encoding")]
    pub save_planner_conversation_path_encoding: String,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            task: String::new(),
            memory_budget: default_memory_budget(),
            summary_memory_budget: default_summary_memory_budget(),
            use_ui: false,
            use_search: false,
            use_skills: true,
            skills_dir: default_skills_dir(),
            skills_max_chars: default_skills_max_chars(),
            use_plan: true,
            max_actions_per_step: default_max_actions_per_step(),
            max_steps: default_max_steps(),
            force_stop_hotkey: default_force_stop_hotkey(),
            use_turix: true,
            resume: false,
            agent_id: None,
            save_brain_conversation_path: default_brain_conversation_path(),
            save_actor_conversation_path: default_actor_conversation_path(),
            save_planner_conversation_path: default_planner_conversation_path(),
            save_brain_conversation_path_encoding: default_conversation_encoding(),
            save_actor_conversation_path_encoding: default_conversation_encoding(),
            save_planner_conversation_path_encoding: default_conversation_encoding(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_memory_budget() -> u32 {
    2000
}

fn default_summary_memory_budget() -> u32 {
    8000
}

fn default_skills_dir() -> String {
    "skills".to_string()
}

fn default_skills_max_chars() -> u32 {
    4000
}

fn default_max_actions_per_step() -> u32 {
    5
}

fn default_max_steps() -> u32 {
    100
}

fn default_force_stop_hotkey() -> String {
    "command+shift+2".to_string()
}

fn default_brain_conversation_path() -> String {
    "brain_llm_interactions.log".to_string()
}

fn default_actor_conversation_path() -> String {
    "actor_llm_interactions.log".to_string()
}

fn default_planner_conversation_path() -> String {
    "planner_llm_interactions.log".to_string()
}

fn default_conversation_encoding() -> String {
    "utf-8".to_string()
}
