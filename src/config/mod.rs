pub mod error;
pub mod model;
pub mod paths;
pub mod store;

pub use error::ConfigError;
pub use model::{
    AgentSettings, Configuration, LlmConfig, ModelRole, ProviderKind, ALL_MODEL_ROLES,
};
pub use paths::{
    app_data_dir, config_file_path, setup_marker_path, APP_STATE_DIR, CONFIG_FILE_NAME,
    SETUP_MARKER_FILE_NAME,
};
pub use store::{
    is_setup_completed, load_configuration, mark_setup_completed, reset_setup, save_configuration,
};
