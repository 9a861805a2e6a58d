use std::path::Path;
use std::sync::Mutex;
use tempfile::tempdir;
use turix::config::{
    is_setup_completed, load_configuration, mark_setup_completed, save_configuration, ProviderKind,
};
use turix::setup::{
    ConnectionProbe, FlowEffect, OllamaConnectionKind, SetupFlow, SetupMode, SetupState, SetupStep,
    SimulatedProbe,
};

static ENV_LOCK: Mutex<()> = Mutex::new(());

struct HomeGuard {
    old_home: Option<std::ffi::OsString>,
}

impl HomeGuard {
    fn set(home: &Path) -> Self {
        let old_home = std::env::var_os("HOME");
        std::env::set_var("HOME", home);
        Self { old_home }
    }
}

impl Drop for HomeGuard {
    fn drop(&mut self) {
        if let Some(old_home) = self.old_home.take() {
            std::env::set_var("HOME", old_home);
        } else {
            std::env::remove_var("HOME");
        }
    }
}

fn advance_expecting(flow: &mut SetupFlow, state: &SetupState, expected: SetupStep) {
    match flow.advance(state) {
        FlowEffect::Moved(step) => assert_eq!(step, expected),
        other => panic!("expected move to {expected:?}, got {other:?}"),
    }
}

#[test]
fn hybrid_setup_walkthrough_persists_the_assembled_configuration() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|err| err.into_inner());
    let temp = tempdir().expect("temp dir");
    let _home = HomeGuard::set(temp.path());

    let probe = SimulatedProbe::immediate();
    let mut state = SetupState::new();
    let mut flow = SetupFlow::new();
    assert_eq!(flow.current(), SetupStep::Welcome);

    advance_expecting(&mut flow, &state, SetupStep::Permissions);

    // Both required grants arrive from the host.
    state.permissions.screen_recording = true;
    state.permissions.accessibility = true;
    advance_expecting(&mut flow, &state, SetupStep::LlmChoice);

    state.mode = SetupMode::Hybrid;
    state.apply_recommended_models(SetupMode::Hybrid);
    advance_expecting(&mut flow, &state, SetupStep::OllamaConfig);

    state.ollama_connection = OllamaConnectionKind::Local;
    state.ollama_port = "11434".to_string();
    state.begin_ollama_test();
    state.apply_ollama_probe(probe.probe_ollama(&state.ollama_base_url()));
    assert!(state.ollama_status.is_success());
    assert!(!state.ollama_models.is_empty());
    assert!(!state.selected_ollama_model.is_empty());
    advance_expecting(&mut flow, &state, SetupStep::GoogleConfig);

    state.google_api_key = "abc".to_string();
    state.begin_google_test();
    state.apply_google_probe(probe.probe_google(&state.google_api_key.clone()));
    assert!(state.google_status.is_success());
    advance_expecting(&mut flow, &state, SetupStep::ModelAssignment);

    // Assignments and optional features ride through unchanged.
    advance_expecting(&mut flow, &state, SetupStep::OptionalFeatures);
    advance_expecting(&mut flow, &state, SetupStep::Summary);

    match flow.advance(&state) {
        FlowEffect::Finish => {
            let configuration = state.build_configuration();
            save_configuration(&configuration).expect("save configuration");
            mark_setup_completed().expect("mark setup completed");
            flow.complete();
        }
        other => panic!("expected finish from summary, got {other:?}"),
    }
    assert!(flow.is_complete());
    assert!(is_setup_completed());

    let persisted = load_configuration().expect("configuration persisted");
    assert_eq!(persisted.brain_llm.provider, ProviderKind::GoogleFlash);
    assert_eq!(persisted.brain_llm.api_key.as_deref(), Some("abc"));
    assert!(persisted.brain_llm.base_url.is_none());

    assert_eq!(persisted.actor_llm.provider, ProviderKind::Ollama);
    assert_eq!(
        persisted.actor_llm.base_url.as_deref(),
        Some("http://localhost:11434")
    );
    assert!(persisted.actor_llm.api_key.is_none());
}

#[test]
fn skip_from_welcome_persists_untouched_defaults() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|err| err.into_inner());
    let temp = tempdir().expect("temp dir");
    let _home = HomeGuard::set(temp.path());

    // Skip builds straight from the fresh working set and bypasses every
    // intermediate step.
    let state = SetupState::new();
    let mut flow = SetupFlow::new();
    assert_eq!(flow.current(), SetupStep::Welcome);

    save_configuration(&state.build_configuration()).expect("save defaults");
    mark_setup_completed().expect("mark setup completed");
    flow.complete();

    assert!(flow.is_complete());
    assert!(is_setup_completed());

    let persisted = load_configuration().expect("default configuration persisted");
    assert_eq!(persisted.brain_llm.provider, ProviderKind::GoogleFlash);
    assert_eq!(persisted.brain_llm.model_name, "gemini-2.0-flash");
    assert_eq!(persisted.actor_llm.provider, ProviderKind::Ollama);
    assert_eq!(persisted.actor_llm.model_name, "qwen2.5:latest");
    assert_eq!(persisted.agent.max_steps, 100);
}
