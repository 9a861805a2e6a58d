use turix::setup::{ConnectionProbe, ConnectionStatus, ProbeReport, SetupState, SimulatedProbe};

#[test]
fn setup_probe_module_simulated_ollama_test_succeeds_with_models() {
    let mut state = SetupState::new();
    state.begin_ollama_test();
    assert!(state.ollama_status.is_testing());

    let report = SimulatedProbe::immediate().probe_ollama(&state.ollama_base_url());
    state.apply_ollama_probe(report);

    assert!(state.ollama_status.is_success());
    assert!(!state.ollama_models.is_empty());
    assert_eq!(state.selected_ollama_model, "qwen2.5:latest");
}

#[test]
fn setup_probe_module_google_test_fails_on_empty_key_with_reason() {
    let mut state = SetupState::new();
    state.begin_google_test();

    let report = SimulatedProbe::immediate().probe_google(&state.google_api_key);
    state.apply_google_probe(report);

    match &state.google_status {
        ConnectionStatus::Failed(reason) => assert!(!reason.is_empty()),
        other => panic!("expected failure for empty key, got {other:?}"),
    }
}

#[test]
fn setup_probe_module_google_test_succeeds_with_key() {
    let mut state = SetupState::new();
    state.google_api_key = "abc".to_string();
    state.begin_google_test();

    let report = SimulatedProbe::immediate().probe_google(&state.google_api_key);
    state.apply_google_probe(report);
    assert!(state.google_status.is_success());
}

#[test]
fn setup_probe_module_retry_after_failure_recovers() {
    let mut state = SetupState::new();
    let probe = SimulatedProbe::immediate();

    state.begin_google_test();
    state.apply_google_probe(probe.probe_google(""));
    assert!(matches!(state.google_status, ConnectionStatus::Failed(_)));

    state.google_api_key = "abc".to_string();
    state.begin_google_test();
    state.apply_google_probe(probe.probe_google(&state.google_api_key.clone()));
    assert!(state.google_status.is_success());
}

/// A scripted stand-in for the future network layer, wired through the
/// same seam the simulated probe uses.
struct ScriptedProbe {
    ollama: ProbeReport,
    google: ProbeReport,
}

impl ConnectionProbe for ScriptedProbe {
    fn probe_ollama(&self, _base_url: &str) -> ProbeReport {
        self.ollama.clone()
    }

    fn probe_google(&self, _api_key: &str) -> ProbeReport {
        self.google.clone()
    }
}

#[test]
fn setup_probe_module_state_machine_accepts_any_probe_implementation() {
    let probe = ScriptedProbe {
        ollama: ProbeReport::failed("connection refused"),
        google: ProbeReport {
            status: ConnectionStatus::Success,
            models: Vec::new(),
        },
    };

    let mut state = SetupState::new();
    state.begin_ollama_test();
    state.apply_ollama_probe(probe.probe_ollama(&state.ollama_base_url()));
    assert_eq!(
        state.ollama_status,
        ConnectionStatus::Failed("connection refused".to_string())
    );
    assert!(state.ollama_models.is_empty());

    state.begin_google_test();
    state.apply_google_probe(probe.probe_google("abc"));
    assert!(state.google_status.is_success());
}
