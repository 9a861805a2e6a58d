use crate::setup::state::ConnectionStatus;
use std::time::Duration;

/// Outcome of one connection test. `models` is populated only by Ollama
/// probes (the discovered local model list).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeReport {
    pub status: ConnectionStatus,
    pub models: Vec<String>,
}

impl ProbeReport {
    pub fn success_with_models(models: Vec<String>) -> Self {
        Self {
            status: ConnectionStatus::Success,
            models,
        }
    }

    pub fn failed(reason: &str) -> Self {
        Self {
            status: ConnectionStatus::Failed(reason.to_string()),
            models: Vec::new(),
        }
    }
}

/// Seam for the connection tests. The shipped implementation is a
/// simulation; a real network layer implements the same calls against the
/// live endpoints without the state machine noticing.
pub trait ConnectionProbe: Send + Sync {
    fn probe_ollama(&self, base_url: &str) -> ProbeReport;
    fn probe_google(&self, api_key: &str) -> ProbeReport;
}

pub const SIMULATED_PROBE_DELAY: Duration = Duration::from_millis(1500);

pub const SIMULATED_OLLAMA_MODELS: [&str; 4] = [
    "qwen2.5:latest",
    "llama3.2:latest",
    "mistral:latest",
    "gemma2:latest",
];

pub const EMPTY_API_KEY_REASON: &str = "API key is required";

/// Canned probe: waits a fixed delay, then reports the scripted outcome.
/// Never performs any network I/O.
#[derive(Debug, Clone)]
pub struct SimulatedProbe {
    delay: Duration,
}

impl SimulatedProbe {
    pub fn new() -> Self {
        Self {
            delay: SIMULATED_PROBE_DELAY,
        }
    }

    /// Zero-delay variant for tests and scripted runs.
    pub fn immediate() -> Self {
        Self {
            delay: Duration::ZERO,
        }
    }

    fn wait(&self) {
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
    }
}

impl Default for SimulatedProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectionProbe for SimulatedProbe {
    fn probe_ollama(&self, _base_url: &str) -> ProbeReport {
        self.wait();
        ProbeReport::success_with_models(
            SIMULATED_OLLAMA_MODELS
                .iter()
                .map(|model| model.to_string())
                .collect(),
        )
    }

    fn probe_google(&self, api_key: &str) -> ProbeReport {
        self.wait();
        if api_key.is_empty() {
            ProbeReport::failed(EMPTY_API_KEY_REASON)
        } else {
            ProbeReport {
                status: ConnectionStatus::Success,
                models: Vec::new(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulated_ollama_probe_reports_canned_model_list() {
        let report = SimulatedProbe::immediate().probe_ollama("http://localhost:11434");
        assert!(report.status.is_success());
        assert_eq!(report.models.len(), SIMULATED_OLLAMA_MODELS.len());
        assert_eq!(report.models[0], "qwen2.5:latest");
    }

    #[test]
    fn simulated_google_probe_rejects_empty_key_with_reason() {
        let report = SimulatedProbe::immediate().probe_google("");
        match report.status {
            ConnectionStatus::Failed(reason) => assert!(!reason.is_empty()),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn simulated_google_probe_accepts_any_non_empty_key() {
        let report = SimulatedProbe::immediate().probe_google("abc");
        assert!(report.status.is_success());
        assert!(report.models.is_empty());
    }
}
