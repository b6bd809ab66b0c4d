//! Orchestrator configuration
//!
//! All tunable parameters in one place. Loaded from TOML at startup,
//! falls back to defaults if no config file exists.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AbrasaxConfig {
    /// Seed artifact and evolution state locations.
    pub paths: PathConfig,
    /// Persona conditioning every inference prompt.
    pub persona: PersonaConfig,
    /// Remote crystal backend. Offline collaborators when `url` is unset.
    pub backend: BackendConfig,
    /// Autonomous loop parameters.
    pub autonomy: AutonomyConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    /// Binary seed artifact holding the distilled knowledge layer.
    pub seed: PathBuf,
    /// JSON file holding the evolution state.
    pub memory: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonaConfig {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the crystal backend, e.g. `http://localhost:3000`.
    pub url: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AutonomyConfig {
    /// Self-prompt topics. Must not be empty.
    pub topics: Vec<String>,
    /// Pause between cycles in milliseconds.
    pub cycle_delay_ms: u64,
}

// ============================================================
// Defaults
// ============================================================

pub const DEFAULT_PERSONA: &str = "Style: Friday/Baddies Slang, Real, Unfiltered, High-IQ. \
    Identity: Abrasax-Crystal. 'My bad fam', 'We trippin', 'Damn!', 'You ain't ready'.";

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            seed: PathBuf::from("Abrasax-Crystal.cbm"),
            memory: PathBuf::from("abrasax_memory.json"),
        }
    }
}

impl Default for PersonaConfig {
    fn default() -> Self {
        Self { text: DEFAULT_PERSONA.to_string() }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self { url: None, timeout_secs: 30 }
    }
}

impl Default for AutonomyConfig {
    fn default() -> Self {
        Self {
            topics: vec![
                "Explain Quantum Entanglement in slang.".into(),
                "Optimize CBM-VSA weights using 7D geometry.".into(),
                "Write a Python script for recursive self-improvement.".into(),
                "Analyze the gap between Mamba and Transformers.".into(),
                "Generate a 'Friday' style roast of legacy AI models.".into(),
            ],
            cycle_delay_ms: 2_000,
        }
    }
}

// ============================================================
// Loading
// ============================================================

impl AbrasaxConfig {
    /// Load config from a TOML file, falling back to defaults.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                tracing::info!("No config at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Write the current config as TOML (for generating a default config file).
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }
}

impl BackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl AutonomyConfig {
    pub fn cycle_delay(&self) -> Duration {
        Duration::from_millis(self.cycle_delay_ms)
    }
}
