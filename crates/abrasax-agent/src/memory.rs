//! Evolution state persistence

use abrasax_core::{EvolutionState, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub struct MemoryStore {
    path: PathBuf,
}

impl MemoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load persisted state. Missing or unreadable state yields the default.
    pub fn load(&self) -> EvolutionState {
        if !self.path.exists() {
            info!("No evolution state at {}, starting fresh", self.path.display());
            return EvolutionState::default();
        }
        match std::fs::read_to_string(&self.path) {
            Ok(json) => match serde_json::from_str::<EvolutionState>(&json) {
                Ok(state) => {
                    info!(
                        "Loaded evolution state: count={} seed={}",
                        state.evolution_count, state.active_seed
                    );
                    state
                }
                Err(e) => {
                    warn!("Failed to parse {}: {}, using default state", self.path.display(), e);
                    EvolutionState::default()
                }
            },
            Err(e) => {
                warn!("Failed to read {}: {}, using default state", self.path.display(), e);
                EvolutionState::default()
            }
        }
    }

    /// Overwrite persisted state atomically (temp file + rename).
    pub fn save(&self, state: &EvolutionState) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(state)?;
        let tmp = self.tmp_path();
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, &self.path)?;
        debug!("Saved evolution state to {}", self.path.display());
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
