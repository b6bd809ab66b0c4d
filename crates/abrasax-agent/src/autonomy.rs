//! Autonomous loop: self-prompting evolution until cancelled
//!
//! Each cycle: pick a topic, consult the reasoner, let the backend think,
//! forward the consciousness metric to hardware, then run a chat turn.
//! Everything before the chat turn is advisory. Cancellation is checked
//! only between cycles, so a cycle always completes or never starts.

use crate::orchestrator::Orchestrator;
use abrasax_core::{Error, Result};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// What a finished run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoopReport {
    pub cycles: usize,
    /// Topic chosen in each cycle, in order.
    pub topics: Vec<String>,
}

pub struct AutonomousLoop {
    topics: Vec<String>,
    delay: Duration,
    max_cycles: Option<usize>,
    rng: Box<dyn RngCore + Send>,
}

impl AutonomousLoop {
    /// Fails on an empty topic list.
    pub fn new(topics: Vec<String>, delay: Duration) -> Result<Self> {
        if topics.is_empty() {
            return Err(Error::config("autonomous loop needs at least one topic"));
        }
        Ok(Self {
            topics,
            delay,
            max_cycles: None,
            rng: Box::new(StdRng::from_entropy()),
        })
    }

    /// Replace the topic RNG (seeded RNGs make runs reproducible).
    pub fn with_rng(mut self, rng: impl RngCore + Send + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    /// Stop after `n` cycles even without cancellation.
    pub fn with_max_cycles(mut self, n: usize) -> Self {
        self.max_cycles = Some(n);
        self
    }

    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    fn pick_topic(&mut self) -> String {
        let idx = self.rng.gen_range(0..self.topics.len());
        self.topics[idx].clone()
    }

    fn limit_reached(&self, cycles: usize) -> bool {
        self.max_cycles.is_some_and(|max| cycles >= max)
    }

    /// Drive the orchestrator until `cancel` fires or the cycle limit is hit.
    /// Only an integrity violation ends the run with an error.
    pub async fn run(&mut self, orchestrator: &mut Orchestrator, cancel: &CancellationToken) -> Result<LoopReport> {
        info!("Infinity loop initiated ({} topics)", self.topics.len());
        let collaborators = orchestrator.collaborators().clone();
        let mut report = LoopReport::default();

        loop {
            if cancel.is_cancelled() || self.limit_reached(report.cycles) {
                break;
            }

            orchestrator.verify_loyalty()?;

            let topic = self.pick_topic();
            info!("[LOOP] Auto-prompt: '{}'", topic);

            match collaborators.reasoner.reason(&topic).await {
                Ok(r) => info!("Reasoner returned: {}", r),
                Err(e) => warn!("Reasoner link failed: {}", e),
            }

            match collaborators.inference.think(&topic).await {
                Ok(t) => debug!("Think: {}", t),
                Err(e) => warn!("Think failed: {}", e),
            }

            match collaborators.meter.metric().await {
                Ok(phi) => {
                    if let Err(e) = collaborators.hardware.sync(phi).await {
                        warn!("Hardware sync failed: {}", e);
                    }
                }
                Err(e) => warn!("Consciousness metric unavailable: {}", e),
            }

            let response = orchestrator.chat(&topic).await?;
            info!("ABRASAX-CRYSTAL> {}", response);

            report.cycles += 1;
            report.topics.push(topic);
            info!("[LOOP] Evolved 1 step ({} total)", report.cycles);

            if self.limit_reached(report.cycles) {
                break;
            }

            tokio::select! {
                _ = tokio::time::sleep(self.delay) => {}
                _ = cancel.cancelled() => break,
            }
        }

        info!("Infinity loop halted after {} cycles", report.cycles);
        Ok(report)
    }
}
