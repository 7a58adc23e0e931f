//! Agent wiring: registry, runtime sampler and dump scheduler.
//!
//! The host application builds an `Agent` from config, takes the shared
//! registry to register its own metrics, then drives `run` until shutdown.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use promfile_core::error::{PromfileError, Result};
use promfile_core::Registry;

use crate::config::AgentConfig;
use crate::dump::DumpScheduler;
use crate::runtime_stats::RuntimeStats;

pub struct Agent {
    cfg: AgentConfig,
    registry: Arc<Registry>,
    runtime: Option<Arc<RuntimeStats>>,
    dump: Option<Arc<DumpScheduler>>,
}

impl Agent {
    /// Build the agent. Returns Result so main can report bad config instead of panicking.
    pub fn new(cfg: AgentConfig) -> Result<Self> {
        cfg.validate()?;

        let registry = Arc::new(Registry::with_project(cfg.project_name.clone()));

        let runtime = cfg
            .runtime
            .enabled
            .then(|| Arc::new(RuntimeStats::new(&registry)));

        let dump = DumpScheduler::from_config(Arc::clone(&registry), &cfg.dump).map(Arc::new);

        Ok(Self {
            cfg,
            registry,
            runtime,
            dump,
        })
    }

    pub fn cfg(&self) -> &AgentConfig {
        &self.cfg
    }

    pub fn registry(&self) -> Arc<Registry> {
        Arc::clone(&self.registry)
    }

    pub fn runtime_stats(&self) -> Option<Arc<RuntimeStats>> {
        self.runtime.clone()
    }

    /// Run the periodic loops until `cancel` fires.
    pub async fn run(self, cancel: CancellationToken) -> Result<()> {
        let mut tasks = Vec::new();

        if let Some(runtime) = self.runtime {
            let interval = self.cfg.runtime.interval();
            tasks.push(tokio::spawn(runtime.run(interval, cancel.clone())));
        }

        if let Some(dump) = self.dump {
            let token = cancel.clone();
            tasks.push(tokio::spawn(async move { dump.run(token).await }));
        }

        if tasks.is_empty() {
            tracing::info!(project = %self.cfg.project_name, "nothing to schedule, waiting for shutdown");
            cancel.cancelled().await;
            return Ok(());
        }

        for t in tasks {
            t.await
                .map_err(|e| PromfileError::Internal(format!("agent task failed: {e}")))?;
        }
        Ok(())
    }
}
