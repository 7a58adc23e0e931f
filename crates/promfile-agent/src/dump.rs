//! Periodic exposition dump.
//!
//! The scheduler renders the registry on a fixed interval and hands the text to
//! an [`ExpositionSink`]. A failed publish is logged and the loop keeps going;
//! the next tick renders fresh state and tries again.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::time::{Duration, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use promfile_core::error::{PromfileError, Result};
use promfile_core::Registry;

use crate::config::DumpSection;

/// Destination for rendered exposition text.
#[async_trait]
pub trait ExpositionSink: Send + Sync + 'static {
    async fn publish(&self, body: &str) -> Result<()>;

    /// Short description for logs (file path, "log", ...).
    fn describe(&self) -> String;
}

/// Writes the rendering to a file.
///
/// The text goes to `<path>.tmp` first and is then renamed over `path`, so a
/// collector reading the file never sees a partial write.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut s = self.path.clone().into_os_string();
        s.push(".tmp");
        PathBuf::from(s)
    }
}

#[async_trait]
impl ExpositionSink for FileSink {
    async fn publish(&self, body: &str) -> Result<()> {
        let tmp = self.tmp_path();
        tokio::fs::write(&tmp, body.as_bytes())
            .await
            .map_err(|e| PromfileError::Io(format!("write {} failed: {e}", tmp.display())))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| PromfileError::Io(format!("rename to {} failed: {e}", self.path.display())))?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Emits the rendering through `tracing` at debug level.
#[derive(Debug, Clone, Default)]
pub struct LogSink;

#[async_trait]
impl ExpositionSink for LogSink {
    async fn publish(&self, body: &str) -> Result<()> {
        tracing::debug!(component = "dump", bytes = body.len(), "\n{}", body);
        Ok(())
    }

    fn describe(&self) -> String {
        "log".to_string()
    }
}

pub struct DumpScheduler {
    registry: Arc<Registry>,
    sink: Arc<dyn ExpositionSink>,
    interval: Duration,
}

impl DumpScheduler {
    pub fn new(registry: Arc<Registry>, sink: Arc<dyn ExpositionSink>, interval: Duration) -> Self {
        Self {
            registry,
            sink,
            interval,
        }
    }

    /// File-backed scheduler from config; `None` when no dump path is set.
    pub fn from_config(registry: Arc<Registry>, cfg: &DumpSection) -> Option<Self> {
        let Some(path) = cfg.path() else {
            tracing::info!(component = "dump", "dump path is empty, skip dump");
            return None;
        };
        Some(Self::new(registry, Arc::new(FileSink::new(path)), cfg.interval()))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Render once and publish.
    pub async fn dump_once(&self) -> Result<()> {
        let body = self.registry.render();
        self.sink.publish(&body).await
    }

    /// Dump every interval until `cancel` fires, then write one final dump.
    ///
    /// The first dump happens one interval after start.
    pub async fn run(&self, cancel: CancellationToken) {
        let sink = self.sink.describe();
        tracing::info!(component = "dump", sink = %sink, interval_ms = self.interval.as_millis() as u64, "dump loop started");

        let mut tick = tokio::time::interval_at(Instant::now() + self.interval, self.interval);
        tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tick.tick() => self.dump_logged(&sink).await,
            }
        }

        self.dump_logged(&sink).await;
        tracing::info!(component = "dump", sink = %sink, "dump loop stopped");
    }

    async fn dump_logged(&self, sink: &str) {
        match self.dump_once().await {
            Ok(()) => tracing::debug!(component = "dump", sink = %sink, "dump written"),
            Err(e) => tracing::error!(component = "dump", sink = %sink, error = %e, "dump failed"),
        }
    }
}
