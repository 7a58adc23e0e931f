use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use promfile_core::error::{PromfileError, Result};

const MIN_INTERVAL_MS: u64 = 100;
const MAX_INTERVAL_MS: u64 = 86_400_000;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    pub version: u32,

    /// Value of the `project` label attached to every metric.
    pub project_name: String,

    #[serde(default)]
    pub dump: DumpSection,

    #[serde(default)]
    pub runtime: RuntimeSection,
}

impl AgentConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(PromfileError::UnsupportedVersion);
        }
        if self.project_name.trim().is_empty() {
            return Err(PromfileError::BadRequest("project_name must not be empty".into()));
        }

        self.dump.validate()?;
        self.runtime.validate()?;

        Ok(())
    }
}

fn check_interval(field: &str, ms: u64) -> Result<()> {
    if !(MIN_INTERVAL_MS..=MAX_INTERVAL_MS).contains(&ms) {
        return Err(PromfileError::BadRequest(format!(
            "{field} must be between {MIN_INTERVAL_MS} and {MAX_INTERVAL_MS}"
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DumpSection {
    /// Target file. Absent or empty disables dumping.
    #[serde(default)]
    pub path: Option<String>,

    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

impl Default for DumpSection {
    fn default() -> Self {
        Self {
            path: None,
            interval_ms: default_interval_ms(),
        }
    }
}

impl DumpSection {
    pub fn validate(&self) -> Result<()> {
        check_interval("dump.interval_ms", self.interval_ms)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(Path::new)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuntimeSection {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

impl Default for RuntimeSection {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            interval_ms: default_interval_ms(),
        }
    }
}

impl RuntimeSection {
    pub fn validate(&self) -> Result<()> {
        check_interval("runtime.interval_ms", self.interval_ms)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

fn default_interval_ms() -> u64 {
    60_000
}
fn default_enabled() -> bool {
    true
}
