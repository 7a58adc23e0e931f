//! promfile agent binary.
//!
//! Usage: `promfile-agent [config.yaml]` (default `promfile.yaml`).
//! Samples process statistics and dumps the exposition file until Ctrl-C.

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{fmt, EnvFilter};

use promfile_agent::{config, Agent};

#[tokio::main]
async fn main() -> promfile_core::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "promfile.yaml".to_string());
    let cfg = config::load_from_file(&path)?;
    let agent = Agent::new(cfg)?;

    let cancel = CancellationToken::new();
    let shutdown = cancel.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "ctrl-c handler failed");
        }
        shutdown.cancel();
    });

    tracing::info!(config = %path, project = %agent.cfg().project_name, "promfile-agent starting");
    agent.run(cancel).await
}
