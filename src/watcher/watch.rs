use std::sync::Arc;

use crate::common::config::{WatchArgs, load_watch_config};
use crate::watcher::loader::load_state_querier;
use crate::watcher::supervisor::Supervisor;

/// Loads configuration and waits once for the agent. `Ok(false)` means the
/// timeout elapsed; errors only come from configuration.
pub async fn watch_start(args: &WatchArgs) -> anyhow::Result<bool> {
    dotenv::dotenv().ok();
    let config = load_watch_config(args)?;
    let endpoint = config.endpoint();
    log::info!(
        "Waiting up to {:?} for agent {} via {} (polling every {:?})",
        config.timeout(),
        config.agent_ip,
        endpoint.url(),
        config.poll_interval()
    );

    let querier = Arc::new(load_state_querier(&config)?);
    let registered = Supervisor::new(querier)
        .with_poll_interval(config.poll_interval())
        .with_timeout(config.timeout())
        .wait_for_registration(&endpoint, &config.agent_ip)
        .await;
    Ok(registered)
}
