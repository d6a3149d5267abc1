use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::common::{endpoint::Endpoint, error::WatchError};
use crate::traits::state_querier::StateQuerier;
use crate::watcher::leader::resolve_leader;
use crate::watcher::registration::find_registered_agent;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollExit {
    Found,
    Cancelled,
}

/// A running registration poll. `registered` yields `true` once and then
/// closes; it closes without a value when the poll is cancelled.
pub struct PollingHandle {
    pub registered: mpsc::Receiver<bool>,
    pub cancel: CancellationToken,
    pub task: JoinHandle<PollExit>,
}

pub fn spawn_registration_poll<Q>(
    querier: Arc<Q>,
    endpoint: Endpoint,
    agent_ip: String,
    interval: Duration,
) -> PollingHandle
where
    Q: StateQuerier + Sync + 'static,
{
    let (tx, rx) = mpsc::channel::<bool>(1);
    let cancel = CancellationToken::new();
    let task = tokio::spawn(poll_registration(
        querier,
        endpoint,
        agent_ip,
        interval,
        tx,
        cancel.clone(),
    ));
    PollingHandle {
        registered: rx,
        cancel,
        task,
    }
}

/// Polls until the agent shows up or `cancel` fires.
///
/// Cancellation is only looked at while waiting for the next tick; a query
/// that is already in flight runs to completion.
pub async fn poll_registration<Q>(
    querier: Arc<Q>,
    endpoint: Endpoint,
    agent_ip: String,
    interval: Duration,
    registered: mpsc::Sender<bool>,
    cancel: CancellationToken,
) -> PollExit
where
    Q: StateQuerier + Sync,
{
    let mut tick: u64 = 0;
    loop {
        tick += 1;
        match check_registration(querier.as_ref(), &endpoint, &agent_ip).await {
            Ok(true) => {
                // Single value into a channel of capacity 1: cannot block, and
                // is simply dropped if the receiver already gave up.
                let _ = registered.try_send(true);
                return PollExit::Found;
            }
            Ok(false) => {
                log::info!("Agent {} not registered yet (tick {})", agent_ip, tick);
            }
            Err(e) => {
                log::warn!("Registration check failed (tick {}): {}", tick, e);
            }
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                log::info!("Stopping registration poll for {} after {} ticks", agent_ip, tick);
                return PollExit::Cancelled;
            }
            _ = tokio::time::sleep(interval) => {}
        }
    }
}

async fn check_registration<Q>(querier: &Q, endpoint: &Endpoint, agent_ip: &str) -> Result<bool, WatchError>
where
    Q: StateQuerier + Sync,
{
    let snapshot = resolve_leader(querier, endpoint).await?;
    match find_registered_agent(&snapshot, agent_ip) {
        Some(agent) => {
            let since = agent
                .registered_at()
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| "an unknown time".to_string());
            log::info!(
                "Found agent {} registered with {} as {} since {}",
                agent_ip,
                snapshot.pid,
                agent.pid,
                since
            );
            Ok(true)
        }
        None => Ok(false),
    }
}
