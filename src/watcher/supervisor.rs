use std::sync::Arc;
use std::time::Duration;

use crate::common::endpoint::Endpoint;
use crate::traits::state_querier::StateQuerier;
use crate::watcher::polling::{DEFAULT_POLL_INTERVAL, PollingHandle, spawn_registration_poll};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(90);

/// Runs one bounded wait for an agent to register with the cluster leader.
pub struct Supervisor<Q> {
    querier: Arc<Q>,
    poll_interval: Duration,
    timeout: Duration,
}

impl<Q> Supervisor<Q>
where
    Q: StateQuerier + Sync + 'static,
{
    pub fn new(querier: Arc<Q>) -> Self {
        Self {
            querier,
            poll_interval: DEFAULT_POLL_INTERVAL,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `true` if the agent was seen registered before the timeout elapsed.
    ///
    /// Never fails: every query error is absorbed by the poll, and the wait
    /// always ends by the timeout. On timeout the poll is told to stop but is
    /// not waited for.
    pub async fn wait_for_registration(&self, endpoint: &Endpoint, agent_ip: &str) -> bool {
        let PollingHandle {
            mut registered,
            cancel,
            task: _,
        } = spawn_registration_poll(
            self.querier.clone(),
            endpoint.clone(),
            agent_ip.to_string(),
            self.poll_interval,
        );

        let outcome = tokio::select! {
            biased;
            _ = tokio::time::sleep(self.timeout) => {
                log::info!("Couldn't find agent {} after {:?}", agent_ip, self.timeout);
                false
            }
            found = registered.recv() => match found {
                Some(found) => {
                    log::info!("Found an agent registered with IP {}", agent_ip);
                    found
                }
                None => {
                    log::error!("Registration poll for {} ended without a result", agent_ip);
                    false
                }
            },
        };

        cancel.cancel();
        outcome
    }
}
