use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use crate::common::cluster::{AgentAttributes, AgentRecord, ClusterSnapshot};
use crate::common::endpoint::Endpoint;
use crate::common::error::WatchError;
use crate::traits::state_querier::StateQuerier;

#[derive(Clone)]
pub(crate) enum Reply {
    State(ClusterSnapshot),
    Garbage,
}

/// In-memory cluster: replies are queued per `host:port`, the last one repeats.
#[derive(Default)]
pub(crate) struct ScriptedQuerier {
    replies: Mutex<HashMap<String, VecDeque<Reply>>>,
    calls: Mutex<Vec<Endpoint>>,
    latency: Duration,
}

impl ScriptedQuerier {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub(crate) fn reply(self, host_port: &str, reply: Reply) -> Self {
        self.replies
            .lock()
            .unwrap()
            .entry(host_port.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    pub(crate) fn calls(&self) -> Vec<Endpoint> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn next_reply(&self, host_port: &str) -> Reply {
        let mut replies = self.replies.lock().unwrap();
        match replies.get_mut(host_port) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) if !queue.is_empty() => queue[0].clone(),
            _ => Reply::Garbage,
        }
    }
}

impl StateQuerier for ScriptedQuerier {
    async fn fetch(&self, endpoint: &Endpoint) -> Result<ClusterSnapshot, WatchError> {
        self.calls.lock().unwrap().push(endpoint.clone());
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        match self.next_reply(&endpoint.to_string()) {
            Reply::State(snapshot) => Ok(snapshot),
            Reply::Garbage => Err(WatchError::Decode {
                url: endpoint.url(),
                source: serde_json::from_str::<ClusterSnapshot>("<html>").unwrap_err(),
            }),
        }
    }
}

pub(crate) fn leader_state(host_port: &str, agent_ips: &[&str]) -> Reply {
    let pid = format!("master@{host_port}");
    Reply::State(ClusterSnapshot {
        elected_time: 1458344004.38701,
        leader: pid.clone(),
        pid,
        slaves: Some(
            agent_ips
                .iter()
                .map(|ip| AgentRecord {
                    active: true,
                    pid: format!("slave(1)@{ip}:5051"),
                    registered_time: 1458344100.0,
                    attributes: AgentAttributes {
                        private_ip: ip.to_string(),
                        ..Default::default()
                    },
                })
                .collect(),
        ),
    })
}

pub(crate) fn follower_state(host_port: &str, leader: &str) -> Reply {
    Reply::State(ClusterSnapshot {
        elected_time: 0.0,
        leader: leader.to_string(),
        pid: format!("master@{host_port}"),
        slaves: None,
    })
}
