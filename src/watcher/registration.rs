use crate::common::cluster::{AgentRecord, ClusterSnapshot};

/// Exact, case-sensitive match on the agent's `privateip` attribute.
pub fn find_registered_agent<'a>(snapshot: &'a ClusterSnapshot, agent_ip: &str) -> Option<&'a AgentRecord> {
    snapshot
        .agents()
        .iter()
        .find(|agent| agent.attributes.private_ip == agent_ip)
}

pub fn is_registered(snapshot: &ClusterSnapshot, agent_ip: &str) -> bool {
    find_registered_agent(snapshot, agent_ip).is_some()
}
