use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AgentAttributes {
    pub host: String,
    pub instance_type: String,
    #[serde(rename = "publicip")]
    pub public_ip: String,
    pub rack: String,
    #[serde(rename = "privateip")]
    pub private_ip: String,
}

/// One agent as reported in the leader's `slaves` list.
#[derive(Debug, Default, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AgentRecord {
    pub active: bool,
    pub pid: String,
    pub registered_time: f64, // seconds since UNIX_EPOCH
    pub attributes: AgentAttributes,
}

impl AgentRecord {
    pub fn registered_at(&self) -> Option<DateTime<Utc>> {
        epoch_seconds_to_utc(self.registered_time)
    }
}

/// Decoded body of one `/state` query.
///
/// Only the leader fills in `elected_time` and `slaves`; followers answer
/// with a `leader` pointer that differs from their own `pid`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ClusterSnapshot {
    #[serde(default)]
    pub elected_time: f64,
    pub leader: String,
    pub pid: String,
    #[serde(default)]
    pub slaves: Option<Vec<AgentRecord>>,
}

impl ClusterSnapshot {
    /// True when the answering instance reports itself as the elected leader.
    pub fn is_leader_response(&self) -> bool {
        self.elected_time != 0.0 && self.leader == self.pid
    }

    /// `elected_time` is set exactly when the instance is its own leader.
    /// Anything else is a transitional state (election in progress, stale pointer).
    pub fn is_consistent(&self) -> bool {
        (self.elected_time != 0.0) == (self.leader == self.pid)
    }

    pub fn agents(&self) -> &[AgentRecord] {
        self.slaves.as_deref().unwrap_or_default()
    }

    pub fn elected_at(&self) -> Option<DateTime<Utc>> {
        epoch_seconds_to_utc(self.elected_time)
    }
}

fn epoch_seconds_to_utc(secs: f64) -> Option<DateTime<Utc>> {
    if secs <= 0.0 || !secs.is_finite() {
        return None;
    }
    let whole = secs.trunc() as i64;
    let nanos = (secs.fract() * 1e9) as u32;
    DateTime::from_timestamp(whole, nanos)
}
