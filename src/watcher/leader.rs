use crate::common::{cluster::ClusterSnapshot, endpoint::Endpoint, error::WatchError};
use crate::traits::state_querier::StateQuerier;

/// Returns the leader's view of the cluster.
///
/// The queried member answers for itself when it is the leader. Otherwise its
/// `leader` pointer is followed once; the second answer is returned as-is even
/// if it is not a leader response either.
pub async fn resolve_leader<Q>(querier: &Q, endpoint: &Endpoint) -> Result<ClusterSnapshot, WatchError>
where
    Q: StateQuerier + Sync,
{
    let snapshot = querier.fetch(endpoint).await?;
    if snapshot.is_leader_response() {
        match snapshot.elected_at() {
            Some(at) => log::debug!("{} is the elected leader since {}", endpoint, at.to_rfc3339()),
            None => log::debug!("{} is the elected leader", endpoint),
        }
        return Ok(snapshot);
    }
    if !snapshot.is_consistent() {
        log::warn!(
            "Inconsistent state from {}: elected_time={} leader={:?} pid={:?}",
            endpoint,
            snapshot.elected_time,
            snapshot.leader,
            snapshot.pid
        );
    }

    let leader = endpoint.redirect_to(&snapshot.leader)?;
    log::debug!("{} is not the leader, querying {}", endpoint, leader);

    let snapshot = querier.fetch(&leader).await?;
    if !snapshot.is_leader_response() {
        log::warn!(
            "{} did not answer as leader (leader={:?}); not following further",
            leader,
            snapshot.leader
        );
    }
    Ok(snapshot)
}
