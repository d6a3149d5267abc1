use crate::common::{cluster::ClusterSnapshot, endpoint::Endpoint, error::WatchError};

/// One round trip to a cluster member's state endpoint. Implementations make
/// exactly one outbound request per call and never retry.
#[trait_variant::make(StateQuerier: Send)]
pub trait UnsendStateQuerier {
    async fn fetch(&self, endpoint: &Endpoint) -> Result<ClusterSnapshot, WatchError>;
}
