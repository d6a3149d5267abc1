use std::time::Duration;

use anyhow::Result;
use reqwest::Client;

use crate::common::{cluster::ClusterSnapshot, endpoint::Endpoint, error::WatchError};
use crate::traits::state_querier::StateQuerier;

/// Queries `/state` over plain HTTP.
#[derive(Clone)]
pub struct HttpStateQuerier {
    client: Client,
}

impl HttpStateQuerier {
    pub fn new(connect_timeout: Duration, tcp_keepalive: Duration) -> Result<Self> {
        log::debug!(
            "Creating state client with connect timeout {:?}, keep-alive {:?}",
            connect_timeout,
            tcp_keepalive
        );
        // Proxy settings come from the environment (reqwest default).
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .tcp_keepalive(tcp_keepalive)
            .build()?;
        Ok(HttpStateQuerier { client })
    }
}

impl StateQuerier for HttpStateQuerier {
    async fn fetch(&self, endpoint: &Endpoint) -> Result<ClusterSnapshot, WatchError> {
        let url = endpoint.url();
        log::debug!("Querying cluster state @ {}", url);

        // The state API ignores plain GETs here; it wants a POST, even an empty one.
        let request = self
            .client
            .post(&url)
            .body(Vec::<u8>::new())
            .build()
            .map_err(|source| WatchError::Request { url: url.clone(), source })?;

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|source| WatchError::Network { url: url.clone(), source })?;
        log::debug!("HTTP response from {}: {}", url, response.status());

        let body = response
            .bytes()
            .await
            .map_err(|source| WatchError::Network { url: url.clone(), source })?;

        serde_json::from_slice(&body).map_err(|source| WatchError::Decode { url, source })
    }
}
