use anyhow::Result;

use crate::client::http_state_querier::HttpStateQuerier;
use crate::common::config::WatchConfig;

pub fn load_state_querier(config: &WatchConfig) -> Result<HttpStateQuerier> {
    log::debug!("Using HTTP state querier");
    HttpStateQuerier::new(config.connect_timeout(), config.tcp_keepalive())
}
