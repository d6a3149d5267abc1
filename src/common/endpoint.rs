use std::fmt;

use crate::common::error::WatchError;

/// HTTP target of a state query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
    pub path: String,
}

impl Endpoint {
    pub fn new(host: impl Into<String>, port: u16, path: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port,
            path: path.into(),
        }
    }

    pub fn url(&self) -> String {
        format!(
            "http://{}:{}/{}",
            self.host,
            self.port,
            self.path.trim_start_matches('/')
        )
    }

    /// Builds the endpoint a follower points at, keeping this endpoint's path.
    ///
    /// `leader` has the form `<scheme>@<host>:<port>`, e.g. `master@172.31.43.147:5050`.
    pub fn redirect_to(&self, leader: &str) -> Result<Endpoint, WatchError> {
        let malformed = || WatchError::RedirectParse(leader.to_string());

        let (_, host_port) = leader.split_once('@').ok_or_else(malformed)?;
        let (host, port) = host_port.rsplit_once(':').ok_or_else(malformed)?;
        if host.is_empty() {
            return Err(malformed());
        }
        let port = port.parse::<u16>().map_err(|_| malformed())?;

        Ok(Endpoint::new(host, port, self.path.clone()))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}
