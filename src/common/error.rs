/// Failures of a single polling tick. None of these end a watch; the loop
/// logs them and tries again after the poll interval.
#[derive(thiserror::Error, Debug)]
pub enum WatchError {
    #[error("failed to build state request for {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("state query to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("state response from {url} is not a valid cluster snapshot: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("malformed leader pointer {0:?}")]
    RedirectParse(String),
}
