use reqwest::StatusCode;
use thiserror::Error;

/// Why an exchange with the chat backend failed.
///
/// The user only ever sees one generic notice; the variants exist so the
/// operator log says what actually went wrong.
#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("chat backend at {url} answered {status}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },

    #[error("malformed reply from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}
