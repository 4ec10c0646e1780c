/// Failure taxonomy for a scrape run.
///
/// `Transient` covers rate limiting and network-level failures; during
/// continuation resolution these are caught per subtree so one bad branch does
/// not abort the whole scrape.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Config(String),

    #[error("submission `{0}` was not found")]
    NotFound(String),

    #[error("transient api failure: {0}")]
    Transient(String),

    #[error("unexpected status {status} for {url}")]
    Api { status: u16, url: String },

    #[error("invalid api response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        // Transport-level reqwest failures (connect, timeout, body read) are
        // all retryable conditions from the caller's point of view.
        Error::Transient(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::InvalidResponse(e.to_string())
    }
}
