use thiserror::Error;

/// Failure of a call to the run service.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(#[from] gloo_net::Error),

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("log chunk from {url} carried no cursor")]
    MissingCursor { url: String },
}
