use thiserror::Error;

/// Failure classes of a request against the content API.
///
/// Pages never see these directly; they are turned into a string with
/// `to_string()` and stored in the error slot of the list that issued the
/// request.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request could not be sent, timed out, or the body could not be read.
    #[error("Fetch error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP error! Status: {0}")]
    Status(u16),

    /// `success: false` from the API, carrying its message.
    #[error("{0}")]
    Application(String),

    #[error("Invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Transport(e) if e.is_timeout())
    }
}
