use common::UserId;
use thiserror::Error;

/// Errors raised while querying the user directory.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The request could not be sent or timed out.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The directory answered that no user has this identity.
    #[error("User with id: {0} not found in user directory")]
    NotFound(UserId),

    /// The directory answered with a non-success status other than 404.
    #[error("User directory returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not a user record.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The directory is unreachable.
    #[error("User directory unavailable: {0}")]
    Unavailable(String),
}
