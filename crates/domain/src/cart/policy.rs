use std::str::FromStr;

use thiserror::Error;

/// What cart composition does when the user directory cannot answer or does
/// not know the cart's owner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DirectoryFailurePolicy {
    /// Fail the whole operation with `DomainError::UserNotFound` or
    /// `DomainError::DirectoryUnavailable`.
    #[default]
    FailRequest,
    /// Return the cart without its embedded user.
    OmitUser,
}

/// Error returned when parsing an unknown policy name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown directory failure policy '{0}', expected 'fail' or 'omit'")]
pub struct ParsePolicyError(String);

impl FromStr for DirectoryFailurePolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fail" => Ok(DirectoryFailurePolicy::FailRequest),
            "omit" => Ok(DirectoryFailurePolicy::OmitUser),
            other => Err(ParsePolicyError(other.to_string())),
        }
    }
}
