use thiserror::Error;

use crate::Status;

/// An error occurred while authenticating, deriving a key, or encrypting/decrypting a
/// stream.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptorError {
    /// The key length is not valid for the chosen cipher algorithm.
    #[error("Invalid key size")]
    InvalidKeySize,

    /// The initialization vector does not match the block size of the chosen cipher
    /// algorithm.
    #[error("Invalid IV size or length")]
    InvalidIvSizeOrLength,

    /// A cipher operation failed. Once this has been returned by a [`crate::StreamCipher`]
    /// every subsequent call on the same instance returns it again.
    #[error("Cryptor operation failed: {0}")]
    Status(Status),

    /// The cipher has already been finalized and cannot process any more input.
    #[error("Cryptor has already been finalized")]
    Finalized,

    /// An operation failed with a native status code and a description of the failure.
    #[error("{message}")]
    Fail { status: Status, message: String },

    /// A status code was received which does not map onto a known [`Status`].
    #[error("Unexpected status code: {0}")]
    UnexpectedStatus(i32),

    /// A hex encoded value could not be decoded.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl CryptorError {
    /// The status code carried by the error, if any.
    #[must_use]
    pub fn status(&self) -> Option<Status> {
        match self {
            CryptorError::Status(status) | CryptorError::Fail { status, .. } => Some(*status),
            _ => None,
        }
    }
}
