//! SMTP session errors

use lettre::{address::AddressError, error::Error as LettreError};
use thiserror::Error;

/// Errors raised by an [`SmtpSession`](super::SmtpSession) or while opening one
#[derive(Debug, Error)]
pub enum SessionError {
    /// The server could not be reached
    #[error("could not connect to {host}:{port}: {cause}")]
    ConnectionFailed {
        /// The SMTP host
        host: String,
        /// The SMTP port
        port: u16,
        /// The underlying transport error
        cause: anyhow::Error,
    },

    /// The STARTTLS upgrade failed
    #[error("could not start encryption: {0}")]
    EncryptionFailed(anyhow::Error),

    /// The server rejected the credentials
    #[error("authentication failed: {0}")]
    AuthenticationFailed(anyhow::Error),

    /// The message could not be converted into a valid email
    #[error("invalid message: {0}")]
    InvalidMessage(anyhow::Error),

    /// The server rejected the message
    #[error("{0}")]
    SendFailed(anyhow::Error),

    /// The session was already closed
    #[error("session is closed")]
    Closed,

    /// Unknown error
    #[error(transparent)]
    UnknownError(anyhow::Error),
}

impl From<anyhow::Error> for SessionError {
    fn from(err: anyhow::Error) -> Self {
        SessionError::UnknownError(err)
    }
}

impl From<AddressError> for SessionError {
    fn from(err: AddressError) -> Self {
        SessionError::InvalidMessage(err.into())
    }
}

impl From<LettreError> for SessionError {
    fn from(err: LettreError) -> Self {
        SessionError::InvalidMessage(err.into())
    }
}
