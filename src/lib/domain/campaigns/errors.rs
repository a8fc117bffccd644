//! Campaign errors

use std::{io, path::PathBuf};

use lettre::address::AddressError;
use thiserror::Error;
use tracing::debug;

use crate::domain::communication::mailer::SessionError;

/// Errors that can occur while loading recipients or a template
#[derive(Debug, Error)]
pub enum LoadError {
    /// The source file does not exist
    #[error("{} not found", .0.display())]
    NotFound(PathBuf),

    /// The source was readable but held no recipients
    #[error("no recipients found")]
    NoRecipients,

    /// The template subject or body is missing or empty
    #[error("template subject and body must not be empty")]
    EmptyTemplate,

    /// Unknown error
    #[error(transparent)]
    UnknownError(#[from] anyhow::Error),
}

/// Errors that can occur while building a single message
#[derive(Debug, Error)]
pub enum MessageError {
    /// The recipient record has no destination address
    #[error("recipient has no '{0}' field")]
    MissingAddress(&'static str),

    /// The destination is neither a bare address nor a `Name <address>` mailbox
    #[error("invalid recipient address: {0}")]
    InvalidAddress(#[from] AddressError),

    /// An attachment exists but could not be read
    #[error("could not read attachment {}: {source}", .path.display())]
    UnreadableAttachment {
        /// The attachment path
        path: PathBuf,
        /// The read error
        source: io::Error,
    },
}

/// A failure confined to one recipient of a batch
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The message could not be built
    #[error(transparent)]
    Message(#[from] MessageError),

    /// The session rejected the message
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        debug!("serde_json::Error -> LoadError");

        LoadError::UnknownError(err.into())
    }
}

impl From<csv::Error> for LoadError {
    fn from(err: csv::Error) -> Self {
        debug!("csv::Error -> LoadError");

        LoadError::UnknownError(err.into())
    }
}
