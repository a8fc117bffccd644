//! Email message

use lettre::message::Mailbox;

use crate::domain::communication::email_addresses::EmailAddress;

/// A file attached to a [`Message`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// The base file name shown to the recipient
    pub filename: String,

    /// The raw file content
    pub content: Vec<u8>,
}

/// A fully personalized email, ready to hand to a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// The sender of the email
    pub from: EmailAddress,

    /// The recipient of the email, with an optional display name
    pub to: Mailbox,

    /// The subject of the email
    pub subject: String,

    /// The plain text body of the email
    pub body: String,

    /// Files attached after the body, in order
    pub attachments: Vec<Attachment>,
}
