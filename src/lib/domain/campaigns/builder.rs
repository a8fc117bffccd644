//! Message construction

use std::{fs, path::Path};

use lettre::message::Mailbox;
use tracing::debug;

use crate::domain::communication::{
    email_addresses::EmailAddress,
    mailer::{Attachment, Message},
};

use super::{render, MessageError, RecipientRecord, Template, ADDRESS_FIELD};

/// Who the batch is sent as
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    /// The `From` address
    pub address: EmailAddress,

    /// The name substituted for `{Sender_Name}`
    pub display_name: String,
}

/// Builds [`Message`]s for a single sender
#[derive(Debug, Clone)]
pub struct MessageBuilder {
    sender: Sender,
}

impl MessageBuilder {
    /// Create a new message builder
    pub fn new(sender: Sender) -> Self {
        Self { sender }
    }

    /// Personalize `template` for `recipient` and attach the given files.
    ///
    /// # Returns
    /// - [`Ok`] with the [`Message`] to send.
    /// - [`Err`] with a [`MessageError`] if the recipient has no usable address
    ///   or an existing attachment cannot be read.
    pub fn build<P: AsRef<Path>>(
        &self,
        recipient: &RecipientRecord,
        template: &Template,
        attachment_paths: &[P],
    ) -> Result<Message, MessageError> {
        let to = recipient
            .address()
            .ok_or(MessageError::MissingAddress(ADDRESS_FIELD))?;

        let name = &self.sender.display_name;

        self.build_literal(
            to,
            &render(&template.subject_pattern, recipient, name),
            &render(&template.body_pattern, recipient, name),
            attachment_paths,
        )
    }

    /// Build a message from a literal subject and body, with no personalization
    pub fn build_literal<P: AsRef<Path>>(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        attachment_paths: &[P],
    ) -> Result<Message, MessageError> {
        Ok(Message {
            from: self.sender.address.clone(),
            to: to.trim().parse::<Mailbox>()?,
            subject: subject.to_string(),
            body: body.to_string(),
            attachments: read_attachments(attachment_paths)?,
        })
    }
}

/// Read every path that names a regular file; anything else is skipped.
fn read_attachments<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<Attachment>, MessageError> {
    let mut attachments = Vec::with_capacity(paths.len());

    for path in paths.iter().map(AsRef::as_ref) {
        if !path.is_file() {
            debug!("skipping attachment {}: not a file", path.display());
            continue;
        }

        let content = fs::read(path).map_err(|source| MessageError::UnreadableAttachment {
            path: path.to_path_buf(),
            source,
        })?;

        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        attachments.push(Attachment { filename, content });
    }

    Ok(attachments)
}
