//! SMTP session implementation

use std::fmt;

use anyhow::anyhow;
use lettre::{
    message::{
        header::{ContentTransferEncoding, ContentType},
        Attachment, Body, MultiPart, SinglePart,
    },
    transport::smtp::{
        authentication::{Credentials, Mechanism},
        client::{SmtpConnection, TlsParameters},
        extension::ClientId,
    },
    Message as Email,
};
use tracing::debug;

use crate::{
    domain::communication::mailer::{Message, SessionConnector, SessionError, SmtpSession},
    infrastructure::config::Config,
};

const AUTH_MECHANISMS: &[Mechanism] = &[Mechanism::Plain, Mechanism::Login];

const ATTACHMENT_CONTENT_TYPE: &str = "application/octet-stream";

/// Opens STARTTLS-upgraded, authenticated SMTP sessions
#[derive(Debug, Clone)]
pub struct SMTPConnector {
    config: Config,
}

impl SMTPConnector {
    /// Create a new SMTP connector
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    fn handshake(
        &self,
        connection: &mut SmtpConnection,
        hello: &ClientId,
    ) -> Result<(), SessionError> {
        let tls = TlsParameters::builder(self.config.host.clone())
            .dangerous_accept_invalid_certs(self.config.accept_invalid_certs)
            .build()
            .map_err(|e| SessionError::EncryptionFailed(e.into()))?;

        connection
            .starttls(&tls, hello)
            .map_err(|e| SessionError::EncryptionFailed(e.into()))?;

        let credentials = Credentials::new(
            self.config.sender.address.to_string(),
            self.config.credential.expose().to_string(),
        );

        connection
            .auth(AUTH_MECHANISMS, &credentials)
            .map_err(|e| SessionError::AuthenticationFailed(e.into()))?;

        Ok(())
    }
}

impl SessionConnector for SMTPConnector {
    #[mutants::skip]
    fn connect(&self) -> Result<Box<dyn SmtpSession>, SessionError> {
        let hello = ClientId::default();

        let mut connection = SmtpConnection::connect(
            (self.config.host.as_str(), self.config.port),
            Some(self.config.timeout),
            &hello,
            None,
            None,
        )
        .map_err(|e| SessionError::ConnectionFailed {
            host: self.config.host.clone(),
            port: self.config.port,
            cause: e.into(),
        })?;

        debug!("connected to {}:{}", self.config.host, self.config.port);

        if let Err(e) = self.handshake(&mut connection, &hello) {
            connection.abort();
            return Err(e);
        }

        Ok(Box::new(SMTPSession {
            connection: Some(connection),
        }))
    }
}

/// An open SMTP connection
pub struct SMTPSession {
    connection: Option<SmtpConnection>,
}

impl SmtpSession for SMTPSession {
    fn send(&mut self, message: &Message) -> Result<(), SessionError> {
        let connection = self.connection.as_mut().ok_or(SessionError::Closed)?;

        let email = to_email(message)?;

        connection
            .send(email.envelope(), &email.formatted())
            .map_err(|e| SessionError::SendFailed(e.into()))?;

        Ok(())
    }

    fn close(&mut self) -> Result<(), SessionError> {
        let Some(mut connection) = self.connection.take() else {
            return Ok(());
        };

        if let Err(e) = connection.quit() {
            connection.abort();
            return Err(SessionError::UnknownError(e.into()));
        }

        Ok(())
    }
}

impl fmt::Debug for SMTPSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SMTPSession")
            .field("open", &self.connection.is_some())
            .finish()
    }
}

/// Convert a [`Message`] into a `multipart/mixed` email: the plain text body
/// followed by one base64 `application/octet-stream` part per attachment.
pub fn to_email(message: &Message) -> Result<Email, SessionError> {
    let mut parts = MultiPart::mixed().singlepart(SinglePart::plain(message.body.clone()));

    for attachment in &message.attachments {
        let content =
            Body::new_with_encoding(attachment.content.clone(), ContentTransferEncoding::Base64)
                .map_err(|_| {
                    SessionError::InvalidMessage(anyhow!(
                        "could not encode attachment {}",
                        attachment.filename
                    ))
                })?;

        let content_type = ContentType::parse(ATTACHMENT_CONTENT_TYPE)
            .map_err(|e| SessionError::InvalidMessage(e.into()))?;

        parts = parts.singlepart(
            Attachment::new(attachment.filename.clone()).body(content, content_type),
        );
    }

    Ok(Email::builder()
        .from(message.from.as_str().parse()?)
        .to(message.to.clone())
        .subject(message.subject.clone())
        .multipart(parts)?)
}
