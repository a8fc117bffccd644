//! Outgoing messages and the SMTP session they are handed to

mod errors;
mod message;
mod session;

pub use errors::SessionError;
pub use message::{Attachment, Message};
pub use session::{SessionConnector, SessionGuard, SmtpSession};

#[cfg(test)]
pub mod tests {
    pub use super::session::{MockSessionConnector, MockSmtpSession};
}
