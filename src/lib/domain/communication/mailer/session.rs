//! SMTP session seam and its scoped guard

use std::fmt;

use tracing::{info, warn};

#[cfg(test)]
use mockall::mock;

use super::{Message, SessionError};

/// One authenticated connection to the mail server.
///
/// A session is owned by exactly one operation. `close` must tolerate being
/// called on a half-open connection and must be safe to call twice.
pub trait SmtpSession: Send {
    /// Send one message
    fn send(&mut self, message: &Message) -> Result<(), SessionError>;

    /// Close the connection
    fn close(&mut self) -> Result<(), SessionError>;
}

/// Opens new [`SmtpSession`]s: connect, start encryption, authenticate.
pub trait SessionConnector: Send + Sync + 'static {
    /// Open a fresh, authenticated session
    fn connect(&self) -> Result<Box<dyn SmtpSession>, SessionError>;
}

#[cfg(test)]
mock! {
    pub SmtpSession {}

    impl SmtpSession for SmtpSession {
        fn send(&mut self, message: &Message) -> Result<(), SessionError>;
        fn close(&mut self) -> Result<(), SessionError>;
    }
}

#[cfg(test)]
mock! {
    pub SessionConnector {}

    impl SessionConnector for SessionConnector {
        fn connect(&self) -> Result<Box<dyn SmtpSession>, SessionError>;
    }
}

/// Owns a session for the span of one operation and closes it exactly once,
/// either through [`SessionGuard::close`] or when dropped.
pub struct SessionGuard {
    session: Option<Box<dyn SmtpSession>>,
}

impl SessionGuard {
    /// Take ownership of an open session
    pub fn new(session: Box<dyn SmtpSession>) -> Self {
        Self {
            session: Some(session),
        }
    }

    /// Send a message over the guarded session
    pub fn send(&mut self, message: &Message) -> Result<(), SessionError> {
        match self.session.as_mut() {
            Some(session) => session.send(message),
            None => Err(SessionError::Closed),
        }
    }

    /// Close the session now instead of at the end of the scope
    pub fn close(mut self) {
        self.release();
    }

    fn release(&mut self) {
        let Some(mut session) = self.session.take() else {
            return;
        };

        match session.close() {
            Ok(()) => info!("SMTP connection closed"),
            Err(e) => warn!("Failed to close SMTP connection cleanly: {e}"),
        }
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for SessionGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionGuard")
            .field("open", &self.session.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use testresult::TestResult;

    use crate::domain::communication::email_addresses::EmailAddress;

    use super::*;

    fn message() -> TestResult<Message> {
        Ok(Message {
            from: EmailAddress::new("sender@example.com")?,
            to: "ann@example.com".parse()?,
            subject: "Hello".to_string(),
            body: "Hi Ann".to_string(),
            attachments: vec![],
        })
    }

    #[test]
    fn test_guard_closes_session_on_drop() {
        let mut session = MockSmtpSession::new();
        session.expect_close().times(1).returning(|| Ok(()));

        let guard = SessionGuard::new(Box::new(session));

        drop(guard);
    }

    #[test]
    fn test_explicit_close_does_not_close_twice() {
        let mut session = MockSmtpSession::new();
        session.expect_close().times(1).returning(|| Ok(()));

        SessionGuard::new(Box::new(session)).close();
    }

    #[test]
    fn test_close_failure_is_suppressed() {
        let mut session = MockSmtpSession::new();
        session
            .expect_close()
            .times(1)
            .returning(|| Err(SessionError::UnknownError(anyhow!("connection reset"))));

        SessionGuard::new(Box::new(session)).close();
    }

    #[test]
    fn test_send_is_forwarded_to_session() -> TestResult {
        let expected = message()?;
        let mut session = MockSmtpSession::new();
        session
            .expect_send()
            .times(1)
            .withf(|message| message.to.email.to_string() == "ann@example.com")
            .returning(|_| Ok(()));
        session.expect_close().times(1).returning(|| Ok(()));

        let mut guard = SessionGuard::new(Box::new(session));

        guard.send(&expected)?;

        Ok(())
    }

    #[test]
    fn test_guard_closes_session_when_unwinding() {
        let mut session = MockSmtpSession::new();
        session.expect_close().times(1).returning(|| Ok(()));

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
            let _guard = SessionGuard::new(Box::new(session));
            panic!("defect while the session is open");
        }));

        assert!(result.is_err());
    }
}
