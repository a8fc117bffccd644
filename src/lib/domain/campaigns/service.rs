//! Campaign service: the batch run and the one-off send

use std::{
    any::Any,
    panic::{self, AssertUnwindSafe},
    path::Path,
    sync::Arc,
    time::Duration,
};

use tracing::{error, info, warn};

use crate::domain::communication::mailer::{SessionConnector, SessionGuard};

use super::{
    DeliveryError, LoadError, MessageBuilder, Pacer, RecipientRecord, RecipientSource, RunReport,
    Sender, Template, TemplateSource, CONNECT_FAILURE, LOAD_FAILURE,
};

/// Sends personalized messages over one SMTP session per operation
#[derive(Debug, Clone)]
pub struct CampaignService<C, P>
where
    C: SessionConnector,
    P: Pacer,
{
    connector: Arc<C>,
    pacer: Arc<P>,
    builder: MessageBuilder,
}

impl<C, P> CampaignService<C, P>
where
    C: SessionConnector,
    P: Pacer,
{
    /// Create a new campaign service
    pub fn new(connector: Arc<C>, pacer: Arc<P>, sender: Sender) -> Self {
        Self {
            connector,
            pacer,
            builder: MessageBuilder::new(sender),
        }
    }

    /// Sends the template to every recipient over a single session.
    ///
    /// # Arguments
    /// * `recipients` - Where the ordered recipient list is loaded from.
    /// * `template` - Where the subject and body patterns are loaded from.
    /// * `attachment_paths` - Files attached to every message; missing ones are skipped.
    /// * `delay` - Pause after each successful send except the last one.
    ///
    /// # Returns
    /// A [`RunReport`]. Loading and connection failures abort the run with a single
    /// error entry; every other failure is counted against its recipient and the
    /// run carries on.
    pub async fn send_bulk<R, T, A>(
        &self,
        recipients: &R,
        template: &T,
        attachment_paths: &[A],
        delay: Duration,
    ) -> RunReport
    where
        R: RecipientSource + ?Sized,
        T: TemplateSource + ?Sized,
        A: AsRef<Path>,
    {
        let Some((recipients, template)) = load(recipients, template) else {
            return RunReport::aborted(LOAD_FAILURE);
        };

        let mut session = match self.open_session() {
            Ok(session) => session,
            Err(e) => {
                error!("Failed to connect to Gmail: {e}");
                return RunReport::aborted(CONNECT_FAILURE);
            }
        };

        let total = recipients.len();
        let mut report = RunReport::default();

        for (index, recipient) in recipients.iter().enumerate() {
            let position = index + 1;
            let address = recipient.address().unwrap_or("unknown");

            let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                self.deliver(&mut session, recipient, &template, attachment_paths)
            }));

            let failure = match outcome {
                Ok(Ok(())) => None,
                Ok(Err(e)) => Some(e.to_string()),
                Err(payload) => Some(format!("unexpected failure: {}", panic_message(&*payload))),
            };

            match failure {
                None => {
                    report.record_success();
                    info!("Email {position}/{total} sent successfully to {address}");

                    if !delay.is_zero() && position < total {
                        self.pacer.pause(delay).await;
                    }
                }
                Some(cause) => {
                    let message = format!("Failed to send email to {address}: {cause}");
                    error!("{message}");
                    report.record_failure(message);
                }
            }
        }

        session.close();

        info!(
            success = report.success_count,
            failed = report.failed_count,
            "Bulk send finished"
        );

        report
    }

    /// Sends one literal message over a fresh session.
    ///
    /// Returns whether the server accepted the message; the reason for a failure
    /// is only logged. Use [`CampaignService::try_send_single`] to inspect it.
    pub fn send_single<A: AsRef<Path>>(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        attachment_paths: &[A],
    ) -> bool {
        match self.try_send_single(to, subject, body, attachment_paths) {
            Ok(()) => {
                info!("Email sent successfully to {to}");
                true
            }
            Err(e) => {
                error!("Failed to send email to {to}: {e}");
                false
            }
        }
    }

    /// Sends one literal message over a fresh session, returning why it failed.
    pub fn try_send_single<A: AsRef<Path>>(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        attachment_paths: &[A],
    ) -> Result<(), DeliveryError> {
        let mut session = self.open_session()?;

        let message = self
            .builder
            .build_literal(to, subject, body, attachment_paths)?;

        session.send(&message)?;

        Ok(())
    }

    fn open_session(&self) -> Result<SessionGuard, DeliveryError> {
        let session = self.connector.connect()?;

        info!("Successfully connected to SMTP server");

        Ok(SessionGuard::new(session))
    }

    fn deliver<A: AsRef<Path>>(
        &self,
        session: &mut SessionGuard,
        recipient: &RecipientRecord,
        template: &Template,
        attachment_paths: &[A],
    ) -> Result<(), DeliveryError> {
        let message = self.builder.build(recipient, template, attachment_paths)?;

        session.send(&message)?;

        Ok(())
    }
}

/// Load both inputs, logging whichever failed. `None` means the run cannot start.
fn load<R, T>(recipients: &R, template: &T) -> Option<(Vec<RecipientRecord>, Template)>
where
    R: RecipientSource + ?Sized,
    T: TemplateSource + ?Sized,
{
    let recipients = recipients
        .load_recipients()
        .and_then(|list| {
            if list.is_empty() {
                Err(LoadError::NoRecipients)
            } else {
                Ok(list)
            }
        })
        .inspect(|list| info!("Loaded {} recipients", list.len()))
        .inspect_err(|e| error!("Error loading recipients: {e}"));

    let template = template
        .load_template()
        .and_then(|template| {
            if template.is_usable() {
                Ok(template)
            } else {
                Err(LoadError::EmptyTemplate)
            }
        })
        .inspect_err(|e| error!("Error loading template: {e}"));

    match (recipients, template) {
        (Ok(recipients), Ok(template)) => Some((recipients, template)),
        _ => {
            warn!("{LOAD_FAILURE}");
            None
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "panic"
    }
}
