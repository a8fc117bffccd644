//! Email addresses, messages and the SMTP session seam

pub mod email_addresses;
pub mod mailer;
