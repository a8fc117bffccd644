//! Sender and SMTP configuration

use std::{fmt, time::Duration};

use clap::Parser;
use thiserror::Error;

use crate::domain::{
    campaigns::Sender,
    communication::email_addresses::{EmailAddress, EmailAddressError},
};

/// Errors that can occur while resolving the configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The sender address or credential is missing or empty
    #[error("Missing required environment variables: GMAIL_EMAIL and GMAIL_PASSWORD must be set")]
    MissingCredentials,

    /// The sender address is not a valid email address
    #[error("invalid sender address: {0}")]
    InvalidSenderAddress(#[from] EmailAddressError),
}

/// A credential that never shows up in debug output
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    /// The raw credential
    pub fn expose(&self) -> &str {
        &self.0
    }

    fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<String> for Secret {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(\"***\")")
    }
}

/// SMTP settings as read from the environment or the command line
#[derive(Clone, Debug, Parser)]
pub struct SmtpSettings {
    /// The sender email address
    #[arg(long = "sender-email", env = "GMAIL_EMAIL")]
    pub email: Option<String>,

    /// The sender password or app password
    #[arg(long = "sender-password", env = "GMAIL_PASSWORD", hide_env_values = true)]
    pub password: Option<Secret>,

    /// The SMTP host
    #[arg(long = "smtp-server", env = "SMTP_SERVER", default_value = "smtp.gmail.com")]
    pub host: String,

    /// The SMTP port
    #[arg(long = "smtp-port", env = "SMTP_PORT", default_value = "587")]
    pub port: u16,

    /// The name substituted for `{Sender_Name}`
    #[arg(long = "sender-name", env = "SENDER_NAME", default_value = "Dummy Sender")]
    pub sender_name: String,

    /// Seconds to wait on the SMTP server before giving up
    #[arg(long = "smtp-timeout", env = "SMTP_TIMEOUT", default_value = "60")]
    pub timeout_secs: u64,

    /// Skip TLS certificate verification, for local test servers
    #[arg(long = "smtp-accept-invalid-certs", env = "SMTP_ACCEPT_INVALID_CERTS")]
    pub accept_invalid_certs: bool,
}

/// Validated configuration, created once at startup
#[derive(Clone, Debug)]
pub struct Config {
    /// Who messages are sent as
    pub sender: Sender,

    /// The sender credential
    pub credential: Secret,

    /// The SMTP host
    pub host: String,

    /// The SMTP port
    pub port: u16,

    /// Network timeout for every SMTP command
    pub timeout: Duration,

    /// Skip TLS certificate verification
    pub accept_invalid_certs: bool,
}

impl TryFrom<SmtpSettings> for Config {
    type Error = ConfigError;

    fn try_from(settings: SmtpSettings) -> Result<Self, Self::Error> {
        let email = settings
            .email
            .filter(|email| !email.trim().is_empty())
            .ok_or(ConfigError::MissingCredentials)?;

        let credential = settings
            .password
            .filter(|password| !password.is_blank())
            .ok_or(ConfigError::MissingCredentials)?;

        Ok(Self {
            sender: Sender {
                address: EmailAddress::new(&email)?,
                display_name: settings.sender_name,
            },
            credential,
            host: settings.host,
            port: settings.port,
            timeout: Duration::from_secs(settings.timeout_secs),
            accept_invalid_certs: settings.accept_invalid_certs,
        })
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use testresult::TestResult;

    use super::*;

    fn settings(email: Option<&str>, password: Option<&str>) -> SmtpSettings {
        SmtpSettings {
            email: email.map(str::to_string),
            password: password.map(|p| Secret::from(p.to_string())),
            host: "smtp.example.com".to_string(),
            port: 2525,
            sender_name: "Acme".to_string(),
            timeout_secs: 10,
            accept_invalid_certs: false,
        }
    }

    #[test]
    fn test_valid_settings() -> TestResult {
        let config = Config::try_from(settings(Some("sender@example.com"), Some("hunter2")))?;

        assert_eq!(config.sender.address.as_str(), "sender@example.com");
        assert_eq!(config.sender.display_name, "Acme");
        assert_eq!(config.credential.expose(), "hunter2");
        assert_eq!(config.host, "smtp.example.com");
        assert_eq!(config.port, 2525);
        assert_eq!(config.timeout, Duration::from_secs(10));

        Ok(())
    }

    #[test]
    fn test_missing_email_is_rejected() {
        let result = Config::try_from(settings(None, Some("hunter2")));

        assert!(matches!(result, Err(ConfigError::MissingCredentials)));
    }

    #[test]
    fn test_empty_password_is_rejected() {
        let result = Config::try_from(settings(Some("sender@example.com"), Some(" ")));

        assert!(matches!(result, Err(ConfigError::MissingCredentials)));
    }

    #[test]
    fn test_invalid_sender_address_is_rejected() {
        let result = Config::try_from(settings(Some("sender"), Some("hunter2")));

        assert!(matches!(result, Err(ConfigError::InvalidSenderAddress(_))));
    }

    fn default_of(id: &str) -> Option<String> {
        SmtpSettings::command()
            .get_arguments()
            .find(|arg| arg.get_id() == id)
            .and_then(|arg| arg.get_default_values().first().cloned())
            .map(|value| value.to_string_lossy().into_owned())
    }

    #[test]
    fn test_declared_defaults() {
        assert_eq!(default_of("host").as_deref(), Some("smtp.gmail.com"));
        assert_eq!(default_of("port").as_deref(), Some("587"));
        assert_eq!(default_of("sender_name").as_deref(), Some("Dummy Sender"));
        assert_eq!(default_of("timeout_secs").as_deref(), Some("60"));
        assert_eq!(default_of("email"), None);
    }

    #[test]
    fn test_flags_override_environment() -> TestResult {
        let settings = SmtpSettings::try_parse_from([
            "bulk-mailer",
            "--sender-email",
            "sender@example.com",
            "--sender-password",
            "hunter2",
            "--smtp-server",
            "smtp.example.com",
            "--smtp-port",
            "2525",
            "--sender-name",
            "Acme",
            "--smtp-timeout",
            "10",
        ])?;

        assert_eq!(settings.email.as_deref(), Some("sender@example.com"));
        assert_eq!(settings.host, "smtp.example.com");
        assert_eq!(settings.port, 2525);
        assert_eq!(settings.sender_name, "Acme");
        assert_eq!(settings.timeout_secs, 10);

        Ok(())
    }

    #[test]
    fn test_secret_is_redacted() {
        let secret = Secret::from("hunter2".to_string());

        assert_eq!(format!("{secret:?}"), "Secret(\"***\")");
    }
}
