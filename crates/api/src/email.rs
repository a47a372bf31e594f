//! Outbound email for password resets.
//!
//! SMTP is optional: when `SMTP_HOST` is unset the server still runs, it
//! just logs a warning instead of sending reset emails.

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

/// Default SMTP submission port (STARTTLS).
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// Default sender address when `SMTP_FROM` is not set.
pub const DEFAULT_FROM_ADDRESS: &str = "noreply@encuentro.local";

/// Default base URL for reset links when `RESET_LINK_BASE` is not set.
pub const DEFAULT_RESET_LINK_BASE: &str = "http://localhost:5173";

/// SMTP delivery configuration.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub from_address: String,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
    pub reset_link_base: String,
}

impl EmailConfig {
    /// Load SMTP configuration from environment variables.
    ///
    /// Returns `None` when `SMTP_HOST` is unset, which disables email delivery.
    ///
    /// | Variable          | Default                    | Description               |
    /// |-------------------|----------------------------|---------------------------|
    /// | `SMTP_HOST`       | (none)                     | SMTP relay host, required |
    /// | `SMTP_PORT`       | `587`                      | SMTP submission port      |
    /// | `SMTP_FROM`       | `noreply@encuentro.local`  | Sender address            |
    /// | `SMTP_USER`       | (none)                     | Relay username            |
    /// | `SMTP_PASSWORD`   | (none)                     | Relay password            |
    /// | `RESET_LINK_BASE` | `http://localhost:5173`    | Frontend base URL         |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;

        let smtp_port = std::env::var("SMTP_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_SMTP_PORT);

        let from_address =
            std::env::var("SMTP_FROM").unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string());

        let smtp_user = std::env::var("SMTP_USER").ok();
        let smtp_password = std::env::var("SMTP_PASSWORD").ok();

        let reset_link_base = std::env::var("RESET_LINK_BASE")
            .unwrap_or_else(|_| DEFAULT_RESET_LINK_BASE.to_string());

        Some(Self {
            smtp_host,
            smtp_port,
            from_address,
            smtp_user,
            smtp_password,
            reset_link_base,
        })
    }
}

/// Errors that can occur while sending an email.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    #[error("Invalid email address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Failed to build email: {0}")]
    Build(String),
}

/// Sends password reset emails over SMTP.
pub struct Mailer {
    config: EmailConfig,
}

impl Mailer {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Send a password reset email containing a tokenized reset link.
    ///
    /// The link points at the frontend's reset page; the token is valid
    /// for one hour.
    pub async fn send_password_reset(
        &self,
        to_email: &str,
        username: &str,
        token: &str,
    ) -> Result<(), EmailError> {
        let reset_link = format!(
            "{}/reset-password?token={}",
            self.config.reset_link_base, token
        );

        let body = format!(
            "Hi {username},\n\n\
             We received a request to reset your password.\n\n\
             Open the link below to choose a new one:\n\n\
             {reset_link}\n\n\
             The link expires within the next hour. If you did not request \
             this, you can safely ignore this email.\n"
        );

        let message = Message::builder()
            .from(self.config.from_address.parse()?)
            .to(to_email.parse()?)
            .subject("Reset your password")
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| EmailError::Build(e.to_string()))?;

        let mut transport =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)?
                .port(self.config.smtp_port);

        if let (Some(user), Some(password)) = (&self.config.smtp_user, &self.config.smtp_password)
        {
            transport = transport.credentials(Credentials::new(user.clone(), password.clone()));
        }

        transport.build().send(message).await?;

        tracing::info!(to = %to_email, "Password reset email sent");
        Ok(())
    }
}
