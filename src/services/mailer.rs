use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

const RESEND_API_URL: &str = "https://api.resend.com/emails";

/// A single outbound email, already rendered to HTML.
#[derive(Debug, Clone)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[derive(Debug, thiserror::Error)]
pub enum MailerError {
    #[error("email request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("email provider rejected the send ({status}): {message}")]
    Api { status: u16, message: String },
}

/// Outbound email sink. Send failures are reported to the caller, which is
/// expected to log and move on; a notification outage must never fail the
/// resource write that triggered it.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailerError>;
}

/// Mailer backed by the Resend REST API.
pub struct ResendMailer {
    client: reqwest::Client,
    api_key: String,
    from: String,
}

#[derive(Serialize)]
struct ResendPayload<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

impl ResendMailer {
    pub fn new(api_key: impl Into<String>, from: impl Into<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .user_agent("RainbowFilms/1.0")
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build email HTTP client: {e}"))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            from: from.into(),
        })
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailerError> {
        let payload = ResendPayload {
            from: &self.from,
            to: &email.to,
            subject: &email.subject,
            html: &email.html,
        };

        let response = self
            .client
            .post(RESEND_API_URL)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(MailerError::Api {
                status: status.as_u16(),
                message,
            });
        }

        debug!("Sent email '{}' to {}", email.subject, email.to);
        Ok(())
    }
}

/// Mailer used when no `RESEND_API_KEY` is configured. Accepts every send.
pub struct NoopMailer;

#[async_trait]
impl Mailer for NoopMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailerError> {
        debug!(
            "Email disabled, dropping '{}' addressed to {}",
            email.subject, email.to
        );
        Ok(())
    }
}
