use std::sync::Arc;
use tracing::warn;

use crate::config::Config;
use crate::entities::contacts;
use crate::services::mailer::{Mailer, OutboundEmail};

/// Fallback recipient for admin-facing notifications when `ADMIN_EMAIL`
/// is not configured.
const DEFAULT_ADMIN_EMAIL: &str = "admin@rainbowfilms.com";

/// Builds and dispatches the templated emails triggered by contact
/// submissions and newsletter signups. Send failures are logged and
/// swallowed; the primary write has already committed by the time this
/// service runs.
pub struct NotificationService {
    mailer: Arc<dyn Mailer>,
    admin_email: String,
    frontend_url: Option<String>,
}

impl NotificationService {
    #[must_use]
    pub fn new(mailer: Arc<dyn Mailer>, config: &Config) -> Self {
        Self {
            mailer,
            admin_email: config
                .email
                .admin_email
                .clone()
                .unwrap_or_else(|| DEFAULT_ADMIN_EMAIL.to_string()),
            frontend_url: config.server.frontend_url.clone(),
        }
    }

    /// Notify the studio inbox and confirm receipt to the submitter.
    /// Two sequential send attempts; neither outcome affects the caller.
    pub async fn contact_received(&self, contact: &contacts::Model) {
        let admin_email = OutboundEmail {
            to: self.admin_email.clone(),
            subject: format!("Contact Form: {}", contact.subject),
            html: self.render_admin_notification(contact),
        };

        if let Err(e) = self.mailer.send(&admin_email).await {
            warn!("Failed to send contact notification email: {e}");
        }

        let confirmation = OutboundEmail {
            to: contact.email.clone(),
            subject: "We received your message!".to_string(),
            html: self.render_contact_confirmation(contact),
        };

        if let Err(e) = self.mailer.send(&confirmation).await {
            warn!("Failed to send contact confirmation email: {e}");
        }
    }

    /// Welcome email for a new newsletter subscriber.
    pub async fn subscriber_joined(&self, email: &str) {
        let welcome = OutboundEmail {
            to: email.to_string(),
            subject: "Welcome to the Rainbow Films Newsletter!".to_string(),
            html: self.render_welcome(),
        };

        if let Err(e) = self.mailer.send(&welcome).await {
            warn!("Failed to send welcome email: {e}");
        }
    }

    fn render_admin_notification(&self, contact: &contacts::Model) -> String {
        format!(
            "<div style=\"font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;\">\
             <h2>New Contact Form Submission</h2>\
             <p><strong>Name:</strong> {name}</p>\
             <p><strong>Email:</strong> {email}</p>\
             <p><strong>Subject:</strong> {subject}</p>\
             <p><strong>Message:</strong></p>\
             <p style=\"background: #f5f5f5; padding: 15px; border-radius: 4px;\">{message}</p>\
             <p style=\"color: #666; font-size: 12px;\">Sent from the Rainbow Films contact form.</p>\
             </div>",
            name = html_escape::encode_text(&contact.name),
            email = html_escape::encode_text(&contact.email),
            subject = html_escape::encode_text(&contact.subject),
            message = html_escape::encode_text(&contact.message),
        )
    }

    fn render_contact_confirmation(&self, contact: &contacts::Model) -> String {
        format!(
            "<div style=\"font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;\">\
             <h1>Thank You for Contacting Us!</h1>\
             <p>Hi {name},</p>\
             <p>We've received your message regarding \
             \"<strong>{subject}</strong>\" and our team will get back to you \
             within 24-48 hours at this address.</p>\
             {link}\
             </div>",
            name = html_escape::encode_text(&contact.name),
            subject = html_escape::encode_text(&contact.subject),
            link = self.website_link(),
        )
    }

    fn render_welcome(&self) -> String {
        format!(
            "<div style=\"font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;\">\
             <h1>Welcome to Rainbow Films!</h1>\
             <p>Thank you for subscribing to our newsletter. You'll now receive \
             updates about latest releases, behind-the-scenes content, and \
             special events.</p>\
             {link}\
             <p style=\"color: #999; font-size: 12px;\">If you didn't subscribe, \
             you can safely ignore this email.</p>\
             </div>",
            link = self.website_link(),
        )
    }

    fn website_link(&self) -> String {
        self.frontend_url.as_ref().map_or_else(String::new, |url| {
            format!(
                "<p><a href=\"{}\">Visit Our Website</a></p>",
                html_escape::encode_double_quoted_attribute(url)
            )
        })
    }
}
