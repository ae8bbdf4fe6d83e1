pub mod mailer;
pub mod notifications;

pub use mailer::{Mailer, MailerError, NoopMailer, OutboundEmail, ResendMailer};
pub use notifications::NotificationService;
