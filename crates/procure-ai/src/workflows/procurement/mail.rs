use chrono::{DateTime, Utc};
use mime::Mime;

/// File attached to an inbound or outbound message.
#[derive(Debug, Clone)]
pub struct EmailAttachment {
    pub file_name: String,
    pub content_type: Mime,
    pub content: Vec<u8>,
}

/// Fully rendered message handed to the mail transport.
#[derive(Debug, Clone)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
    pub attachments: Vec<EmailAttachment>,
}

/// Transport acknowledgement for a sent message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailReceipt {
    pub message_id: String,
}

/// Message pulled from the monitored inbox.
#[derive(Debug, Clone)]
pub struct InboundEmail {
    pub subject: String,
    pub from_address: String,
    pub received_at: DateTime<Utc>,
    pub text: String,
    pub html: Option<String>,
    pub attachments: Vec<EmailAttachment>,
}

/// Mail transport error.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("mail transport unavailable: {0}")]
    Transport(String),
    #[error("mailbox access failed: {0}")]
    Mailbox(String),
}

/// Outbound transport boundary (e.g. an SMTP adapter).
pub trait MailSender: Send + Sync {
    fn send(&self, message: OutboundEmail) -> Result<MailReceipt, MailError>;
}

/// Inbound polling boundary (e.g. an IMAP adapter).
pub trait MailboxPoller: Send + Sync {
    fn fetch_unseen_since(&self, since: DateTime<Utc>) -> Result<Vec<InboundEmail>, MailError>;
}
