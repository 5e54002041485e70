//! Outbound email delivery.

mod http;

pub use http::HttpMailer;

use crate::ChauffeurError;
use async_trait::async_trait;
use chauffeur_rs_protocol::EmailMessage;

/// Provider acknowledgement for a sent message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MailReceipt {
    /// Provider-assigned message id, when the provider returns one.
    pub id: Option<String>,
}

/// Transactional email sender.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send one message; a single attempt, no retries.
    async fn send(&self, message: EmailMessage) -> Result<MailReceipt, ChauffeurError>;
}
