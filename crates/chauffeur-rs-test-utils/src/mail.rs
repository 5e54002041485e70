use async_trait::async_trait;
use chauffeur_rs_core::{ChauffeurError, MailReceipt, Mailer};
use chauffeur_rs_protocol::EmailMessage;
use parking_lot::Mutex;
use std::sync::Arc;

/// Mailer that keeps every message it is asked to send.
#[derive(Clone, Default)]
pub struct RecordingMailer {
    sent: Arc<Mutex<Vec<EmailMessage>>>,
    fail_at: Option<usize>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the send with this zero-based index; earlier sends succeed.
    pub fn failing_at(mut self, index: usize) -> Self {
        self.fail_at = Some(index);
        self
    }

    /// Messages handed to the mailer, including a failed one.
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: EmailMessage) -> Result<MailReceipt, ChauffeurError> {
        let index = {
            let mut sent = self.sent.lock();
            sent.push(message);
            sent.len() - 1
        };
        if self.fail_at == Some(index) {
            return Err(ChauffeurError::Mail(format!("send {index} rejected")));
        }
        Ok(MailReceipt {
            id: Some(format!("msg-{index}")),
        })
    }
}

/// Mailer whose every send fails with a fixed message.
#[derive(Debug, Clone)]
pub struct FailingMailer {
    message: String,
}

impl FailingMailer {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl Mailer for FailingMailer {
    async fn send(&self, _message: EmailMessage) -> Result<MailReceipt, ChauffeurError> {
        Err(ChauffeurError::Mail(self.message.clone()))
    }
}
