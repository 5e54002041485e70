//! JSON-over-HTTP transactional email provider client.

use super::{MailReceipt, Mailer};
use crate::ChauffeurError;
use async_trait::async_trait;
use chauffeur_rs_config::MailConfig;
use chauffeur_rs_protocol::EmailMessage;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct SendResponse {
    #[serde(default)]
    id: Option<String>,
}

/// Mailer that posts each message to a provider endpoint with a bearer key.
#[derive(Clone)]
pub struct HttpMailer {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    from: String,
}

impl std::fmt::Debug for HttpMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpMailer")
            .field("endpoint", &self.endpoint)
            .field("from", &self.from)
            .finish_non_exhaustive()
    }
}

impl HttpMailer {
    /// Fails with `Configuration` when the API key or sender is missing.
    pub fn new(config: &MailConfig) -> Result<Self, ChauffeurError> {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: &MailConfig) -> Result<Self, ChauffeurError> {
        let (api_key, from) = config.credentials()?;
        Ok(Self {
            client,
            endpoint: config.api_url.clone(),
            api_key: api_key.to_string(),
            from: from.to_string(),
        })
    }

    /// Sender address used for every message.
    pub fn sender(&self) -> &str {
        &self.from
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, message: EmailMessage) -> Result<MailReceipt, ChauffeurError> {
        debug!(
            "sending email (subject_len={}, html_len={})",
            message.subject.len(),
            message.html.len()
        );
        let request = SendRequest {
            from: &message.from,
            to: [&message.to],
            subject: &message.subject,
            html: &message.html,
        };
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|err| ChauffeurError::Mail(err.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| ChauffeurError::Mail(err.to_string()))?;
        if !status.is_success() {
            warn!("email provider rejected message (status={})", status.as_u16());
            return Err(ChauffeurError::Mail(format!(
                "provider returned {} {body}",
                status.as_u16()
            )));
        }
        let parsed: SendResponse = serde_json::from_str(&body).unwrap_or_default();
        Ok(MailReceipt { id: parsed.id })
    }
}
