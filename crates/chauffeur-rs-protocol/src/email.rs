//! Confirmation email request and provider message types.

use crate::reservation::ReservationForm;
use serde::{Deserialize, Serialize};

/// Body accepted by the email endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailRequest {
    /// Pre-rendered plain-text summary, used when no form data is sent.
    #[serde(default)]
    pub summary: Option<String>,
    /// Client address; falls back to the form's email.
    #[serde(default)]
    pub user_email: Option<String>,
    /// Subject for the admin notification.
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub form_data: Option<ReservationForm>,
}

impl EmailRequest {
    /// Client recipient: the explicit address, else the form's email.
    pub fn recipient(&self) -> Option<&str> {
        self.user_email
            .as_deref()
            .filter(|email| !email.is_empty())
            .or_else(|| {
                self.form_data
                    .as_ref()
                    .map(|form| form.email.as_str())
                    .filter(|email| !email.is_empty())
            })
    }
}

/// Single message handed to the email provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// `{ success, message, error? }` body used by the email and reservation endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StatusResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>, error: Option<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn recipient_prefers_user_email() {
        let request: EmailRequest = serde_json::from_value(json!({
            "userEmail": "client@example.com",
            "formData": { "email": "form@example.com" }
        }))
        .expect("request");
        assert_eq!(request.recipient(), Some("client@example.com"));
    }

    #[test]
    fn recipient_falls_back_to_form_email() {
        let request: EmailRequest = serde_json::from_value(json!({
            "userEmail": "",
            "formData": { "email": "form@example.com" }
        }))
        .expect("request");
        assert_eq!(request.recipient(), Some("form@example.com"));
    }

    #[test]
    fn recipient_missing_everywhere() {
        let request = EmailRequest::default();
        assert_eq!(request.recipient(), None);
    }
}
