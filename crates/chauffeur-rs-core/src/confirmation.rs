//! Client confirmation and admin notification emails.

use crate::ChauffeurError;
use crate::mail::Mailer;
use crate::summary::{reservation_summary, summary_html};
use chauffeur_rs_config::MailConfig;
use chauffeur_rs_protocol::{EmailMessage, EmailRequest};
use chrono::Utc;
use log::{debug, info};
use std::sync::Arc;

/// Subject of the email sent to the client.
pub const CLIENT_SUBJECT: &str = "Reservation Confirmed - Godandi & Sons Luxury Chauffeur";
/// Prefix of the default admin subject; the client name follows.
pub const ADMIN_SUBJECT_PREFIX: &str = "New Luxury Transport Reservation - ";
/// Validation message when no client address can be resolved.
pub const MISSING_RECIPIENT: &str = "Missing user email";

const FALLBACK_SUMMARY: &str = "Reservation";

/// Sends the confirmation pair: client first, then admin.
#[derive(Clone)]
pub struct ConfirmationService {
    mailer: Arc<dyn Mailer>,
    from: String,
    admin: String,
}

impl ConfirmationService {
    pub fn new(mailer: Arc<dyn Mailer>, from: impl Into<String>, admin: impl Into<String>) -> Self {
        Self {
            mailer,
            from: from.into(),
            admin: admin.into(),
        }
    }

    /// Sender from the mail config; admin mail goes to `admin_email`, else the sender.
    pub fn from_config(mailer: Arc<dyn Mailer>, config: &MailConfig) -> Result<Self, ChauffeurError> {
        let (_, from) = config.credentials()?;
        let admin = config.admin_recipient().unwrap_or(from);
        Ok(Self::new(mailer, from, admin))
    }

    /// Send both emails for `request`.
    ///
    /// A request with no resolvable recipient is rejected before anything is
    /// sent. The admin email is only attempted after the client email went out.
    pub async fn send_confirmation(&self, request: &EmailRequest) -> Result<(), ChauffeurError> {
        let recipient = request
            .recipient()
            .ok_or_else(|| ChauffeurError::Validation(MISSING_RECIPIENT.to_string()))?;
        let html = render_body(request);

        let client = EmailMessage {
            from: self.from.clone(),
            to: recipient.to_string(),
            subject: CLIENT_SUBJECT.to_string(),
            html: html.clone(),
        };
        let receipt = self.mailer.send(client).await?;
        debug!("client confirmation sent (id={:?})", receipt.id);

        let admin = EmailMessage {
            from: self.from.clone(),
            to: self.admin.clone(),
            subject: admin_subject(request),
            html,
        };
        let receipt = self.mailer.send(admin).await?;
        info!("confirmation emails sent (admin_id={:?})", receipt.id);
        Ok(())
    }
}

fn render_body(request: &EmailRequest) -> String {
    match &request.form_data {
        Some(form) => summary_html(&reservation_summary(form, Utc::now())),
        None => summary_html(request.summary.as_deref().unwrap_or(FALLBACK_SUMMARY)),
    }
}

/// Explicit subject when non-empty, else the prefix plus the client name.
pub fn admin_subject(request: &EmailRequest) -> String {
    if let Some(subject) = request.subject.as_deref().filter(|s| !s.is_empty()) {
        return subject.to_string();
    }
    let name = request
        .client_name
        .as_deref()
        .or_else(|| request.form_data.as_ref().map(|form| form.name.as_str()))
        .unwrap_or_default();
    format!("{ADMIN_SUBJECT_PREFIX}{name}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chauffeur_rs_protocol::ReservationForm;
    use pretty_assertions::assert_eq;

    #[test]
    fn admin_subject_prefers_explicit_subject() {
        let request = EmailRequest {
            subject: Some("Custom".to_string()),
            client_name: Some("Ada".to_string()),
            ..EmailRequest::default()
        };
        assert_eq!(admin_subject(&request), "Custom");
    }

    #[test]
    fn admin_subject_falls_back_to_client_then_form_name() {
        let with_client = EmailRequest {
            client_name: Some("Ada".to_string()),
            ..EmailRequest::default()
        };
        assert_eq!(admin_subject(&with_client), "New Luxury Transport Reservation - Ada");

        let with_form = EmailRequest {
            form_data: Some(ReservationForm {
                name: "Grace".to_string(),
                ..ReservationForm::default()
            }),
            ..EmailRequest::default()
        };
        assert_eq!(admin_subject(&with_form), "New Luxury Transport Reservation - Grace");
        assert_eq!(
            admin_subject(&EmailRequest::default()),
            "New Luxury Transport Reservation - "
        );
    }

    #[test]
    fn body_falls_back_to_summary_text() {
        let request = EmailRequest {
            summary: Some("Pickup at 10".to_string()),
            ..EmailRequest::default()
        };
        assert!(render_body(&request).contains(">Pickup at 10</pre>"));
        assert!(render_body(&EmailRequest::default()).contains(">Reservation</pre>"));
    }
}
