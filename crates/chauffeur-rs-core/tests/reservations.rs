//! Confirmation and reservation flows with recording collaborators.

use chauffeur_rs_core::confirmation::{CLIENT_SUBJECT, MISSING_RECIPIENT};
use chauffeur_rs_core::{ConfirmationService, QuoteService, ReservationService};
use chauffeur_rs_protocol::{EmailRequest, QuotePersistence, ReservationForm};
use chauffeur_rs_test_utils::{FailingMailer, RecordingMailer, StubStore, sample_form};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn confirmations(mailer: &RecordingMailer) -> ConfirmationService {
    ConfirmationService::new(
        Arc::new(mailer.clone()),
        "bookings@example.com",
        "ops@example.com",
    )
}

/// Client mail goes out first, then the admin notification.
#[tokio::test]
async fn confirmation_sends_client_then_admin() {
    let mailer = RecordingMailer::new();
    let request = EmailRequest {
        form_data: Some(sample_form()),
        ..EmailRequest::default()
    };
    confirmations(&mailer)
        .send_confirmation(&request)
        .await
        .expect("send");

    let sent = mailer.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].to, "ada@example.com");
    assert_eq!(sent[0].subject, CLIENT_SUBJECT);
    assert_eq!(sent[1].to, "ops@example.com");
    assert_eq!(sent[1].subject, "New Luxury Transport Reservation - Ada Lovelace");
    assert_eq!(sent[0].html, sent[1].html);
    assert!(sent[0].html.contains("Escalade - ESV"));
}

#[tokio::test]
async fn confirmation_without_recipient_sends_nothing() {
    let mailer = RecordingMailer::new();
    let err = confirmations(&mailer)
        .send_confirmation(&EmailRequest::default())
        .await
        .unwrap_err();
    assert!(err.is_validation());
    assert_eq!(err.to_string(), MISSING_RECIPIENT);
    assert!(mailer.sent().is_empty());
}

/// A failed client send stops before the admin send.
#[tokio::test]
async fn client_failure_skips_admin_mail() {
    let mailer = RecordingMailer::new().failing_at(0);
    let request = EmailRequest {
        user_email: Some("ada@example.com".to_string()),
        summary: Some("Pickup at 10".to_string()),
        ..EmailRequest::default()
    };
    confirmations(&mailer)
        .send_confirmation(&request)
        .await
        .unwrap_err();
    assert_eq!(mailer.sent().len(), 1);
}

#[tokio::test]
async fn submit_records_quote_after_confirmation() {
    let mailer = RecordingMailer::new();
    let store = StubStore::new();
    let service = ReservationService::new(confirmations(&mailer))
        .with_quotes(QuoteService::new(Arc::new(store.clone())));

    let receipt = service.submit(&sample_form()).await.expect("submit");
    assert_eq!(receipt.quote, QuotePersistence::Created);
    assert_eq!(mailer.sent().len(), 2);
    assert_eq!(store.create_count(), 1);
}

#[tokio::test]
async fn submit_reports_duplicate_quote() {
    let mailer = RecordingMailer::new();
    let store = StubStore::new().with_matches(1);
    let service = ReservationService::new(confirmations(&mailer))
        .with_quotes(QuoteService::new(Arc::new(store.clone())));

    let receipt = service.submit(&sample_form()).await.expect("submit");
    assert_eq!(receipt.quote, QuotePersistence::Duplicate);
    assert_eq!(store.create_count(), 0);
}

/// Store failure after a sent confirmation is swallowed.
#[tokio::test]
async fn submit_survives_store_failure() {
    let mailer = RecordingMailer::new();
    let store = StubStore::new().with_find_failure(500, "down");
    let service = ReservationService::new(confirmations(&mailer))
        .with_quotes(QuoteService::new(Arc::new(store)));

    let receipt = service.submit(&sample_form()).await.expect("submit");
    assert_eq!(receipt.quote, QuotePersistence::Failed);
    assert_eq!(mailer.sent().len(), 2);
}

/// Mail failure aborts before the store is touched.
#[tokio::test]
async fn submit_mail_failure_skips_store() {
    let store = StubStore::new();
    let confirmations = ConfirmationService::new(
        Arc::new(FailingMailer::new("smtp down")),
        "bookings@example.com",
        "ops@example.com",
    );
    let service = ReservationService::new(confirmations)
        .with_quotes(QuoteService::new(Arc::new(store.clone())));

    let err = service.submit(&sample_form()).await.unwrap_err();
    assert_eq!(err.to_string(), "mail error: smtp down");
    assert_eq!(store.lookup_count(), 0);
}

#[tokio::test]
async fn submit_without_store_is_skipped() {
    let mailer = RecordingMailer::new();
    let receipt = ReservationService::new(confirmations(&mailer))
        .submit(&sample_form())
        .await
        .expect("submit");
    assert_eq!(receipt.quote, QuotePersistence::Skipped);
}

#[tokio::test]
async fn incomplete_form_names_the_first_missing_step() {
    let mailer = RecordingMailer::new();
    let form = ReservationForm {
        pickup: String::new(),
        vehicle: None,
        ..sample_form()
    };
    let err = ReservationService::new(confirmations(&mailer))
        .submit(&form)
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Incomplete reservation: step 4 (route) is missing data"
    );
    assert!(mailer.sent().is_empty());
}
