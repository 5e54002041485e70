//! Quote submission flow against a stub store.

use chauffeur_rs_core::fingerprint::{FingerprintInput, fingerprint};
use chauffeur_rs_core::{ChauffeurError, QuoteOutcome, QuoteService};
use chauffeur_rs_protocol::QuotePayload;
use chauffeur_rs_test_utils::{StubStore, sample_payload};
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::sync::Arc;

fn service(store: &StubStore) -> QuoteService {
    QuoteService::new(Arc::new(store.clone()))
}

/// Missing required fields never reach the store.
#[tokio::test]
async fn missing_email_is_rejected_without_store_calls() {
    let store = StubStore::new();
    let payload = QuotePayload::new()
        .with("passengerName", "Ada")
        .with("serviceType", "Hourly")
        .with("date", "2024-05-01")
        .with("hour", "10:00")
        .with("pickup", "Home")
        .with("dropoff", "Airport")
        .with("vehicleType", "SUV");

    let err = service(&store).submit_quote(&payload).await.unwrap_err();
    assert!(err.is_validation());
    assert_eq!(err.to_string(), "Missing required fields: email");
    assert_eq!(store.lookup_count(), 0);
    assert_eq!(store.create_count(), 0);
}

/// An existing match short-circuits before any create.
#[tokio::test]
async fn duplicate_is_reported_and_not_written() {
    let store = StubStore::new().with_matches(2);
    let outcome = service(&store)
        .submit_quote(&sample_payload())
        .await
        .expect("submit");
    assert_eq!(outcome, QuoteOutcome::Duplicate { matches: 2 });
    assert_eq!(store.lookup_count(), 1);
    assert_eq!(store.create_count(), 0);
}

/// A novel request is looked up by its normalized fingerprint and written once.
#[tokio::test]
async fn novel_request_is_created_once() {
    let store = StubStore::new();
    let outcome = service(&store)
        .submit_quote(&sample_payload())
        .await
        .expect("submit");
    assert_eq!(
        outcome,
        QuoteOutcome::Created {
            record_id: "recNew1".to_string()
        }
    );
    assert_eq!(
        store.lookups(),
        vec!["1ca48884740331a90ab0d52115aed77215c54091d73df2914450e357b8e4edcd".to_string()]
    );
    let created = store.created();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].get("Phone"), Some(&Value::String(String::new())));
    assert_eq!(
        created[0].get("Email"),
        Some(&Value::String("A@B.com".to_string()))
    );
    assert!(!created[0].contains_key("Fingerprint"));
}

/// Display-name keys resolve the same fields as camelCase ones.
#[tokio::test]
async fn display_name_keys_are_accepted() {
    let store = StubStore::new();
    let payload = QuotePayload::new()
        .with("Passenger Name", "Ada")
        .with("Email", "a@b.com")
        .with("Service Type", "Airport Transfer")
        .with("Date", "2024-05-01")
        .with("Hour", "10:00")
        .with("Pickup Adress Data", "123 MAIN ST")
        .with("Drop off Adress Data", "Airport")
        .with("Vehicle type", "suv")
        .with("vehicleType", "SUV");

    service(&store).submit_quote(&payload).await.expect("submit");
    let expected = fingerprint(&FingerprintInput {
        email: Some("a@b.com"),
        date: Some("2024-05-01"),
        hour: Some("10:00"),
        pickup: Some("123 main st"),
        dropoff: Some("airport"),
        vehicle: Some("suv"),
    });
    assert_eq!(store.lookups(), vec![expected]);
    assert_eq!(
        store.created()[0].get("Vehicle type"),
        Some(&Value::String("SUV".to_string()))
    );
}

/// A configured fingerprint column receives the digest on create.
#[tokio::test]
async fn fingerprint_column_is_written_when_configured() {
    let store = StubStore::new().with_fingerprint_field("Fingerprint");
    service(&store)
        .submit_quote(&sample_payload())
        .await
        .expect("submit");
    let created = store.created();
    assert_eq!(
        created[0].get("Fingerprint").and_then(Value::as_str),
        Some(store.lookups()[0].as_str())
    );
}

/// Create failures surface as upstream errors and are not retried.
#[tokio::test]
async fn create_failure_is_not_retried() {
    let store = StubStore::new().with_create_failure(422, "INVALID_VALUE");
    let err = service(&store)
        .submit_quote(&sample_payload())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ChauffeurError::Upstream {
            operation: "create",
            status: 422,
            ..
        }
    ));
    assert_eq!(err.to_string(), "Airtable create error: 422 INVALID_VALUE");
    assert_eq!(store.create_count(), 1);
}

#[tokio::test]
async fn search_failure_skips_create() {
    let store = StubStore::new().with_find_failure(503, "unavailable");
    let err = service(&store)
        .submit_quote(&sample_payload())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Airtable search error: 503 unavailable");
    assert_eq!(store.create_count(), 0);
}

/// Repeating a submission after it was stored reports a duplicate.
#[tokio::test]
async fn resubmission_is_idempotent_against_existing_record() {
    let first = StubStore::new();
    service(&first)
        .submit_quote(&sample_payload())
        .await
        .expect("first");
    let second = StubStore::new().with_matches(1);
    let outcome = service(&second)
        .submit_quote(&sample_payload())
        .await
        .expect("second");
    assert_eq!(outcome, QuoteOutcome::Duplicate { matches: 1 });
    assert_eq!(first.lookups(), second.lookups());
}
