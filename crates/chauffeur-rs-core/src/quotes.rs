//! Quote submission: validate, fingerprint, de-duplicate, persist.

use crate::fingerprint::{FingerprintInput, fingerprint};
use crate::store::QuoteStore;
use crate::ChauffeurError;
use chauffeur_rs_protocol::{QuoteField, QuotePayload, QuoteRequest};
use log::{debug, info};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Result of a submission that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteOutcome {
    /// A matching record already exists; nothing was written.
    Duplicate { matches: usize },
    /// A new record was written.
    Created { record_id: String },
}

/// Request handler for quote submissions.
///
/// The duplicate lookup and the create call are two separate round trips, so
/// two concurrent submissions with the same fingerprint can both pass the
/// lookup and both be written. Closing that window needs a uniqueness
/// constraint or an upsert in the store itself.
#[derive(Clone)]
pub struct QuoteService {
    store: Arc<dyn QuoteStore>,
}

impl QuoteService {
    pub fn new(store: Arc<dyn QuoteStore>) -> Self {
        Self { store }
    }

    /// Validate, check for a duplicate, and create the record if none exists.
    ///
    /// Validation failures never reach the store. Store failures are returned
    /// as-is; nothing is retried.
    pub async fn submit_quote(&self, payload: &QuotePayload) -> Result<QuoteOutcome, ChauffeurError> {
        let request = validate(payload)?;
        let fingerprint = fingerprint(&FingerprintInput::from(&request));
        debug!("quote fingerprint computed (fingerprint={fingerprint})");

        let matches = self.store.find_by_fingerprint(&fingerprint).await?;
        if !matches.is_empty() {
            info!(
                "duplicate quote skipped (fingerprint={fingerprint}, matches={})",
                matches.len()
            );
            return Ok(QuoteOutcome::Duplicate {
                matches: matches.len(),
            });
        }

        let mut fields = store_fields(&request);
        if let Some(column) = self.store.fingerprint_field() {
            fields.insert(column.to_string(), Value::String(fingerprint.clone()));
        }
        let record = self.store.create(fields).await?;
        info!(
            "quote created (record_id={}, fingerprint={fingerprint})",
            record.id
        );
        Ok(QuoteOutcome::Created {
            record_id: record.id,
        })
    }
}

/// Check required fields and resolve each one from either key style.
///
/// Every missing field is named in the error, in store column order.
pub fn validate(payload: &QuotePayload) -> Result<QuoteRequest, ChauffeurError> {
    let missing: Vec<&str> = QuoteField::ALL
        .into_iter()
        .filter(|field| field.is_required() && payload.get(*field).is_none())
        .map(QuoteField::wire_key)
        .collect();
    if !missing.is_empty() {
        debug!("quote rejected (missing={})", missing.join(","));
        return Err(ChauffeurError::Validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    let required = |field: QuoteField| payload.get(field).unwrap_or_default();
    Ok(QuoteRequest {
        passenger_name: required(QuoteField::PassengerName),
        phone: payload.get(QuoteField::Phone),
        email: required(QuoteField::Email),
        service_type: required(QuoteField::ServiceType),
        date: required(QuoteField::Date),
        hour: required(QuoteField::Hour),
        pickup: required(QuoteField::Pickup),
        dropoff: required(QuoteField::Dropoff),
        vehicle_type: required(QuoteField::VehicleType),
    })
}

/// Column-keyed field map written to the store.
pub fn store_fields(request: &QuoteRequest) -> Map<String, Value> {
    QuoteField::ALL
        .into_iter()
        .map(|field| {
            (
                field.column().to_string(),
                Value::String(request.value(field).to_string()),
            )
        })
        .collect()
}
