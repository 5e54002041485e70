//! Reservation intake: acknowledgement and the confirm-then-record submit flow.

use crate::ChauffeurError;
use crate::confirmation::{ADMIN_SUBJECT_PREFIX, ConfirmationService};
use crate::quotes::{QuoteOutcome, QuoteService};
use chauffeur_rs_protocol::{
    EmailRequest, QuoteField, QuotePayload, QuotePersistence, ReservationForm,
};
use log::{info, warn};

/// Message returned when a reservation has been accepted.
pub const RESERVATION_ACCEPTED: &str = "Reservation processed successfully";

/// What a successful submit did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservationReceipt {
    pub quote: QuotePersistence,
}

/// Handles reservations coming from the booking widget.
///
/// Emails are the primary channel. The quote record is a secondary write
/// whose failure never undoes a sent confirmation.
#[derive(Clone)]
pub struct ReservationService {
    confirmations: ConfirmationService,
    quotes: Option<QuoteService>,
}

impl ReservationService {
    pub fn new(confirmations: ConfirmationService) -> Self {
        Self {
            confirmations,
            quotes: None,
        }
    }

    /// Record each confirmed reservation as a quote as well.
    pub fn with_quotes(mut self, quotes: QuoteService) -> Self {
        self.quotes = Some(quotes);
        self
    }

    /// Confirm by email, then best-effort record the quote.
    pub async fn submit(&self, form: &ReservationForm) -> Result<ReservationReceipt, ChauffeurError> {
        if let Some(step) = form.first_incomplete_step() {
            return Err(ChauffeurError::Validation(format!(
                "Incomplete reservation: step {} ({}) is missing data",
                step.number(),
                step.title()
            )));
        }

        self.confirmations
            .send_confirmation(&confirmation_request(form))
            .await?;
        acknowledge(form);

        let Some(quotes) = &self.quotes else {
            return Ok(ReservationReceipt {
                quote: QuotePersistence::Skipped,
            });
        };
        let quote = match quotes.submit_quote(&quote_payload(form)).await {
            Ok(QuoteOutcome::Created { .. }) => QuotePersistence::Created,
            Ok(QuoteOutcome::Duplicate { .. }) => QuotePersistence::Duplicate,
            Err(err) => {
                warn!("quote record after reservation failed (error={err})");
                QuotePersistence::Failed
            }
        };
        Ok(ReservationReceipt { quote })
    }
}

/// Log a received reservation without side effects.
pub fn acknowledge(form: &ReservationForm) {
    info!(
        "reservation received (service={}, date={}, hour={}, vehicle={})",
        form.service_type.as_deref().unwrap_or("-"),
        form.date,
        form.hour,
        form.vehicle
            .as_ref()
            .map(|vehicle| vehicle.name.as_str())
            .unwrap_or("-")
    );
}

/// Email request the widget sends for a completed form.
pub fn confirmation_request(form: &ReservationForm) -> EmailRequest {
    EmailRequest {
        summary: None,
        user_email: Some(form.email.clone()),
        subject: Some(format!("{ADMIN_SUBJECT_PREFIX}{}", form.name)),
        client_name: Some(form.name.clone()),
        form_data: Some(form.clone()),
    }
}

/// Quote payload derived from a reservation form.
pub fn quote_payload(form: &ReservationForm) -> QuotePayload {
    let vehicle = form
        .vehicle
        .as_ref()
        .map(|vehicle| vehicle.display_name())
        .unwrap_or_default();
    let pairs = [
        (QuoteField::PassengerName, form.name.clone()),
        (QuoteField::Phone, form.phone.clone()),
        (QuoteField::Email, form.email.clone()),
        (
            QuoteField::ServiceType,
            form.service_type.clone().unwrap_or_default(),
        ),
        (QuoteField::Date, form.date.clone()),
        (QuoteField::Hour, form.hour.clone()),
        (QuoteField::Pickup, form.pickup.clone()),
        (QuoteField::Dropoff, form.dropoff.clone()),
        (QuoteField::VehicleType, vehicle),
    ];
    pairs
        .into_iter()
        .fold(QuotePayload::new(), |payload, (field, value)| {
            payload.with(field.wire_key(), value)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chauffeur_rs_protocol::{SelectedVehicle, VehicleVariant};
    use pretty_assertions::assert_eq;

    fn form() -> ReservationForm {
        ReservationForm {
            name: "Ada".to_string(),
            phone: "555".to_string(),
            email: "ada@example.com".to_string(),
            service_type: Some("Airport Transfer".to_string()),
            date: "2024-05-01".to_string(),
            hour: "10:00".to_string(),
            pickup: "Home".to_string(),
            dropoff: "Airport".to_string(),
            vehicle: Some(SelectedVehicle {
                name: "Escalade".to_string(),
                variants: vec![VehicleVariant {
                    id: "esv".to_string(),
                    name: "ESV".to_string(),
                }],
                ..SelectedVehicle::default()
            }),
            ..ReservationForm::default()
        }
    }

    #[test]
    fn payload_carries_form_fields() {
        let payload = quote_payload(&form());
        assert_eq!(payload.get(QuoteField::PassengerName).as_deref(), Some("Ada"));
        assert_eq!(payload.get(QuoteField::VehicleType).as_deref(), Some("Escalade - ESV"));
        assert_eq!(payload.get(QuoteField::ServiceType).as_deref(), Some("Airport Transfer"));
    }

    #[test]
    fn confirmation_request_addresses_the_client() {
        let request = confirmation_request(&form());
        assert_eq!(request.recipient(), Some("ada@example.com"));
        assert_eq!(
            request.subject.as_deref(),
            Some("New Luxury Transport Reservation - Ada")
        );
    }
}
