//! Wire types shared by the chauffeur booking backend.
//!
//! Everything that crosses a process boundary lives here: the quote payload
//! accepted from the booking widget, the records exchanged with the tabular
//! store, the widget's reservation form, and the email request/response shapes.

mod email;
mod quote;
mod reservation;

/// Email endpoint request/response types and the outbound provider message.
pub use email::{EmailMessage, EmailRequest, StatusResponse};
/// Quote payload, validated request, store record, and response types.
pub use quote::{QuoteField, QuotePayload, QuoteRecord, QuoteRequest, QuoteResponse};
/// Reservation form submitted by the multi-step widget.
pub use reservation::{
    BookingStep, HOURLY_MAX_HOURS, HOURLY_MIN_HOURS, QuotePersistence, ReservationForm,
    ReservationResponse, SelectedVehicle, VehicleVariant,
};

use serde_json::Value;

/// Render a scalar JSON value as text; `null`, arrays, and objects yield `None`.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::scalar_text;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn scalar_text_renders_scalars_only() {
        assert_eq!(scalar_text(&json!("10:00")), Some("10:00".to_string()));
        assert_eq!(scalar_text(&json!(42)), Some("42".to_string()));
        assert_eq!(scalar_text(&json!(true)), Some("true".to_string()));
        assert_eq!(scalar_text(&json!(null)), None);
        assert_eq!(scalar_text(&json!(["a"])), None);
        assert_eq!(scalar_text(&json!({"a": 1})), None);
    }
}
