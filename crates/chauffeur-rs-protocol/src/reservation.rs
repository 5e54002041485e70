//! Reservation form submitted by the booking widget.
//!
//! Wire keys follow the widget's form state, which is why they are Spanish.

use serde::{Deserialize, Serialize};

/// Fewest hours an hourly booking can request.
pub const HOURLY_MIN_HOURS: u32 = 3;
/// Most hours an hourly booking can request.
pub const HOURLY_MAX_HOURS: u32 = 12;

/// Service type that bills by the hour.
const HOURLY_SERVICE: &str = "Hourly";

fn default_hourly_hours() -> u32 {
    HOURLY_MIN_HOURS
}

fn default_country_code() -> String {
    "+1".to_string()
}

/// Complete widget form state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationForm {
    #[serde(default, rename = "nombre")]
    pub name: String,
    #[serde(default, rename = "telefono")]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, rename = "tipoServicio")]
    pub service_type: Option<String>,
    #[serde(default = "default_hourly_hours", rename = "hourlyHours")]
    pub hourly_hours: u32,
    #[serde(default, rename = "fecha")]
    pub date: String,
    #[serde(default, rename = "hora")]
    pub hour: String,
    #[serde(default, rename = "puntoRecogida")]
    pub pickup: String,
    #[serde(default)]
    pub stops: Vec<String>,
    #[serde(default, rename = "puntoDestino")]
    pub dropoff: String,
    #[serde(default, rename = "vehiculoSeleccionado")]
    pub vehicle: Option<SelectedVehicle>,
    #[serde(default = "default_country_code", rename = "phoneCountryCode")]
    pub phone_country_code: String,
    #[serde(default, rename = "phoneLocal")]
    pub phone_local: String,
}

impl Default for ReservationForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            phone: String::new(),
            email: String::new(),
            service_type: None,
            hourly_hours: HOURLY_MIN_HOURS,
            date: String::new(),
            hour: String::new(),
            pickup: String::new(),
            stops: Vec::new(),
            dropoff: String::new(),
            vehicle: None,
            phone_country_code: default_country_code(),
            phone_local: String::new(),
        }
    }
}

impl ReservationForm {
    /// Requested hours clamped to the bookable range.
    pub fn hourly_hours(&self) -> u32 {
        self.hourly_hours.clamp(HOURLY_MIN_HOURS, HOURLY_MAX_HOURS)
    }

    pub fn is_hourly(&self) -> bool {
        self.service_type.as_deref() == Some(HOURLY_SERVICE)
    }

    /// Stops with blank entries removed.
    pub fn route_stops(&self) -> impl Iterator<Item = &str> {
        self.stops
            .iter()
            .map(String::as_str)
            .filter(|stop| !stop.trim().is_empty())
    }

    /// First step the user has not completed, in widget order.
    pub fn first_incomplete_step(&self) -> Option<BookingStep> {
        BookingStep::ALL
            .into_iter()
            .find(|step| !step.is_complete(self))
    }
}

/// Vehicle picked in the vehicle step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectedVehicle {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default, rename = "nombre")]
    pub name: String,
    #[serde(default, rename = "capacidad")]
    pub capacity: String,
    #[serde(default, rename = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, rename = "precio", skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, rename = "categoria", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub variants: Vec<VehicleVariant>,
}

impl SelectedVehicle {
    /// Display name including the default (first) variant when one exists.
    pub fn display_name(&self) -> String {
        match self.variants.first() {
            Some(variant) => format!("{} - {}", self.name, variant.name),
            None => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleVariant {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Steps of the booking widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStep {
    Contact,
    Service,
    Schedule,
    Route,
    Vehicle,
    Review,
}

impl BookingStep {
    pub const ALL: [BookingStep; 6] = [
        BookingStep::Contact,
        BookingStep::Service,
        BookingStep::Schedule,
        BookingStep::Route,
        BookingStep::Vehicle,
        BookingStep::Review,
    ];

    /// One-based position in the widget.
    pub fn number(self) -> u8 {
        match self {
            BookingStep::Contact => 1,
            BookingStep::Service => 2,
            BookingStep::Schedule => 3,
            BookingStep::Route => 4,
            BookingStep::Vehicle => 5,
            BookingStep::Review => 6,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            BookingStep::Contact => "contact details",
            BookingStep::Service => "service type",
            BookingStep::Schedule => "date and time",
            BookingStep::Route => "route",
            BookingStep::Vehicle => "vehicle",
            BookingStep::Review => "review",
        }
    }

    /// Whether the form carries everything this step asks for.
    pub fn is_complete(self, form: &ReservationForm) -> bool {
        match self {
            BookingStep::Contact => {
                !form.name.is_empty() && !form.phone.is_empty() && !form.email.is_empty()
            }
            BookingStep::Service => form
                .service_type
                .as_deref()
                .is_some_and(|service| !service.is_empty()),
            BookingStep::Schedule => !form.date.is_empty() && !form.hour.is_empty(),
            BookingStep::Route => !form.pickup.is_empty() && !form.dropoff.is_empty(),
            BookingStep::Vehicle => form.vehicle.is_some(),
            BookingStep::Review => true,
        }
    }
}

/// What happened to the quote record written after a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuotePersistence {
    Created,
    Duplicate,
    Failed,
    /// No store is configured.
    Skipped,
}

/// JSON body returned by the reservation submit endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote: Option<QuotePersistence>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn complete_form() -> ReservationForm {
        serde_json::from_value(json!({
            "nombre": "Ada Lovelace",
            "telefono": "+1 555 0100",
            "email": "ada@example.com",
            "tipoServicio": "Hourly",
            "hourlyHours": 20,
            "fecha": "2024-05-01",
            "hora": "10:00",
            "puntoRecogida": "123 Main St",
            "stops": ["", "Museum"],
            "puntoDestino": "Airport",
            "vehiculoSeleccionado": {
                "id": 4,
                "nombre": "Escalade",
                "capacidad": "6 passengers",
                "features": ["WiFi"],
                "variants": [{ "id": "esv", "name": "ESV" }],
                "imagen": "/escalade.png"
            }
        }))
        .expect("form")
    }

    #[test]
    fn widget_form_parses_with_defaults() {
        let form: ReservationForm = serde_json::from_value(json!({})).expect("form");
        assert_eq!(form, ReservationForm::default());
        assert_eq!(form.phone_country_code, "+1");
        assert_eq!(form.hourly_hours(), HOURLY_MIN_HOURS);
    }

    #[test]
    fn hourly_hours_are_clamped() {
        let form = complete_form();
        assert!(form.is_hourly());
        assert_eq!(form.hourly_hours(), HOURLY_MAX_HOURS);
    }

    #[test]
    fn blank_stops_are_skipped() {
        let form = complete_form();
        assert_eq!(form.route_stops().collect::<Vec<_>>(), vec!["Museum"]);
    }

    #[test]
    fn vehicle_display_uses_first_variant() {
        let vehicle = complete_form().vehicle.expect("vehicle");
        assert_eq!(vehicle.display_name(), "Escalade - ESV");
    }

    #[test]
    fn step_validation_walks_in_order() {
        let mut form = complete_form();
        assert_eq!(form.first_incomplete_step(), None);

        form.hour.clear();
        assert_eq!(form.first_incomplete_step(), Some(BookingStep::Schedule));

        form.service_type = Some(String::new());
        assert_eq!(form.first_incomplete_step(), Some(BookingStep::Service));

        form.phone.clear();
        assert_eq!(form.first_incomplete_step(), Some(BookingStep::Contact));
    }

    #[test]
    fn persistence_serializes_snake_case() {
        let response = ReservationResponse {
            success: true,
            message: "ok".to_string(),
            quote: Some(QuotePersistence::Duplicate),
            error: None,
        };
        assert_eq!(
            serde_json::to_value(response).expect("json"),
            json!({ "success": true, "message": "ok", "quote": "duplicate" })
        );
    }
}
