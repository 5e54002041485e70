use chauffeur_rs_protocol::{QuotePayload, ReservationForm, SelectedVehicle, VehicleVariant};

/// Complete camelCase quote submission without a phone.
pub fn sample_payload() -> QuotePayload {
    QuotePayload::new()
        .with("passengerName", "Ada Lovelace")
        .with("email", "A@B.com")
        .with("serviceType", "Airport Transfer")
        .with("date", "2024-05-01")
        .with("hour", "10:00")
        .with("pickup", "123 Main St")
        .with("dropoff", "Airport")
        .with("vehicleType", "SUV")
}

/// Reservation form with every booking step complete.
pub fn sample_form() -> ReservationForm {
    ReservationForm {
        name: "Ada Lovelace".to_string(),
        phone: "+1 555 0100".to_string(),
        email: "ada@example.com".to_string(),
        service_type: Some("Hourly".to_string()),
        hourly_hours: 4,
        date: "2024-05-01".to_string(),
        hour: "10:00".to_string(),
        pickup: "123 Main St".to_string(),
        stops: vec!["Museum".to_string()],
        dropoff: "Airport".to_string(),
        vehicle: Some(SelectedVehicle {
            id: Some(4),
            name: "Escalade".to_string(),
            capacity: "6 passengers".to_string(),
            features: vec!["WiFi".to_string()],
            variants: vec![VehicleVariant {
                id: "esv".to_string(),
                name: "ESV".to_string(),
            }],
            ..SelectedVehicle::default()
        }),
        phone_local: "5550100".to_string(),
        ..ReservationForm::default()
    }
}
