//! Plain-text reservation summary and its HTML wrapper.

use chauffeur_rs_protocol::ReservationForm;
use chrono::{DateTime, Utc};

/// Signature line closing every summary.
pub const SUMMARY_SIGNATURE: &str = "Submitted by: Godandi & Sons Luxury Transport Widget";

/// Render the reservation as the plain-text block sent to client and admin.
pub fn reservation_summary(form: &ReservationForm, submitted_at: DateTime<Utc>) -> String {
    let service = form.service_type.as_deref().unwrap_or_default();
    let service_line = if form.is_hourly() {
        format!("• Service Type: {service} ({} hours)", form.hourly_hours())
    } else {
        format!("• Service Type: {service}")
    };

    let mut lines = vec![
        "=== LUXURY CHAUFFEUR SERVICE RESERVATION ===".to_string(),
        String::new(),
        "PERSONAL INFORMATION:".to_string(),
        format!("• Name: {}", form.name),
        format!("• Phone: {}", form.phone),
        format!("• Email: {}", form.email),
        String::new(),
        "SERVICE DETAILS:".to_string(),
        service_line,
        format!("• Date: {}", form.date),
        format!("• Time: {}", form.hour),
        String::new(),
        "ROUTE INFORMATION:".to_string(),
        format!("• Pickup: {}", form.pickup),
    ];
    let stops: Vec<&str> = form.route_stops().collect();
    if !stops.is_empty() {
        lines.push(format!("• Stops: {}", stops.join(", ")));
    }
    lines.push(format!("• Drop-off: {}", form.dropoff));

    lines.push(String::new());
    lines.push("VEHICLE SELECTED:".to_string());
    match &form.vehicle {
        Some(vehicle) => lines.extend([
            format!("• Vehicle: {}", vehicle.display_name()),
            format!("• Capacity: {}", vehicle.capacity),
            format!("• Features: {}", vehicle.features.join(", ")),
        ]),
        None => lines.push("• Vehicle: not selected".to_string()),
    }

    lines.extend([
        String::new(),
        "---".to_string(),
        format!(
            "Request submitted on: {}",
            submitted_at.format("%Y-%m-%d %H:%M:%S UTC")
        ),
        SUMMARY_SIGNATURE.to_string(),
    ]);
    lines.join("\n")
}

/// Wrap plain text in a preformatted HTML block.
pub fn summary_html(text: &str) -> String {
    format!(
        "<pre style=\"white-space:pre-wrap;font-family:inherit\">{}</pre>",
        escape_html(text)
    )
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
