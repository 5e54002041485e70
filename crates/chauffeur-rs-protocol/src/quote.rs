//! Quote request types and the store's column vocabulary.

use crate::scalar_text;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Logical fields of a quote request.
///
/// Each field is addressable by its camelCase wire key and by the display
/// name the tabular store uses as its column name. The column names are the
/// store's schema and keep its spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuoteField {
    PassengerName,
    Phone,
    Email,
    ServiceType,
    Date,
    Hour,
    Pickup,
    Dropoff,
    VehicleType,
}

impl QuoteField {
    /// All fields in store column order.
    pub const ALL: [QuoteField; 9] = [
        QuoteField::PassengerName,
        QuoteField::Phone,
        QuoteField::Email,
        QuoteField::ServiceType,
        QuoteField::Date,
        QuoteField::Hour,
        QuoteField::Pickup,
        QuoteField::Dropoff,
        QuoteField::VehicleType,
    ];

    /// camelCase key used by the booking widget.
    pub fn wire_key(self) -> &'static str {
        match self {
            QuoteField::PassengerName => "passengerName",
            QuoteField::Phone => "phone",
            QuoteField::Email => "email",
            QuoteField::ServiceType => "serviceType",
            QuoteField::Date => "date",
            QuoteField::Hour => "hour",
            QuoteField::Pickup => "pickup",
            QuoteField::Dropoff => "dropoff",
            QuoteField::VehicleType => "vehicleType",
        }
    }

    /// Column name in the tabular store.
    pub fn column(self) -> &'static str {
        match self {
            QuoteField::PassengerName => "Passenger Name",
            QuoteField::Phone => "Phone",
            QuoteField::Email => "Email",
            QuoteField::ServiceType => "Service Type",
            QuoteField::Date => "Date",
            QuoteField::Hour => "Hour",
            QuoteField::Pickup => "Pickup Adress Data",
            QuoteField::Dropoff => "Drop off Adress Data",
            QuoteField::VehicleType => "Vehicle type",
        }
    }

    /// Whether a submission must carry this field.
    pub fn is_required(self) -> bool {
        !matches!(self, QuoteField::Phone)
    }
}

/// Raw quote submission as received over HTTP.
///
/// Kept as a JSON object so either key style can be resolved per field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuotePayload {
    values: Map<String, Value>,
}

impl QuotePayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert of a raw key/value pair.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Resolve a field: the camelCase key wins when non-empty, otherwise the
    /// display-name key is consulted. Empty strings count as absent.
    pub fn get(&self, field: QuoteField) -> Option<String> {
        [field.wire_key(), field.column()]
            .into_iter()
            .filter_map(|key| self.values.get(key).and_then(scalar_text))
            .find(|value| !value.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A quote submission that passed required-field validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub passenger_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub email: String,
    pub service_type: String,
    pub date: String,
    pub hour: String,
    pub pickup: String,
    pub dropoff: String,
    pub vehicle_type: String,
}

impl QuoteRequest {
    /// Value of a field as stored; a missing phone is stored as an empty string.
    pub fn value(&self, field: QuoteField) -> &str {
        match field {
            QuoteField::PassengerName => &self.passenger_name,
            QuoteField::Phone => self.phone.as_deref().unwrap_or_default(),
            QuoteField::Email => &self.email,
            QuoteField::ServiceType => &self.service_type,
            QuoteField::Date => &self.date,
            QuoteField::Hour => &self.hour,
            QuoteField::Pickup => &self.pickup,
            QuoteField::Dropoff => &self.dropoff,
            QuoteField::VehicleType => &self.vehicle_type,
        }
    }
}

/// Record as returned by the tabular store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRecord {
    /// Store-assigned identifier.
    pub id: String,
    /// Creation timestamp assigned by the store.
    #[serde(default, rename = "createdTime", skip_serializing_if = "Option::is_none")]
    pub created_time: Option<String>,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

/// JSON body returned by the quotes endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duplicate: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airtable_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl QuoteResponse {
    pub fn duplicate() -> Self {
        Self {
            ok: true,
            duplicate: Some(true),
            airtable_id: None,
            error: None,
        }
    }

    pub fn created(record_id: impl Into<String>) -> Self {
        Self {
            ok: true,
            duplicate: None,
            airtable_id: Some(record_id.into()),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            duplicate: None,
            airtable_id: None,
            error: Some(message.into()),
        }
    }
}
