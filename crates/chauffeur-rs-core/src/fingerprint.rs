//! Stable duplicate-detection key for quote requests.
//!
//! The key covers who (email), when (date, hour), where (pickup, dropoff), and
//! what (vehicle). Passenger name, phone, and service type are not part of
//! the basis.

use chauffeur_rs_protocol::QuoteRequest;
use sha2::{Digest, Sha256};

/// Separator between normalized parts.
pub const FINGERPRINT_DELIMITER: char = '|';

/// Borrowed view of the fields that make up a fingerprint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FingerprintInput<'a> {
    pub email: Option<&'a str>,
    pub date: Option<&'a str>,
    pub hour: Option<&'a str>,
    pub pickup: Option<&'a str>,
    pub dropoff: Option<&'a str>,
    pub vehicle: Option<&'a str>,
}

impl<'a> From<&'a QuoteRequest> for FingerprintInput<'a> {
    fn from(request: &'a QuoteRequest) -> Self {
        Self {
            email: Some(&request.email),
            date: Some(&request.date),
            hour: Some(&request.hour),
            pickup: Some(&request.pickup),
            dropoff: Some(&request.dropoff),
            vehicle: Some(&request.vehicle_type),
        }
    }
}

impl FingerprintInput<'_> {
    /// Joined normalized basis the digest is computed over.
    pub fn normalized(&self) -> String {
        let folded = |value: Option<&str>| value.unwrap_or_default().trim().to_lowercase();
        let verbatim = |value: Option<&str>| value.unwrap_or_default().trim().to_string();
        [
            folded(self.email),
            verbatim(self.date),
            verbatim(self.hour),
            folded(self.pickup),
            folded(self.dropoff),
            folded(self.vehicle),
        ]
        .join(&FINGERPRINT_DELIMITER.to_string())
    }
}

/// SHA-256 of the normalized basis as 64 lowercase hex characters.
pub fn fingerprint(input: &FingerprintInput<'_>) -> String {
    hex::encode(Sha256::digest(input.normalized().as_bytes()))
}
