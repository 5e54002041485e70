//! Tabular store access: duplicate lookup and record creation.

mod airtable;

pub use airtable::{AirtableStore, duplicate_formula};

use crate::ChauffeurError;
use async_trait::async_trait;
use chauffeur_rs_protocol::QuoteRecord;
use serde_json::{Map, Value};

/// Backing store for quote records.
///
/// Implementations perform exactly one round trip per call and never retry.
#[async_trait]
pub trait QuoteStore: Send + Sync {
    /// Records whose stored fields match `fingerprint`; empty when none do.
    async fn find_by_fingerprint(&self, fingerprint: &str)
    -> Result<Vec<QuoteRecord>, ChauffeurError>;

    /// Create one record from column-keyed `fields` and return it.
    async fn create(&self, fields: Map<String, Value>) -> Result<QuoteRecord, ChauffeurError>;

    /// Column that should receive the fingerprint on create, if the store keeps one.
    fn fingerprint_field(&self) -> Option<&str> {
        None
    }
}
