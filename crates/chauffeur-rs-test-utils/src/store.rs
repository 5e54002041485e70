use async_trait::async_trait;
use chauffeur_rs_core::{ChauffeurError, QuoteStore};
use chauffeur_rs_protocol::QuoteRecord;
use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::sync::Arc;

#[derive(Default)]
struct Calls {
    lookups: Vec<String>,
    created: Vec<Map<String, Value>>,
}

/// In-memory quote store that records every call.
///
/// Clones share the same call log, so a test can keep one handle while the
/// service under test owns another.
#[derive(Clone, Default)]
pub struct StubStore {
    matches: usize,
    find_failure: Option<(u16, String)>,
    create_failure: Option<(u16, String)>,
    fingerprint_field: Option<String>,
    calls: Arc<Mutex<Calls>>,
}

impl StubStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every lookup reports `count` existing records.
    pub fn with_matches(mut self, count: usize) -> Self {
        self.matches = count;
        self
    }

    pub fn with_find_failure(mut self, status: u16, body: impl Into<String>) -> Self {
        self.find_failure = Some((status, body.into()));
        self
    }

    pub fn with_create_failure(mut self, status: u16, body: impl Into<String>) -> Self {
        self.create_failure = Some((status, body.into()));
        self
    }

    pub fn with_fingerprint_field(mut self, field: impl Into<String>) -> Self {
        self.fingerprint_field = Some(field.into());
        self
    }

    /// Fingerprints passed to `find_by_fingerprint`, in call order.
    pub fn lookups(&self) -> Vec<String> {
        self.calls.lock().lookups.clone()
    }

    /// Field maps passed to `create`, in call order.
    pub fn created(&self) -> Vec<Map<String, Value>> {
        self.calls.lock().created.clone()
    }

    pub fn lookup_count(&self) -> usize {
        self.calls.lock().lookups.len()
    }

    pub fn create_count(&self) -> usize {
        self.calls.lock().created.len()
    }
}

#[async_trait]
impl QuoteStore for StubStore {
    async fn find_by_fingerprint(
        &self,
        fingerprint: &str,
    ) -> Result<Vec<QuoteRecord>, ChauffeurError> {
        self.calls.lock().lookups.push(fingerprint.to_string());
        if let Some((status, body)) = &self.find_failure {
            return Err(ChauffeurError::Upstream {
                operation: "search",
                status: *status,
                body: body.clone(),
            });
        }
        Ok((0..self.matches)
            .map(|index| QuoteRecord {
                id: format!("recExisting{index}"),
                created_time: None,
                fields: Map::new(),
            })
            .collect())
    }

    async fn create(&self, fields: Map<String, Value>) -> Result<QuoteRecord, ChauffeurError> {
        let id = {
            let mut calls = self.calls.lock();
            calls.created.push(fields.clone());
            format!("recNew{}", calls.created.len())
        };
        if let Some((status, body)) = &self.create_failure {
            return Err(ChauffeurError::Upstream {
                operation: "create",
                status: *status,
                body: body.clone(),
            });
        }
        Ok(QuoteRecord {
            id,
            created_time: None,
            fields,
        })
    }

    fn fingerprint_field(&self) -> Option<&str> {
        self.fingerprint_field.as_deref()
    }
}
