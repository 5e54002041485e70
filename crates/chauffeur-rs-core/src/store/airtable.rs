//! Airtable REST client for quote records.

use super::QuoteStore;
use crate::ChauffeurError;
use async_trait::async_trait;
use chauffeur_rs_config::StoreConfig;
use chauffeur_rs_protocol::{QuoteField, QuoteRecord};
use log::{debug, info, warn};
use reqwest::Url;
use reqwest::header::CACHE_CONTROL;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Build the lookup formula for `fingerprint`.
///
/// The store lower-cases a `|`-joined concatenation of the basis columns and
/// searches it for the fingerprint as a substring. This is a heuristic, not a
/// key lookup. When `fingerprint_field` is set, an exact match on that column
/// is OR-ed in front of it.
pub fn duplicate_formula(fingerprint: &str, fingerprint_field: Option<&str>) -> String {
    let fingerprint = escape_formula_string(fingerprint);
    let column = |field: QuoteField| format!("{{{}}}", field.column());
    let lowered = |field: QuoteField| format!("LOWER({})", column(field));
    let basis = [
        column(QuoteField::Email),
        column(QuoteField::Date),
        column(QuoteField::Hour),
        lowered(QuoteField::Pickup),
        lowered(QuoteField::Dropoff),
        lowered(QuoteField::VehicleType),
    ]
    .join(",\"|\",");
    let substring = format!("FIND('{fingerprint}',LOWER(CONCATENATE({basis})))");
    match fingerprint_field {
        Some(field) => format!("OR({{{field}}}='{fingerprint}',{substring})"),
        None => substring,
    }
}

fn escape_formula_string(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Records envelope used by both list and create responses.
#[derive(Debug, Deserialize)]
struct RecordList {
    #[serde(default)]
    records: Vec<QuoteRecord>,
}

#[derive(Debug, Serialize)]
struct CreateRequest {
    records: Vec<NewRecord>,
    typecast: bool,
}

#[derive(Debug, Serialize)]
struct NewRecord {
    fields: Map<String, Value>,
}

/// Quote store backed by an Airtable table.
#[derive(Clone)]
pub struct AirtableStore {
    client: reqwest::Client,
    records_url: Url,
    token: String,
    fingerprint_field: Option<String>,
}

impl std::fmt::Debug for AirtableStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AirtableStore")
            .field("records_url", &self.records_url.as_str())
            .field("fingerprint_field", &self.fingerprint_field)
            .finish_non_exhaustive()
    }
}

impl AirtableStore {
    /// Build a store with a fresh HTTP client.
    ///
    /// Fails with `Configuration` when the base id or token is missing.
    pub fn new(config: &StoreConfig) -> Result<Self, ChauffeurError> {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Build a store that shares an existing HTTP client.
    pub fn with_client(client: reqwest::Client, config: &StoreConfig) -> Result<Self, ChauffeurError> {
        let (base_id, token) = config.credentials()?;
        let records_url = records_url(&config.api_url, base_id, &config.table)?;
        info!(
            "airtable store ready (table={}, fingerprint_field={:?})",
            config.table, config.fingerprint_field
        );
        Ok(Self {
            client,
            records_url,
            token: token.to_string(),
            fingerprint_field: config
                .fingerprint_field
                .clone()
                .filter(|field| !field.trim().is_empty()),
        })
    }

    /// Endpoint both operations talk to.
    pub fn records_url(&self) -> &Url {
        &self.records_url
    }
}

#[async_trait]
impl QuoteStore for AirtableStore {
    async fn find_by_fingerprint(
        &self,
        fingerprint: &str,
    ) -> Result<Vec<QuoteRecord>, ChauffeurError> {
        let formula = duplicate_formula(fingerprint, self.fingerprint_field.as_deref());
        debug!(
            "airtable search (url={}, formula_len={})",
            self.records_url,
            formula.len()
        );
        let response = self
            .client
            .get(self.records_url.clone())
            .bearer_auth(&self.token)
            .header(CACHE_CONTROL, "no-store")
            .query(&[("filterByFormula", formula.as_str())])
            .send()
            .await?;
        let body = success_body(response, "search").await?;
        let list: RecordList = serde_json::from_str(&body)
            .map_err(|err| ChauffeurError::MalformedResponse(format!("search response: {err}")))?;
        debug!("airtable search done (matches={})", list.records.len());
        Ok(list.records)
    }

    async fn create(&self, fields: Map<String, Value>) -> Result<QuoteRecord, ChauffeurError> {
        debug!(
            "airtable create (url={}, fields={})",
            self.records_url,
            fields.len()
        );
        let request = CreateRequest {
            records: vec![NewRecord { fields }],
            typecast: true,
        };
        let response = self
            .client
            .post(self.records_url.clone())
            .bearer_auth(&self.token)
            .json(&request)
            .send()
            .await?;
        let body = success_body(response, "create").await?;
        let list: RecordList = serde_json::from_str(&body)
            .map_err(|err| ChauffeurError::MalformedResponse(format!("create response: {err}")))?;
        let record = list.records.into_iter().next().ok_or_else(|| {
            ChauffeurError::MalformedResponse("create response contained no record".to_string())
        })?;
        info!("airtable record created (id={})", record.id);
        Ok(record)
    }

    fn fingerprint_field(&self) -> Option<&str> {
        self.fingerprint_field.as_deref()
    }
}

/// Return the body of a 2xx response, or an `Upstream` error carrying it.
async fn success_body(
    response: reqwest::Response,
    operation: &'static str,
) -> Result<String, ChauffeurError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        warn!(
            "airtable {operation} failed (status={}, body_len={})",
            status.as_u16(),
            body.len()
        );
        return Err(ChauffeurError::Upstream {
            operation,
            status: status.as_u16(),
            body,
        });
    }
    Ok(body)
}

fn records_url(api_url: &str, base_id: &str, table: &str) -> Result<Url, ChauffeurError> {
    let mut url = Url::parse(api_url).map_err(|err| {
        ChauffeurError::Configuration(format!("invalid store api_url {api_url:?}: {err}"))
    })?;
    url.path_segments_mut()
        .map_err(|_| {
            ChauffeurError::Configuration(format!("store api_url {api_url:?} cannot be a base"))
        })?
        .pop_if_empty()
        .push(base_id)
        .push(table);
    Ok(url)
}
