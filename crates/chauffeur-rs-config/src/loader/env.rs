//! Environment variables recognised by the config overlay.

use crate::ChauffeurConfig;
use log::debug;

pub const AIRTABLE_BASE_ID: &str = "AIRTABLE_BASE_ID";
pub const AIRTABLE_TABLE: &str = "AIRTABLE_TABLE";
pub const AIRTABLE_TOKEN: &str = "AIRTABLE_TOKEN";
pub const AIRTABLE_API_URL: &str = "AIRTABLE_API_URL";
pub const AIRTABLE_FINGERPRINT_FIELD: &str = "AIRTABLE_FINGERPRINT_FIELD";
pub const MAIL_API_URL: &str = "MAIL_API_URL";
pub const MAIL_API_KEY: &str = "MAIL_API_KEY";
pub const MAIL_FROM: &str = "MAIL_FROM";
pub const ADMIN_EMAIL: &str = "ADMIN_EMAIL";
pub const CHAUFFEUR_BIND: &str = "CHAUFFEUR_BIND";

/// Apply every set, non-empty variable on top of `config`.
pub(super) fn apply<F>(config: &mut ChauffeurConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let read = |key: &str| {
        let value = lookup(key).filter(|value| !value.is_empty());
        if value.is_some() {
            debug!("config overridden from environment (key={key})");
        }
        value
    };

    if let Some(bind) = read(CHAUFFEUR_BIND) {
        config.server.bind = bind;
    }
    if let Some(api_url) = read(AIRTABLE_API_URL) {
        config.store.api_url = api_url;
    }
    if let Some(base_id) = read(AIRTABLE_BASE_ID) {
        config.store.base_id = Some(base_id);
    }
    if let Some(table) = read(AIRTABLE_TABLE) {
        config.store.table = table;
    }
    if let Some(token) = read(AIRTABLE_TOKEN) {
        config.store.token = Some(token);
    }
    if let Some(field) = read(AIRTABLE_FINGERPRINT_FIELD) {
        config.store.fingerprint_field = Some(field);
    }
    if let Some(api_url) = read(MAIL_API_URL) {
        config.mail.api_url = api_url;
    }
    if let Some(api_key) = read(MAIL_API_KEY) {
        config.mail.api_key = Some(api_key);
    }
    if let Some(from) = read(MAIL_FROM) {
        config.mail.from = Some(from);
    }
    if let Some(admin_email) = read(ADMIN_EMAIL) {
        config.mail.admin_email = Some(admin_email);
    }
}
