//! Configuration schema for the chauffeur backend.

use crate::ConfigError;
use crate::env;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::SocketAddr;

/// Default listen address for the HTTP server.
pub const DEFAULT_BIND: &str = "0.0.0.0:3000";
/// Default Airtable REST root.
pub const DEFAULT_STORE_API_URL: &str = "https://api.airtable.com/v0";
/// Table used when none is configured.
pub const DEFAULT_STORE_TABLE: &str = "Quotes";
/// Default transactional email endpoint.
pub const DEFAULT_MAIL_API_URL: &str = "https://api.resend.com/emails";

/// Root config for the backend.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ChauffeurConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub mail: MailConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

impl ServerConfig {
    /// Parse the configured bind address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind
            .parse()
            .map_err(|err: std::net::AddrParseError| ConfigError::InvalidField {
                path: "server.bind".to_string(),
                message: err.to_string(),
            })
    }
}

/// Tabular store (Airtable) settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub base_id: Option<String>,
    #[serde(default = "default_store_table")]
    pub table: String,
    #[serde(default)]
    pub token: Option<String>,
    /// Optional column that receives the request fingerprint on create and is
    /// matched exactly on lookup.
    #[serde(default)]
    pub fingerprint_field: Option<String>,
}

fn default_store_api_url() -> String {
    DEFAULT_STORE_API_URL.to_string()
}

fn default_store_table() -> String {
    DEFAULT_STORE_TABLE.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            api_url: default_store_api_url(),
            base_id: None,
            table: default_store_table(),
            token: None,
            fingerprint_field: None,
        }
    }
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("api_url", &self.api_url)
            .field("base_id", &self.base_id)
            .field("table", &self.table)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("fingerprint_field", &self.fingerprint_field)
            .finish()
    }
}

impl StoreConfig {
    /// Base id and token, or the first one that is missing.
    pub fn credentials(&self) -> Result<(&str, &str), ConfigError> {
        let base_id = required(self.base_id.as_deref(), "store.base_id", env::AIRTABLE_BASE_ID)?;
        let token = required(self.token.as_deref(), "store.token", env::AIRTABLE_TOKEN)?;
        Ok((base_id, token))
    }
}

/// Transactional email provider settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct MailConfig {
    #[serde(default = "default_mail_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    /// Sender address for every outgoing message.
    #[serde(default)]
    pub from: Option<String>,
    /// Recipient of admin notifications; defaults to the sender.
    #[serde(default)]
    pub admin_email: Option<String>,
}

fn default_mail_api_url() -> String {
    DEFAULT_MAIL_API_URL.to_string()
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            api_url: default_mail_api_url(),
            api_key: None,
            from: None,
            admin_email: None,
        }
    }
}

impl fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("from", &self.from)
            .field("admin_email", &self.admin_email)
            .finish()
    }
}

impl MailConfig {
    /// API key and sender, or the first one that is missing.
    pub fn credentials(&self) -> Result<(&str, &str), ConfigError> {
        let api_key = required(self.api_key.as_deref(), "mail.api_key", env::MAIL_API_KEY)?;
        let from = required(self.from.as_deref(), "mail.from", env::MAIL_FROM)?;
        Ok((api_key, from))
    }

    /// Admin notification address.
    pub fn admin_recipient(&self) -> Option<&str> {
        self.admin_email
            .as_deref()
            .filter(|email| !email.is_empty())
            .or(self.from.as_deref())
    }
}

fn required<'a>(value: Option<&'a str>, path: &str, env: &str) -> Result<&'a str, ConfigError> {
    value
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingField {
            path: path.to_string(),
            env: env.to_string(),
        })
}
