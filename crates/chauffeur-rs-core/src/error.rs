//! Error types for the booking core.

use chauffeur_rs_config::ConfigError;
use thiserror::Error;

/// Errors returned by quote, mail, and reservation operations.
#[derive(Debug, Error)]
pub enum ChauffeurError {
    /// Submission is missing required data; nothing was sent upstream.
    #[error("{0}")]
    Validation(String),
    /// Required credentials or settings are absent.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// The tabular store answered with a non-success status.
    #[error("Airtable {operation} error: {status} {body}")]
    Upstream {
        operation: &'static str,
        status: u16,
        body: String,
    },
    /// The store's response did not have the expected shape.
    #[error("malformed store response: {0}")]
    MalformedResponse(String),
    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(String),
    /// The email provider rejected or failed a send.
    #[error("mail error: {0}")]
    Mail(String),
}

impl ChauffeurError {
    /// Whether the error was caused by the caller's input.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<ConfigError> for ChauffeurError {
    fn from(err: ConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}

impl From<reqwest::Error> for ChauffeurError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn upstream_message_echoes_status_and_body() {
        let err = ChauffeurError::Upstream {
            operation: "create",
            status: 422,
            body: "{\"error\":\"INVALID\"}".to_string(),
        };
        assert_eq!(err.to_string(), "Airtable create error: 422 {\"error\":\"INVALID\"}");
        assert!(!err.is_validation());
    }

    #[test]
    fn config_errors_become_configuration_errors() {
        let err: ChauffeurError = ConfigError::MissingField {
            path: "store.token".to_string(),
            env: "AIRTABLE_TOKEN".to_string(),
        }
        .into();
        assert!(matches!(err, ChauffeurError::Configuration(ref msg) if msg.contains("AIRTABLE_TOKEN")));
    }
}
