//! Error types for the HTTP layer.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chauffeur_rs_config::ConfigError;
use chauffeur_rs_core::ChauffeurError;
use chauffeur_rs_protocol::{QuoteResponse, ReservationResponse, StatusResponse};
use log::warn;
use serde_json::json;
use std::net::SocketAddr;
use thiserror::Error;

/// Failure of a request, tagged with the response shape of its route.
#[derive(Debug, Error)]
pub enum ApiError {
    /// `{ ok: false, error }`
    #[error("quote request failed: {0}")]
    Quote(#[source] ChauffeurError),
    /// `{ success: false, message, error? }`
    #[error("email request failed: {0}")]
    Email(#[source] ChauffeurError),
    /// `{ success: false, message, error? }`
    #[error("reservation request failed: {0}")]
    Reservation(#[source] ChauffeurError),
    /// Unreadable body on the acknowledgement route.
    #[error("reservation intake failed: {0}")]
    Intake(String),
}

/// Validation failures are the caller's fault; everything else is ours.
fn status_for(err: &ChauffeurError) -> StatusCode {
    if err.is_validation() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// Client errors carry the message alone; server errors get a generic
/// message with the cause in `error`.
fn status_body(err: &ChauffeurError, generic: &str) -> StatusResponse {
    if err.is_validation() {
        StatusResponse::failure(err.to_string(), None)
    } else {
        StatusResponse::failure(generic, Some(err.to_string()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        warn!("request failed (error={self})");
        match self {
            ApiError::Quote(err) => {
                (status_for(&err), Json(QuoteResponse::failure(err.to_string()))).into_response()
            }
            ApiError::Email(err) => {
                (status_for(&err), Json(status_body(&err, "Email send failed"))).into_response()
            }
            ApiError::Reservation(err) => {
                let body = status_body(&err, "Reservation failed");
                let body = ReservationResponse {
                    success: false,
                    message: body.message,
                    quote: None,
                    error: body.error,
                };
                (status_for(&err), Json(body)).into_response()
            }
            ApiError::Intake(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Internal server error" })),
            )
                .into_response(),
        }
    }
}

/// Errors that stop the server from starting or running.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn validation_maps_to_bad_request() {
        let err = ChauffeurError::Validation("Missing required fields: email".to_string());
        assert_eq!(status_for(&err), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_body(&err, "Email send failed"),
            StatusResponse::failure("Missing required fields: email", None)
        );
    }

    #[test]
    fn upstream_maps_to_server_error_with_cause() {
        let err = ChauffeurError::Mail("provider returned 500".to_string());
        assert_eq!(status_for(&err), StatusCode::INTERNAL_SERVER_ERROR);
        let body = status_body(&err, "Email send failed");
        assert_eq!(body.message, "Email send failed");
        assert_eq!(body.error.as_deref(), Some("mail error: provider returned 500"));
    }
}
