use crate::error::ApiError;
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use chauffeur_rs_core::reservations::acknowledge;
use chauffeur_rs_core::{ChauffeurError, QuoteOutcome, RESERVATION_ACCEPTED};
use chauffeur_rs_protocol::{
    EmailRequest, QuotePayload, QuoteResponse, ReservationForm, ReservationResponse,
    StatusResponse,
};
use log::debug;
use serde_json::Value;
use std::sync::Arc;

type SharedState = State<Arc<AppState>>;

fn invalid_body(rejection: JsonRejection) -> ChauffeurError {
    ChauffeurError::Validation(format!("Invalid JSON body: {}", rejection.body_text()))
}

pub async fn submit_quote(
    State(state): SharedState,
    body: Result<Json<QuotePayload>, JsonRejection>,
) -> Result<Json<QuoteResponse>, ApiError> {
    let Json(payload) = body.map_err(|rejection| ApiError::Quote(invalid_body(rejection)))?;
    let service = state.quotes().map_err(ApiError::Quote)?;
    let response = match service.submit_quote(&payload).await.map_err(ApiError::Quote)? {
        QuoteOutcome::Duplicate { .. } => QuoteResponse::duplicate(),
        QuoteOutcome::Created { record_id } => QuoteResponse::created(record_id),
    };
    Ok(Json(response))
}

pub async fn send_email(
    State(state): SharedState,
    body: Result<Json<EmailRequest>, JsonRejection>,
) -> Result<Json<StatusResponse>, ApiError> {
    let Json(request) = body.map_err(|rejection| ApiError::Email(invalid_body(rejection)))?;
    state
        .confirmations()
        .map_err(ApiError::Email)?
        .send_confirmation(&request)
        .await
        .map_err(ApiError::Email)?;
    Ok(Json(StatusResponse::success("Emails sent")))
}

/// Accepts any JSON; a body that also reads as a reservation form is logged.
pub async fn acknowledge_reservation(
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<StatusResponse>, ApiError> {
    let Json(value) = body.map_err(|rejection| ApiError::Intake(rejection.body_text()))?;
    match serde_json::from_value::<ReservationForm>(value) {
        Ok(form) => acknowledge(&form),
        Err(err) => debug!("reservation body is not a form (error={err})"),
    }
    Ok(Json(StatusResponse::success(RESERVATION_ACCEPTED)))
}

pub async fn submit_reservation(
    State(state): SharedState,
    body: Result<Json<ReservationForm>, JsonRejection>,
) -> Result<Json<ReservationResponse>, ApiError> {
    let Json(form) = body.map_err(|rejection| ApiError::Reservation(invalid_body(rejection)))?;
    let receipt = state
        .reservations()
        .map_err(ApiError::Reservation)?
        .submit(&form)
        .await
        .map_err(ApiError::Reservation)?;
    Ok(Json(ReservationResponse {
        success: true,
        message: RESERVATION_ACCEPTED.to_string(),
        quote: Some(receipt.quote),
        error: None,
    }))
}

pub async fn health() -> &'static str {
    "ok"
}
