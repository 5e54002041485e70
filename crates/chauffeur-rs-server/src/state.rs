//! Shared services behind the router.

use chauffeur_rs_config::ChauffeurConfig;
use chauffeur_rs_core::{
    AirtableStore, ChauffeurError, ConfirmationService, HttpMailer, QuoteService,
    ReservationService,
};
use log::{info, warn};
use std::sync::Arc;

/// A service, or the reason it could not be configured.
///
/// Missing credentials only disable the routes that need them; the reason is
/// reported on each request to those routes.
type Configured<T> = Result<T, String>;

/// Unwrap configuration errors so the reason is not prefixed twice when it is
/// re-raised per request.
fn disabled_reason(err: ChauffeurError) -> String {
    match err {
        ChauffeurError::Configuration(reason) => reason,
        other => other.to_string(),
    }
}

pub struct AppState {
    quotes: Configured<QuoteService>,
    confirmations: Configured<ConfirmationService>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            quotes: Err("quote store is not configured".to_string()),
            confirmations: Err("mail provider is not configured".to_string()),
        }
    }
}

impl AppState {
    /// Build every service the config allows, sharing one HTTP client.
    pub fn from_config(config: &ChauffeurConfig) -> Self {
        let client = reqwest::Client::new();

        let quotes = AirtableStore::with_client(client.clone(), &config.store)
            .map(|store| QuoteService::new(Arc::new(store)))
            .map_err(disabled_reason);
        let confirmations = HttpMailer::with_client(client, &config.mail)
            .and_then(|mailer| ConfirmationService::from_config(Arc::new(mailer), &config.mail))
            .map_err(disabled_reason);

        for (name, reason) in [
            ("quotes", quotes.as_ref().err()),
            ("mail", confirmations.as_ref().err()),
        ] {
            match reason {
                Some(reason) => warn!("service disabled (service={name}, reason={reason})"),
                None => info!("service ready (service={name})"),
            }
        }
        Self {
            quotes,
            confirmations,
        }
    }

    pub fn with_quotes(mut self, quotes: QuoteService) -> Self {
        self.quotes = Ok(quotes);
        self
    }

    pub fn with_confirmations(mut self, confirmations: ConfirmationService) -> Self {
        self.confirmations = Ok(confirmations);
        self
    }

    pub fn quotes(&self) -> Result<&QuoteService, ChauffeurError> {
        self.quotes
            .as_ref()
            .map_err(|reason| ChauffeurError::Configuration(reason.clone()))
    }

    pub fn confirmations(&self) -> Result<&ConfirmationService, ChauffeurError> {
        self.confirmations
            .as_ref()
            .map_err(|reason| ChauffeurError::Configuration(reason.clone()))
    }

    /// Reservation flow over the configured services; the quote write is
    /// skipped when no store is configured.
    pub fn reservations(&self) -> Result<ReservationService, ChauffeurError> {
        let service = ReservationService::new(self.confirmations()?.clone());
        Ok(match &self.quotes {
            Ok(quotes) => service.with_quotes(quotes.clone()),
            Err(_) => service,
        })
    }
}
