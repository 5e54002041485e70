//! Booking core for the chauffeur backend.
//!
//! Quote de-duplication against the tabular store, confirmation emails, and
//! the reservation flow that ties them together. HTTP routing lives in
//! `chauffeur-rs-server`; this crate only exposes services.

pub mod confirmation;
pub mod error;
pub mod fingerprint;
pub mod mail;
pub mod quotes;
pub mod reservations;
pub mod store;
pub mod summary;

pub use confirmation::ConfirmationService;
pub use error::ChauffeurError;
pub use fingerprint::{FingerprintInput, fingerprint};
pub use mail::{HttpMailer, MailReceipt, Mailer};
pub use quotes::{QuoteOutcome, QuoteService};
pub use reservations::{RESERVATION_ACCEPTED, ReservationReceipt, ReservationService};
pub use store::{AirtableStore, QuoteStore};
