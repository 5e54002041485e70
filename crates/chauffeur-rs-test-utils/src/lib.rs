//! Test helpers shared across chauffeur crates.

pub mod fixtures;
pub mod mail;
pub mod store;

pub use fixtures::{sample_form, sample_payload};
pub use mail::{FailingMailer, RecordingMailer};
pub use store::StubStore;
