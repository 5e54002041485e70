//! Configuration model and loading for the chauffeur backend.
//!
//! Settings come from an optional JSON5 file overlaid with environment
//! variables. The resulting `ChauffeurConfig` is handed explicitly to the
//! services that need it; nothing downstream reads process state.

mod error;
mod loader;
mod model;

/// Public error type returned by config loading and validation APIs.
pub use error::ConfigError;
/// Environment variable names recognised by the overlay.
pub use loader::env;
/// Configuration schema models.
pub use model::*;
