//! Public surface for the chauffeur booking backend.
//!
//! Re-exports the building blocks and provides a logging initializer so the
//! binary and embedders set up the same way.

/// Re-export for convenience.
pub use chauffeur_rs_config as config;
pub use chauffeur_rs_core as core;
/// Re-export for convenience.
pub use chauffeur_rs_protocol as protocol;
pub use chauffeur_rs_server as server;

/// Initialize env_logger with `info` as the default filter.
///
/// `RUST_LOG` overrides the default. Calling this more than once is harmless.
pub fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("info");
    let _ = env_logger::Builder::from_env(env).try_init();
}
