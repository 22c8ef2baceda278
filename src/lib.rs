//! labtriage: rule-driven lab report analysis.
//!
//! Takes raw OCR-extracted text from a medical document and produces a
//! structured assessment: detected parameters, normal-range classification,
//! severity tiers, and plain-language recommendations. The engine is a pure
//! computation; OCR, storage, and transport live with the caller.

pub mod analysis;
pub mod config;
pub mod rules;

use tracing_subscriber::EnvFilter;

/// Initialize tracing for binaries and integration harnesses embedding the
/// engine. Respects `RUST_LOG`, falling back to the crate default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("labtriage v{}", config::APP_VERSION);
}
