//! # Observability & Tracing
//!
//! Tracing setup shared by every binary and test harness built on the
//! session runtime.
//!
//! The subscriber uses a compact format and hides the crate/module prefix
//! (`with_target(false)`); the actors already log an `entity_type` field,
//! which keeps log lines short while staying filterable.
//!
//! ```bash
//! RUST_LOG=info cargo run      # Compact logs
//! RUST_LOG=debug cargo run     # Full command payloads
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Don't show module paths - we use entity_type instead
        .compact()
        .init();
}
