//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the process-wide subscriber.
//!
//! Filtering follows `RUST_LOG`; the format is compact and hides module paths,
//! since every actor log line already carries a `state_type` field.
//!
//! ```bash
//! RUST_LOG=info order-console cart show
//! RUST_LOG=order_console=debug order-console checkout
//! ```
//!
//! With `debug` the full command and payload are recorded once, at the point
//! they enter the system:
//!
//! ```text
//! DEBUG Dispatch state_type="Draft" command=Add { .. }
//! INFO Applied state_type="Draft" outcome=Added { product_id: ProductId(7), quantity: 3, merged: false }
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
