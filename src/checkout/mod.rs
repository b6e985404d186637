//! # Checkout
//!
//! Converts the order draft into a backend order.
//!
//! - [`payload`] - [`CheckoutPayload`]: the `POST orders/` body
//! - [`form`] - [`CheckoutForm`]: extra fields collected before submitting
//! - [`orchestrator`] - [`CheckoutOrchestrator`]: submission, guard, and result handling
//! - [`error`] - [`CheckoutError`] and the 422 / generic [`FailureKind`] split

pub mod error;
pub mod form;
pub mod orchestrator;
pub mod payload;

pub use error::*;
pub use form::*;
pub use orchestrator::*;
pub use payload::*;
