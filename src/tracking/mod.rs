//! # Reservation Tracking
//!
//! Looks up a customer's reservations by DNI and applies follow-up changes:
//! completing, deleting, rescheduling delivery, and listing a reservation's items.
//! [`OrderBook`] does the same for submitted orders: list, line detail, completion.

pub mod error;
pub mod orders;
pub mod service;

pub use error::*;
pub use orders::*;
pub use service::*;
