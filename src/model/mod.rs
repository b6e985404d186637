//! # Domain Model
//!
//! Pure data shared by every component:
//!
//! - [`Scalar`] / [`Record`] - the opaque rows the backend hands out.
//! - [`LineItem`] / [`Quantity`] - what the order draft is made of.
//! - [`ProductId`] - identity of a product across records and line items.

pub mod line_item;
pub mod product;
pub mod record;

pub use line_item::*;
pub use product::*;
pub use record::*;
