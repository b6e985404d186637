//! # Product Catalog
//!
//! Product administration for warehouse users: listing, create/update with the
//! backend's validation messages, and enable/disable.

pub mod error;
pub mod service;

pub use error::*;
pub use service::*;
