//! Type-safe wrappers around [`StateClient`](console_framework::StateClient).

pub mod draft_client;

pub use draft_client::*;
