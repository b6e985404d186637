//! # Order Draft
//!
//! The in-progress order ("cart") and the actor that owns it.
//!
//! ## Structure
//!
//! - [`state`] - [`Draft`], [`DraftCommand`], [`DraftEvent`]: pure transitions
//! - [`entity`] - [`ActorState`](console_framework::ActorState) implementation;
//!   hydration on start and persistence after every accepted command
//! - [`error`] - [`DraftError`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Invariants
//!
//! - At most one line item per product id; adding an existing product merges quantities.
//! - Every quantity is at least one; invalid input is rejected and the draft kept.
//! - A reply is sent only after the draft has been written, so the persisted copy
//!   never lags behind what callers have seen.
//! - `Clear` removes the persisted key rather than writing an empty array.
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use order_console::clients::DraftClient;
//! use order_console::draft::{self, DraftStorage};
//! use order_console::model::{LineItem, ProductId, Quantity};
//! use order_console::storage::MemoryStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, generic_client) = draft::new();
//!     let client = DraftClient::new(generic_client);
//!     tokio::spawn(actor.run(DraftStorage::new(Arc::new(MemoryStore::new()))));
//!
//!     client.add(LineItem::new(ProductId(1), "A", 10.0, Quantity::ONE)).await?;
//!     client.set_quantity(ProductId(1), 3).await?;
//!     assert_eq!(client.total().await?, 30.0);
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod error;
pub mod state;

pub use entity::*;
pub use error::*;
pub use state::*;

use console_framework::{StateActor, StateClient};

/// Creates a new Draft actor (empty until hydrated by `run`) and its client.
pub fn new() -> (StateActor<Draft>, StateClient<Draft>) {
    StateActor::new(32, Draft::default())
}
