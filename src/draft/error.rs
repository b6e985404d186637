//! Error types for the order draft.

use crate::model::{InvalidQuantity, LineItemError, ProductId};
use thiserror::Error;

/// Why a draft command was rejected. A rejected command leaves the draft as it was.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DraftError {
    #[error(transparent)]
    InvalidQuantity(#[from] InvalidQuantity),

    /// The record handed to `add` is not a usable product.
    #[error("Invalid product: {0}")]
    InvalidProduct(#[from] LineItemError),

    #[error("Product {0} is not in the draft")]
    NotInDraft(ProductId),

    #[error("Quantity overflow for product {0}")]
    QuantityOverflow(ProductId),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
