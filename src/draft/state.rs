//! The draft value and its pure transitions.

use super::DraftError;
use crate::model::{LineItem, ProductId, Quantity};
use serde::{Deserialize, Serialize};

/// The in-progress order: line items in insertion order, one per product.
///
/// Serializes as a plain JSON array of line items, the persisted shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Draft {
    items: Vec<LineItem>,
}

/// A request to change the draft.
#[derive(Debug, Clone, PartialEq)]
pub enum DraftCommand {
    /// Merge `item.quantity` into the line for `item.id`, or append the item.
    Add(LineItem),
    SetQuantity { id: ProductId, quantity: Quantity },
    Remove(ProductId),
    Clear,
}

/// What an accepted command did.
#[derive(Debug, Clone, PartialEq)]
pub enum DraftEvent {
    Added {
        id: ProductId,
        quantity: Quantity,
        merged: bool,
    },
    QuantitySet {
        id: ProductId,
        quantity: Quantity,
    },
    Removed {
        id: ProductId,
        existed: bool,
    },
    Cleared,
}

impl Draft {
    pub fn new(items: Vec<LineItem>) -> Result<Self, DraftError> {
        let mut draft = Self::default();
        for item in items {
            draft.apply(DraftCommand::Add(item))?;
        }
        Ok(draft)
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn get(&self, id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Σ unit_price × quantity.
    pub fn total(&self) -> f64 {
        self.items.iter().map(LineItem::subtotal).sum()
    }

    /// Applies a command. On error the draft is left untouched.
    pub fn apply(&mut self, command: DraftCommand) -> Result<DraftEvent, DraftError> {
        match command {
            DraftCommand::Add(item) => match self.items.iter_mut().find(|i| i.id == item.id) {
                Some(existing) => {
                    existing.quantity = existing
                        .quantity
                        .checked_add(item.quantity)
                        .ok_or(DraftError::QuantityOverflow(item.id))?;
                    Ok(DraftEvent::Added {
                        id: item.id,
                        quantity: existing.quantity,
                        merged: true,
                    })
                }
                None => {
                    let event = DraftEvent::Added {
                        id: item.id,
                        quantity: item.quantity,
                        merged: false,
                    };
                    self.items.push(item);
                    Ok(event)
                }
            },
            DraftCommand::SetQuantity { id, quantity } => {
                let item = self
                    .items
                    .iter_mut()
                    .find(|i| i.id == id)
                    .ok_or(DraftError::NotInDraft(id))?;
                item.quantity = quantity;
                Ok(DraftEvent::QuantitySet { id, quantity })
            }
            DraftCommand::Remove(id) => {
                let before = self.items.len();
                self.items.retain(|i| i.id != id);
                Ok(DraftEvent::Removed {
                    id,
                    existed: self.items.len() != before,
                })
            }
            DraftCommand::Clear => {
                self.items.clear();
                Ok(DraftEvent::Cleared)
            }
        }
    }
}
