//! # Draft Client
//!
//! Provides a high-level API for interacting with the `Draft` actor.
//! It wraps a `StateClient<Draft>` and exposes cart operations.
use crate::draft::{Draft, DraftCommand, DraftError, DraftEvent};
use crate::model::{InvalidQuantity, LineItem, ProductId, Quantity, Record};
use async_trait::async_trait;
use console_framework::{ActorClient, FrameworkError, StateClient};
use std::fmt::Debug;
use tracing::{debug, instrument};

/// Client for interacting with the Draft actor.
#[derive(Clone)]
pub struct DraftClient {
    inner: StateClient<Draft>,
}

impl DraftClient {
    pub fn new(inner: StateClient<Draft>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Draft> for DraftClient {
    type Error = DraftError;

    fn inner(&self) -> &StateClient<Draft> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        e.downcast_entity::<DraftError>()
            .unwrap_or_else(|e| DraftError::ActorCommunicationError(e.to_string()))
    }
}

impl DraftClient {
    async fn send(&self, command: DraftCommand) -> Result<DraftEvent, DraftError> {
        debug!("Sending request");
        self.inner.dispatch(command).await.map_err(Self::map_error)
    }

    /// Add a line item, merging with an existing line for the same product.
    #[instrument(skip(self, item), fields(product_id = %item.id, quantity = %item.quantity))]
    pub async fn add(&self, item: LineItem) -> Result<DraftEvent, DraftError> {
        self.send(DraftCommand::Add(item)).await
    }

    /// Add a product record as offered by the products table.
    #[instrument(skip(self, record))]
    pub async fn add_record<Q>(&self, record: &Record, quantity: Q) -> Result<DraftEvent, DraftError>
    where
        Q: TryInto<Quantity> + Debug + Send,
        Q::Error: Into<InvalidQuantity>,
    {
        let quantity = quantity.try_into().map_err(Into::into)?;
        let item = LineItem::from_record(record, quantity)?;
        self.send(DraftCommand::Add(item)).await
    }

    /// Replace the quantity of a line.
    ///
    /// Input that is not a positive integer (`0`, `-1`, `NaN`, `2.5`, `"abc"`)
    /// is rejected with [`DraftError::InvalidQuantity`] and the draft is untouched.
    #[instrument(skip(self))]
    pub async fn set_quantity<Q>(&self, id: ProductId, quantity: Q) -> Result<DraftEvent, DraftError>
    where
        Q: TryInto<Quantity> + Debug + Send,
        Q::Error: Into<InvalidQuantity>,
    {
        let quantity = quantity.try_into().map_err(Into::into)?;
        self.send(DraftCommand::SetQuantity { id, quantity }).await
    }

    /// Remove a line. Removing an absent product is a no-op.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: ProductId) -> Result<DraftEvent, DraftError> {
        self.send(DraftCommand::Remove(id)).await
    }

    /// Empty the draft and remove its persisted copy.
    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<DraftEvent, DraftError> {
        self.send(DraftCommand::Clear).await
    }

    pub async fn items(&self) -> Result<Vec<LineItem>, DraftError> {
        Ok(self.snapshot().await?.items().to_vec())
    }

    pub async fn total(&self) -> Result<f64, DraftError> {
        Ok(self.snapshot().await?.total())
    }
}
