//! Reservation lookup by customer DNI and the follow-up actions on a result.

use super::TrackingError;
use crate::backend::{ApiError, BackendApi};
use crate::capability::{Capabilities, ViewKind};
use crate::messages;
use crate::model::{ProductId, Record, Scalar};
use crate::notify::Notifier;
use crate::table::{columns, Column, TableView};
use jiff::civil::Date;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Status a reservation is moved to by the "complete" action.
pub const RESERVATION_COMPLETED: &str = "completada";

pub fn reservation_columns() -> Vec<Column> {
    columns([
        ("id", "ID de Reserva"),
        ("client_dni", "DNI del Cliente"),
        ("reservation_status", "Estado"),
        ("payment_date", "Fecha de Pago"),
        ("delivery_date", "Fecha de Entrega"),
    ])
}

pub fn reservation_item_columns() -> Vec<Column> {
    columns([
        ("product_code", "Código"),
        ("product_name", "Producto"),
        ("quantity", "Cantidad"),
    ])
}

/// Adds `product_name` to every line, looked up by `product_code` in `products`.
pub(crate) fn with_product_names(lines: Vec<Record>, products: &[Record]) -> Vec<Record> {
    let names: HashMap<ProductId, String> = products
        .iter()
        .filter_map(|p| {
            let id = ProductId::try_from(p.id()?).ok()?;
            let name = p.get("name")?.as_str()?.to_string();
            Some((id, name))
        })
        .collect();

    lines
        .into_iter()
        .map(|mut line| {
            let name = line
                .get("product_code")
                .and_then(|code| ProductId::try_from(code).ok())
                .and_then(|code| names.get(&code).cloned())
                .unwrap_or_else(|| messages::NAME_NOT_FOUND.to_string());
            line.insert("product_name", Scalar::Text(name));
            line
        })
        .collect()
}

pub struct ReservationTracker {
    backend: Arc<dyn BackendApi>,
    notifier: Notifier,
    dni: Option<String>,
    reservations: Vec<Record>,
}

impl ReservationTracker {
    pub fn new(backend: Arc<dyn BackendApi>, notifier: Notifier) -> Self {
        Self {
            backend,
            notifier,
            dni: None,
            reservations: Vec::new(),
        }
    }

    pub fn reservations(&self) -> &[Record] {
        &self.reservations
    }

    pub fn dni(&self) -> Option<&str> {
        self.dni.as_deref()
    }

    /// Searches reservations by DNI. Previous results are cleared first and stay
    /// cleared on failure.
    #[instrument(skip(self))]
    pub async fn search(&mut self, dni: &str) -> Result<&[Record], TrackingError> {
        self.dni = Some(dni.trim().to_string());
        self.reservations.clear();

        match self.backend.search_reservations(dni.trim().to_string()).await {
            Ok(found) => {
                info!(count = found.len(), "Reservations found");
                self.reservations = found;
                Ok(self.reservations.as_slice())
            }
            Err(ApiError::NotFound) => Err(TrackingError::NotFound),
            Err(e) => {
                warn!(error = %e, "Reservation search failed");
                Err(TrackingError::Search(e))
            }
        }
    }

    /// Re-runs the last search, if any.
    async fn refresh(&mut self) {
        if let Some(dni) = self.dni.clone() {
            if let Err(e) = self.search(&dni).await {
                warn!(error = %e, "Refresh after change failed");
            }
        }
    }

    /// Marks a reservation as completed, then refreshes the results.
    #[instrument(skip(self))]
    pub async fn complete(&mut self, id: i64) -> Result<(), TrackingError> {
        match self
            .backend
            .set_reservation_status(id, RESERVATION_COMPLETED.to_string())
            .await
        {
            Ok(()) => {
                self.notifier.success(messages::RESERVATION_STATUS_UPDATED);
                self.refresh().await;
                Ok(())
            }
            Err(e) => {
                let err = TrackingError::StatusChange(e);
                self.notifier.error(err.user_message());
                Err(err)
            }
        }
    }

    /// Deletes a reservation, then refreshes the results.
    #[instrument(skip(self))]
    pub async fn delete(&mut self, id: i64) -> Result<(), TrackingError> {
        if let Err(e) = self.backend.delete_reservation(id).await {
            let err = TrackingError::Delete(e);
            self.notifier.error(err.user_message());
            return Err(err);
        }
        self.refresh().await;
        Ok(())
    }

    /// Changes the delivery date. Results are refreshed whether or not it worked.
    #[instrument(skip(self))]
    pub async fn update_delivery_date(&mut self, id: i64, date: Date) -> Result<(), TrackingError> {
        let result = self.backend.update_delivery_date(id, date).await;
        let outcome = match result {
            Ok(()) => {
                self.notifier.success(messages::DELIVERY_DATE_UPDATED);
                Ok(())
            }
            Err(e) => {
                let err = TrackingError::DeliveryDate(e);
                self.notifier.error(err.user_message());
                Err(err)
            }
        };
        self.refresh().await;
        outcome
    }

    /// Items of a reservation, each with a `product_name` looked up in the catalog.
    #[instrument(skip(self))]
    pub async fn items(&self, id: i64) -> Result<Vec<Record>, TrackingError> {
        let items = self
            .backend
            .reservation_items(id)
            .await
            .map_err(TrackingError::Items)?;
        let products = self.backend.list_products().await.map_err(TrackingError::Items)?;
        Ok(with_product_names(items, &products))
    }

    pub fn table(&self, capabilities: &Capabilities) -> TableView {
        TableView::new(
            self.reservations.clone(),
            reservation_columns(),
            capabilities.actions(ViewKind::Reservations),
        )
    }

    pub fn items_table(items: Vec<Record>, capabilities: &Capabilities) -> TableView {
        TableView::new(
            items,
            reservation_item_columns(),
            capabilities.actions(ViewKind::ReservationItems),
        )
    }
}
