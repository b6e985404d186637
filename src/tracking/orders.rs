//! Submitted orders: listing, line detail and completion.

use super::service::{reservation_item_columns, with_product_names};
use super::TrackingError;
use crate::backend::BackendApi;
use crate::capability::{Capabilities, ViewKind};
use crate::messages;
use crate::model::Record;
use crate::notify::Notifier;
use crate::table::{columns, Column, TableView};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Status an order is moved to by the "complete" action.
pub const ORDER_COMPLETED: &str = "completada";

pub fn order_columns() -> Vec<Column> {
    columns([
        ("id", "ID de Pedido"),
        ("client_dni", "DNI del Cliente"),
        ("order_status", "Estado"),
        ("delivery_date", "Fecha de Entrega"),
    ])
}

/// One order with its lines.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderView {
    /// Top-level fields only; `order_details` is moved to `lines`.
    pub order: Record,
    /// Each line with a `product_name`.
    pub lines: Vec<Record>,
}

pub struct OrderBook {
    backend: Arc<dyn BackendApi>,
    notifier: Notifier,
    orders: Vec<Record>,
}

impl OrderBook {
    pub fn new(backend: Arc<dyn BackendApi>, notifier: Notifier) -> Self {
        Self {
            backend,
            notifier,
            orders: Vec::new(),
        }
    }

    pub fn orders(&self) -> &[Record] {
        &self.orders
    }

    /// Fetches every order. On failure the previous list is kept.
    #[instrument(skip(self))]
    pub async fn load(&mut self) -> Result<&[Record], TrackingError> {
        let orders = self.backend.list_orders().await.map_err(|e| {
            warn!(error = %e, "Order list failed");
            TrackingError::Orders(e)
        })?;
        info!(count = orders.len(), "Orders loaded");
        self.orders = orders;
        Ok(self.orders.as_slice())
    }

    /// One order and its lines, named from the product catalog.
    #[instrument(skip(self))]
    pub async fn detail(&self, id: i64) -> Result<OrderView, TrackingError> {
        let mut raw = self
            .backend
            .get_order(id)
            .await
            .map_err(|source| TrackingError::OrderDetail { id, source })?;

        let Some(fields) = raw.as_object_mut() else {
            return Err(TrackingError::MalformedOrder(id));
        };
        let lines: Vec<Record> = match fields.remove("order_details") {
            Some(Value::Array(lines)) => lines
                .into_iter()
                .filter_map(|line| serde_json::from_value(line).ok())
                .collect(),
            _ => Vec::new(),
        };
        let order: Record = serde_json::from_value(raw).map_err(|_| TrackingError::MalformedOrder(id))?;

        let products = self
            .backend
            .list_products()
            .await
            .map_err(|source| TrackingError::OrderDetail { id, source })?;

        Ok(OrderView {
            order,
            lines: with_product_names(lines, &products),
        })
    }

    /// Marks an order as completed, then reloads the list.
    #[instrument(skip(self))]
    pub async fn complete(&mut self, id: i64) -> Result<(), TrackingError> {
        if let Err(e) = self
            .backend
            .update_order_status(id, ORDER_COMPLETED.to_string())
            .await
        {
            let err = TrackingError::OrderStatus(e);
            self.notifier.error(err.user_message());
            return Err(err);
        }
        self.notifier.success(messages::ORDER_STATUS_UPDATED);
        if let Err(e) = self.load().await {
            warn!(error = %e, "Reload after change failed");
        }
        Ok(())
    }

    pub fn table(&self, capabilities: &Capabilities) -> TableView {
        TableView::new(
            self.orders.clone(),
            order_columns(),
            capabilities.actions(ViewKind::Orders),
        )
    }

    pub fn lines_table(view: &OrderView, capabilities: &Capabilities) -> TableView {
        TableView::new(
            view.lines.clone(),
            reservation_item_columns(),
            capabilities.actions(ViewKind::OrderLines),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{ApiError, MockBackendApi};
    use crate::capability::Role;
    use crate::model::Scalar;
    use crate::notify::NotificationKind;
    use crate::table::ActionKind;
    use mockall::predicate::eq;
    use mockall::Sequence;
    use serde_json::json;

    fn order(id: i64, status: &str) -> Record {
        Record::new()
            .with("id", id)
            .with("client_dni", "44556677")
            .with("order_status", status)
    }

    fn book(backend: MockBackendApi) -> (OrderBook, Notifier) {
        let notifier = Notifier::new(Default::default());
        (OrderBook::new(Arc::new(backend), notifier.clone()), notifier)
    }

    #[tokio::test]
    async fn test_failed_load_keeps_previous_list() {
        let mut backend = MockBackendApi::new();
        let mut seq = Sequence::new();
        backend
            .expect_list_orders()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(vec![order(1, "pendiente"), order(2, "pendiente")]));
        backend
            .expect_list_orders()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Err(ApiError::Status { status: 500, detail: None }));

        let (mut book, _) = book(backend);
        assert_eq!(book.load().await.unwrap().len(), 2);

        let err = book.load().await.unwrap_err();
        assert_eq!(err.user_message(), messages::ORDERS_LOAD_FAILED);
        assert_eq!(book.orders().len(), 2);
    }

    #[tokio::test]
    async fn test_detail_splits_lines_and_names_products() {
        let mut backend = MockBackendApi::new();
        backend.expect_get_order().with(eq(9)).returning(|_| {
            Ok(json!({
                "id": 9,
                "order_status": "pendiente",
                "delivery_date": "2026-10-16",
                "order_details": [
                    { "product_code": 1, "quantity": 2 },
                    { "product_code": 404, "quantity": 1 }
                ]
            }))
        });
        backend.expect_list_products().returning(|| {
            Ok(vec![Record::new().with("id", 1).with("name", "Tornillo")])
        });

        let (book, _) = book(backend);
        let view = book.detail(9).await.unwrap();

        assert_eq!(view.order.get("order_status"), Some(&Scalar::from("pendiente")));
        assert!(view.order.get("order_details").is_none());
        assert_eq!(view.lines.len(), 2);
        assert_eq!(view.lines[0].get("product_name"), Some(&Scalar::from("Tornillo")));
        assert_eq!(
            view.lines[1].get("product_name"),
            Some(&Scalar::from(messages::NAME_NOT_FOUND))
        );

        let rendered = OrderBook::lines_table(&view, &Capabilities::for_role(Role::Local)).render();
        assert_eq!(rendered.row_count(), 2);
        assert!(!rendered.has_actions_column());
    }

    #[tokio::test]
    async fn test_detail_of_non_object_is_malformed() {
        let mut backend = MockBackendApi::new();
        backend.expect_get_order().returning(|_| Ok(json!([1, 2])));
        backend.expect_list_products().never();

        let (book, _) = book(backend);
        let err = book.detail(3).await.unwrap_err();
        assert!(matches!(err, TrackingError::MalformedOrder(3)));
        assert_eq!(err.user_message(), messages::ORDER_DETAIL_FAILED);
    }

    #[tokio::test]
    async fn test_complete_patches_status_and_reloads() {
        let mut backend = MockBackendApi::new();
        let mut seq = Sequence::new();
        backend
            .expect_update_order_status()
            .with(eq(4), eq("completada".to_string()))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        backend
            .expect_list_orders()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(vec![order(4, "completada")]));

        let (mut book, notifier) = book(backend);
        book.complete(4).await.unwrap();

        assert_eq!(book.orders()[0].get("order_status"), Some(&Scalar::from("completada")));
        let shown = notifier.current().unwrap();
        assert_eq!(shown.kind, NotificationKind::Success);
        assert_eq!(shown.message, messages::ORDER_STATUS_UPDATED);

        let table = book.table(&Capabilities::for_role(Role::Almacen));
        assert!(table.invoke(0, ActionKind::ChangeStatus).is_ok());
    }

    #[tokio::test]
    async fn test_failed_completion_notifies_and_skips_reload() {
        let mut backend = MockBackendApi::new();
        backend
            .expect_update_order_status()
            .returning(|_, _| Err(ApiError::Status { status: 500, detail: None }));
        backend.expect_list_orders().never();

        let (mut book, notifier) = book(backend);
        let err = book.complete(4).await.unwrap_err();
        assert!(matches!(err, TrackingError::OrderStatus(_)));
        assert_eq!(notifier.current().unwrap().message, messages::ORDER_STATUS_FAILED);
    }
}
