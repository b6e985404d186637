use crate::backend::ApiError;
use crate::messages;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackingError {
    #[error("no reservation for that DNI")]
    NotFound,

    #[error("reservation search failed: {0}")]
    Search(#[source] ApiError),

    #[error("status change failed: {0}")]
    StatusChange(#[source] ApiError),

    #[error("delete failed: {0}")]
    Delete(#[source] ApiError),

    #[error("delivery date update failed: {0}")]
    DeliveryDate(#[source] ApiError),

    #[error("could not load reservation items: {0}")]
    Items(#[source] ApiError),

    #[error("could not load orders: {0}")]
    Orders(#[source] ApiError),

    #[error("could not load order {id}: {source}")]
    OrderDetail {
        id: i64,
        #[source]
        source: ApiError,
    },

    #[error("order {0} is not a JSON object")]
    MalformedOrder(i64),

    #[error("order status change failed: {0}")]
    OrderStatus(#[source] ApiError),
}

impl TrackingError {
    pub fn user_message(&self) -> String {
        match self {
            TrackingError::NotFound => messages::RESERVATION_NOT_FOUND.to_string(),
            TrackingError::Search(_) => messages::RESERVATION_SEARCH_FAILED.to_string(),
            TrackingError::StatusChange(_) => messages::RESERVATION_STATUS_FAILED.to_string(),
            TrackingError::Delete(e) => e
                .detail()
                .map(str::to_string)
                .unwrap_or_else(|| messages::RESERVATION_DELETE_FAILED.to_string()),
            TrackingError::DeliveryDate(_) => messages::DELIVERY_DATE_FAILED.to_string(),
            TrackingError::Items(_) => messages::RESERVATION_ITEMS_FAILED.to_string(),
            TrackingError::Orders(_) => messages::ORDERS_LOAD_FAILED.to_string(),
            TrackingError::OrderDetail { .. } | TrackingError::MalformedOrder(_) => {
                messages::ORDER_DETAIL_FAILED.to_string()
            }
            TrackingError::OrderStatus(_) => messages::ORDER_STATUS_FAILED.to_string(),
        }
    }
}
