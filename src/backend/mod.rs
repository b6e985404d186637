//! # Backend API
//!
//! The REST backend is an external collaborator. [`BackendApi`] is the seam:
//! [`HttpBackend`] talks to the real service, `MockBackendApi` (generated by
//! `mockall`) stands in for it in tests.
//!
//! Every request carries `Authorization: Bearer <token>` when a credential is
//! stored; nothing here inspects or refreshes it.

pub mod error;
pub mod http;

pub use error::*;
pub use http::*;

use crate::checkout::CheckoutPayload;
use crate::model::{ProductForm, ProductId, Record};
use async_trait::async_trait;
use jiff::civil::Date;
use mockall::automock;

#[automock]
#[async_trait]
pub trait BackendApi: Send + Sync {
    /// Exchange username and password for an access token.
    async fn login(&self, username: String, password: String) -> Result<String, ApiError>;

    async fn list_products(&self) -> Result<Vec<Record>, ApiError>;

    async fn list_subcategories(&self) -> Result<Vec<Record>, ApiError>;

    /// Returns the stored product as the backend echoes it.
    async fn create_product(&self, form: ProductForm) -> Result<Record, ApiError>;

    async fn update_product(&self, id: ProductId, form: ProductForm) -> Result<Record, ApiError>;

    async fn set_product_active(&self, id: ProductId, active: bool) -> Result<(), ApiError>;

    /// Submit an order built from the draft. Returns the created order.
    async fn create_order(&self, payload: CheckoutPayload) -> Result<serde_json::Value, ApiError>;

    async fn list_orders(&self) -> Result<Vec<Record>, ApiError>;

    async fn get_order(&self, id: i64) -> Result<serde_json::Value, ApiError>;

    async fn update_order_status(&self, id: i64, status: String) -> Result<(), ApiError>;

    /// Reservations placed under a customer's DNI.
    async fn search_reservations(&self, dni: String) -> Result<Vec<Record>, ApiError>;

    async fn reservation_items(&self, id: i64) -> Result<Vec<Record>, ApiError>;

    async fn set_reservation_status(&self, id: i64, status: String) -> Result<(), ApiError>;

    async fn delete_reservation(&self, id: i64) -> Result<(), ApiError>;

    async fn update_delivery_date(&self, id: i64, date: Date) -> Result<(), ApiError>;
}
