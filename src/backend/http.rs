//! reqwest implementation of [`BackendApi`].

use super::{ApiError, BackendApi};
use crate::checkout::CheckoutPayload;
use crate::model::{ProductForm, ProductId, Record};
use crate::storage::{KeyValueStore, CREDENTIAL_KEY};
use async_trait::async_trait;
use jiff::civil::Date;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// HTTP client for the console backend.
///
/// The bearer token is read from the credential store on every request, so a
/// login or logout takes effect immediately.
#[derive(Clone)]
pub struct HttpBackend {
    http: Client,
    base_url: String,
    credentials: Arc<dyn KeyValueStore>,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>, credentials: Arc<dyn KeyValueStore>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self {
            http: Client::new(),
            base_url,
            credentials,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.credentials.get(CREDENTIAL_KEY) {
            Ok(Some(token)) => request.bearer_auth(token),
            Ok(None) => request,
            Err(e) => {
                warn!(error = %e, "Could not read credential");
                request
            }
        }
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = self.authorize(request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            debug!(%status, body = %text, "Request failed");
            return Err(ApiError::from_response(status.as_u16(), &text));
        }

        Ok(response)
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        Ok(self.execute(request).await?.json().await?)
    }
}

#[async_trait]
impl BackendApi for HttpBackend {
    #[instrument(skip(self, password))]
    async fn login(&self, username: String, password: String) -> Result<String, ApiError> {
        // Sent without a bearer header; a stale token must not interfere.
        let response = self
            .http
            .post(self.url("auth/"))
            .form(&[
                ("grant_type", "password"),
                ("username", username.as_str()),
                ("password", password.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(ApiError::from_response(status.as_u16(), &text));
        }

        let token: TokenResponse = response.json().await?;
        Ok(token.access_token)
    }

    #[instrument(skip(self))]
    async fn list_products(&self) -> Result<Vec<Record>, ApiError> {
        self.fetch(self.http.get(self.url("products/"))).await
    }

    #[instrument(skip(self))]
    async fn list_subcategories(&self) -> Result<Vec<Record>, ApiError> {
        self.fetch(self.http.get(self.url("subcategories/"))).await
    }

    #[instrument(skip(self))]
    async fn create_product(&self, form: ProductForm) -> Result<Record, ApiError> {
        self.fetch(self.http.post(self.url("products/")).json(&form))
            .await
    }

    #[instrument(skip(self))]
    async fn update_product(&self, id: ProductId, form: ProductForm) -> Result<Record, ApiError> {
        let body = json!({
            "name": form.name,
            "total_stock": form.total_stock,
            "unit_price": form.unit_price,
            "subcategory_id": form.subcategory_id,
        });
        self.fetch(self.http.put(self.url(&format!("products/{id}/"))).json(&body))
            .await
    }

    #[instrument(skip(self))]
    async fn set_product_active(&self, id: ProductId, active: bool) -> Result<(), ApiError> {
        let request = self
            .http
            .patch(self.url(&format!("products/{id}/")))
            .json(&json!({ "is_active": active }));
        self.execute(request).await.map(drop)
    }

    #[instrument(skip(self, payload), fields(lines = payload.order_details.len()))]
    async fn create_order(&self, payload: CheckoutPayload) -> Result<serde_json::Value, ApiError> {
        debug!(?payload, "Submitting order");
        self.fetch(self.http.post(self.url("orders/")).json(&payload))
            .await
    }

    #[instrument(skip(self))]
    async fn list_orders(&self) -> Result<Vec<Record>, ApiError> {
        self.fetch(self.http.get(self.url("orders/"))).await
    }

    #[instrument(skip(self))]
    async fn get_order(&self, id: i64) -> Result<serde_json::Value, ApiError> {
        self.fetch(self.http.get(self.url(&format!("orders/{id}"))))
            .await
    }

    #[instrument(skip(self))]
    async fn update_order_status(&self, id: i64, status: String) -> Result<(), ApiError> {
        let request = self
            .http
            .patch(self.url(&format!("orders/{id}/")))
            .json(&json!({ "status": status }));
        self.execute(request).await.map(drop)
    }

    #[instrument(skip(self, dni))]
    async fn search_reservations(&self, dni: String) -> Result<Vec<Record>, ApiError> {
        self.fetch(self.http.get(self.url(&format!("reservation/{dni}"))))
            .await
    }

    #[instrument(skip(self))]
    async fn reservation_items(&self, id: i64) -> Result<Vec<Record>, ApiError> {
        self.fetch(self.http.get(self.url(&format!("reservation/{id}/items"))))
            .await
    }

    #[instrument(skip(self))]
    async fn set_reservation_status(&self, id: i64, status: String) -> Result<(), ApiError> {
        let request = self
            .http
            .patch(self.url(&format!("reservation/{id}")))
            .json(&json!({ "status": status }));
        self.execute(request).await.map(drop)
    }

    #[instrument(skip(self))]
    async fn delete_reservation(&self, id: i64) -> Result<(), ApiError> {
        self.execute(self.http.delete(self.url(&format!("reservation/{id}"))))
            .await
            .map(drop)
    }

    #[instrument(skip(self))]
    async fn update_delivery_date(&self, id: i64, date: Date) -> Result<(), ApiError> {
        let request = self
            .http
            .patch(self.url(&format!("reservation/{id}/delivery_date")))
            .json(&json!({ "delivery_date": date.to_string() }));
        self.execute(request).await.map(drop)
    }
}
