//! Product administration: the list behind the products table and its edits.

use super::CatalogError;
use crate::backend::BackendApi;
use crate::capability::{Capabilities, ViewKind};
use crate::model::{ProductForm, ProductId, Record, Scalar};
use crate::table::{columns, Column, TableView};
use std::sync::Arc;
use tracing::{info, instrument, warn};

pub fn product_columns() -> Vec<Column> {
    columns([
        ("id", "Código"),
        ("name", "Nombre"),
        ("total_stock", "Stock Total"),
        ("unit_price", "Precio Unitario"),
        ("subcategory_id", "Subcategoría"),
        ("is_active", "Activo"),
    ])
}

fn has_id(record: &Record, id: ProductId) -> bool {
    record
        .id()
        .and_then(|v| ProductId::try_from(v).ok())
        .is_some_and(|found| found == id)
}

/// Local copy of the product list, changed only after the backend accepts a change.
pub struct ProductCatalog {
    backend: Arc<dyn BackendApi>,
    products: Vec<Record>,
    subcategories: Vec<Record>,
}

impl ProductCatalog {
    pub fn new(backend: Arc<dyn BackendApi>) -> Self {
        Self {
            backend,
            products: Vec::new(),
            subcategories: Vec::new(),
        }
    }

    pub fn products(&self) -> &[Record] {
        &self.products
    }

    pub fn subcategories(&self) -> &[Record] {
        &self.subcategories
    }

    pub fn product(&self, id: ProductId) -> Option<&Record> {
        self.products.iter().find(|r| has_id(r, id))
    }

    /// Fetches products and subcategories. On failure the previous lists are kept.
    #[instrument(skip(self))]
    pub async fn load(&mut self) -> Result<(), CatalogError> {
        let products = self.backend.list_products().await.map_err(CatalogError::Load)?;
        let subcategories = self
            .backend
            .list_subcategories()
            .await
            .map_err(CatalogError::Load)?;
        info!(products = products.len(), subcategories = subcategories.len(), "Catalog loaded");
        self.products = products;
        self.subcategories = subcategories;
        Ok(())
    }

    pub fn table(&self, capabilities: &Capabilities) -> TableView {
        TableView::new(
            self.products.clone(),
            product_columns(),
            capabilities.actions(ViewKind::Products),
        )
    }

    /// Defaults for a new product.
    pub fn new_product_form(&self) -> ProductForm {
        ProductForm::blank(&self.subcategories)
    }

    pub fn edit_form(&self, id: ProductId) -> Result<ProductForm, CatalogError> {
        self.product(id)
            .map(ProductForm::from_record)
            .ok_or(CatalogError::UnknownProduct(id))
    }

    /// Creates a product (always active) and appends the stored record.
    #[instrument(skip(self))]
    pub async fn create(&mut self, form: ProductForm) -> Result<&Record, CatalogError> {
        let form = ProductForm {
            is_active: true,
            ..form
        };
        let created = self
            .backend
            .create_product(form)
            .await
            .inspect_err(|e| warn!(error = %e, "Create rejected"))
            .map_err(CatalogError::Save)?;
        self.products.push(created);
        Ok(&self.products[self.products.len() - 1])
    }

    /// Updates a product and replaces the local record with the stored one.
    #[instrument(skip(self))]
    pub async fn update(&mut self, id: ProductId, form: ProductForm) -> Result<&Record, CatalogError> {
        let index = self
            .products
            .iter()
            .position(|r| has_id(r, id))
            .ok_or(CatalogError::UnknownProduct(id))?;
        let updated = self
            .backend
            .update_product(id, form)
            .await
            .inspect_err(|e| warn!(error = %e, "Update rejected"))
            .map_err(CatalogError::Save)?;
        self.products[index] = updated;
        Ok(&self.products[index])
    }

    /// Enables or disables a product; the local flag flips only on success.
    #[instrument(skip(self))]
    pub async fn set_active(&mut self, id: ProductId, active: bool) -> Result<(), CatalogError> {
        self.backend
            .set_product_active(id, active)
            .await
            .inspect_err(|e| warn!(error = %e, "Status change rejected"))
            .map_err(CatalogError::Status)?;
        for record in self.products.iter_mut().filter(|r| has_id(r, id)) {
            record.insert("is_active", Scalar::Bool(active));
        }
        Ok(())
    }
}
