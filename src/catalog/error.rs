use crate::backend::ApiError;
use crate::messages;
use crate::model::ProductId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("could not load the catalog: {0}")]
    Load(#[source] ApiError),

    #[error("could not save the product: {0}")]
    Save(#[source] ApiError),

    #[error("could not change product status: {0}")]
    Status(#[source] ApiError),

    #[error("product {0} is not in the catalog")]
    UnknownProduct(ProductId),
}

impl CatalogError {
    /// The sentence shown to the operator. Save failures prefer the backend's detail.
    pub fn user_message(&self) -> String {
        match self {
            CatalogError::Save(ApiError::BadRequest { detail }) => {
                detail.clone().unwrap_or_else(|| messages::PRODUCT_EXISTS.to_string())
            }
            CatalogError::Save(ApiError::Validation { detail }) => {
                detail.clone().unwrap_or_else(|| messages::PRODUCT_VALIDATION.to_string())
            }
            CatalogError::Save(_) | CatalogError::UnknownProduct(_) => {
                messages::PRODUCT_SAVE_FAILED.to_string()
            }
            CatalogError::Load(_) => messages::PRODUCTS_LOAD_FAILED.to_string(),
            CatalogError::Status(_) => messages::PRODUCT_STATUS_FAILED.to_string(),
        }
    }
}
