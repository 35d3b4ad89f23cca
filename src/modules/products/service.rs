use std::sync::Arc;

use thiserror::Error;

use catalog_authz::{authorize, Action, Denied, Identity};
use catalog_db::{Page, PageRequest, Product, ProductId, ProductStore, StoreError};
use catalog_http::AppError;

use super::policy::product_policy;

pub const DENIED_MESSAGE: &str = "No autorizado";

#[derive(Debug, Error)]
pub enum ProductServiceError {
    #[error("product {0} not found")]
    NotFound(ProductId),
    #[error(transparent)]
    Forbidden(#[from] Denied),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<ProductServiceError> for AppError {
    fn from(err: ProductServiceError) -> Self {
        match err {
            ProductServiceError::NotFound(_) => AppError::not_found("Product not found."),
            ProductServiceError::Forbidden(_) => AppError::forbidden(DENIED_MESSAGE),
            ProductServiceError::Store(StoreError::Unavailable(_)) => {
                AppError::unavailable("The catalog is temporarily unavailable.")
            }
            ProductServiceError::Store(err @ StoreError::Internal(_)) => {
                AppError::Internal(anyhow::Error::new(err))
            }
        }
    }
}

/// List and delete operations over the product store.
///
/// Stateless between calls; the acting identity is an explicit argument.
pub struct ProductService {
    store: Arc<dyn ProductStore>,
}

impl ProductService {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn ProductStore> {
        &self.store
    }

    pub async fn list(&self, request: PageRequest) -> Result<Page<Product>, ProductServiceError> {
        let page = self.store.page(request).await?;
        tracing::debug!(
            page = page.current_page,
            items = page.items.len(),
            total = page.total,
            "listed products"
        );
        Ok(page)
    }

    /// Authorize then delete. A denied identity never reaches the store's
    /// delete; a row that vanished after the check reports `NotFound`.
    pub async fn delete(
        &self,
        identity: &Identity,
        id: ProductId,
    ) -> Result<Product, ProductServiceError> {
        let product = self
            .store
            .find(id)
            .await?
            .ok_or(ProductServiceError::NotFound(id))?;

        if let Err(denied) = authorize(&product_policy, identity, Action::Delete, &product) {
            tracing::warn!(
                product_id = %id,
                user_id = identity.user_id(),
                "product deletion denied"
            );
            return Err(denied.into());
        }

        if !self.store.delete(id).await? {
            return Err(ProductServiceError::NotFound(id));
        }

        tracing::info!(
            product_id = %id,
            user_id = identity.user_id(),
            "product deleted"
        );
        Ok(product)
    }
}
