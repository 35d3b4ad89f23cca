use async_trait::async_trait;
use thiserror::Error;

use crate::pagination::{Page, PageRequest};
use crate::product::{NewProduct, Product, ProductId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backing store cannot be reached right now; retrying may succeed.
    #[error("product store unavailable: {0}")]
    Unavailable(String),
    #[error("product store failure: {0}")]
    Internal(String),
}

/// Product persistence, in insertion order.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn page(&self, request: PageRequest) -> Result<Page<Product>, StoreError>;

    async fn find(&self, id: ProductId) -> Result<Option<Product>, StoreError>;

    async fn insert(&self, product: NewProduct) -> Result<Product, StoreError>;

    /// Remove the row; `false` when it was already gone.
    async fn delete(&self, id: ProductId) -> Result<bool, StoreError>;

    async fn count(&self) -> Result<u64, StoreError>;
}
