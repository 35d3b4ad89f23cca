use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::pagination::{Page, PageRequest};
use crate::product::{NewProduct, Product, ProductId};
use crate::store::{ProductStore, StoreError};

#[derive(Default)]
struct Rows {
    last_id: u64,
    // Ids grow monotonically, so key order is insertion order.
    by_id: BTreeMap<ProductId, Product>,
}

#[derive(Default)]
pub struct InMemoryProductStore {
    rows: RwLock<Rows>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn page(&self, request: PageRequest) -> Result<Page<Product>, StoreError> {
        let rows = self.rows.read().await;
        let total = rows.by_id.len() as u64;
        let items = rows
            .by_id
            .values()
            .skip(usize::try_from(request.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(request.per_page()).unwrap_or(usize::MAX))
            .cloned()
            .collect();
        Ok(Page::new(items, request, total))
    }

    async fn find(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let rows = self.rows.read().await;
        Ok(rows.by_id.get(&id).cloned())
    }

    async fn insert(&self, product: NewProduct) -> Result<Product, StoreError> {
        let mut rows = self.rows.write().await;
        rows.last_id += 1;
        let product = product.into_product(ProductId(rows.last_id));
        rows.by_id.insert(product.id, product.clone());
        Ok(product)
    }

    async fn delete(&self, id: ProductId) -> Result<bool, StoreError> {
        let mut rows = self.rows.write().await;
        Ok(rows.by_id.remove(&id).is_some())
    }

    async fn count(&self) -> Result<u64, StoreError> {
        let rows = self.rows.read().await;
        Ok(rows.by_id.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::pagination::PER_PAGE;

    async fn seeded(count: u32) -> InMemoryProductStore {
        let store = InMemoryProductStore::new();
        fixtures::seed(&store, count).await.expect("seed products");
        store
    }

    #[tokio::test]
    async fn pages_hold_at_most_twelve_items_in_insertion_order() {
        let store = seeded(13).await;

        let first = store.page(PageRequest::new(1, PER_PAGE)).await.unwrap();
        assert_eq!(first.items.len(), 12);
        assert_eq!(first.last_page, 2);
        assert_eq!(first.total, 13);
        assert_eq!(first.items[0].id, ProductId(1));
        assert_eq!(first.items[11].id, ProductId(12));

        let second = store.page(PageRequest::new(2, PER_PAGE)).await.unwrap();
        assert_eq!(second.items.len(), 1);
        assert_eq!(second.items[0].id, ProductId(13));
        assert_eq!(second.current_page, 2);
    }

    #[tokio::test]
    async fn page_past_the_end_is_empty_with_valid_metadata() {
        let store = seeded(13).await;

        let page = store.page(PageRequest::new(3, PER_PAGE)).await.unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.current_page, 3);
        assert_eq!(page.last_page, 2);
        assert_eq!(page.total, 13);
    }

    #[tokio::test]
    async fn delete_removes_exactly_one_row() {
        let store = seeded(3).await;

        assert!(store.delete(ProductId(2)).await.unwrap());
        assert_eq!(store.count().await.unwrap(), 2);
        assert!(store.find(ProductId(2)).await.unwrap().is_none());
        assert!(store.find(ProductId(1)).await.unwrap().is_some());
        assert!(store.find(ProductId(3)).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn second_delete_of_same_id_reports_missing() {
        let store = seeded(1).await;

        assert!(store.delete(ProductId(1)).await.unwrap());
        assert!(!store.delete(ProductId(1)).await.unwrap());
    }

    #[tokio::test]
    async fn ids_are_never_reused() {
        let store = seeded(2).await;
        store.delete(ProductId(2)).await.unwrap();

        let again = store
            .insert(fixtures::demo_product(99))
            .await
            .expect("insert product");
        assert_eq!(again.id, ProductId(3));
    }
}
