//! Deterministic demo products for local runs and tests.

use rust_decimal::Decimal;

use crate::product::{NewProduct, Product};
use crate::store::{ProductStore, StoreError};

/// The `n`-th demo product (1-based).
pub fn demo_product(n: u32) -> NewProduct {
    NewProduct {
        name: format!("Product {n}"),
        description: format!("Demo catalog entry number {n}"),
        // 9.99, 19.99, 29.99, ...
        price: Decimal::new(i64::from(n) * 1000 - 1, 2),
        quantity: (n % 7 * 5) as i32,
        image: format!("https://picsum.photos/seed/product-{n}/320/320"),
    }
}

pub fn demo_products(count: u32) -> Vec<NewProduct> {
    (1..=count).map(demo_product).collect()
}

/// Insert `count` demo products, returning them as stored.
pub async fn seed<S>(store: &S, count: u32) -> Result<Vec<Product>, StoreError>
where
    S: ProductStore + ?Sized,
{
    let mut inserted = Vec::with_capacity(count as usize);
    for product in demo_products(count) {
        inserted.push(store.insert(product).await?);
    }
    tracing::info!(target: "catalog-db", count, "seeded demo products");
    Ok(inserted)
}
