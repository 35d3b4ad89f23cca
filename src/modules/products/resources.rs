//! JSON shapes returned by the products endpoints.

use rust_decimal::Decimal;
use serde::Serialize;

use catalog_db::{Page, Product, ProductId};

#[derive(Debug, Clone, Serialize)]
pub struct ProductResource {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub quantity: i32,
    pub image: String,
}

impl From<Product> for ProductResource {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            quantity: product.quantity,
            image: product.image,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PaginationLinks {
    pub first: String,
    pub last: String,
    pub prev: Option<String>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaginationMeta {
    pub current_page: u64,
    pub from: Option<u64>,
    pub last_page: u64,
    pub path: String,
    pub per_page: u64,
    pub to: Option<u64>,
    pub total: u64,
}

/// `{ data, links, meta }` envelope for one page of products.
#[derive(Debug, Clone, Serialize)]
pub struct ProductCollection {
    pub data: Vec<ProductResource>,
    pub links: PaginationLinks,
    pub meta: PaginationMeta,
}

impl ProductCollection {
    /// `path` is the listing path used to build page links.
    pub fn from_page(page: Page<Product>, path: &str) -> Self {
        let link = |n: u64| format!("{path}?page={n}");

        let links = PaginationLinks {
            first: link(1),
            last: link(page.last_page),
            prev: page.has_previous().then(|| link(page.current_page - 1)),
            next: page.has_next().then(|| link(page.current_page + 1)),
        };
        let meta = PaginationMeta {
            current_page: page.current_page,
            from: page.from(),
            last_page: page.last_page,
            path: path.to_string(),
            per_page: page.per_page,
            to: page.to(),
            total: page.total,
        };

        Self {
            data: page.items.into_iter().map(ProductResource::from).collect(),
            links,
            meta,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_db::{fixtures, PageRequest};
    use serde_json::json;

    fn page_of(count: u32, page: u64, total: u64) -> Page<Product> {
        let items = fixtures::demo_products(count)
            .into_iter()
            .zip(1..)
            .map(|(p, id)| p.into_product(ProductId(id)))
            .collect();
        Page::new(items, PageRequest::new(page, 12), total)
    }

    #[test]
    fn product_serializes_with_string_price() {
        let collection = ProductCollection::from_page(page_of(1, 1, 1), "/api/products");
        let json = serde_json::to_value(&collection.data[0]).unwrap();

        assert_eq!(
            json,
            json!({
                "id": 1,
                "name": "Product 1",
                "description": "Demo catalog entry number 1",
                "price": "9.99",
                "quantity": 5,
                "image": "https://picsum.photos/seed/product-1/320/320"
            })
        );
    }

    #[test]
    fn links_and_meta_describe_a_middle_page() {
        let collection = ProductCollection::from_page(page_of(12, 2, 30), "/api/products");
        let json = serde_json::to_value(&collection).unwrap();

        assert_eq!(json["links"]["first"], "/api/products?page=1");
        assert_eq!(json["links"]["last"], "/api/products?page=3");
        assert_eq!(json["links"]["prev"], "/api/products?page=1");
        assert_eq!(json["links"]["next"], "/api/products?page=3");
        assert_eq!(json["meta"]["from"], 13);
        assert_eq!(json["meta"]["to"], 24);
        assert_eq!(json["meta"]["per_page"], 12);
        assert_eq!(json["meta"]["path"], "/api/products");
    }

    #[test]
    fn empty_page_has_null_bounds() {
        let collection = ProductCollection::from_page(page_of(0, 4, 13), "/api/products");
        let json = serde_json::to_value(&collection).unwrap();

        assert_eq!(json["data"], json!([]));
        assert!(json["meta"]["from"].is_null());
        assert!(json["meta"]["to"].is_null());
        assert!(json["links"]["next"].is_null());
        assert_eq!(json["meta"]["last_page"], 2);
    }
}
