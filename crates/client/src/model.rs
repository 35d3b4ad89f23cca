//! Wire types of the catalog listing endpoint.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductResource {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub quantity: i64,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub current_page: u64,
    #[serde(default)]
    pub from: Option<u64>,
    pub last_page: u64,
    #[serde(default)]
    pub path: String,
    pub per_page: u64,
    #[serde(default)]
    pub to: Option<u64>,
    pub total: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLinks {
    pub first: Option<String>,
    pub last: Option<String>,
    pub prev: Option<String>,
    pub next: Option<String>,
}

/// One page as returned by `GET /api/products?page=N`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPage {
    pub data: Vec<ProductResource>,
    #[serde(default)]
    pub links: PageLinks,
    pub meta: PageMeta,
}

/// Server-reported message carried by both success and error bodies.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct MessageBody {
    pub message: String,
}
