//! Persistence seam for the catalog.
//!
//! The service only talks to [`ProductStore`]; the in-memory adapter backs
//! local runs and tests.

pub mod fixtures;
pub mod memory;
pub mod pagination;
pub mod product;
pub mod store;

pub use memory::InMemoryProductStore;
pub use pagination::{Page, PageRequest, PER_PAGE};
pub use product::{NewProduct, Product, ProductId};
pub use store::{ProductStore, StoreError};
