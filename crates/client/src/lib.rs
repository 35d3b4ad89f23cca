//! Catalog client.
//!
//! Rendering and page/delete bookkeeping are pure functions of
//! [`CatalogState`]; network access sits behind [`CatalogApi`] so the whole
//! flow runs in tests without a server.

pub mod api;
pub mod controller;
pub mod model;
pub mod state;
pub mod view;

pub use api::{ApiError, CatalogApi, HttpCatalogApi};
pub use controller::{AutoConfirm, CatalogClient, Confirm, DeleteOutcome};
pub use model::{PageLinks, PageMeta, ProductPage, ProductResource};
pub use state::{CatalogState, Command, Msg, Notice};
pub use view::{render, View};
