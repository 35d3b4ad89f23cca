use std::sync::Arc;

use axum::{
    extract::{FromRef, OriginalUri, Path, Query, State},
    Json,
};
use serde::Deserialize;

use catalog_db::{PageRequest, ProductId};
use catalog_http::{csrf::CsrfVerified, AppError, CurrentIdentity, SessionStore};

use super::resources::{MessageResponse, ProductCollection};
use super::service::ProductService;

pub const DELETED_MESSAGE: &str = "Producto eliminado correctamente";

#[derive(Clone)]
pub struct ProductsState {
    pub service: Arc<ProductService>,
    pub sessions: SessionStore,
}

impl FromRef<ProductsState> for SessionStore {
    fn from_ref(state: &ProductsState) -> Self {
        state.sessions.clone()
    }
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    // Kept raw so malformed values fall back to page 1 instead of a 400.
    page: Option<String>,
}

pub async fn list_products(
    State(state): State<ProductsState>,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<ListQuery>,
) -> Result<Json<ProductCollection>, AppError> {
    let request = PageRequest::from_query(query.page.as_deref());
    let page = state.service.list(request).await?;

    tracing::info!(page = page.current_page, total = page.total, "product list served");
    Ok(Json(ProductCollection::from_page(page, uri.path())))
}

pub async fn delete_product(
    State(state): State<ProductsState>,
    CurrentIdentity(identity): CurrentIdentity,
    _csrf: CsrfVerified,
    Path(raw_id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id: ProductId = raw_id
        .parse()
        .map_err(|_| AppError::bad_request(format!("invalid product id '{raw_id}'")))?;

    state.service.delete(&identity, id).await?;
    Ok(Json(MessageResponse::new(DELETED_MESSAGE)))
}

pub async fn health_check() -> &'static str {
    "products module is healthy"
}
