//! Catalog service: paginated product listing and authorized deletion.

pub mod handlers;
pub mod policy;
pub mod resources;
pub mod service;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    routing::{delete, get},
    Router,
};
use serde_json::json;

use catalog_db::ProductStore;
use catalog_http::SessionStore;
use catalog_kernel::{InitCtx, Module};

use handlers::ProductsState;
use service::ProductService;

pub struct ProductsModule {
    state: ProductsState,
}

impl ProductsModule {
    pub fn new(store: Arc<dyn ProductStore>, sessions: SessionStore) -> Self {
        Self {
            state: ProductsState {
                service: Arc::new(ProductService::new(store)),
                sessions,
            },
        }
    }
}

#[async_trait]
impl Module for ProductsModule {
    fn name(&self) -> &'static str {
        "products"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "products module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", get(handlers::list_products))
            .route("/health", get(handlers::health_check))
            .route("/{product}", delete(handlers::delete_product))
            .with_state(self.state.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(openapi_fragment())
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let count = self.state.service.store().count().await?;
        tracing::info!(module = self.name(), products = count, "products module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "products module stopped");
        Ok(())
    }
}

fn error_response(description: &str) -> serde_json::Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/ErrorResponse" }
            }
        }
    })
}

fn openapi_fragment() -> serde_json::Value {
    json!({
        "paths": {
            "/": {
                "get": {
                    "summary": "List products",
                    "tags": ["Products"],
                    "parameters": [{
                        "name": "page",
                        "in": "query",
                        "required": false,
                        "description": "1-based page number; invalid values mean page 1",
                        "schema": { "type": "integer", "minimum": 1 }
                    }],
                    "responses": {
                        "200": {
                            "description": "One page of products (12 per page)",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/ProductCollection" }
                                }
                            }
                        },
                        "500": error_response("Internal server error"),
                        "503": error_response("Product store unavailable")
                    }
                }
            },
            "/health": {
                "get": {
                    "summary": "Products health check",
                    "tags": ["Products"],
                    "responses": {
                        "200": {
                            "description": "OK",
                            "content": { "text/plain": { "schema": { "type": "string" } } }
                        }
                    }
                }
            },
            "/{product}": {
                "delete": {
                    "summary": "Delete a product",
                    "description": "Requires the catalog_session cookie and a CSRF token echoed in X-XSRF-TOKEN.",
                    "tags": ["Products"],
                    "parameters": [{
                        "name": "product",
                        "in": "path",
                        "required": true,
                        "schema": { "type": "integer" }
                    }],
                    "responses": {
                        "200": {
                            "description": "Product deleted",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/MessageResponse" }
                                }
                            }
                        },
                        "400": error_response("Malformed product id"),
                        "401": error_response("No valid session"),
                        "403": error_response("Not authorized to delete this product"),
                        "404": error_response("Product not found"),
                        "419": error_response("CSRF token missing or mismatched")
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Product": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "integer" },
                        "name": { "type": "string" },
                        "description": { "type": "string" },
                        "price": { "type": "string", "description": "Decimal price, e.g. \"19.99\"" },
                        "quantity": { "type": "integer" },
                        "image": { "type": "string" }
                    },
                    "required": ["id", "name", "description", "price", "quantity", "image"]
                },
                "ProductCollection": {
                    "type": "object",
                    "properties": {
                        "data": {
                            "type": "array",
                            "items": { "$ref": "#/components/schemas/Product" }
                        },
                        "links": {
                            "type": "object",
                            "properties": {
                                "first": { "type": "string" },
                                "last": { "type": "string" },
                                "prev": { "type": "string" },
                                "next": { "type": "string" }
                            }
                        },
                        "meta": {
                            "type": "object",
                            "properties": {
                                "current_page": { "type": "integer" },
                                "from": { "type": "integer" },
                                "last_page": { "type": "integer" },
                                "path": { "type": "string" },
                                "per_page": { "type": "integer" },
                                "to": { "type": "integer" },
                                "total": { "type": "integer" }
                            }
                        }
                    },
                    "required": ["data", "links", "meta"]
                },
                "MessageResponse": {
                    "type": "object",
                    "properties": { "message": { "type": "string" } },
                    "required": ["message"]
                }
            }
        }
    })
}

pub fn create_module(store: Arc<dyn ProductStore>, sessions: SessionStore) -> Arc<dyn Module> {
    Arc::new(ProductsModule::new(store, sessions))
}
